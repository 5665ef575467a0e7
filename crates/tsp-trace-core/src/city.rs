use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CITY_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A point the salesperson has to visit. Only `x`/`y` feed the distance
/// matrix; `id` and `name` are carried through for the viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: u32, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id, name: name.into(), x, y }
    }

    /// City named after its position in the label alphabet (A, B, ..., Z, then A1, B1, ...).
    pub fn labelled(index: usize, x: f64, y: f64) -> Self {
        Self::new(index as u32, Self::label_for(index), x, y)
    }

    pub fn label_for(index: usize) -> String {
        let alphabet = CITY_LABELS.as_bytes();
        let letter = alphabet[index % alphabet.len()] as char;
        match index / alphabet.len() {
            0 => letter.to_string(),
            round => format!("{letter}{round}"),
        }
    }

    pub fn sample_four() -> Vec<City> {
        vec![
            City::labelled(0, 100.0, 100.0),
            City::labelled(1, 300.0, 150.0),
            City::labelled(2, 250.0, 350.0),
            City::labelled(3, 50.0, 250.0),
        ]
    }

    pub fn sample_five() -> Vec<City> {
        vec![
            City::labelled(0, 100.0, 200.0),
            City::labelled(1, 400.0, 100.0),
            City::labelled(2, 500.0, 300.0),
            City::labelled(3, 350.0, 450.0),
            City::labelled(4, 150.0, 400.0),
        ]
    }

    /// Parses a JSON array of `{id, name, x, y}` objects and checks it with
    /// [`City::validate_list`].
    pub fn list_from_json(json: &str) -> Result<Vec<City>> {
        let cities: Vec<City> = serde_json::from_str(json)?;
        City::validate_list(&cities)?;
        Ok(cities)
    }

    /// Rejects duplicate ids, duplicate names and non-finite coordinates. The
    /// solvers never check these; names must be unique because DP subset keys
    /// are built from them.
    pub fn validate_list(cities: &[City]) -> Result<()> {
        let mut ids = HashSet::with_capacity(cities.len());
        let mut names = HashSet::with_capacity(cities.len());
        for city in cities {
            if !ids.insert(city.id) {
                return Err(Error::invalid_input(format!("duplicate city id {}", city.id)));
            }
            if !names.insert(city.name.as_str()) {
                return Err(Error::invalid_input(format!("duplicate city name {}", city.name)));
            }
            if !city.x.is_finite() || !city.y.is_finite() {
                return Err(Error::invalid_input(format!("city {} has non-finite coordinates", city.name)));
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
