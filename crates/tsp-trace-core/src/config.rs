use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Largest input the exact solver will ever accept, whatever the config says.
/// Held-Karp records O(n^2 * 2^n) steps, so the trace itself stops fitting in
/// memory well before the arithmetic gets slow.
pub const HELD_KARP_HARD_LIMIT: usize = 16;

const DEFAULT_HELD_KARP_MAX_CITIES: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SolverConfig {
    pub held_karp_max_cities: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { held_karp_max_cities: DEFAULT_HELD_KARP_MAX_CITIES }
    }
}

impl SolverConfig {
    pub fn with_held_karp_max_cities(mut self, limit: usize) -> Self {
        self.held_karp_max_cities = limit;
        self
    }

    /// The size guard actually applied by the exact solver.
    pub fn held_karp_limit(&self) -> usize {
        self.held_karp_max_cities.min(HELD_KARP_HARD_LIMIT)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        if config.held_karp_max_cities > HELD_KARP_HARD_LIMIT {
            log::warn!(
                "heldKarpMaxCities={} exceeds the hard limit, clamping to {HELD_KARP_HARD_LIMIT}",
                config.held_karp_max_cities
            );
        }
        Ok(config)
    }
}
