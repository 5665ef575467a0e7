use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    HeldKarp,
    NearestNeighbor,
}

impl Algorithm {
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::HeldKarp => "held-karp",
            Algorithm::NearestNeighbor => "nearest-neighbor",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::HeldKarp => f.write_str("Held-Karp (DP)"),
            Algorithm::NearestNeighbor => f.write_str("Nearest Neighbor"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "heldkarp" | "heldkarpdp" | "dp" => Ok(Algorithm::HeldKarp),
            "nearestneighbor" | "nearestneighbour" | "nn" => Ok(Algorithm::NearestNeighbor),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}
