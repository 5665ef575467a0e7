#![deny(clippy::all)]

pub mod algorithm;
pub mod city;
pub mod config;
pub mod distance;
pub mod dp;
pub mod error;
pub mod step;
pub mod subset;

pub use algorithm::Algorithm;
pub use city::City;
pub use config::{SolverConfig, HELD_KARP_HARD_LIMIT};
pub use distance::DistanceMatrix;
pub use dp::{DpEntry, DpRecord, DpTable, DpTableView};
pub use error::{Error, Result};
pub use step::{HighlightedCell, Step, StepKind, StepRecorder, Trace};
pub use subset::{SubsetCodec, SubsetMask};
