#![deny(clippy::all)]

use napi::{Error, Result};
use napi_derive::napi;
use serde_json::Value;
use tsp_trace_core::{Algorithm, City, SolverConfig, Trace};

mod models;

use models::{into_cities, JsCity};

// Steps go out through serde so the JS side sees exactly the camelCase
// schema the visualizer already consumes.
fn to_js(trace: &Trace) -> Result<Value> {
    serde_json::to_value(trace).map_err(|e| Error::from_reason(format!("failed to serialize trace: {e}")))
}

#[napi]
pub fn generate_held_karp_steps(cities: Vec<JsCity>) -> Result<Value> {
    to_js(&tsp_trace_held_karp::generate_steps(&into_cities(cities)?))
}

#[napi]
pub fn generate_nearest_neighbor_steps(cities: Vec<JsCity>) -> Result<Value> {
    to_js(&tsp_trace_nearest_neighbor::generate_steps(&into_cities(cities)?))
}

/// `algorithm` accepts the slugs (`held-karp`, `nearest-neighbor`) as well as
/// the display labels used in the UI dropdown.
#[napi]
pub fn generate_steps(cities: Vec<JsCity>, algorithm: String) -> Result<Value> {
    let algorithm = algorithm.parse::<Algorithm>().map_err(|e| Error::from_reason(e.to_string()))?;
    let cities = into_cities(cities)?;
    log::debug!("napi: generate_steps n={} algorithm={algorithm}", cities.len());
    let trace = match algorithm {
        Algorithm::HeldKarp => tsp_trace_held_karp::generate_steps_with_config(&cities, &SolverConfig::default()),
        Algorithm::NearestNeighbor => tsp_trace_nearest_neighbor::generate_steps(&cities),
    };
    to_js(&trace)
}

#[napi]
pub fn sample_cities(count: u32) -> Result<Vec<JsCity>> {
    let cities = match count {
        4 => City::sample_four(),
        5 => City::sample_five(),
        other => return Err(Error::from_reason(format!("no sample with {other} cities (use 4 or 5)"))),
    };
    Ok(cities.into_iter().map(JsCity::from).collect())
}

#[napi]
pub fn held_karp_max_cities() -> u32 {
    SolverConfig::default().held_karp_limit() as u32
}
