#![deny(clippy::all)]

//! Cross-checks the trace generators on seeded random instances.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;
use tsp_trace_core::{Algorithm, City, DistanceMatrix, SolverConfig, Trace};

pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

pub fn run(algorithm: Algorithm, cities: &[City], config: &SolverConfig) -> Trace {
    match algorithm {
        Algorithm::HeldKarp => tsp_trace_held_karp::generate_steps_with_config(cities, config),
        Algorithm::NearestNeighbor => tsp_trace_nearest_neighbor::generate_steps(cities),
    }
}

/// `n` labelled cities placed uniformly on the canvas.
pub fn random_cities(rng: &mut impl Rng, n: usize) -> Vec<City> {
    (0..n)
        .map(|i| City::labelled(i, rng.gen_range(0.0..CANVAS_WIDTH), rng.gen_range(0.0..CANVAS_HEIGHT)))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepOptions {
    pub min_cities: usize,
    pub max_cities: usize,
    pub instances_per_size: usize,
    pub seed: u64,
    /// Brute force is skipped above this size.
    pub brute_force_max: usize,
    pub config: SolverConfig,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            min_cities: 2,
            max_cities: 8,
            instances_per_size: 5,
            seed: 0,
            brute_force_max: 9,
            config: SolverConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepRow {
    pub n: usize,
    pub seed: u64,
    pub held_karp_cost: Option<f64>,
    pub nearest_neighbor_cost: Option<f64>,
    pub brute_force_cost: Option<f64>,
    /// `nn / hk - 1`, when both produced a tour.
    pub heuristic_gap: Option<f64>,
    pub held_karp_steps: usize,
    pub nearest_neighbor_steps: usize,
}

impl SweepRow {
    /// Exact cost agrees with brute force and the heuristic is never cheaper.
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        let exact_ok = match (self.held_karp_cost, self.brute_force_cost) {
            (Some(hk), Some(bf)) => (hk - bf).abs() <= tolerance,
            _ => true,
        };
        let bound_ok = match (self.held_karp_cost, self.nearest_neighbor_cost) {
            (Some(hk), Some(nn)) => nn >= hk - tolerance,
            _ => true,
        };
        exact_ok && bound_ok
    }
}

pub fn evaluate(cities: &[City], seed: u64, options: &SweepOptions) -> SweepRow {
    let n = cities.len();
    let held_karp = run(Algorithm::HeldKarp, cities, &options.config);
    let nearest = run(Algorithm::NearestNeighbor, cities, &options.config);
    let held_karp_cost = held_karp.final_cost();
    let nearest_neighbor_cost = nearest.final_cost();

    let brute_force_cost = if n <= options.brute_force_max.min(tsp_trace_brute_force::MAX_CITIES) {
        tsp_trace_brute_force::solve(&DistanceMatrix::from_cities(cities)).map(|t| t.cost)
    } else {
        None
    };

    let heuristic_gap = match (held_karp_cost, nearest_neighbor_cost) {
        (Some(hk), Some(nn)) if hk > 0.0 => Some(nn / hk - 1.0),
        (Some(_), Some(_)) => Some(0.0),
        _ => None,
    };

    SweepRow {
        n,
        seed,
        held_karp_cost,
        nearest_neighbor_cost,
        brute_force_cost,
        heuristic_gap,
        held_karp_steps: held_karp.len(),
        nearest_neighbor_steps: nearest.len(),
    }
}

/// One row per instance; instance seeds derive from `options.seed` so any
/// row can be regenerated on its own.
pub fn sweep(options: &SweepOptions) -> Vec<SweepRow> {
    let mut rows = Vec::new();
    for n in options.min_cities..=options.max_cities {
        for instance in 0..options.instances_per_size {
            let seed = instance_seed(options.seed, n, instance);
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let cities = random_cities(&mut rng, n);
            let row = evaluate(&cities, seed, options);
            if !row.is_consistent(1e-6) {
                log::warn!("sweep: inconsistent row n={n} seed={seed}: {row:?}");
            }
            log::debug!("sweep: n={n} seed={seed} hk={:?} nn={:?}", row.held_karp_cost, row.nearest_neighbor_cost);
            rows.push(row);
        }
    }
    log::info!("sweep: {} instances", rows.len());
    rows
}

pub fn instance_seed(base: u64, n: usize, instance: usize) -> u64 {
    base.wrapping_mul(1_000_003).wrapping_add((n as u64) << 32).wrapping_add(instance as u64)
}
