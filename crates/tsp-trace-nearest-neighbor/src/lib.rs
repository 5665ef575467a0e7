#![deny(clippy::all)]

//! Greedy nearest-neighbor tour from city 0. Every probe of an unvisited
//! city and every move is recorded; ties go to the lowest city index.

use std::collections::BTreeSet;
use std::sync::Arc;

use tsp_trace_core::{City, DistanceMatrix, Step, StepKind, StepRecorder, SubsetCodec, Trace};

pub const START_NODE: usize = 0;

pub fn generate_steps(cities: &[City]) -> Trace {
    let n = cities.len();
    if n == 0 {
        return Trace::empty();
    }

    log::debug!("nearest_neighbor: start n={n}");
    let dist = Arc::new(DistanceMatrix::from_cities(cities));
    let codec = SubsetCodec::new(cities);
    let mut recorder = StepRecorder::new();
    let start = codec.name(START_NODE);

    if n == 1 {
        recorder.record(
            Step::new(
                StepKind::Done,
                format!("Only one city: the tour is {start} -> {start} with total cost 0.00."),
            )
            .with_distance_matrix(&dist)
            .with_tour(vec![START_NODE, START_NODE])
            .with_cost(0.0),
        );
        return recorder.finish();
    }

    recorder.record(
        Step::new(
            StepKind::Start,
            format!("Initializing Nearest Neighbor algorithm starting from city {start}."),
        )
        .with_distance_matrix(&dist),
    );

    let mut unvisited: BTreeSet<usize> = (0..n).filter(|&i| i != START_NODE).collect();
    let mut tour = Vec::with_capacity(n + 1);
    tour.push(START_NODE);
    let mut current = START_NODE;
    let mut total = 0.0;

    while !unvisited.is_empty() {
        let mut nearest: Option<(usize, f64)> = None;

        for &candidate in &unvisited {
            let d = dist.get(current, candidate);
            recorder.record(
                Step::new(
                    StepKind::Subproblem,
                    format!(
                        "Checking distance from {} to {}: {d:.2}",
                        codec.name(current),
                        codec.name(candidate)
                    ),
                )
                .with_distance_matrix(&dist)
                .with_candidate(vec![current, candidate])
                .with_tour(tour.clone()),
            );
            if nearest.is_none_or(|(_, best)| d < best) {
                nearest = Some((candidate, d));
            }
        }

        let Some((next, d)) = nearest else {
            break;
        };
        total += d;
        current = next;
        tour.push(current);
        unvisited.remove(&current);

        recorder.record(
            Step::new(
                StepKind::Subproblem,
                format!(
                    "Moving to nearest city: {}. Current cost: {total:.2}",
                    codec.name(current)
                ),
            )
            .with_distance_matrix(&dist)
            .with_tour(tour.clone())
            .with_cost(total),
        );
    }

    total += dist.get(current, START_NODE);
    tour.push(START_NODE);

    recorder.record(
        Step::new(
            StepKind::Done,
            format!(
                "Tour complete! Total cost: {total:.2}. Path: {}",
                codec.path(&tour, " -> ")
            ),
        )
        .with_distance_matrix(&dist)
        .with_tour(tour)
        .with_cost(total),
    );

    let trace = recorder.finish();
    log::debug!("nearest_neighbor: done n={n} steps={} cost={total:.2}", trace.len());
    trace
}
