#![deny(clippy::all)]

//! Held-Karp over bitmask subsets, recording every subproblem it touches.
//!
//! Subsets are processed strictly by ascending size, so `DP[mask][j]` only
//! ever reads `DP[mask \ {j}][k]` entries that were written in the previous
//! round. Ties between equal-cost predecessors go to the lowest index `k`.

mod context;

use tsp_trace_core::{City, SolverConfig, Step, StepKind, Trace};

use context::HeldKarpContext;

pub const START_NODE: usize = 0;

pub fn generate_steps(cities: &[City]) -> Trace {
    generate_steps_with_config(cities, &SolverConfig::default())
}

pub fn generate_steps_with_config(cities: &[City], config: &SolverConfig) -> Trace {
    let n = cities.len();
    if n == 0 {
        return Trace::empty();
    }

    let limit = config.held_karp_limit();
    if n > limit {
        log::warn!("held_karp: refusing n={n}, limit={limit}");
        return Trace::single(Step::new(
            StepKind::Done,
            format!("Skipped: Held-Karp is too slow for {n} cities. Please use {limit} or fewer cities."),
        ));
    }

    log::debug!("held_karp: start n={n}");
    let mut ctx = HeldKarpContext::new(cities);

    if n == 1 {
        return ctx.single_city();
    }

    ctx.start();
    ctx.base_case();
    for size in 3..=n {
        ctx.grow(size);
    }
    let trace = ctx.close();

    log::debug!(
        "held_karp: done n={n} steps={} cost={:?}",
        trace.len(),
        trace.final_cost()
    );
    trace
}
