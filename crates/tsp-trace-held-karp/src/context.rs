use std::sync::Arc;

use tsp_trace_core::{
    City, DistanceMatrix, DpEntry, DpTable, Step, StepKind, StepRecorder, SubsetCodec, SubsetMask, Trace,
};

use crate::START_NODE;

/// State of one Held-Karp run. Dropped with the run; nothing is shared
/// across invocations.
pub(crate) struct HeldKarpContext<'a> {
    cities: &'a [City],
    n: usize,
    dist: Arc<DistanceMatrix>,
    codec: Arc<SubsetCodec>,
    table: DpTable,
    recorder: StepRecorder,
}

impl<'a> HeldKarpContext<'a> {
    pub(crate) fn new(cities: &'a [City]) -> Self {
        let n = cities.len();
        Self {
            cities,
            n,
            dist: Arc::new(DistanceMatrix::from_cities(cities)),
            codec: Arc::new(SubsetCodec::new(cities)),
            table: DpTable::new(n),
            recorder: StepRecorder::new(),
        }
    }

    #[inline(always)]
    fn name(&self, index: usize) -> &str {
        &self.cities[index].name
    }

    fn step(&self, kind: StepKind, description: String) -> Step {
        Step::new(kind, description).with_distance_matrix(&self.dist)
    }

    pub(crate) fn single_city(self) -> Trace {
        let start = self.name(START_NODE).to_string();
        let step = self
            .step(
                StepKind::Done,
                format!("Only one city: the tour is {start} -> {start} with total cost 0.00."),
            )
            .with_tour(vec![START_NODE, START_NODE])
            .with_cost(0.0);
        let mut recorder = self.recorder;
        recorder.record_with_table(step, &self.table);
        recorder.finish_with_table(self.table, self.codec)
    }

    pub(crate) fn start(&mut self) {
        let step = self.step(
            StepKind::Start,
            format!(
                "Initializing algorithm for {} cities. Start node is {}. Calculating distance matrix.",
                self.n,
                self.name(START_NODE)
            ),
        );
        self.recorder.record_with_table(step, &self.table);
    }

    /// Size-2 subsets: `{start, i}` ending at `i` costs the direct edge.
    pub(crate) fn base_case(&mut self) {
        let start_mask = SubsetMask::single(START_NODE);
        for i in (0..self.n).filter(|&i| i != START_NODE) {
            let mask = start_mask.with(i);
            let cost = self.dist.get(START_NODE, i);
            let path = vec![START_NODE, i];
            let stored = self.table.insert(mask, i, DpEntry { cost, path: path.clone() });
            debug_assert!(stored, "base entry written twice");

            let step = self
                .step(
                    StepKind::Subproblem,
                    format!(
                        "Base case (size 2): Cost from {} to {} is {cost:.2}.",
                        self.name(START_NODE),
                        self.name(i)
                    ),
                )
                .with_candidate(path)
                .with_highlight(self.codec.key(mask), i);
            self.recorder.record_with_table(step, &self.table);
        }
    }

    /// Fills every `DP[mask][j]` with `|mask| == size`. Reads only size-1 entries.
    pub(crate) fn grow(&mut self, size: usize) {
        log::trace!("held_karp: subsets of size {size}");
        for mask in SubsetMask::with_len(self.n, size, START_NODE) {
            let subset_key = self.codec.key(mask);
            for j in mask.indices().filter(|&j| j != START_NODE) {
                self.resolve(mask, &subset_key, j);
            }
        }
    }

    fn resolve(&mut self, mask: SubsetMask, subset_key: &str, j: usize) {
        let prev_mask = mask.without(j);
        let mut best: Option<(f64, Vec<usize>)> = None;

        for k in prev_mask.indices().filter(|&k| k != j) {
            let Some(prev) = self.table.get(prev_mask, k) else {
                continue;
            };
            let prev_cost = prev.cost;
            let candidate_cost = prev_cost + self.dist.get(k, j);
            let mut candidate_path = Vec::with_capacity(prev.path.len() + 1);
            candidate_path.extend_from_slice(&prev.path);
            candidate_path.push(j);

            let step = self
                .step(
                    StepKind::Subproblem,
                    format!(
                        "Calculating cost for {{..., {k_name}}} -> {j_name}. Cost = {prev_cost:.2} + d({k_name},{j_name}) = {candidate_cost:.2}",
                        k_name = self.name(k),
                        j_name = self.name(j),
                    ),
                )
                .with_candidate(candidate_path.clone())
                .with_highlight(subset_key, j);
            self.recorder.record_with_table(step, &self.table);

            // Strict `<`: the first minimal k in ascending order keeps the cell.
            if best.as_ref().is_none_or(|(cost, _)| candidate_cost < *cost) {
                best = Some((candidate_cost, candidate_path));
            }
        }

        let Some((cost, path)) = best else {
            return;
        };
        let stored = self.table.insert(mask, j, DpEntry { cost, path: path.clone() });
        debug_assert!(stored, "DP[{mask:b}][{j}] written twice");

        let step = self
            .step(
                StepKind::Subproblem,
                format!(
                    "Minimum cost for subset {subset_key} ending at {} is {cost:.2}. Path: {}",
                    self.name(j),
                    self.codec.path(&path, "->")
                ),
            )
            .with_candidate(path)
            .with_highlight(subset_key, j);
        self.recorder.record_with_table(step, &self.table);
    }

    /// Closes every full-set path back to the start and keeps the cheapest tour.
    pub(crate) fn close(mut self) -> Trace {
        let full = SubsetMask::full(self.n);
        let start_name = self.name(START_NODE).to_string();
        let mut best: Option<(f64, Vec<usize>)> = None;

        for i in (0..self.n).filter(|&i| i != START_NODE) {
            let Some(entry) = self.table.get(full, i) else {
                continue;
            };
            let tour_cost = entry.cost + self.dist.get(i, START_NODE);
            let mut tour = entry.path.clone();
            tour.push(START_NODE);

            let step = self
                .step(
                    StepKind::Final,
                    format!(
                        "Calculating final tour cost through {}: {:.2} + d({},{start_name}) = {tour_cost:.2}",
                        self.name(i),
                        entry.cost,
                        self.name(i),
                    ),
                )
                .with_candidate(tour.clone());
            self.recorder.record_with_table(step, &self.table);

            if best.as_ref().is_none_or(|(cost, _)| tour_cost < *cost) {
                best = Some((tour_cost, tour));
            }
        }

        // n >= 2 always leaves at least one full-set entry.
        let (cost, tour) = best.unwrap_or_default();
        let step = self
            .step(
                StepKind::Done,
                format!(
                    "Optimal tour found! Total cost: {cost:.2}. Path: {}",
                    self.codec.path(&tour, " -> ")
                ),
            )
            .with_tour(tour)
            .with_cost(cost);
        self.recorder.record_with_table(step, &self.table);

        self.recorder.finish_with_table(self.table, self.codec)
    }
}
