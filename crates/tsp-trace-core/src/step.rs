use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

use crate::distance::DistanceMatrix;
use crate::dp::{DpTable, DpTableView};
use crate::subset::SubsetCodec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Start,
    Subproblem,
    Final,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightedCell {
    pub subset_key: String,
    pub end_node: usize,
}

/// One frame of the trace. Field names and the optional set are what the
/// visualizer reads; keep them stable.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp_table: Option<DpTableView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_matrix: Option<Arc<DistanceMatrix>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_cell: Option<HighlightedCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_being_calculated: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_path: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_cost: Option<f64>,
}

impl Step {
    pub fn new(kind: StepKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            dp_table: None,
            distance_matrix: None,
            highlighted_cell: None,
            path_being_calculated: None,
            final_path: None,
            final_cost: None,
        }
    }

    pub fn with_distance_matrix(mut self, matrix: &Arc<DistanceMatrix>) -> Self {
        self.distance_matrix = Some(Arc::clone(matrix));
        self
    }

    pub fn with_highlight(mut self, subset_key: impl Into<String>, end_node: usize) -> Self {
        self.highlighted_cell = Some(HighlightedCell { subset_key: subset_key.into(), end_node });
        self
    }

    pub fn with_candidate(mut self, path: Vec<usize>) -> Self {
        self.path_being_calculated = Some(path);
        self
    }

    pub fn with_tour(mut self, path: Vec<usize>) -> Self {
        self.final_path = Some(path);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.final_cost = Some(cost);
        self
    }
}

/// Append-only sink for one solver invocation.
///
/// Steps that snapshot the DP table only remember how many entries the
/// table held when they were recorded; the views are materialised against
/// the frozen table in [`StepRecorder::finish_with_table`].
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
    watermarks: Vec<(usize, usize)>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn record_with_table(&mut self, step: Step, table: &DpTable) {
        self.watermarks.push((self.steps.len(), table.len()));
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self) -> Trace {
        debug_assert!(self.watermarks.is_empty(), "table snapshots need finish_with_table");
        Trace { steps: self.steps }
    }

    pub fn finish_with_table(mut self, table: DpTable, codec: Arc<SubsetCodec>) -> Trace {
        let records = table.freeze();
        for (at, len) in self.watermarks.drain(..) {
            self.steps[at].dp_table = Some(DpTableView::new(Arc::clone(&codec), Arc::clone(&records), len));
        }
        Trace { steps: self.steps }
    }
}

/// Finished, immutable sequence of steps handed to the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(step: Step) -> Self {
        Self { steps: vec![step] }
    }

    /// Cost carried by the terminal step, if the run produced a tour.
    pub fn final_cost(&self) -> Option<f64> {
        self.steps.last().filter(|s| s.kind == StepKind::Done).and_then(|s| s.final_cost)
    }

    pub fn final_path(&self) -> Option<&[usize]> {
        self.steps
            .last()
            .filter(|s| s.kind == StepKind::Done)
            .and_then(|s| s.final_path.as_deref())
    }
}

impl Deref for Trace {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.steps
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
