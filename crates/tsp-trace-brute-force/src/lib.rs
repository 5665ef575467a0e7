#![deny(clippy::all)]

use tsp_trace_core::{DistanceMatrix, SubsetMask};

/// Largest input worth enumerating; (n-1)! tours.
pub const MAX_CITIES: usize = 11;

#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    pub path: Vec<usize>,
    pub cost: f64,
}

struct Search<'a> {
    dist: &'a DistanceMatrix,
    n: usize,
    path: Vec<usize>,
    best: Tour,
}

impl Search<'_> {
    fn dfs(&mut self, visited: SubsetMask, last: usize, cost: f64) {
        // Distances are non-negative, so a partial walk already at the bound can't win.
        if cost >= self.best.cost {
            return;
        }

        if visited.len() == self.n {
            let total = cost + self.dist.get(last, 0);
            if total < self.best.cost {
                self.best.cost = total;
                self.best.path.clear();
                self.best.path.extend_from_slice(&self.path);
                self.best.path.push(0);
            }
            return;
        }

        for next in 1..self.n {
            if visited.contains(next) {
                continue;
            }
            self.path.push(next);
            self.dfs(visited.with(next), next, cost + self.dist.get(last, next));
            self.path.pop();
        }
    }
}

/// Exact optimum by enumerating every tour that starts and ends at city 0.
/// Returns `None` for an empty matrix.
pub fn solve(dist: &DistanceMatrix) -> Option<Tour> {
    let n = dist.len();
    match n {
        0 => return None,
        1 => return Some(Tour { path: vec![0, 0], cost: 0.0 }),
        _ => {}
    }

    let mut search = Search {
        dist,
        n,
        path: Vec::with_capacity(n + 1),
        best: Tour { path: Vec::new(), cost: f64::INFINITY },
    };
    search.path.push(0);
    search.dfs(SubsetMask::single(0), 0, 0.0);

    Some(search.best)
}
