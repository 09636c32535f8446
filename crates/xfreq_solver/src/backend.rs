//! Constraint backends for the frequency solver
//!
//! Gantree: L3_Solver → ConstraintBackend
//!
//! A backend decides one `SeparationProblem` and, when satisfiable,
//! returns a witness assignment.

use crate::quantize::SeparationProblem;
use xfreq_core::constants::solver::SEARCH_NODE_BUDGET;

/// Decision procedure for the separation constraints
/// Gantree: ConstraintBackend // trait
pub trait ConstraintBackend {
    /// Find an assignment, or `None` when unsatisfiable
    fn find(&mut self, problem: &SeparationProblem) -> Option<Vec<i64>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Exact bounded search over integer assignments
/// Gantree: DifferenceSearch // 정확 탐색
///
/// The constraints only involve differences, so the largest value is
/// pinned to `band_hi - 1` and the rest are enumerated in strictly
/// decreasing order. Values come back highest first.
#[derive(Debug, Clone)]
pub struct DifferenceSearch {
    node_budget: usize,
    nodes: usize,
    exhausted: bool,
}

impl DifferenceSearch {
    /// Create with the default node budget
    pub fn new() -> Self {
        Self::with_budget(SEARCH_NODE_BUDGET)
    }

    /// Create with an explicit node budget
    pub fn with_budget(node_budget: usize) -> Self {
        Self {
            node_budget,
            nodes: 0,
            exhausted: false,
        }
    }

    /// Whether the last call ran out of budget
    pub fn last_exhausted(&self) -> bool {
        self.exhausted
    }

    fn extend(&mut self, problem: &SeparationProblem, values: &mut Vec<i64>) -> bool {
        if values.len() == problem.num_bins {
            return true;
        }

        let step = problem.min_step();
        let remaining = (problem.num_bins - values.len() - 1) as i64;
        let lowest = problem.band_lo + 1 + remaining * step;
        let last = values[values.len() - 1];

        let mut candidate = last - step;
        while candidate >= lowest {
            self.nodes += 1;
            if self.nodes > self.node_budget {
                self.exhausted = true;
                return false;
            }

            if values.iter().all(|&v| problem.separated(v - candidate)) {
                values.push(candidate);
                if self.extend(problem, values) {
                    return true;
                }
                values.pop();
                if self.exhausted {
                    return false;
                }
            }
            candidate -= 1;
        }

        false
    }
}

impl Default for DifferenceSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintBackend for DifferenceSearch {
    fn find(&mut self, problem: &SeparationProblem) -> Option<Vec<i64>> {
        self.nodes = 0;
        self.exhausted = false;

        if problem.num_bins == 0 {
            return Some(Vec::new());
        }

        let top = problem.band_hi - 1;
        if top <= problem.band_lo {
            return None;
        }

        let mut values = Vec::with_capacity(problem.num_bins);
        values.push(top);

        if self.extend(problem, &mut values) {
            Some(values)
        } else {
            if self.exhausted {
                log::debug!(
                    "difference search gave up after {} nodes at threshold {}",
                    self.nodes,
                    problem.threshold
                );
            }
            None
        }
    }

    fn name(&self) -> &str {
        "difference-search"
    }
}

// ============================================================================
// Tests
// ============================================================================
