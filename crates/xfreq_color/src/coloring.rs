//! Crosstalk coloring of active couplings
//!
//! Gantree: L3_Color → CrosstalkColorer
//!
//! Colors the couplings active in one layer so that couplings which
//! conflict in the crosstalk graph get different colors. A positive
//! budget triggers randomized recoloring when the greedy baseline uses
//! too many colors.

use crate::graph::{num_colors, relabel_dense, ConflictGraph};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use xfreq_core::constants::coloring::RECOLOR_MAX_ATTEMPTS;
use xfreq_core::error::XfreqError;
use xfreq_core::{Coupling, CrosstalkGraph};

/// Result of coloring one set of active couplings
/// Gantree: ColoringOutcome // 컬러링 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColoringOutcome {
    /// Dense color per coupling, `0..num_colors`
    pub colors: BTreeMap<Coupling, usize>,

    /// Number of distinct colors
    pub num_colors: usize,

    /// Color budget in force (0 = unbounded)
    pub budget: usize,

    /// Randomized recoloring attempts spent
    pub attempts: usize,
}

impl ColoringOutcome {
    /// Color of a coupling
    pub fn color_of(&self, coupling: &Coupling) -> Option<usize> {
        self.colors.get(coupling).copied()
    }

    /// Whether the budget is satisfied (always true when unbounded)
    pub fn budget_met(&self) -> bool {
        self.budget == 0 || self.num_colors <= self.budget
    }

    /// Couplings grouped by color, index = color
    /// Gantree: classes() -> Vec<Vec<Coupling>> // 색 클래스
    pub fn classes(&self) -> Vec<Vec<Coupling>> {
        let mut classes = vec![Vec::new(); self.num_colors];
        for (&coupling, &color) in &self.colors {
            classes[color].push(coupling);
        }
        classes
    }

    /// The recoverable degradation for an unmet budget
    pub fn budget_warning(&self) -> Option<XfreqError> {
        if self.budget_met() {
            None
        } else {
            Some(XfreqError::ColorBudgetUnmet {
                budget: self.budget,
                colors: self.num_colors,
                attempts: self.attempts,
            })
        }
    }
}

/// Budgeted crosstalk colorer
/// Gantree: CrosstalkColorer // 크로스토크 컬러러
#[derive(Debug, Clone)]
pub struct CrosstalkColorer {
    budget: usize,
    max_attempts: usize,
    rng: ChaCha8Rng,
}

impl CrosstalkColorer {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a colorer; `budget` 0 means unbounded, `seed` fixes the
    /// recoloring order
    pub fn new(budget: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            budget,
            max_attempts: RECOLOR_MAX_ATTEMPTS,
            rng,
        }
    }

    /// Unbounded colorer (greedy only, no randomness used)
    pub fn unbounded() -> Self {
        Self::new(0, Some(0))
    }

    /// Builder: cap on randomized recoloring attempts
    pub fn with_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Color budget (0 = unbounded)
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Recoloring attempt cap
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    // ========================================================================
    // Coloring
    // ========================================================================

    /// Subgraph of the crosstalk graph induced by the active couplings
    /// Gantree: induced(crosstalk, active) -> ConflictGraph // 유도 부분그래프
    ///
    /// Nodes are inserted in sorted coupling order. Active couplings
    /// absent from the crosstalk graph become isolated nodes.
    pub fn induced(crosstalk: &CrosstalkGraph, active: &[Coupling]) -> ConflictGraph<Coupling> {
        let mut sorted = active.to_vec();
        sorted.sort();
        sorted.dedup();

        let mut graph = ConflictGraph::new();
        for &c in &sorted {
            graph.insert_node(c);
        }
        for (i, a) in sorted.iter().enumerate() {
            for b in &sorted[i + 1..] {
                if crosstalk.conflicts(a, b) {
                    graph.insert_conflict(*a, *b);
                }
            }
        }
        graph
    }

    /// Color the active couplings
    /// Gantree: color(crosstalk, active) -> ColoringOutcome // 컬러링
    ///
    /// Greedy in natural order first. Over budget, retry with shuffled
    /// orders up to the attempt cap and keep the coloring with the
    /// fewest colors. An unmet budget is logged and reported through
    /// `ColoringOutcome::budget_warning`.
    pub fn color(&mut self, crosstalk: &CrosstalkGraph, active: &[Coupling]) -> ColoringOutcome {
        let graph = Self::induced(crosstalk, active);
        if graph.is_empty() {
            return ColoringOutcome {
                budget: self.budget,
                ..ColoringOutcome::default()
            };
        }

        let mut best = graph.color_greedy();
        let mut best_count = num_colors(&best);
        let mut attempts = 0;

        if self.budget > 0 && best_count > self.budget {
            log::debug!(
                "greedy coloring uses {} colors, budget {}; recoloring",
                best_count,
                self.budget
            );

            let mut order = graph.items();
            while attempts < self.max_attempts && best_count > self.budget {
                order.shuffle(&mut self.rng);
                attempts += 1;

                let candidate = graph.color_greedy_with(order.iter().copied());
                let count = num_colors(&candidate);
                if count < best_count {
                    best = candidate;
                    best_count = count;
                }
            }

            if best_count > self.budget {
                log::warn!(
                    "color budget {} unmet after {} attempts, continuing with {} colors",
                    self.budget,
                    attempts,
                    best_count
                );
            }
        }

        ColoringOutcome {
            colors: relabel_dense(&best),
            num_colors: best_count,
            budget: self.budget,
            attempts,
        }
    }
}

impl Default for CrosstalkColorer {
    fn default() -> Self {
        Self::unbounded()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use xfreq_core::Topology;

    fn c(a: usize, b: usize) -> Coupling {
        Coupling::new(a, b).unwrap()
    }

    /// Four disjoint couplings chained e0 - e2 - e3 - e1 by conflicts.
    /// Natural order colors both ends first and needs three colors.
    fn chained_path() -> (CrosstalkGraph, Vec<Coupling>) {
        let e = [c(0, 1), c(2, 3), c(4, 5), c(6, 7)];
        let mut graph = CrosstalkGraph::new();
        graph.add_conflict(e[0], e[2]).unwrap();
        graph.add_conflict(e[2], e[3]).unwrap();
        graph.add_conflict(e[3], e[1]).unwrap();
        (graph, e.to_vec())
    }

    fn triangle() -> (CrosstalkGraph, Vec<Coupling>) {
        let e = [c(0, 1), c(2, 3), c(4, 5)];
        let mut graph = CrosstalkGraph::new();
        graph.add_conflict(e[0], e[1]).unwrap();
        graph.add_conflict(e[1], e[2]).unwrap();
        graph.add_conflict(e[0], e[2]).unwrap();
        (graph, e.to_vec())
    }

    #[test]
    fn test_unbounded_greedy_natural_order() {
        let (graph, active) = chained_path();
        let outcome = CrosstalkColorer::unbounded().color(&graph, &active);

        assert_eq!(outcome.num_colors, 3);
        assert_eq!(outcome.attempts, 0);
        assert!(outcome.budget_met());
        assert_eq!(outcome.color_of(&c(0, 1)), Some(0));
        assert_eq!(outcome.color_of(&c(2, 3)), Some(0));
    }

    #[test]
    fn test_budget_met_by_recoloring() {
        let (graph, active) = chained_path();
        let outcome = CrosstalkColorer::new(2, Some(7)).color(&graph, &active);

        assert_eq!(outcome.num_colors, 2);
        assert!(outcome.budget_met());
        assert!(outcome.attempts >= 1);
        assert!(outcome.budget_warning().is_none());

        let induced = CrosstalkColorer::induced(&graph, &active);
        assert!(induced.is_proper(&outcome.colors));
    }

    #[test]
    fn test_budget_unmet_reports_best() {
        let (graph, active) = triangle();
        let outcome = CrosstalkColorer::new(2, Some(1))
            .with_attempts(25)
            .color(&graph, &active);

        assert_eq!(outcome.num_colors, 3);
        assert_eq!(outcome.attempts, 25);
        assert!(matches!(
            outcome.budget_warning(),
            Some(XfreqError::ColorBudgetUnmet {
                budget: 2,
                colors: 3,
                attempts: 25
            })
        ));
    }

    #[test]
    fn test_inactive_conflicts_ignored() {
        let (graph, _) = triangle();
        let outcome = CrosstalkColorer::unbounded().color(&graph, &[c(0, 1), c(4, 5)]);
        assert_eq!(outcome.num_colors, 2);

        let outcome = CrosstalkColorer::unbounded().color(&graph, &[c(2, 3)]);
        assert_eq!(outcome.num_colors, 1);
    }

    #[test]
    fn test_unknown_coupling_isolated() {
        let graph = CrosstalkGraph::new();
        let outcome = CrosstalkColorer::unbounded().color(&graph, &[c(0, 1), c(1, 0), c(5, 9)]);
        assert_eq!(outcome.colors.len(), 2);
        assert_eq!(outcome.num_colors, 1);
    }

    #[test]
    fn test_empty_active_set() {
        let (graph, _) = triangle();
        let outcome = CrosstalkColorer::new(2, Some(3)).color(&graph, &[]);
        assert_eq!(outcome.num_colors, 0);
        assert!(outcome.classes().is_empty());
        assert!(outcome.budget_met());
    }

    #[test]
    fn test_greedy_proper_on_grid_crosstalk() {
        let topology = Topology::grid(3, 3);
        let crosstalk = CrosstalkGraph::augmented(&topology, 1);
        let active = topology.couplings().to_vec();

        let outcome = CrosstalkColorer::unbounded().color(&crosstalk, &active);
        let induced = CrosstalkColorer::induced(&crosstalk, &active);
        assert!(induced.is_proper(&outcome.colors));

        let classes = outcome.classes();
        assert_eq!(classes.len(), outcome.num_colors);
        assert!(classes.iter().all(|class| !class.is_empty()));
        assert_eq!(classes.iter().map(Vec::len).sum::<usize>(), active.len());
    }

    #[test]
    fn test_seeded_recoloring_reproducible() {
        let (graph, active) = chained_path();
        let a = CrosstalkColorer::new(2, Some(42)).color(&graph, &active);
        let b = CrosstalkColorer::new(2, Some(42)).color(&graph, &active);
        assert_eq!(a, b);
    }
}
