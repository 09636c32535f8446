//! Crosstalk graph for xfreq
//!
//! Gantree: L1_Circuit → CrosstalkGraph
//!
//! Graph whose nodes are couplings. An edge joins two couplings that
//! must not run at colliding frequencies while both are active.

use crate::error::{XfreqError, XfreqResult};
use crate::topology::Topology;
use crate::types::Coupling;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Conflict graph over couplings
/// Gantree: CrosstalkGraph // 크로스토크 그래프
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CrosstalkEdges", into = "CrosstalkEdges")]
pub struct CrosstalkGraph {
    adjacency: BTreeMap<Coupling, BTreeSet<Coupling>>,
}

/// Flat serde form: node list plus conflict pairs
#[derive(Serialize, Deserialize)]
struct CrosstalkEdges {
    nodes: Vec<Coupling>,
    conflicts: Vec<(Coupling, Coupling)>,
}

impl CrosstalkGraph {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// One isolated node per topology coupling
    pub fn isolated(topology: &Topology) -> Self {
        let mut graph = Self::new();
        for &c in topology.couplings() {
            graph.add_node(c);
        }
        graph
    }

    /// Distance-augmented line graph of a topology
    /// Gantree: augmented(topology, reach) -> Self // 거리 기반 충돌
    ///
    /// Two couplings conflict when the hop distance between their
    /// closest endpoints is at most `reach`. Reach 0 joins couplings
    /// that share a qubit.
    pub fn augmented(topology: &Topology, reach: usize) -> Self {
        let dist = topology.distance_matrix();
        let couplings = topology.couplings();
        let mut graph = Self::isolated(topology);

        for (i, a) in couplings.iter().enumerate() {
            for b in &couplings[i + 1..] {
                let closest = [
                    (a.lo(), b.lo()),
                    (a.lo(), b.hi()),
                    (a.hi(), b.lo()),
                    (a.hi(), b.hi()),
                ]
                .iter()
                .filter_map(|&(x, y)| dist[x][y])
                .min();

                if matches!(closest, Some(d) if d <= reach) {
                    graph.link(*a, *b);
                }
            }
        }

        graph
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a coupling with no conflicts
    pub fn add_node(&mut self, coupling: Coupling) {
        self.adjacency.entry(coupling).or_default();
    }

    /// Declare two couplings as conflicting
    /// Gantree: add_conflict(a, b) -> Result // 충돌 추가
    pub fn add_conflict(&mut self, a: Coupling, b: Coupling) -> XfreqResult<()> {
        if a == b {
            return Err(XfreqError::InvalidCoupling(a.lo(), a.hi()));
        }
        self.link(a, b);
        Ok(())
    }

    fn link(&mut self, a: Coupling, b: Coupling) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether the coupling is a node
    pub fn contains(&self, coupling: &Coupling) -> bool {
        self.adjacency.contains_key(coupling)
    }

    /// Sorted nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Coupling> {
        self.adjacency.keys()
    }

    /// Sorted conflicts of a coupling (empty for unknown couplings)
    pub fn neighbors(&self, coupling: &Coupling) -> impl Iterator<Item = &Coupling> {
        self.adjacency.get(coupling).into_iter().flatten()
    }

    /// Whether two couplings conflict
    pub fn conflicts(&self, a: &Coupling, b: &Coupling) -> bool {
        self.adjacency.get(a).map_or(false, |set| set.contains(b))
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of conflict edges
    pub fn num_conflicts(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Conflict pairs, each listed once with the smaller coupling first
    pub fn conflict_pairs(&self) -> Vec<(Coupling, Coupling)> {
        self.adjacency
            .iter()
            .flat_map(|(a, set)| set.iter().filter(move |b| a < *b).map(move |b| (*a, *b)))
            .collect()
    }
}

impl From<CrosstalkEdges> for CrosstalkGraph {
    fn from(edges: CrosstalkEdges) -> Self {
        let mut graph = CrosstalkGraph::new();
        for c in edges.nodes {
            graph.add_node(c);
        }
        for (a, b) in edges.conflicts {
            if a != b {
                graph.link(a, b);
            }
        }
        graph
    }
}

impl From<CrosstalkGraph> for CrosstalkEdges {
    fn from(graph: CrosstalkGraph) -> Self {
        CrosstalkEdges {
            nodes: graph.nodes().copied().collect(),
            conflicts: graph.conflict_pairs(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn c(a: usize, b: usize) -> Coupling {
        Coupling::new(a, b).unwrap()
    }

    #[test]
    fn test_reach_zero_is_line_graph() {
        let topo = Topology::linear(4);
        let graph = CrosstalkGraph::augmented(&topo, 0);

        assert_eq!(graph.num_nodes(), 3);
        assert!(graph.conflicts(&c(0, 1), &c(1, 2)));
        assert!(graph.conflicts(&c(1, 2), &c(2, 3)));
        assert!(!graph.conflicts(&c(0, 1), &c(2, 3)));
        assert_eq!(graph.num_conflicts(), 2);
    }

    #[test]
    fn test_reach_one_adds_next_nearest() {
        let topo = Topology::linear(5);
        let graph = CrosstalkGraph::augmented(&topo, 1);

        // (0,1) and (2,3) are one hop apart via qubits 1-2
        assert!(graph.conflicts(&c(0, 1), &c(2, 3)));
        assert!(!graph.conflicts(&c(0, 1), &c(3, 4)));
    }

    #[test]
    fn test_add_conflict() {
        let mut graph = CrosstalkGraph::new();
        graph.add_conflict(c(0, 1), c(4, 5)).unwrap();
        assert!(graph.conflicts(&c(4, 5), &c(0, 1)));
        assert!(graph.add_conflict(c(0, 1), c(1, 0)).is_err());
        assert_eq!(graph.neighbors(&c(0, 1)).count(), 1);
        assert_eq!(graph.neighbors(&c(7, 8)).count(), 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let graph = CrosstalkGraph::augmented(&Topology::grid(2, 2), 0);
        let json = serde_json::to_string(&graph).unwrap();
        let back: CrosstalkGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(graph, back);
    }
}
