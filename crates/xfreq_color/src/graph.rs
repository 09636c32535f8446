//! Conflict graph with greedy coloring
//!
//! Gantree: L3_Color → ConflictGraph
//!
//! Undirected graph over arbitrary items. Nodes are added in the
//! order callers insert them, and that order is the natural greedy
//! visitation order.

use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

/// Undirected conflict graph
/// Gantree: ConflictGraph<T> // petgraph 기반
#[derive(Debug, Clone)]
pub struct ConflictGraph<T: Ord + Copy> {
    graph: UnGraph<T, ()>,
    index_map: BTreeMap<T, NodeIndex>,
}

impl<T: Ord + Copy> Default for ConflictGraph<T> {
    fn default() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            index_map: BTreeMap::new(),
        }
    }
}

impl<T: Ord + Copy + Debug> ConflictGraph<T> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Add a node, returning its index (existing nodes are reused)
    pub fn insert_node(&mut self, item: T) -> NodeIndex {
        match self.index_map.get(&item) {
            Some(&node) => node,
            None => {
                let node = self.graph.add_node(item);
                self.index_map.insert(item, node);
                node
            }
        }
    }

    /// Add a conflict between two items
    /// Gantree: insert_conflict(a, b) // 충돌 간선
    pub fn insert_conflict(&mut self, a: T, b: T) {
        // no self edges, but the node still counts
        let a_node = self.insert_node(a);
        if a == b {
            return;
        }
        let b_node = self.insert_node(b);
        self.graph.update_edge(a_node, b_node, ());
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Check if graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of conflict edges
    pub fn num_conflicts(&self) -> usize {
        self.graph.edge_count()
    }

    /// Items in insertion order
    pub fn items(&self) -> Vec<T> {
        self.graph.node_indices().map(|n| self.graph[n]).collect()
    }

    /// Whether two items conflict
    pub fn conflicts(&self, a: &T, b: &T) -> bool {
        match (self.index_map.get(a), self.index_map.get(b)) {
            (Some(&x), Some(&y)) => self.graph.contains_edge(x, y),
            _ => false,
        }
    }

    // ========================================================================
    // Coloring
    // ========================================================================

    /// Greedy coloring in insertion order
    pub fn color_greedy(&self) -> BTreeMap<T, usize> {
        self.color_greedy_with(self.items())
    }

    /// Greedy coloring in the given order
    /// Gantree: color_greedy_with(ordering) -> BTreeMap<T,usize> // 탐욕 컬러링
    ///
    /// Each item takes the smallest color not held by an already
    /// colored neighbor. Items not in the graph are skipped.
    pub fn color_greedy_with(&self, ordering: impl IntoIterator<Item = T>) -> BTreeMap<T, usize> {
        let mut coloring: BTreeMap<T, usize> = BTreeMap::new();

        for item in ordering {
            let node = match self.index_map.get(&item) {
                Some(&node) => node,
                None => continue,
            };

            let taken: BTreeSet<usize> = self
                .graph
                .neighbors(node)
                .filter_map(|nbr| coloring.get(&self.graph[nbr]).copied())
                .collect();

            let color = (0..).find(|c| !taken.contains(c)).unwrap_or(0);
            coloring.insert(item, color);
        }

        coloring
    }

    /// Whether every conflict joins two differently colored items
    pub fn is_proper(&self, coloring: &BTreeMap<T, usize>) -> bool {
        self.graph.edge_indices().all(|e| {
            match self.graph.edge_endpoints(e) {
                Some((a, b)) => coloring.get(&self.graph[a]) != coloring.get(&self.graph[b]),
                None => true,
            }
        })
    }
}

/// Number of distinct colors in a coloring
pub fn num_colors<T>(coloring: &BTreeMap<T, usize>) -> usize {
    coloring.values().collect::<BTreeSet<_>>().len()
}

/// Relabel colors to `0..k-1` by first appearance in key order
/// Gantree: relabel_dense(coloring) -> BTreeMap // 밀집 재라벨
pub fn relabel_dense<T: Ord + Copy>(coloring: &BTreeMap<T, usize>) -> BTreeMap<T, usize> {
    let mut labels: BTreeMap<usize, usize> = BTreeMap::new();
    coloring
        .iter()
        .map(|(&item, &color)| {
            let next = labels.len();
            (item, *labels.entry(color).or_insert(next))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
