//! Idle (park) coloring of the connectivity graph
//!
//! Gantree: L3_Color → ParkColoring
//!
//! Computed once per run. Coupled qubits get different park colors so
//! their idle frequencies are separated.

use crate::graph::{num_colors, ConflictGraph};
use serde::{Deserialize, Serialize};
use xfreq_core::{ColorId, QubitId, Topology};

/// Signed label of park color `c`
/// Gantree: park_color_id(c) -> ColorId // -(c+1)
#[inline]
pub fn park_color_id(color: usize) -> ColorId {
    -(color as ColorId + 1)
}

/// Per-qubit park colors
/// Gantree: ParkColoring // 유휴 컬러링
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkColoring {
    colors: Vec<usize>,
    num_colors: usize,
}

impl ParkColoring {
    /// Greedy coloring of the topology in qubit order
    /// Gantree: from_topology(topology) -> Self // 파킹 컬러링
    pub fn from_topology(topology: &Topology) -> Self {
        let mut graph = ConflictGraph::new();
        for q in 0..topology.num_qubits() {
            graph.insert_node(q);
        }
        for coupling in topology.couplings() {
            graph.insert_conflict(coupling.lo(), coupling.hi());
        }

        let coloring = graph.color_greedy();
        let colors: Vec<usize> = (0..topology.num_qubits())
            .map(|q| coloring.get(&q).copied().unwrap_or(0))
            .collect();

        Self {
            num_colors: num_colors(&coloring),
            colors,
        }
    }

    /// Park color of a qubit
    pub fn color_of(&self, qubit: QubitId) -> Option<usize> {
        self.colors.get(qubit).copied()
    }

    /// Signed park color of a qubit
    pub fn color_id(&self, qubit: QubitId) -> Option<ColorId> {
        self.color_of(qubit).map(park_color_id)
    }

    /// Number of park colors
    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// Number of qubits colored
    pub fn num_qubits(&self) -> usize {
        self.colors.len()
    }

    /// Qubits holding a park color
    pub fn qubits_with(&self, color: usize) -> Vec<QubitId> {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == color)
            .map(|(q, _)| q)
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
