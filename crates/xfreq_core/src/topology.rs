//! Device connectivity for xfreq
//!
//! Gantree: L1_Circuit → Topology
//!
//! Undirected coupling graph of a tunable-coupler device. Couplings
//! are canonical, deduplicated and kept in sorted order so every
//! iteration over them is deterministic.

use crate::circuit::Circuit;
use crate::error::{XfreqError, XfreqResult};
use crate::types::{Coupling, QubitId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Qubit connectivity graph
/// Gantree: Topology // 큐비트 토폴로지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Sorted canonical couplings
    /// Gantree: couplings: Vec<Coupling> // 연결 맵
    couplings: Vec<Coupling>,

    /// Number of qubits
    num_qubits: usize,

    /// Optional topology name
    name: Option<String>,
}

impl Topology {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from qubit pairs
    /// Gantree: from_pairs(n, pairs) -> Result<Self> // 맵에서 생성
    ///
    /// Reversed duplicates collapse into one coupling.
    pub fn from_pairs(num_qubits: usize, pairs: &[(QubitId, QubitId)]) -> XfreqResult<Self> {
        let mut set = BTreeSet::new();
        for &(q1, q2) in pairs {
            let coupling = Coupling::new(q1, q2)?;
            if coupling.hi() >= num_qubits {
                return Err(XfreqError::QubitOutOfRange {
                    qubit: coupling.hi(),
                    max: num_qubits.saturating_sub(1),
                });
            }
            set.insert(coupling);
        }

        Ok(Self {
            couplings: set.into_iter().collect(),
            num_qubits,
            name: None,
        })
    }

    /// Create from qubit pairs, inferring the qubit count
    pub fn from_coupling_map(pairs: &[(QubitId, QubitId)]) -> XfreqResult<Self> {
        if pairs.is_empty() {
            return Err(XfreqError::EmptyCouplingMap);
        }
        let max_qubit = pairs.iter().map(|&(a, b)| a.max(b)).max().unwrap_or(0);
        Self::from_pairs(max_qubit + 1, pairs)
    }

    /// Create linear chain topology
    /// Gantree: linear(n) -> Self // 선형 체인
    ///
    /// Connectivity: 0-1-2-3-...-N-1
    pub fn linear(n: usize) -> Self {
        let couplings = (0..n.saturating_sub(1))
            .map(|i| Coupling::from_ordered(i, i + 1))
            .collect();

        Self {
            couplings,
            num_qubits: n,
            name: Some(format!("linear_{}", n)),
        }
    }

    /// Create ring topology
    /// Gantree: ring(n) -> Self // 원형
    pub fn ring(n: usize) -> Self {
        let mut set: BTreeSet<Coupling> = (0..n.saturating_sub(1))
            .map(|i| Coupling::from_ordered(i, i + 1))
            .collect();
        if n > 2 {
            set.insert(Coupling::from_ordered(0, n - 1));
        }

        Self {
            couplings: set.into_iter().collect(),
            num_qubits: n,
            name: Some(format!("ring_{}", n)),
        }
    }

    /// Create grid topology
    /// Gantree: grid(rows, cols) -> Self // 그리드
    ///
    /// Qubit indexing: row * cols + col
    pub fn grid(rows: usize, cols: usize) -> Self {
        let mut set = BTreeSet::new();

        for r in 0..rows {
            for c in 0..cols {
                let q = r * cols + c;
                if c + 1 < cols {
                    set.insert(Coupling::from_ordered(q, q + 1));
                }
                if r + 1 < rows {
                    set.insert(Coupling::from_ordered(q, q + cols));
                }
            }
        }

        Self {
            couplings: set.into_iter().collect(),
            num_qubits: rows * cols,
            name: Some(format!("grid_{}x{}", rows, cols)),
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Sorted canonical couplings
    pub fn couplings(&self) -> &[Coupling] {
        &self.couplings
    }

    /// Get topology name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get number of edges
    pub fn num_edges(&self) -> usize {
        self.couplings.len()
    }

    // ========================================================================
    // Connectivity Queries
    // ========================================================================

    /// Check if two distinct qubits share a coupling
    /// Gantree: is_connected(q1, q2) -> bool // 연결 여부
    pub fn is_connected(&self, q1: QubitId, q2: QubitId) -> bool {
        match Coupling::new(q1, q2) {
            Ok(c) => self.couplings.binary_search(&c).is_ok(),
            Err(_) => false,
        }
    }

    /// Get sorted neighbors of a qubit
    /// Gantree: neighbors(q) -> Vec<QubitId> // 이웃
    pub fn neighbors(&self, qubit: QubitId) -> Vec<QubitId> {
        let mut neighbors: Vec<QubitId> = self
            .couplings
            .iter()
            .filter_map(|c| {
                if c.lo() == qubit {
                    Some(c.hi())
                } else if c.hi() == qubit {
                    Some(c.lo())
                } else {
                    None
                }
            })
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    fn adjacency_list(&self) -> Vec<Vec<QubitId>> {
        let mut adj = vec![Vec::new(); self.num_qubits];
        for c in &self.couplings {
            adj[c.lo()].push(c.hi());
            adj[c.hi()].push(c.lo());
        }
        adj
    }

    /// Hop distances from one qubit (BFS), `None` when unreachable
    /// Gantree: distances_from(q) -> Vec<Option<usize>> // BFS 거리
    pub fn distances_from(&self, start: QubitId) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.num_qubits];
        if start >= self.num_qubits {
            return dist;
        }

        let adj = self.adjacency_list();
        let mut queue = VecDeque::new();
        dist[start] = Some(0);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let d = dist[current].unwrap_or(0);
            for &next in &adj[current] {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }

        dist
    }

    /// All-pairs hop distances
    pub fn distance_matrix(&self) -> Vec<Vec<Option<usize>>> {
        (0..self.num_qubits).map(|q| self.distances_from(q)).collect()
    }

    /// Hop distance between two qubits
    pub fn distance(&self, q1: QubitId, q2: QubitId) -> Option<usize> {
        self.distances_from(q1).get(q2).copied().flatten()
    }

    /// Check if all qubits are reachable from qubit 0
    pub fn is_fully_connected(&self) -> bool {
        self.num_qubits <= 1 || self.distances_from(0).iter().all(Option::is_some)
    }

    /// Maximum finite hop distance
    pub fn diameter(&self) -> usize {
        self.distance_matrix()
            .iter()
            .flat_map(|row| row.iter().flatten())
            .copied()
            .max()
            .unwrap_or(0)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate a circuit against this topology
    /// Gantree: validate_circuit(&self, Circuit) -> Result // 검증
    pub fn validate_circuit(&self, circuit: &Circuit) -> XfreqResult<()> {
        if circuit.num_qubits() > self.num_qubits {
            return Err(XfreqError::QubitOutOfRange {
                qubit: circuit.num_qubits() - 1,
                max: self.num_qubits.saturating_sub(1),
            });
        }

        for (q1, q2) in circuit.two_qubit_pairs() {
            if !self.is_connected(q1, q2) {
                return Err(XfreqError::TopologyViolation { q1, q2 });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Topology({} qubits, {} edges{})",
            self.num_qubits,
            self.num_edges(),
            self.name
                .as_ref()
                .map(|n| format!(", {}", n))
                .unwrap_or_default()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CircuitBuilder;
    use crate::gate::Gate;

    #[test]
    fn test_linear_topology() {
        let topo = Topology::linear(5);

        assert_eq!(topo.num_qubits(), 5);
        assert_eq!(topo.num_edges(), 4);
        assert!(topo.is_connected(0, 1));
        assert!(topo.is_connected(2, 1));
        assert!(!topo.is_connected(0, 2));
        assert!(!topo.is_connected(1, 1));
    }

    #[test]
    fn test_ring_topology() {
        let topo = Topology::ring(4);
        assert_eq!(topo.num_edges(), 4);
        assert!(topo.is_connected(3, 0));
    }

    #[test]
    fn test_grid_topology() {
        let topo = Topology::grid(2, 3);
        assert_eq!(topo.num_qubits(), 6);
        assert_eq!(topo.num_edges(), 7);
        assert_eq!(topo.neighbors(1), vec![0, 2, 4]);
    }

    #[test]
    fn test_from_pairs_dedup() {
        let topo = Topology::from_pairs(3, &[(1, 0), (0, 1), (2, 1)]).unwrap();
        assert_eq!(topo.num_edges(), 2);
        assert_eq!(topo.couplings()[0].endpoints(), (0, 1));

        assert!(Topology::from_pairs(2, &[(0, 5)]).is_err());
        assert!(matches!(
            Topology::from_coupling_map(&[]),
            Err(XfreqError::EmptyCouplingMap)
        ));
    }

    #[test]
    fn test_distances() {
        let topo = Topology::linear(5);
        assert_eq!(topo.distance(0, 4), Some(4));
        assert_eq!(topo.distance(2, 2), Some(0));
        assert_eq!(topo.diameter(), 4);

        let split = Topology::from_pairs(4, &[(0, 1), (2, 3)]).unwrap();
        assert_eq!(split.distance(0, 3), None);
        assert!(!split.is_fully_connected());
    }

    #[test]
    fn test_validate_circuit() {
        let topo = Topology::linear(5);
        let circuit = CircuitBuilder::new(5).h(0).cz(0, 1).cz(3, 4).build();
        assert!(topo.validate_circuit(&circuit).is_ok());

        let mut bad = CircuitBuilder::new(5).build();
        bad.add_gate(Gate::Cnot(0, 3)).unwrap();
        assert!(matches!(
            topo.validate_circuit(&bad),
            Err(XfreqError::TopologyViolation { q1: 0, q2: 3 })
        ));
    }
}
