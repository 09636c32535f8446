//! Greedy rescheduling of decomposed sub-layers
//!
//! Gantree: L4_Schedule → Reschedule
//!
//! Packs gates into the earliest sub-layer their qubits allow. A
//! two-qubit gate is pushed later while the candidate sub-layer holds a
//! coupling adjacent to its own in the connectivity graph.

use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::{Coupling, Gate, Layer, QubitId, Topology};

/// Whether two couplings touch or are joined by a physical coupling
/// Gantree: adjacent(a, b, topology) -> bool // 인접 판정
pub fn adjacent(a: &Coupling, b: &Coupling, topology: &Topology) -> bool {
    if a.shares_qubit(b) {
        return true;
    }
    let (a0, a1) = a.endpoints();
    let (b0, b1) = b.endpoints();
    [(a0, b0), (a0, b1), (a1, b0), (a1, b1)]
        .iter()
        .any(|&(x, y)| topology.is_connected(x, y))
}

/// Greedy ASAP compaction
/// Gantree: reschedule(layers, topology) -> Result<Vec<Layer>> // 탐욕 재배치
///
/// Gate order per qubit is preserved. A barrier without operands
/// fences every qubit. A two-qubit gate on an uncoupled pair is a
/// `TopologyViolation`.
pub fn reschedule(layers: &[Layer], topology: &Topology) -> XfreqResult<Vec<Layer>> {
    let num_qubits = topology.num_qubits();
    let mut ready = vec![0usize; num_qubits];
    let mut out: Vec<Layer> = Vec::new();
    let mut slot_couplings: Vec<Vec<Coupling>> = Vec::new();

    for gate in layers.iter().flatten() {
        let qubits: Vec<QubitId> = match gate {
            Gate::Barrier(qs) if qs.is_empty() => (0..num_qubits).collect(),
            _ => gate.qubits(),
        };

        let coupling = match gate.pair() {
            Some((a, b)) => {
                if !topology.is_connected(a, b) {
                    return Err(XfreqError::TopologyViolation { q1: a, q2: b });
                }
                Some(Coupling::new(a, b)?)
            }
            None => None,
        };

        // Gantree: earliest_slot(qubits) // 가용 슬롯
        let mut slot = qubits
            .iter()
            .filter_map(|&q| ready.get(q))
            .copied()
            .max()
            .unwrap_or(0);

        // Gantree: defer_adjacent(coupling) // 인접 결합 회피
        if let Some(c) = &coupling {
            while slot < slot_couplings.len()
                && slot_couplings[slot]
                    .iter()
                    .any(|other| adjacent(c, other, topology))
            {
                slot += 1;
            }
        }

        if out.len() <= slot {
            out.resize_with(slot + 1, Vec::new);
            slot_couplings.resize_with(slot + 1, Vec::new);
        }
        out[slot].push(gate.clone());
        if let Some(c) = coupling {
            slot_couplings[slot].push(c);
        }

        for &q in &qubits {
            if let Some(r) = ready.get_mut(q) {
                *r = slot + 1;
            }
        }
    }

    log::trace!("rescheduled {} sub-layers into {}", layers.len(), out.len());
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let topology = Topology::linear(6);
        let a = Coupling::new(0, 1).unwrap();
        assert!(adjacent(&a, &Coupling::new(1, 2).unwrap(), &topology));
        assert!(adjacent(&a, &Coupling::new(2, 3).unwrap(), &topology));
        assert!(!adjacent(&a, &Coupling::new(3, 4).unwrap(), &topology));
    }

    #[test]
    fn test_single_qubit_gates_pulled_forward() {
        let topology = Topology::linear(3);
        let layers = vec![vec![Gate::H(0)], vec![Gate::H(1)], vec![Gate::H(2)]];
        let out = reschedule(&layers, &topology).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].len(), 3);
    }

    #[test]
    fn test_adjacent_interactions_split() {
        let topology = Topology::linear(6);
        let layers = vec![vec![Gate::Cz(0, 1), Gate::Cz(2, 3), Gate::Cz(4, 5)]];
        let out = reschedule(&layers, &topology).unwrap();

        // (2,3) is adjacent to both neighbours, which can share a slot
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], vec![Gate::Cz(0, 1), Gate::Cz(4, 5)]);
        assert_eq!(out[1], vec![Gate::Cz(2, 3)]);
    }

    #[test]
    fn test_qubit_order_preserved() {
        let topology = Topology::linear(2);
        let layers = vec![vec![Gate::H(1)], vec![Gate::Cz(0, 1)], vec![Gate::X(0)]];
        let out = reschedule(&layers, &topology).unwrap();
        assert_eq!(out, layers);
    }

    #[test]
    fn test_barrier_fences_all() {
        let topology = Topology::linear(3);
        let layers = vec![
            vec![Gate::H(0)],
            vec![Gate::Barrier(vec![])],
            vec![Gate::H(2)],
        ];
        let out = reschedule(&layers, &topology).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], vec![Gate::H(2)]);
    }

    #[test]
    fn test_uncoupled_pair_rejected() {
        let topology = Topology::linear(4);
        let layers = vec![vec![Gate::Cz(0, 3)]];
        assert!(matches!(
            reschedule(&layers, &topology),
            Err(XfreqError::TopologyViolation { q1: 0, q2: 3 })
        ));
    }
}
