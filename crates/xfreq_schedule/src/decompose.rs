//! Native-gate decomposition of a circuit layer
//!
//! Gantree: L4_Schedule → Decompose
//!
//! Every gate of a layer expands to a short sequence of stages; the
//! layer's stages are merged index by index into sub-layers. Gates of
//! one layer act on disjoint qubits, so merged stages stay disjoint.

use crate::config::DecompositionScheme;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;
use xfreq_core::{Coupling, CrosstalkGraph, Gate, Layer, NativeGate, QubitId};

/// Stage sequence of a single CNOT on a native gate
/// Gantree: cnot_stages(c, t, native) -> Vec<Layer> // CNOT 분해
pub fn cnot_stages(control: QubitId, target: QubitId, native: NativeGate) -> Vec<Layer> {
    match native {
        NativeGate::Cz => vec![
            vec![Gate::H(target)],
            vec![Gate::Cz(control, target)],
            vec![Gate::H(target)],
        ],
        NativeGate::ISwap => vec![
            vec![Gate::Rz(control, -FRAC_PI_2), Gate::Rz(target, FRAC_PI_2)],
            vec![Gate::Rx(target, FRAC_PI_2)],
            vec![Gate::ISwap(control, target)],
            vec![Gate::Rx(control, FRAC_PI_2)],
            vec![Gate::ISwap(control, target)],
            vec![Gate::Rz(target, FRAC_PI_2)],
        ],
        NativeGate::SqrtISwap => vec![
            vec![Gate::Ry(target, -FRAC_PI_2)],
            vec![Gate::SqrtISwap(control, target)],
            vec![Gate::Rx(control, PI)],
            vec![Gate::SqrtISwap(control, target)],
            vec![Gate::Rz(control, -FRAC_PI_2), Gate::Ry(target, FRAC_PI_2)],
        ],
    }
}

/// Stage sequence of one gate on a native gate
/// Gantree: decompose_gate(gate, native) -> Vec<Layer> // 게이트 분해
///
/// Native gates, single-qubit gates, measurements, resets, barriers
/// and unknown unitaries pass through as a single stage.
pub fn decompose_gate(gate: &Gate, native: NativeGate) -> Vec<Layer> {
    match gate {
        Gate::Cnot(c, t) => cnot_stages(*c, *t, native),

        Gate::Cz(a, b) if native != NativeGate::Cz => {
            let mut stages = vec![vec![Gate::H(*b)]];
            stages.extend(cnot_stages(*a, *b, native));
            stages.push(vec![Gate::H(*b)]);
            stages
        }

        Gate::Cy(c, t) => {
            let mut stages = vec![vec![Gate::Sdg(*t)]];
            stages.extend(cnot_stages(*c, *t, native));
            stages.push(vec![Gate::S(*t)]);
            stages
        }

        Gate::Swap(a, b) => {
            let mut stages = cnot_stages(*a, *b, native);
            stages.extend(cnot_stages(*b, *a, native));
            stages.extend(cnot_stages(*a, *b, native));
            stages
        }

        other => vec![vec![other.clone()]],
    }
}

/// Native gate the flexible scheme picks for a coupling
///
/// Controlled-phase when another coupling active in the same layer
/// conflicts with it, iSWAP otherwise.
pub fn flexible_native(coupling: &Coupling, active: &[Coupling], crosstalk: &CrosstalkGraph) -> NativeGate {
    let crowded = active
        .iter()
        .any(|other| other != coupling && crosstalk.conflicts(coupling, other));

    if crowded {
        NativeGate::Cz
    } else {
        NativeGate::ISwap
    }
}

/// Decompose a layer into merged sub-layers
/// Gantree: decompose_layer(layer, scheme, crosstalk) -> Vec<Layer> // 레이어 분해
pub fn decompose_layer(layer: &[Gate], scheme: DecompositionScheme, crosstalk: &CrosstalkGraph) -> Vec<Layer> {
    let active: Vec<Coupling> = layer
        .iter()
        .filter_map(|g| g.pair())
        .filter_map(|(a, b)| Coupling::new(a, b).ok())
        .collect();

    let mut merged: Vec<Layer> = Vec::new();

    for gate in layer {
        // Gantree: pick_native(gate) // 네이티브 선택
        let native = match scheme.native() {
            Some(native) => native,
            None => gate
                .pair()
                .and_then(|(a, b)| Coupling::new(a, b).ok())
                .map(|c| flexible_native(&c, &active, crosstalk))
                .unwrap_or(NativeGate::Cz),
        };

        // Gantree: merge_stages(stages) // 단계 병합
        for (k, stage) in decompose_gate(gate, native).into_iter().enumerate() {
            if merged.len() <= k {
                merged.resize_with(k + 1, Vec::new);
            }
            merged[k].extend(stage);
        }
    }

    merged
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use xfreq_core::Topology;

    fn count_native(layers: &[Layer], native: NativeGate) -> usize {
        layers
            .iter()
            .flatten()
            .filter(|g| g.native_kind() == Some(native))
            .count()
    }

    #[test]
    fn test_cnot_to_cphase() {
        let stages = decompose_gate(&Gate::Cnot(0, 1), NativeGate::Cz);
        assert_eq!(stages.len(), 3);
        assert_eq!(stages[1], vec![Gate::Cz(0, 1)]);
        assert_eq!(stages[0], vec![Gate::H(1)]);
    }

    #[test]
    fn test_native_passthrough() {
        assert_eq!(
            decompose_gate(&Gate::Cz(2, 3), NativeGate::Cz),
            vec![vec![Gate::Cz(2, 3)]]
        );
        assert_eq!(
            decompose_gate(&Gate::ISwap(2, 3), NativeGate::Cz),
            vec![vec![Gate::ISwap(2, 3)]]
        );
        let opaque = Gate::Unitary(0, 1, "fsim".into());
        assert_eq!(decompose_gate(&opaque, NativeGate::Cz), vec![vec![opaque.clone()]]);
    }

    #[test]
    fn test_swap_uses_three_natives() {
        let stages = decompose_gate(&Gate::Swap(0, 1), NativeGate::Cz);
        assert_eq!(count_native(&stages, NativeGate::Cz), 3);

        let stages = decompose_gate(&Gate::Swap(0, 1), NativeGate::ISwap);
        assert_eq!(count_native(&stages, NativeGate::ISwap), 6);
    }

    #[test]
    fn test_stages_keep_qubits_disjoint() {
        let layer = vec![Gate::Cnot(0, 1), Gate::H(2), Gate::Swap(3, 4)];
        let crosstalk = CrosstalkGraph::new();
        for scheme in [
            DecompositionScheme::Cphase,
            DecompositionScheme::ISwap,
            DecompositionScheme::SqrtISwap,
        ] {
            for sub in decompose_layer(&layer, scheme, &crosstalk) {
                let mut qubits: Vec<QubitId> = sub.iter().flat_map(|g| g.qubits()).collect();
                let n = qubits.len();
                qubits.sort();
                qubits.dedup();
                assert_eq!(qubits.len(), n, "{:?}", scheme);
            }
        }
    }

    #[test]
    fn test_single_qubit_layer_one_stage() {
        let layer = vec![Gate::H(0), Gate::X(1)];
        let merged = decompose_layer(&layer, DecompositionScheme::Cphase, &CrosstalkGraph::new());
        assert_eq!(merged, vec![layer]);
    }

    #[test]
    fn test_flexible_picks_by_crowding() {
        let topology = Topology::linear(6);
        let crosstalk = CrosstalkGraph::augmented(&topology, 1);

        // (0,1) and (2,3) are one hop apart; (5,4) is alone
        let layer = vec![Gate::Cz(0, 1), Gate::Cz(2, 3)];
        let merged = decompose_layer(&layer, DecompositionScheme::Flexible, &crosstalk);
        assert_eq!(merged, vec![layer]);

        let layer = vec![Gate::Cnot(0, 1), Gate::Cnot(5, 4)];
        let merged = decompose_layer(&layer, DecompositionScheme::Flexible, &crosstalk);
        assert_eq!(count_native(&merged, NativeGate::ISwap), 4);
        assert_eq!(count_native(&merged, NativeGate::Cz), 0);
    }
}
