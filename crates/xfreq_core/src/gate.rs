//! Quantum gate definitions for xfreq
//!
//! Gantree: L1_Circuit → Gate
//!
//! Gate enum covering the source gates a circuit may carry and the
//! three native two-qubit interactions a tunable device executes.

use crate::types::{Angle, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Hadamard gate
    H(QubitId),

    /// Pauli-X gate
    X(QubitId),

    /// Pauli-Y gate
    Y(QubitId),

    /// Pauli-Z gate
    Z(QubitId),

    /// S gate (sqrt(Z))
    S(QubitId),

    /// S-dagger gate
    Sdg(QubitId),

    /// T gate
    T(QubitId),

    /// T-dagger gate
    Tdg(QubitId),

    /// SX gate (sqrt(X))
    Sx(QubitId),

    /// Rotation around X-axis
    /// Gantree: Rx(QubitId, Angle) // X 회전
    Rx(QubitId, Angle),

    /// Rotation around Y-axis
    Ry(QubitId, Angle),

    /// Rotation around Z-axis
    Rz(QubitId, Angle),

    /// General single-qubit rotation U(θ, φ, λ)
    U(QubitId, Angle, Angle, Angle),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (CX)
    /// Gantree: CNOT(QubitId, QubitId) // ctrl, tgt
    Cnot(QubitId, QubitId),

    /// Controlled-Y
    Cy(QubitId, QubitId),

    /// SWAP gate
    Swap(QubitId, QubitId),

    /// Controlled-Z (native controlled-phase)
    /// Gantree: CZ(QubitId, QubitId) // 네이티브
    Cz(QubitId, QubitId),

    /// iSWAP gate (native)
    ISwap(QubitId, QubitId),

    /// sqrt(iSWAP) gate (native)
    SqrtISwap(QubitId, QubitId),

    /// Opaque two-qubit unitary identified by its label
    Unitary(QubitId, QubitId, String),

    // ========================================================================
    // Measurement and Control
    // ========================================================================
    /// Single qubit measurement
    Measure(QubitId),

    /// Barrier over the listed qubits (all qubits when empty)
    /// Gantree: Barrier // 배리어
    Barrier(Vec<QubitId>),

    /// Reset qubit to |0⟩
    Reset(QubitId),
}

/// Native two-qubit interaction types
/// Gantree: NativeGate // 네이티브 2Q
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeGate {
    /// Full iSWAP
    ISwap,
    /// Half iSWAP
    SqrtISwap,
    /// Controlled-phase (CZ), detuned by anharmonicity
    Cz,
}

impl NativeGate {
    /// Parse a native gate label (case-insensitive)
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "iswap" => Some(NativeGate::ISwap),
            "sqrtiswap" | "sqrt_iswap" | "siswap" => Some(NativeGate::SqrtISwap),
            "cz" | "cphase" => Some(NativeGate::Cz),
            _ => None,
        }
    }

    /// Build the native gate on a qubit pair
    pub fn gate(&self, q1: QubitId, q2: QubitId) -> Gate {
        match self {
            NativeGate::ISwap => Gate::ISwap(q1, q2),
            NativeGate::SqrtISwap => Gate::SqrtISwap(q1, q2),
            NativeGate::Cz => Gate::Cz(q1, q2),
        }
    }
}

impl fmt::Display for NativeGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeGate::ISwap => write!(f, "iswap"),
            NativeGate::SqrtISwap => write!(f, "sqrtiswap"),
            NativeGate::Cz => write!(f, "cz"),
        }
    }
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    /// Gantree: qubits(&self) -> Vec<QubitId> // 관련 큐비트
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::S(q)
            | Gate::Sdg(q)
            | Gate::T(q)
            | Gate::Tdg(q)
            | Gate::Sx(q)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _)
            | Gate::U(q, _, _, _)
            | Gate::Measure(q)
            | Gate::Reset(q) => vec![*q],

            Gate::Cnot(a, b)
            | Gate::Cy(a, b)
            | Gate::Swap(a, b)
            | Gate::Cz(a, b)
            | Gate::ISwap(a, b)
            | Gate::SqrtISwap(a, b)
            | Gate::Unitary(a, b, _) => vec![*a, *b],

            Gate::Barrier(qs) => qs.clone(),
        }
    }

    /// Operand pair of a two-qubit gate
    pub fn pair(&self) -> Option<(QubitId, QubitId)> {
        match self {
            Gate::Cnot(a, b)
            | Gate::Cy(a, b)
            | Gate::Swap(a, b)
            | Gate::Cz(a, b)
            | Gate::ISwap(a, b)
            | Gate::SqrtISwap(a, b)
            | Gate::Unitary(a, b, _) => Some((*a, *b)),
            _ => None,
        }
    }

    /// Check if gate is a single-qubit unitary
    /// Gantree: is_single_qubit(&self) -> bool // 1Q 판별
    pub fn is_single_qubit(&self) -> bool {
        matches!(
            self,
            Gate::H(_)
                | Gate::X(_)
                | Gate::Y(_)
                | Gate::Z(_)
                | Gate::S(_)
                | Gate::Sdg(_)
                | Gate::T(_)
                | Gate::Tdg(_)
                | Gate::Sx(_)
                | Gate::Rx(_, _)
                | Gate::Ry(_, _)
                | Gate::Rz(_, _)
                | Gate::U(_, _, _, _)
        )
    }

    /// Check if gate is two-qubit
    /// Gantree: is_two_qubit(&self) -> bool // 2Q 판별
    pub fn is_two_qubit(&self) -> bool {
        self.pair().is_some()
    }

    /// Check if gate is measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_))
    }

    /// Check if gate is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier(_))
    }

    /// Native interaction type, matched by variant or by unitary label
    /// Gantree: native_kind(&self) -> Option<NativeGate> // 네이티브 판별
    pub fn native_kind(&self) -> Option<NativeGate> {
        match self {
            Gate::ISwap(_, _) => Some(NativeGate::ISwap),
            Gate::SqrtISwap(_, _) => Some(NativeGate::SqrtISwap),
            Gate::Cz(_, _) => Some(NativeGate::Cz),
            Gate::Unitary(_, _, label) => NativeGate::parse(label),
            _ => None,
        }
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::S(_) => "s",
            Gate::Sdg(_) => "sdg",
            Gate::T(_) => "t",
            Gate::Tdg(_) => "tdg",
            Gate::Sx(_) => "sx",
            Gate::Rx(_, _) => "rx",
            Gate::Ry(_, _) => "ry",
            Gate::Rz(_, _) => "rz",
            Gate::U(_, _, _, _) => "u",
            Gate::Cnot(_, _) => "cx",
            Gate::Cy(_, _) => "cy",
            Gate::Swap(_, _) => "swap",
            Gate::Cz(_, _) => "cz",
            Gate::ISwap(_, _) => "iswap",
            Gate::SqrtISwap(_, _) => "sqrtiswap",
            Gate::Unitary(_, _, _) => "unitary",
            Gate::Measure(_) => "measure",
            Gate::Barrier(_) => "barrier",
            Gate::Reset(_) => "reset",
        }
    }

    /// Optional label (only opaque unitaries carry one)
    pub fn label(&self) -> Option<&str> {
        match self {
            Gate::Unitary(_, _, label) => Some(label.as_str()),
            _ => None,
        }
    }

    /// Rewrite operands through a qubit map
    /// Gantree: remap(&self, f) -> Gate // 큐비트 매핑
    pub fn remap<F>(&self, f: F) -> Gate
    where
        F: Fn(QubitId) -> QubitId,
    {
        match self {
            Gate::H(q) => Gate::H(f(*q)),
            Gate::X(q) => Gate::X(f(*q)),
            Gate::Y(q) => Gate::Y(f(*q)),
            Gate::Z(q) => Gate::Z(f(*q)),
            Gate::S(q) => Gate::S(f(*q)),
            Gate::Sdg(q) => Gate::Sdg(f(*q)),
            Gate::T(q) => Gate::T(f(*q)),
            Gate::Tdg(q) => Gate::Tdg(f(*q)),
            Gate::Sx(q) => Gate::Sx(f(*q)),
            Gate::Rx(q, a) => Gate::Rx(f(*q), *a),
            Gate::Ry(q, a) => Gate::Ry(f(*q), *a),
            Gate::Rz(q, a) => Gate::Rz(f(*q), *a),
            Gate::U(q, t, p, l) => Gate::U(f(*q), *t, *p, *l),
            Gate::Cnot(a, b) => Gate::Cnot(f(*a), f(*b)),
            Gate::Cy(a, b) => Gate::Cy(f(*a), f(*b)),
            Gate::Swap(a, b) => Gate::Swap(f(*a), f(*b)),
            Gate::Cz(a, b) => Gate::Cz(f(*a), f(*b)),
            Gate::ISwap(a, b) => Gate::ISwap(f(*a), f(*b)),
            Gate::SqrtISwap(a, b) => Gate::SqrtISwap(f(*a), f(*b)),
            Gate::Unitary(a, b, label) => Gate::Unitary(f(*a), f(*b), label.clone()),
            Gate::Measure(q) => Gate::Measure(f(*q)),
            Gate::Barrier(qs) => Gate::Barrier(qs.iter().map(|&q| f(q)).collect()),
            Gate::Reset(q) => Gate::Reset(f(*q)),
        }
    }

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String // QASM 변환
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::Rx(q, theta) => format!("rx({}) q[{}];", theta, q),
            Gate::Ry(q, theta) => format!("ry({}) q[{}];", theta, q),
            Gate::Rz(q, theta) => format!("rz({}) q[{}];", theta, q),
            Gate::U(q, theta, phi, lambda) => {
                format!("u({},{},{}) q[{}];", theta, phi, lambda, q)
            }
            Gate::Unitary(a, b, label) => format!("{} q[{}],q[{}];", label, a, b),
            Gate::Measure(q) => format!("measure q[{}] -> c[{}];", q, q),
            Gate::Barrier(qs) => {
                if qs.is_empty() {
                    "barrier q;".to_string()
                } else {
                    let qubits: Vec<String> = qs.iter().map(|q| format!("q[{}]", q)).collect();
                    format!("barrier {};", qubits.join(","))
                }
            }
            other => {
                let operands: Vec<String> =
                    other.qubits().iter().map(|q| format!("q[{}]", q)).collect();
                format!("{} {};", other.name(), operands.join(","))
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_qubits() {
        assert_eq!(Gate::H(0).qubits(), vec![0]);
        assert_eq!(Gate::Cnot(0, 1).qubits(), vec![0, 1]);
        assert_eq!(Gate::Barrier(vec![2, 3]).qubits(), vec![2, 3]);
    }

    #[test]
    fn test_gate_classification() {
        assert!(Gate::H(0).is_single_qubit());
        assert!(!Gate::H(0).is_two_qubit());
        assert!(Gate::ISwap(0, 1).is_two_qubit());
        assert!(!Gate::Measure(0).is_single_qubit());
        assert!(Gate::Barrier(vec![]).is_barrier());
    }

    #[test]
    fn test_native_kind() {
        assert_eq!(Gate::Cz(0, 1).native_kind(), Some(NativeGate::Cz));
        assert_eq!(Gate::ISwap(0, 1).native_kind(), Some(NativeGate::ISwap));
        assert_eq!(
            Gate::Unitary(0, 1, "sqrtiswap".into()).native_kind(),
            Some(NativeGate::SqrtISwap)
        );
        assert_eq!(Gate::Unitary(0, 1, "fsim".into()).native_kind(), None);
        assert_eq!(Gate::Cnot(0, 1).native_kind(), None);
    }

    #[test]
    fn test_remap() {
        let mapped = Gate::Cnot(0, 1).remap(|q| q + 10);
        assert_eq!(mapped, Gate::Cnot(10, 11));

        let barrier = Gate::Barrier(vec![0, 2]).remap(|q| q * 2);
        assert_eq!(barrier, Gate::Barrier(vec![0, 4]));
    }

    #[test]
    fn test_gate_to_qasm() {
        assert_eq!(Gate::H(0).to_qasm(), "h q[0];");
        assert_eq!(Gate::Cnot(0, 1).to_qasm(), "cx q[0],q[1];");
        assert_eq!(Gate::SqrtISwap(2, 3).to_qasm(), "sqrtiswap q[2],q[3];");
        assert_eq!(Gate::Unitary(0, 1, "fsim".into()).to_qasm(), "fsim q[0],q[1];");
    }

    #[test]
    fn test_label() {
        assert_eq!(Gate::Unitary(0, 1, "iswap".into()).label(), Some("iswap"));
        assert_eq!(Gate::Cz(0, 1).label(), None);
    }
}
