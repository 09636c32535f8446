//! Circuit builder for xfreq
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for test and demo circuits. The first rejected
//! gate is remembered and surfaced by `build_validated`.

use crate::circuit::Circuit;
use crate::error::{XfreqError, XfreqResult};
use crate::gate::{Gate, NativeGate};
use crate::types::{Angle, QubitId};

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
pub struct CircuitBuilder {
    circuit: Circuit,
    error: Option<XfreqError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
            error: None,
        }
    }

    /// Append any gate
    /// Gantree: gate(self, Gate) -> Self // 게이트 추가
    pub fn gate(mut self, gate: Gate) -> Self {
        if let Err(e) = self.circuit.add_gate(gate) {
            self.error.get_or_insert(e);
        }
        self
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Hadamard gate
    pub fn h(self, qubit: QubitId) -> Self {
        self.gate(Gate::H(qubit))
    }

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.gate(Gate::X(qubit))
    }

    /// Add Pauli-Z gate
    pub fn z(self, qubit: QubitId) -> Self {
        self.gate(Gate::Z(qubit))
    }

    /// Add SX gate
    pub fn sx(self, qubit: QubitId) -> Self {
        self.gate(Gate::Sx(qubit))
    }

    /// Add RX rotation
    pub fn rx(self, qubit: QubitId, angle: Angle) -> Self {
        self.gate(Gate::Rx(qubit, angle))
    }

    /// Add RZ rotation
    pub fn rz(self, qubit: QubitId, angle: Angle) -> Self {
        self.gate(Gate::Rz(qubit, angle))
    }

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================

    /// Add CNOT gate
    /// Gantree: cx(self, c, t) -> Self // CNOT 추가
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.gate(Gate::Cnot(control, target))
    }

    /// Add CZ gate
    pub fn cz(self, q1: QubitId, q2: QubitId) -> Self {
        self.gate(Gate::Cz(q1, q2))
    }

    /// Add iSWAP gate
    pub fn iswap(self, q1: QubitId, q2: QubitId) -> Self {
        self.gate(Gate::ISwap(q1, q2))
    }

    /// Add sqrt(iSWAP) gate
    pub fn sqrt_iswap(self, q1: QubitId, q2: QubitId) -> Self {
        self.gate(Gate::SqrtISwap(q1, q2))
    }

    /// Add SWAP gate
    pub fn swap(self, q1: QubitId, q2: QubitId) -> Self {
        self.gate(Gate::Swap(q1, q2))
    }

    /// Add a labelled two-qubit unitary
    pub fn unitary(self, q1: QubitId, q2: QubitId, label: impl Into<String>) -> Self {
        self.gate(Gate::Unitary(q1, q2, label.into()))
    }

    /// Add a native gate on every nearest-neighbor pair of a chain
    /// Gantree: native_chain(self, NativeGate) -> Self // 체인
    pub fn native_chain(mut self, native: NativeGate) -> Self {
        for i in 0..self.circuit.num_qubits().saturating_sub(1) {
            self = self.gate(native.gate(i, i + 1));
        }
        self
    }

    // ========================================================================
    // Measurement and Control
    // ========================================================================

    /// Add measurement
    pub fn measure(self, qubit: QubitId) -> Self {
        self.gate(Gate::Measure(qubit))
    }

    /// Measure all qubits
    pub fn measure_all(mut self) -> Self {
        for q in 0..self.circuit.num_qubits() {
            self = self.gate(Gate::Measure(q));
        }
        self
    }

    /// Add a barrier over all qubits
    pub fn barrier(self) -> Self {
        self.gate(Gate::Barrier(vec![]))
    }

    /// Add a barrier over specific qubits
    pub fn barrier_on(self, qubits: Vec<QubitId>) -> Self {
        self.gate(Gate::Barrier(qubits))
    }

    /// Add H on every qubit
    pub fn h_layer(mut self) -> Self {
        for q in 0..self.circuit.num_qubits() {
            self = self.gate(Gate::H(q));
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit, dropping any rejected gates
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build the circuit, failing on the first rejected gate
    /// Gantree: build_validated(self) -> Result<Circuit> // 검증 빌드
    pub fn build_validated(self) -> XfreqResult<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }

    /// Peek at the circuit under construction
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(2).h(0).cx(0, 1).measure_all().build();
        assert_eq!(circuit.gate_count(), 4);
        assert_eq!(circuit.count_2q(), 1);
    }

    #[test]
    fn test_native_chain() {
        let circuit = CircuitBuilder::new(4)
            .native_chain(NativeGate::SqrtISwap)
            .build();
        assert_eq!(circuit.count_2q(), 3);
        assert_eq!(circuit.gates()[2], Gate::SqrtISwap(2, 3));
    }

    #[test]
    fn test_build_validated_reports_first_error() {
        let result = CircuitBuilder::new(2).h(0).cz(0, 4).h(7).build_validated();
        assert!(matches!(
            result,
            Err(XfreqError::GateQubitMismatch { qubit: 4, .. })
        ));
    }

    #[test]
    fn test_barrier() {
        let circuit = CircuitBuilder::new(3).h(0).barrier().h(1).build();
        assert_eq!(circuit.depth(), 3);
    }
}
