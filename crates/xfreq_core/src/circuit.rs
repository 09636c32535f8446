//! Quantum circuit structure for xfreq
//!
//! Gantree: L1_Circuit → Circuit
//!
//! Ordered gate list with ASAP layering, physical remapping and a
//! small OpenQASM 2.0 bridge.

use crate::error::{XfreqError, XfreqResult};
use crate::gate::Gate;
use crate::topology::Topology;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One circuit layer: gates that may execute simultaneously
/// Gantree: Layer // pub type Layer = Vec<Gate>
pub type Layer = Vec<Gate>;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(num_qubits: usize, gates: Vec<Gate>) -> XfreqResult<Self> {
        let circuit = Self {
            num_qubits,
            gates,
            name: None,
        };
        circuit.validate_gates()?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    /// Gantree: add_gate(&mut, Gate) -> Result // 게이트 추가
    pub fn add_gate(&mut self, gate: Gate) -> XfreqResult<()> {
        for &qubit in &gate.qubits() {
            if qubit >= self.num_qubits {
                return Err(XfreqError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Split into ASAP layers
    /// Gantree: layers(&self) -> Vec<Layer> // 레이어 분할
    ///
    /// Each gate lands one layer after the latest layer touching any of
    /// its qubits. A barrier without operands spans every qubit.
    pub fn layers(&self) -> Vec<Layer> {
        let mut next_free = vec![0usize; self.num_qubits];
        let mut layers: Vec<Layer> = Vec::new();

        for gate in &self.gates {
            let qubits = match gate {
                Gate::Barrier(qs) if qs.is_empty() => (0..self.num_qubits).collect(),
                _ => gate.qubits(),
            };

            let slot = qubits
                .iter()
                .filter_map(|&q| next_free.get(q))
                .copied()
                .max()
                .unwrap_or(0);

            if layers.len() <= slot {
                layers.resize_with(slot + 1, Vec::new);
            }
            layers[slot].push(gate.clone());

            for &q in &qubits {
                if q < self.num_qubits {
                    next_free[q] = slot + 1;
                }
            }
        }

        layers
    }

    /// Calculate circuit depth (number of ASAP layers)
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        self.layers().len()
    }

    /// Get total gate count
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count single-qubit gates
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_qubit()).count()
    }

    /// Count two-qubit gates
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Get two-qubit gate pairs (for topology validation)
    pub fn two_qubit_pairs(&self) -> Vec<(QubitId, QubitId)> {
        self.gates.iter().filter_map(|g| g.pair()).collect()
    }

    // ========================================================================
    // Mapping
    // ========================================================================

    /// Rewrite onto physical qubits
    /// Gantree: remap(&self, mapping, n) -> Result<Circuit> // 물리 매핑
    ///
    /// `mapping[logical]` is the physical qubit. The mapping must cover
    /// every logical qubit, be injective and stay below `num_physical`.
    pub fn remap(&self, mapping: &[QubitId], num_physical: usize) -> XfreqResult<Circuit> {
        if mapping.len() < self.num_qubits {
            return Err(XfreqError::InvalidMapping(format!(
                "mapping covers {} of {} logical qubits",
                mapping.len(),
                self.num_qubits
            )));
        }

        let mut seen = HashSet::new();
        for &physical in &mapping[..self.num_qubits] {
            if physical >= num_physical {
                return Err(XfreqError::QubitOutOfRange {
                    qubit: physical,
                    max: num_physical.saturating_sub(1),
                });
            }
            if !seen.insert(physical) {
                return Err(XfreqError::InvalidMapping(format!(
                    "physical qubit {} assigned twice",
                    physical
                )));
            }
        }

        let gates = self
            .gates
            .iter()
            .map(|g| g.remap(|q| mapping[q]))
            .collect();

        Ok(Circuit {
            num_qubits: num_physical,
            gates,
            name: self.name.clone(),
        })
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn validate_gates(&self) -> XfreqResult<()> {
        for gate in &self.gates {
            for &qubit in &gate.qubits() {
                if qubit >= self.num_qubits {
                    return Err(XfreqError::GateQubitMismatch {
                        qubit,
                        num_qubits: self.num_qubits,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate circuit against a topology
    pub fn validate(&self, topology: &Topology) -> XfreqResult<()> {
        topology.validate_circuit(self)
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String // QASM2 출력
    pub fn to_qasm(&self) -> String {
        let mut lines = vec![
            "OPENQASM 2.0;".to_string(),
            "include \"qelib1.inc\";".to_string(),
            String::new(),
            format!("qreg q[{}];", self.num_qubits),
            format!("creg c[{}];", self.num_qubits),
            String::new(),
        ];

        for gate in &self.gates {
            lines.push(gate.to_qasm());
        }

        lines.join("\n")
    }

    /// Parse from OpenQASM 2.0 string (basic support)
    /// Gantree: from_qasm(s) -> Result<Self> // QASM2 파싱
    pub fn from_qasm(qasm: &str) -> XfreqResult<Self> {
        let mut num_qubits = 0;
        let mut gates = Vec::new();

        for line in qasm.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            if line.starts_with("qreg") {
                if let Some(n) = parse_register_size(line) {
                    num_qubits = n;
                }
                continue;
            }

            if line.starts_with("OPENQASM")
                || line.starts_with("include")
                || line.starts_with("creg")
            {
                continue;
            }

            if let Some(gate) = parse_gate_line(line)? {
                gates.push(gate);
            }
        }

        if num_qubits == 0 {
            return Err(XfreqError::InvalidQasm("No qreg declaration found".into()));
        }

        Circuit::from_gates(num_qubits, gates)
    }
}

// ============================================================================
// QASM Parsing Helpers
// ============================================================================

fn parse_register_size(line: &str) -> Option<usize> {
    let start = line.find('[')?;
    let end = line.find(']')?;
    line[start + 1..end].parse().ok()
}

fn parse_gate_line(line: &str) -> XfreqResult<Option<Gate>> {
    let line = line.trim().trim_end_matches(';');

    let (name, params, operands) = if let Some(paren_pos) = line.find('(') {
        let end_paren = line
            .find(')')
            .ok_or_else(|| XfreqError::InvalidQasm(format!("Missing closing paren: {}", line)))?;
        let params: Vec<f64> = line[paren_pos + 1..end_paren]
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        (&line[..paren_pos], params, line[end_paren + 1..].trim())
    } else {
        match line.split_once(' ') {
            Some((name, rest)) => (name, vec![], rest.trim()),
            None => return Ok(None),
        }
    };

    let qubits = parse_qubits(operands);
    let one = qubits.first().copied();
    let two = if qubits.len() >= 2 {
        Some((qubits[0], qubits[1]))
    } else {
        None
    };
    let theta = params.first().copied();

    let gate = match name.to_lowercase().as_str() {
        "h" => one.map(Gate::H),
        "x" => one.map(Gate::X),
        "y" => one.map(Gate::Y),
        "z" => one.map(Gate::Z),
        "s" => one.map(Gate::S),
        "sdg" => one.map(Gate::Sdg),
        "t" => one.map(Gate::T),
        "tdg" => one.map(Gate::Tdg),
        "sx" => one.map(Gate::Sx),
        "rx" => one.zip(theta).map(|(q, t)| Gate::Rx(q, t)),
        "ry" => one.zip(theta).map(|(q, t)| Gate::Ry(q, t)),
        "rz" => one.zip(theta).map(|(q, t)| Gate::Rz(q, t)),
        "cx" | "cnot" => two.map(|(a, b)| Gate::Cnot(a, b)),
        "cy" => two.map(|(a, b)| Gate::Cy(a, b)),
        "cz" => two.map(|(a, b)| Gate::Cz(a, b)),
        "swap" => two.map(|(a, b)| Gate::Swap(a, b)),
        "iswap" => two.map(|(a, b)| Gate::ISwap(a, b)),
        "sqrtiswap" => two.map(|(a, b)| Gate::SqrtISwap(a, b)),
        "measure" => one.map(Gate::Measure),
        "reset" => one.map(Gate::Reset),
        "barrier" => Some(Gate::Barrier(qubits)),
        other => two.map(|(a, b)| Gate::Unitary(a, b, other.to_string())),
    };

    Ok(gate)
}

fn parse_qubits(s: &str) -> Vec<QubitId> {
    // "q[0],q[1] -> c[0]" keeps only the quantum operands
    let quantum = s.split("->").next().unwrap_or("");
    quantum
        .split(',')
        .filter_map(|part| {
            let start = part.find('[')?;
            let end = part.find(']')?;
            part[start + 1..end].parse().ok()
        })
        .collect()
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} gates)",
            self.num_qubits,
            self.gates.len()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  2Q gates: {}", self.count_2q())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
