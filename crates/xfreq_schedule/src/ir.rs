//! Scheduled intermediate representation
//!
//! Gantree: L4_Schedule → Ir
//!
//! Instruction layers with per-qubit frequencies, plus the timing,
//! depth and color statistics of the run.

use serde::{Deserialize, Serialize};
use std::fmt;
use xfreq_core::error::XfreqResult;
use xfreq_core::{Gate, Ghz, Nanos, QubitId};

/// One scheduled operation
/// Gantree: Instruction // 명령
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Gate
    pub gate: Gate,

    /// Assigned frequency pair (two-qubit interactions only)
    pub frequencies: Option<(Ghz, Ghz)>,

    /// Duration (ns)
    pub duration: Nanos,
}

impl Instruction {
    /// Frequency-independent instruction
    pub fn timed(gate: Gate, duration: Nanos) -> Self {
        Self {
            gate,
            frequencies: None,
            duration,
        }
    }

    /// Interaction at a frequency pair
    pub fn interaction(gate: Gate, frequencies: (Ghz, Ghz), duration: Nanos) -> Self {
        Self {
            gate,
            frequencies: Some(frequencies),
            duration,
        }
    }

    /// Operand qubits
    pub fn qubits(&self) -> Vec<QubitId> {
        self.gate.qubits()
    }

    /// Check if this is a two-qubit interaction
    pub fn is_interaction(&self) -> bool {
        self.gate.is_two_qubit()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:.2} ns", self.gate.to_qasm(), self.duration)?;
        if let Some((f1, f2)) = self.frequencies {
            write!(f, " @ {:.3}/{:.3} GHz", f1, f2)?;
        }
        write!(f, "]")
    }
}

/// One emitted layer
/// Gantree: IrLayer // IR 레이어
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrLayer {
    /// Instructions, in emission order
    pub instructions: Vec<Instruction>,

    /// Frequency of every qubit during the layer
    pub qubit_frequencies: Vec<Ghz>,

    /// Layer time (longest instruction)
    pub duration: Nanos,
}

impl IrLayer {
    /// Number of two-qubit interactions
    pub fn num_interactions(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_interaction()).count()
    }
}

/// Intermediate representation of a scheduled circuit
/// Gantree: Ir // 중간 표현
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ir {
    /// Number of physical qubits
    pub num_qubits: usize,

    /// Anharmonicity used for idle pairs
    pub alpha: Ghz,

    /// Emitted layers
    pub layers: Vec<IrLayer>,

    /// Idle pair `(park, park + alpha)` per qubit
    pub idle_frequencies: Vec<(Ghz, Ghz)>,

    /// Cumulative active time per qubit (ns)
    pub t_act: Vec<Nanos>,

    /// Cumulative two-qubit interaction time per qubit (ns)
    pub t_2q: Vec<Nanos>,

    /// Circuit layers before decomposition
    pub depth_before: usize,

    /// Layers emitted after decomposition and rescheduling
    pub depth_after: usize,

    /// Sum of layer times (ns)
    pub total_time: Nanos,

    /// Most interaction colors used by any sub-layer
    pub max_colors: usize,

    /// Recovered degradations, in order
    pub warnings: Vec<String>,
}

impl Ir {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Empty IR over the given idle pairs
    pub fn new(alpha: Ghz, idle_frequencies: Vec<(Ghz, Ghz)>) -> Self {
        let num_qubits = idle_frequencies.len();
        Self {
            num_qubits,
            alpha,
            layers: Vec::new(),
            idle_frequencies,
            t_act: vec![0.0; num_qubits],
            t_2q: vec![0.0; num_qubits],
            depth_before: 0,
            depth_after: 0,
            total_time: 0.0,
            max_colors: 0,
            warnings: Vec::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of emitted layers
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// All instructions in order
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.layers.iter().flat_map(|l| l.instructions.iter())
    }

    /// Number of instructions
    pub fn num_instructions(&self) -> usize {
        self.layers.iter().map(|l| l.instructions.len()).sum()
    }

    /// Number of two-qubit interactions
    pub fn num_interactions(&self) -> usize {
        self.layers.iter().map(IrLayer::num_interactions).sum()
    }

    /// Park frequency of a qubit
    pub fn park_frequency(&self, qubit: QubitId) -> Option<Ghz> {
        self.idle_frequencies.get(qubit).map(|&(park, _)| park)
    }

    /// Total time in microseconds
    pub fn total_time_us(&self) -> f64 {
        xfreq_core::constants::physics::ns_to_us(self.total_time)
    }

    /// Check if any degradation was recorded
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    /// One-paragraph report
    /// Gantree: summary() -> String // 요약
    pub fn summary(&self) -> String {
        let busiest = self.t_act.iter().cloned().fold(0.0, f64::max);
        format!(
            "{} qubits, depth {} -> {}, {} instructions ({} interactions), \
             total {:.2} ns, max colors {}, busiest qubit active {:.2} ns, {} warnings",
            self.num_qubits,
            self.depth_before,
            self.depth_after,
            self.num_instructions(),
            self.num_interactions(),
            self.total_time,
            self.max_colors,
            busiest,
            self.warnings.len()
        )
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> XfreqResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> XfreqResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Ir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ir({})", self.summary())?;
        for (i, layer) in self.layers.iter().enumerate() {
            writeln!(f, "  layer {} ({:.2} ns):", i, layer.duration)?;
            for inst in &layer.instructions {
                writeln!(f, "    {}", inst)?;
            }
        }
        for warning in &self.warnings {
            writeln!(f, "  warning: {}", warning)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ir {
        let mut ir = Ir::new(-0.2, vec![(3.499, 3.299), (2.799, 2.599)]);
        ir.layers.push(IrLayer {
            instructions: vec![
                Instruction::timed(Gate::H(0), 25.0),
                Instruction::interaction(Gate::Cz(0, 1), (4.799, 4.999), 48.7),
            ],
            qubit_frequencies: vec![4.799, 4.999],
            duration: 48.7,
        });
        ir.total_time = 48.7;
        ir
    }

    #[test]
    fn test_counts() {
        let ir = sample();
        assert_eq!(ir.num_qubits, 2);
        assert_eq!(ir.num_layers(), 1);
        assert_eq!(ir.num_instructions(), 2);
        assert_eq!(ir.num_interactions(), 1);
        assert_eq!(ir.park_frequency(1), Some(2.799));
        assert_eq!(ir.park_frequency(2), None);
        assert!((ir.total_time_us() - 0.0487).abs() < 1e-12);
    }

    #[test]
    fn test_json_roundtrip() {
        let ir = sample();
        let back = Ir::from_json(&ir.to_json().unwrap()).unwrap();
        assert_eq!(back.num_instructions(), 2);
        assert_eq!(back.layers[0].instructions[1].gate, Gate::Cz(0, 1));
        assert!((back.total_time - 48.7).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let s = sample().to_string();
        assert!(s.contains("cz q[0],q[1];"));
        assert!(s.contains("4.799/4.999"));
        assert!(s.contains("max colors 0"));
    }
}
