//! Timing and IR accumulation
//!
//! Gantree: L4_Schedule → Accumulator
//!
//! Sole writer of the IR during a run. Each accumulated sub-layer adds
//! its longest instruction to the total time and to the active time of
//! every qubit it touches; each interaction adds its own duration to the
//! two-qubit time of both operands.

use crate::ir::{Instruction, Ir, IrLayer};
use std::collections::BTreeSet;
use xfreq_core::error::XfreqError;
use xfreq_core::{Ghz, QubitId};

/// IR accumulator for one scheduling run
/// Gantree: Accumulator // 누적기
#[derive(Debug)]
pub struct Accumulator {
    ir: Ir,
}

impl Accumulator {
    /// Start from an empty IR over the given idle pairs
    pub fn new(alpha: Ghz, idle_frequencies: Vec<(Ghz, Ghz)>) -> Self {
        Self {
            ir: Ir::new(alpha, idle_frequencies),
        }
    }

    /// Record the circuit depth before decomposition
    pub fn set_depth_before(&mut self, depth: usize) {
        self.ir.depth_before = depth;
    }

    /// Track the running maximum color count
    /// Gantree: record_colors(n) // 최대 색 수
    pub fn record_colors(&mut self, num_colors: usize) {
        self.ir.max_colors = self.ir.max_colors.max(num_colors);
    }

    /// Record a recovered degradation
    pub fn warn(&mut self, warning: &XfreqError) {
        self.ir.warnings.push(warning.to_string());
    }

    /// Append a sub-layer and update the timing counters
    /// Gantree: accumulate(insts, freqs) // 레이어 누적
    ///
    /// An empty instruction list still counts toward the emitted depth.
    pub fn accumulate(&mut self, instructions: Vec<Instruction>, qubit_frequencies: Vec<Ghz>) {
        let duration = instructions
            .iter()
            .map(|inst| inst.duration)
            .fold(0.0, f64::max);

        let mut touched: BTreeSet<QubitId> = BTreeSet::new();
        for inst in &instructions {
            let qubits = inst.qubits();
            if inst.is_interaction() {
                for &q in &qubits {
                    if let Some(t) = self.ir.t_2q.get_mut(q) {
                        *t += inst.duration;
                    }
                }
            }
            touched.extend(qubits);
        }

        for q in touched {
            if let Some(t) = self.ir.t_act.get_mut(q) {
                *t += duration;
            }
        }

        self.ir.total_time += duration;
        self.ir.layers.push(IrLayer {
            instructions,
            qubit_frequencies,
            duration,
        });
    }

    /// IR accumulated so far
    pub fn ir(&self) -> &Ir {
        &self.ir
    }

    /// Finalize the IR
    /// Gantree: finish() -> Ir // 완료
    pub fn finish(mut self) -> Ir {
        self.ir.depth_after = self.ir.layers.len();
        self.ir
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use xfreq_core::Gate;

    fn accumulator(n: usize) -> Accumulator {
        Accumulator::new(-0.2, vec![(3.0, 2.8); n])
    }

    #[test]
    fn test_layer_time_is_longest_instruction() {
        let mut acc = accumulator(3);
        acc.accumulate(
            vec![
                Instruction::timed(Gate::H(2), 25.0),
                Instruction::interaction(Gate::Cz(0, 1), (4.8, 5.0), 48.0),
            ],
            vec![4.8, 5.0, 3.0],
        );
        let ir = acc.finish();

        assert_relative_eq!(ir.total_time, 48.0);
        assert_eq!(ir.t_act, vec![48.0, 48.0, 48.0]);
        assert_eq!(ir.t_2q, vec![48.0, 48.0, 0.0]);
        assert_eq!(ir.depth_after, 1);
    }

    #[test]
    fn test_two_qubit_time_per_interaction() {
        let mut acc = accumulator(3);
        acc.accumulate(
            vec![Instruction::interaction(Gate::Cz(0, 1), (4.8, 5.0), 40.0)],
            vec![4.8, 5.0, 3.0],
        );
        acc.accumulate(
            vec![Instruction::interaction(Gate::Cz(1, 2), (4.5, 4.7), 30.0)],
            vec![3.0, 4.5, 4.7],
        );
        let ir = acc.finish();

        assert_eq!(ir.t_2q, vec![40.0, 70.0, 30.0]);
        assert_eq!(ir.t_act, vec![40.0, 70.0, 30.0]);
        assert_relative_eq!(ir.total_time, 70.0);
    }

    #[test]
    fn test_untouched_qubits_idle() {
        let mut acc = accumulator(2);
        acc.accumulate(vec![Instruction::timed(Gate::X(0), 25.0)], vec![3.0, 3.0]);
        let ir = acc.finish();
        assert_eq!(ir.t_act, vec![25.0, 0.0]);
        assert_eq!(ir.t_2q, vec![0.0, 0.0]);
    }

    #[test]
    fn test_colors_and_warnings() {
        let mut acc = accumulator(2);
        acc.record_colors(2);
        acc.record_colors(1);
        acc.warn(&XfreqError::SolverInfeasible {
            band_lo: 4.0,
            band_hi: 4.8,
            bins: 3,
        });
        acc.set_depth_before(4);
        acc.accumulate(Vec::new(), vec![3.0, 3.0]);

        let ir = acc.finish();
        assert_eq!(ir.max_colors, 2);
        assert_eq!(ir.warnings.len(), 1);
        assert_eq!(ir.depth_before, 4);
        assert_eq!(ir.depth_after, 1);
        assert_relative_eq!(ir.total_time, 0.0);
    }
}
