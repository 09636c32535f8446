//! Gate timing table for xfreq
//!
//! Gantree: L2_Device → GateTimes
//!
//! Per-gate-name durations for operations whose timing does not
//! depend on frequency. Two-qubit native gates are timed from their
//! interaction frequency instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use xfreq_core::constants::physics;
use xfreq_core::{Gate, Nanos};

/// Gate timing configuration
/// Gantree: GateTimes // 게이트 시간
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateTimes {
    /// Fallback single-qubit gate time (ns)
    /// Gantree: single_qubit_ns: f64 // 1Q 시간
    pub single_qubit_ns: Nanos,

    /// Fallback measurement time (ns)
    pub measurement_ns: Nanos,

    /// Fallback reset time (ns)
    pub reset_ns: Nanos,

    /// Per-gate overrides keyed by lowercase gate name
    gate_overrides: BTreeMap<String, Nanos>,
}

impl GateTimes {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create gate times with no overrides
    pub fn new(single_qubit_ns: Nanos, measurement_ns: Nanos, reset_ns: Nanos) -> Self {
        Self {
            single_qubit_ns,
            measurement_ns,
            reset_ns,
            gate_overrides: BTreeMap::new(),
        }
    }

    /// Tunable-transmon defaults: 25 ns pulses, virtual Z rotations
    /// Gantree: transmon() -> Self // 기본값
    pub fn transmon() -> Self {
        let mut times = Self::new(
            physics::GATE_TIME_1Q_NS,
            physics::MEASUREMENT_NS,
            physics::RESET_NS,
        );
        for name in ["rz", "z", "s", "sdg", "t", "tdg"] {
            times.gate_overrides.insert(name.to_string(), 0.0);
        }
        times
    }

    // ========================================================================
    // Gate Time Overrides
    // ========================================================================

    /// Set custom time for a specific gate name
    pub fn with_gate_time(mut self, gate_name: &str, time_ns: Nanos) -> Self {
        self.gate_overrides.insert(gate_name.to_lowercase(), time_ns);
        self
    }

    /// Override lookup by name
    pub fn get(&self, gate_name: &str) -> Option<Nanos> {
        self.gate_overrides.get(&gate_name.to_lowercase()).copied()
    }

    // ========================================================================
    // Time Calculations
    // ========================================================================

    /// Table duration for a gate
    /// Gantree: gate_duration(&self,Gate) -> f64 // 게이트별 시간
    ///
    /// Barriers take no time. Two-qubit gates without an override fall
    /// back to the single-qubit time; callers time native interactions
    /// from frequency.
    pub fn gate_duration(&self, gate: &Gate) -> Nanos {
        if let Some(time) = self.get(gate.name()) {
            return time;
        }

        match gate {
            Gate::Measure(_) => self.measurement_ns,
            Gate::Reset(_) => self.reset_ns,
            Gate::Barrier(_) => 0.0,
            _ => self.single_qubit_ns,
        }
    }

    /// Check every duration is finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.single_qubit_ns, self.measurement_ns, self.reset_ns]
            .iter()
            .chain(self.gate_overrides.values())
            .all(|t| t.is_finite() && *t >= 0.0)
    }
}

impl Default for GateTimes {
    fn default() -> Self {
        Self::transmon()
    }
}

impl fmt::Display for GateTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GateTimes(1Q={:.0}ns, meas={:.0}ns, reset={:.0}ns, {} overrides)",
            self.single_qubit_ns,
            self.measurement_ns,
            self.reset_ns,
            self.gate_overrides.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
