//! Interaction timing from assigned frequencies
//!
//! Gantree: L4_Schedule → Timing
//!
//! Closed-form interaction times for the three native gates. The
//! effective coupling is `g = 0.5 * f * Cqq` at interaction frequency
//! `f` (GHz), giving times in ns.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};
use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::{Gate, Ghz, NativeGate, Nanos};

/// Frequencies and duration of one interaction
/// Gantree: InteractionTiming // 상호작용 시간
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionTiming {
    /// Frequency of the first operand
    pub f1: Ghz,
    /// Frequency of the second operand
    pub f2: Ghz,
    /// Interaction time
    pub duration: Nanos,
}

/// Interaction time of a native gate
/// Gantree: interaction_time(native, f, cqq) -> Nanos // 게이트 시간
///
/// - iSWAP: `pi / (2 g)`
/// - sqrt(iSWAP): `pi / (4 g)`
/// - controlled-phase: `pi / (sqrt(2) g)`
pub fn interaction_time(native: NativeGate, frequency: Ghz, cqq: f64) -> Nanos {
    let g = 0.5 * frequency.abs() * cqq;
    match native {
        NativeGate::ISwap => PI / (2.0 * g),
        NativeGate::SqrtISwap => 0.5 * PI / (2.0 * g),
        NativeGate::Cz => PI / (SQRT_2 * g),
    }
}

/// Frequencies and duration for a two-qubit gate
/// Gantree: interaction_timing(gate, f, alpha, cqq) -> Result<InteractionTiming> // 주파수 쌍
///
/// Controlled-phase detunes the second qubit to `f - alpha` so its
/// second level meets the first qubit at `f`. Gates that are not one
/// of the native interactions are `UnrecognizedGate`.
pub fn interaction_timing(
    gate: &Gate,
    frequency: Ghz,
    alpha: Ghz,
    cqq: f64,
) -> XfreqResult<InteractionTiming> {
    let native = gate
        .native_kind()
        .ok_or_else(|| XfreqError::UnrecognizedGate {
            name: gate.name().to_string(),
            label: gate.label().unwrap_or_default().to_string(),
        })?;

    let f2 = match native {
        NativeGate::Cz => frequency - alpha,
        NativeGate::ISwap | NativeGate::SqrtISwap => frequency,
    };

    Ok(InteractionTiming {
        f1: frequency,
        f2,
        duration: interaction_time(native, frequency, cqq),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cz_timing() {
        let timing = interaction_timing(&Gate::Cz(0, 1), 4.799, -0.2, 0.019).unwrap();
        assert_relative_eq!(timing.f1, 4.799);
        assert_relative_eq!(timing.f2, 4.999, epsilon = 1e-12);
        assert_relative_eq!(timing.duration, PI / (SQRT_2 * 0.5 * 4.799 * 0.019), epsilon = 1e-9);
        assert!((timing.duration - 48.73).abs() < 0.01);
    }

    #[test]
    fn test_iswap_family() {
        let full = interaction_time(NativeGate::ISwap, 4.5, 0.019);
        let half = interaction_time(NativeGate::SqrtISwap, 4.5, 0.019);
        assert_relative_eq!(full, 2.0 * half);
        assert_relative_eq!(full, PI / (4.5 * 0.019));

        let timing = interaction_timing(&Gate::Unitary(0, 1, "iswap".into()), 4.5, -0.2, 0.019)
            .unwrap();
        assert_eq!(timing.f1, timing.f2);
    }

    #[test]
    fn test_unrecognized_gate() {
        let err = interaction_timing(&Gate::Unitary(0, 1, "fsim".into()), 4.5, -0.2, 0.019)
            .unwrap_err();
        assert_eq!(
            err,
            XfreqError::UnrecognizedGate {
                name: "unitary".into(),
                label: "fsim".into()
            }
        );

        let err = interaction_timing(&Gate::Cnot(0, 1), 4.5, -0.2, 0.019).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
