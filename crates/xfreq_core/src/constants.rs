//! Constants for xfreq
//!
//! Gantree: L0_Foundation → Constants
//!
//! Device defaults, solver limits, and coloring limits.
//! Frequencies are in GHz, durations in nanoseconds.

// ============================================================================
// Physics Constants
// Gantree: physics // 물리 상수
// ============================================================================

pub mod physics {
    //! Default device physics for a tunable-transmon grid
    //! (Sycamore-class parameters)

    /// Upper edge of the tunable band (GHz)
    /// Gantree: OMEGA_MAX: f64 = 5.0
    pub const OMEGA_MAX: f64 = 5.0;

    /// Lower edge of the tunable band (GHz)
    /// Gantree: OMEGA_MIN: f64 = 2.5
    pub const OMEGA_MIN: f64 = 2.5;

    /// Width reserved below `OMEGA_MAX` for interaction frequencies (GHz)
    pub const DELTA_INT: f64 = 1.0;

    /// Guard between the interaction band and the park band (GHz)
    pub const DELTA_EXT: f64 = 0.5;

    /// Width of the park (idle) band above `OMEGA_MIN` (GHz)
    pub const DELTA_PARK: f64 = 1.0;

    /// Transmon anharmonicity (GHz, negative)
    /// Gantree: ALPHA: f64 = -0.2
    pub const ALPHA: f64 = -0.2;

    /// Physical qubit-qubit coupling strength (dimensionless ratio g/omega)
    pub const CQQ: f64 = 0.019;

    /// Josephson energy of the small junction (GHz)
    ///
    /// Chosen with `EJL` and `EC` so the asymmetric-transmon spectrum
    /// spans roughly `[OMEGA_MIN, OMEGA_MAX]` over half a flux quantum.
    pub const EJS: f64 = 11.28;

    /// Josephson energy of the large junction (GHz)
    pub const EJL: f64 = 19.68;

    /// Charging energy (GHz)
    pub const EC: f64 = 0.22;

    /// Lower clamp for a flux-perturbed frequency (GHz)
    pub const FLUX_OMEGA_FLOOR: f64 = 2.5;

    /// Upper clamp for a flux-perturbed frequency (GHz)
    pub const FLUX_OMEGA_CEIL: f64 = 5.0;

    /// Single-qubit gate time (ns)
    /// Gantree: GATE_TIME_1Q_NS: f64 = 25.0
    pub const GATE_TIME_1Q_NS: f64 = 25.0;

    /// Measurement time (ns)
    pub const MEASUREMENT_NS: f64 = 1000.0;

    /// Reset time (ns)
    pub const RESET_NS: f64 = 1000.0;

    /// Convert nanoseconds to microseconds
    #[inline]
    pub const fn ns_to_us(ns: f64) -> f64 {
        ns * 1e-3
    }
}

// ============================================================================
// Solver Constants
// Gantree: solver // 솔버 상수
// ============================================================================

pub mod solver {
    //! Frequency solver limits

    /// Fixed-point scale at the solver boundary (1 unit = 1 MHz)
    /// Gantree: QUANT_SCALE: f64 = 1000.0
    pub const QUANT_SCALE: f64 = 1000.0;

    /// Maximum number of thresholds tried by the binary search
    /// Gantree: MAX_SEARCH_ITERS: usize = 10
    pub const MAX_SEARCH_ITERS: usize = 10;

    /// Divisor applied to the gap for the search lower bound
    pub const LOWER_BOUND_DIVISOR: i64 = 10;

    /// Interaction bin counts above this skip the solver and use even spacing
    pub const MAX_SOLVER_BINS: usize = 5;

    /// Node budget for a single difference search
    pub const SEARCH_NODE_BUDGET: usize = 200_000;
}

// ============================================================================
// Coloring Constants
// Gantree: coloring // 컬러링 상수
// ============================================================================

pub mod coloring {
    //! Crosstalk coloring limits

    /// Randomized recoloring attempts before a budget is reported unmet
    /// Gantree: RECOLOR_MAX_ATTEMPTS: usize = 1000
    pub const RECOLOR_MAX_ATTEMPTS: usize = 1000;

    /// Default crosstalk reach (hops between closest coupling endpoints)
    pub const DEFAULT_CROSSTALK_REACH: usize = 1;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_do_not_overlap() {
        let park_top = physics::OMEGA_MIN + physics::DELTA_PARK;
        let int_bottom = physics::OMEGA_MAX - physics::DELTA_INT;
        assert!(park_top < int_bottom);
    }

    #[test]
    fn test_anharmonicity_negative() {
        assert!(physics::ALPHA < 0.0);
        assert!(physics::ALPHA.abs() < physics::DELTA_INT);
    }

    #[test]
    fn test_ns_to_us() {
        assert!((physics::ns_to_us(2500.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_solver_limits() {
        assert_eq!(solver::MAX_SEARCH_ITERS, 10);
        assert!(solver::MAX_SOLVER_BINS >= 1);
        assert_eq!(solver::QUANT_SCALE, 1000.0);
    }
}
