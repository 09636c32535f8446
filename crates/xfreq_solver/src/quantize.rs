//! Fixed-point boundary for the frequency solver
//!
//! Gantree: L3_Solver → Quantize
//!
//! The public API speaks GHz as `f64`; the constraint search runs on
//! integer MHz. Conversion happens only here.

use serde::{Deserialize, Serialize};
use xfreq_core::constants::solver::QUANT_SCALE;
use xfreq_core::Ghz;

/// GHz to integer units (rounded)
/// Gantree: to_units(x) -> i64 // 양자화
#[inline]
pub fn to_units(value: Ghz) -> i64 {
    (value * QUANT_SCALE).round() as i64
}

/// Integer units back to GHz
#[inline]
pub fn from_units(units: i64) -> Ghz {
    units as f64 / QUANT_SCALE
}

/// Quantized request, also the memoization key
/// Gantree: SolveKey // 캐시 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolveKey {
    /// Band lower edge (exclusive), units
    pub band_lo: i64,
    /// Band upper edge (exclusive), units
    pub band_hi: i64,
    /// Number of bins
    pub num_bins: usize,
    /// Signed minimum gap (anharmonicity), units
    pub gap: i64,
    /// Explicit threshold, when the search is skipped
    pub threshold: Option<i64>,
}

impl SolveKey {
    /// Quantize a request
    pub fn new(
        band_lo: Ghz,
        band_hi: Ghz,
        num_bins: usize,
        gap: Ghz,
        threshold: Option<Ghz>,
    ) -> Self {
        Self {
            band_lo: to_units(band_lo),
            band_hi: to_units(band_hi),
            num_bins,
            gap: to_units(gap),
            threshold: threshold.map(to_units),
        }
    }

    /// Decision problem at a given threshold
    pub fn problem(&self, threshold: i64) -> SeparationProblem {
        SeparationProblem {
            band_lo: self.band_lo,
            band_hi: self.band_hi,
            num_bins: self.num_bins,
            gap: self.gap,
            threshold,
        }
    }

    /// Initial search interval `[floor(-gap/10), floor(width/bins)]`
    pub fn search_bounds(&self) -> (i64, i64) {
        use xfreq_core::constants::solver::LOWER_BOUND_DIVISOR;
        let lo = (-self.gap).div_euclid(LOWER_BOUND_DIVISOR);
        let hi = (self.band_hi - self.band_lo).div_euclid(self.num_bins.max(1) as i64);
        (lo, hi)
    }
}

/// One constraint-system instance
/// Gantree: SeparationProblem // 결정 문제
///
/// `num_bins` integers strictly inside `(band_lo, band_hi)`. Every
/// ordered pair `i != j` needs `(c_i - c_j)^2 > t^2` and
/// `(c_i - c_j + gap)^2 > t^2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparationProblem {
    /// Band lower edge (exclusive)
    pub band_lo: i64,
    /// Band upper edge (exclusive)
    pub band_hi: i64,
    /// Number of values
    pub num_bins: usize,
    /// Signed gap
    pub gap: i64,
    /// Separation threshold
    pub threshold: i64,
}

impl SeparationProblem {
    /// Whether a difference `d` between two values is allowed,
    /// covering both orderings of the pair
    #[inline]
    pub fn separated(&self, d: i64) -> bool {
        let t = self.threshold.abs();
        d.abs() > t && (d + self.gap).abs() > t && (d - self.gap).abs() > t
    }

    /// Smallest positive difference the constraints allow
    pub fn min_step(&self) -> i64 {
        let t = self.threshold.abs();
        let g = self.gap.abs();
        if g > 2 * t + 1 {
            t + 1
        } else {
            g + t + 1
        }
    }

    /// Check a full assignment
    pub fn check(&self, values: &[i64]) -> bool {
        values.len() == self.num_bins
            && values
                .iter()
                .all(|&v| v > self.band_lo && v < self.band_hi)
            && values
                .iter()
                .enumerate()
                .all(|(i, &a)| values[i + 1..].iter().all(|&b| self.separated(a - b)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(to_units(-0.2), -200);
        assert_eq!(to_units(4.8), 4800);
        assert_eq!(to_units(0.0194), 19);
        assert_eq!(from_units(4799), 4.799);
    }

    #[test]
    fn test_key_equality_after_quantization() {
        let a = SolveKey::new(4.0, 4.8, 3, -0.2, None);
        let b = SolveKey::new(4.0000001, 4.7999999, 3, -0.2, None);
        assert_eq!(a, b);
        assert_ne!(a, SolveKey::new(4.0, 4.8, 3, -0.2, Some(0.1)));
    }

    #[test]
    fn test_search_bounds() {
        let key = SolveKey::new(4.0, 4.8, 3, -0.2, None);
        assert_eq!(key.search_bounds(), (20, 266));
    }

    #[test]
    fn test_separated() {
        let p = SolveKey::new(0.0, 1.0, 2, -0.2, None).problem(50);
        assert!(p.separated(100));
        assert!(!p.separated(40));
        // 220 lands within 50 of the anharmonic image at 200
        assert!(!p.separated(220));
        assert!(!p.separated(-220));
        assert!(p.separated(300));
        assert_eq!(p.min_step(), 51);
        let wide = SolveKey::new(0.0, 1.0, 2, -0.2, None).problem(120);
        assert_eq!(wide.min_step(), 321);
    }

    #[test]
    fn test_check_bounds_are_strict() {
        let p = SolveKey::new(0.0, 1.0, 1, -0.2, None).problem(0);
        assert!(p.check(&[1]));
        assert!(!p.check(&[0]));
        assert!(!p.check(&[1000]));
    }
}
