//! Frequency solver for xfreq
//!
//! Gantree: L3_Solver → FrequencySolver
//!
//! Places `num_bins` frequencies inside a band so that every pair is
//! separated from each other and from each other's anharmonic image
//! by more than a threshold. The threshold is maximized by a bounded
//! binary search and outcomes are memoized in a caller-owned cache.

use crate::backend::{ConstraintBackend, DifferenceSearch};
use crate::cache::SolverCache;
use crate::quantize::{from_units, SolveKey};
use serde::{Deserialize, Serialize};
use xfreq_core::constants::solver::MAX_SEARCH_ITERS;
use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::Ghz;

/// Result of one solver request
/// Gantree: SolveOutcome // 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Whether a separated assignment was found
    pub feasible: bool,

    /// One frequency per bin, highest first (empty when infeasible)
    pub frequencies: Vec<Ghz>,

    /// Threshold the assignment satisfies
    pub threshold: Option<Ghz>,
}

impl SolveOutcome {
    fn infeasible() -> Self {
        Self {
            feasible: false,
            frequencies: Vec::new(),
            threshold: None,
        }
    }
}

/// Evenly spaced fallback assignment
/// Gantree: even_spacing(top, step, n) -> Vec<f64> // 균등 배치
///
/// Bin `c` sits at `top - c * step`.
pub fn even_spacing(top: Ghz, step: Ghz, num_bins: usize) -> Vec<Ghz> {
    (0..num_bins).map(|c| top - c as f64 * step).collect()
}

/// Threshold-searching frequency solver
/// Gantree: FrequencySolver // 주파수 솔버
#[derive(Debug, Clone, Default)]
pub struct FrequencySolver<B: ConstraintBackend = DifferenceSearch> {
    backend: B,
    backend_calls: usize,
}

impl FrequencySolver<DifferenceSearch> {
    /// Solver with the exact difference search
    pub fn new() -> Self {
        Self::with_backend(DifferenceSearch::new())
    }
}

impl<B: ConstraintBackend> FrequencySolver<B> {
    /// Solver over an arbitrary backend
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            backend_calls: 0,
        }
    }

    /// Backend decisions made so far (cache hits make none)
    pub fn backend_calls(&self) -> usize {
        self.backend_calls
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Solve with the largest threshold the search can establish
    /// Gantree: solve(lo, hi, n, gap, cache) -> Result<SolveOutcome> // 해 찾기
    ///
    /// Zero bins is `DegenerateAllocation`; callers treat layers with
    /// no interactions as a no-op instead of asking.
    pub fn solve(
        &mut self,
        band_lo: Ghz,
        band_hi: Ghz,
        num_bins: usize,
        min_gap: Ghz,
        cache: &SolverCache,
    ) -> XfreqResult<SolveOutcome> {
        self.solve_keyed(SolveKey::new(band_lo, band_hi, num_bins, min_gap, None), cache)
    }

    /// Solve at a fixed threshold, skipping the search
    pub fn solve_with_threshold(
        &mut self,
        band_lo: Ghz,
        band_hi: Ghz,
        num_bins: usize,
        min_gap: Ghz,
        threshold: Ghz,
        cache: &SolverCache,
    ) -> XfreqResult<SolveOutcome> {
        self.solve_keyed(
            SolveKey::new(band_lo, band_hi, num_bins, min_gap, Some(threshold)),
            cache,
        )
    }

    fn solve_keyed(&mut self, key: SolveKey, cache: &SolverCache) -> XfreqResult<SolveOutcome> {
        if key.num_bins == 0 {
            return Err(XfreqError::DegenerateAllocation { bins: 0 });
        }

        Ok(cache.get_or_insert_with(key, || match key.threshold {
            Some(t) => self.decide(&key, t),
            None => self.search(&key),
        }))
    }

    fn decide(&mut self, key: &SolveKey, threshold: i64) -> SolveOutcome {
        self.backend_calls += 1;
        match self.backend.find(&key.problem(threshold)) {
            Some(values) => SolveOutcome {
                feasible: true,
                frequencies: values.into_iter().map(from_units).collect(),
                threshold: Some(from_units(threshold)),
            },
            None => SolveOutcome::infeasible(),
        }
    }

    /// Binary search for the largest satisfiable threshold
    fn search(&mut self, key: &SolveKey) -> SolveOutcome {
        let (mut lo, mut hi) = key.search_bounds();
        let mut best: Option<SolveOutcome> = None;
        let mut iters = 0;

        log::trace!(
            "threshold search over [{}, {}] for {} bins ({})",
            lo,
            hi,
            key.num_bins,
            self.backend.name()
        );

        // a range under 1024 units is exhausted within the iteration cap
        while iters < MAX_SEARCH_ITERS && lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let outcome = self.decide(key, mid);
            if outcome.feasible {
                best = Some(outcome);
                lo = mid + 1;
            } else {
                hi = mid - 1;
            }
            iters += 1;
        }

        match best {
            Some(outcome) => outcome,
            None if lo <= hi => self.decide(key, lo),
            None => SolveOutcome::infeasible(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::{to_units, SeparationProblem};
    use approx::assert_relative_eq;

    /// Wraps the exact search and counts decisions
    struct CountingBackend {
        inner: DifferenceSearch,
        calls: usize,
    }

    impl ConstraintBackend for CountingBackend {
        fn find(&mut self, problem: &SeparationProblem) -> Option<Vec<i64>> {
            self.calls += 1;
            self.inner.find(problem)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_zero_bins_degenerate() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();
        assert!(matches!(
            solver.solve(4.0, 4.8, 0, -0.2, &cache),
            Err(XfreqError::DegenerateAllocation { bins: 0 })
        ));
    }

    #[test]
    fn test_single_bin_near_top() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();
        let outcome = solver.solve(4.0, 4.8, 1, -0.2, &cache).unwrap();
        assert!(outcome.feasible);
        assert_eq!(outcome.frequencies, vec![4.799]);
    }

    #[test]
    fn test_two_bins_threshold() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();
        let outcome = solver.solve(0.0, 1.0, 2, -0.2, &cache).unwrap();
        assert!(outcome.feasible);
        assert_relative_eq!(outcome.threshold.unwrap(), 0.5);
        assert_eq!(outcome.frequencies, vec![0.999, 0.298]);
    }

    #[test]
    fn test_larger_gap_never_raises_threshold() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();

        for (lo, hi) in [(4.0, 4.8), (2.5, 3.5), (0.0, 1.0)] {
            for bins in 1..=5 {
                let mut last = i64::MAX;
                for gap in (0..=130).step_by(5) {
                    let outcome = solver
                        .solve(lo, hi, bins, -(gap as f64) / 1000.0, &cache)
                        .unwrap();
                    let t = to_units(outcome.threshold.unwrap());
                    assert!(
                        t <= last,
                        "band=({}, {}) bins={} gap={} t={} last={}",
                        lo, hi, bins, gap, t, last
                    );
                    last = t;
                }
            }
        }
    }

    #[test]
    fn test_search_reaches_upper_bound() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();

        let open = solver.solve(0.0, 0.6, 3, 0.0, &cache).unwrap();
        let gapped = solver.solve(0.0, 0.6, 3, -0.15, &cache).unwrap();
        assert_eq!(open.threshold.map(to_units), Some(200));
        assert_eq!(gapped.threshold.map(to_units), Some(148));

        // optimum 266 sits on the upper bound for both gaps
        let narrow = solver.solve(4.0, 4.8, 3, -0.11, &cache).unwrap();
        let wide = solver.solve(4.0, 4.8, 3, -0.12, &cache).unwrap();
        assert_eq!(narrow.threshold.map(to_units), Some(266));
        assert_eq!(wide.threshold.map(to_units), Some(266));
    }

    #[test]
    fn test_wide_gap_opens_window() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();

        // past |gap| = 2t + 1 differences may fall between t and gap - t
        let below = solver.solve(4.0, 4.8, 3, -0.27, &cache).unwrap();
        let above = solver.solve(4.0, 4.8, 3, -0.28, &cache).unwrap();
        assert_eq!(below.threshold.map(to_units), Some(134));
        assert_eq!(above.threshold.map(to_units), Some(139));
        assert_eq!(above.frequencies, vec![4.799, 4.659, 4.239]);
    }

    #[test]
    fn test_assignment_satisfies_constraints() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();
        for bins in 1..=5 {
            let outcome = solver.solve(4.0, 4.8, bins, -0.2, &cache).unwrap();
            assert!(outcome.feasible);
            let key = SolveKey::new(4.0, 4.8, bins, -0.2, None);
            let problem = key.problem(to_units(outcome.threshold.unwrap()));
            let values: Vec<i64> = outcome.frequencies.iter().map(|&f| to_units(f)).collect();
            assert!(problem.check(&values), "bins={} {:?}", bins, values);
        }
    }

    #[test]
    fn test_memoized_calls_skip_backend() {
        let backend = CountingBackend {
            inner: DifferenceSearch::new(),
            calls: 0,
        };
        let mut solver = FrequencySolver::with_backend(backend);
        let cache = SolverCache::new();

        let first = solver.solve(4.0, 4.8, 3, -0.2, &cache).unwrap();
        let calls_after_first = solver.backend().calls;
        assert!(calls_after_first > 0);

        let second = solver.solve(4.0, 4.8, 3, -0.2, &cache).unwrap();
        assert_eq!(solver.backend().calls, calls_after_first);
        assert_eq!(solver.backend_calls(), calls_after_first);
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_explicit_threshold_keyed_separately() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();

        let fixed = solver
            .solve_with_threshold(4.0, 4.8, 2, -0.2, 0.05, &cache)
            .unwrap();
        assert!(fixed.feasible);
        assert_eq!(fixed.threshold, Some(0.05));
        assert_eq!(solver.backend_calls(), 1);

        let searched = solver.solve(4.0, 4.8, 2, -0.2, &cache).unwrap();
        assert!(searched.threshold > fixed.threshold);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_infeasible_band() {
        let mut solver = FrequencySolver::new();
        let cache = SolverCache::new();
        // 3 bins cannot fit strictly inside a 2-unit band
        let outcome = solver.solve(4.0, 4.002, 3, -0.2, &cache).unwrap();
        assert!(!outcome.feasible);
        assert!(outcome.frequencies.is_empty());
    }

    #[test]
    fn test_even_spacing() {
        let freqs = even_spacing(4.8, 0.2, 4);
        assert_eq!(freqs.len(), 4);
        assert_relative_eq!(freqs[0], 4.8);
        assert_relative_eq!(freqs[3], 4.2, epsilon = 1e-12);
    }
}
