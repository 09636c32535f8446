//! # xfreq Solver
//!
//! Frequency binning under pairwise and anharmonic separation
//! constraints, with a bounded threshold search and a shared
//! memoization cache.
//!
//! ## Gantree Architecture
//!
//! ```text
//! xfreq_solver // L3: Solver
//!     Quantize // GHz <-> 정수 MHz 경계
//!         to_units(), from_units(), SolveKey, SeparationProblem
//!     ConstraintBackend // 결정 절차 trait
//!         DifferenceSearch // 정확 탐색 + 노드 예산
//!     SolverCache // 공유 캐시 + 적중 통계
//!     FrequencySolver // 임계값 이진 탐색
//!         solve(), solve_with_threshold(), even_spacing()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use xfreq_solver::prelude::*;
//!
//! let cache = SolverCache::new();
//! let mut solver = FrequencySolver::new();
//!
//! let outcome = solver.solve(4.0, 4.8, 3, -0.2, &cache).unwrap();
//! assert!(outcome.feasible);
//! assert_eq!(outcome.frequencies.len(), 3);
//!
//! // Same quantized request: answered from the cache
//! let again = solver.solve(4.0, 4.8, 3, -0.2, &cache).unwrap();
//! assert_eq!(outcome, again);
//! assert_eq!(cache.hits(), 1);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Fixed-point boundary (Gantree: L3_Solver → Quantize)
pub mod quantize;

/// Constraint backends (Gantree: L3_Solver → ConstraintBackend)
pub mod backend;

/// Outcome cache (Gantree: L3_Solver → SolverCache)
pub mod cache;

/// Threshold search (Gantree: L3_Solver → FrequencySolver)
pub mod solver;

// ============================================================================
// Re-exports
// ============================================================================

pub use backend::{ConstraintBackend, DifferenceSearch};
pub use cache::SolverCache;
pub use quantize::{from_units, to_units, SeparationProblem, SolveKey};
pub use solver::{even_spacing, FrequencySolver, SolveOutcome};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::backend::{ConstraintBackend, DifferenceSearch};
    pub use crate::cache::SolverCache;
    pub use crate::solver::{even_spacing, FrequencySolver, SolveOutcome};
}

// ============================================================================
// Integration Tests
// ============================================================================
