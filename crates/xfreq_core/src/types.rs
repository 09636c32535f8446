//! Core types for xfreq
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Fundamental type aliases and the canonical coupling key
//! used throughout the allocation pipeline.

use crate::error::{XfreqError, XfreqResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Physical qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Frequency in GHz
/// Gantree: Ghz // pub type Ghz = f64
pub type Ghz = f64;

/// Duration in nanoseconds
pub type Nanos = f64;

/// Signed color label.
///
/// Non-negative colors are interaction colors of the current layer;
/// `-(c + 1)` is park color `c`.
pub type ColorId = i64;

/// Rotation angle in radians
pub type Angle = f64;

// ============================================================================
// Coupling (Canonical Edge)
// ============================================================================

/// Undirected two-qubit coupling, stored smaller-qubit first.
///
/// `(q1, q2)` and `(q2, q1)` produce the same key, so color and
/// frequency lookups never need a reversed retry.
/// Gantree: Coupling // 정규화된 간선
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coupling {
    lo: QubitId,
    hi: QubitId,
}

impl Coupling {
    /// Create a canonical coupling
    /// Gantree: new(q1,q2) -> Result<Self> // 생성+검증
    pub fn new(q1: QubitId, q2: QubitId) -> XfreqResult<Self> {
        if q1 == q2 {
            return Err(XfreqError::InvalidCoupling(q1, q2));
        }
        Ok(Self {
            lo: q1.min(q2),
            hi: q1.max(q2),
        })
    }

    /// Build from two qubits already known to differ
    pub(crate) fn from_ordered(a: QubitId, b: QubitId) -> Self {
        debug_assert!(a != b);
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Smaller endpoint
    #[inline]
    pub fn lo(&self) -> QubitId {
        self.lo
    }

    /// Larger endpoint
    #[inline]
    pub fn hi(&self) -> QubitId {
        self.hi
    }

    /// Both endpoints, smaller first
    #[inline]
    pub fn endpoints(&self) -> (QubitId, QubitId) {
        (self.lo, self.hi)
    }

    /// Whether the coupling touches `qubit`
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.lo == qubit || self.hi == qubit
    }

    /// Whether the two couplings share an endpoint
    pub fn shares_qubit(&self, other: &Coupling) -> bool {
        self.contains(other.lo) || self.contains(other.hi)
    }
}

impl fmt::Display for Coupling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

impl TryFrom<(QubitId, QubitId)> for Coupling {
    type Error = XfreqError;

    fn try_from((q1, q2): (QubitId, QubitId)) -> XfreqResult<Self> {
        Coupling::new(q1, q2)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupling_canonical() {
        let a = Coupling::new(3, 1).unwrap();
        let b = Coupling::new(1, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.endpoints(), (1, 3));
    }

    #[test]
    fn test_coupling_self_loop_rejected() {
        assert!(matches!(
            Coupling::new(2, 2),
            Err(XfreqError::InvalidCoupling(2, 2))
        ));
    }

    #[test]
    fn test_coupling_ordering() {
        let mut couplings = vec![
            Coupling::new(2, 3).unwrap(),
            Coupling::new(1, 0).unwrap(),
            Coupling::new(0, 2).unwrap(),
        ];
        couplings.sort();
        assert_eq!(couplings[0].endpoints(), (0, 1));
        assert_eq!(couplings[1].endpoints(), (0, 2));
        assert_eq!(couplings[2].endpoints(), (2, 3));
    }

    #[test]
    fn test_shares_qubit() {
        let a = Coupling::new(0, 1).unwrap();
        let b = Coupling::new(1, 2).unwrap();
        let c = Coupling::new(2, 3).unwrap();
        assert!(a.shares_qubit(&b));
        assert!(!a.shares_qubit(&c));
    }
}
