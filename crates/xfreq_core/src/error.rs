//! Error types for xfreq
//!
//! Gantree: L0_Foundation → Errors
//!
//! Error taxonomy for allocation and scheduling. Recoverable
//! degradations share the enum so they can be recorded in the IR.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for xfreq
/// Gantree: XfreqError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XfreqError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Qubit index out of range
    /// Gantree: QubitOutOfRange{{q,max}} // 큐비트 범위
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Invalid device parameter
    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    /// Invalid run configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid qubit mapping
    #[error("Invalid qubit mapping: {0}")]
    InvalidMapping(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Topology violation (qubits not connected)
    /// Gantree: TopologyViolation{{q1,q2}} // 연결 위반
    #[error("Topology violation: qubits {q1} and {q2} are not connected")]
    TopologyViolation { q1: usize, q2: usize },

    /// Invalid QASM format
    #[error("Invalid QASM: {0}")]
    InvalidQasm(String),

    // ========================================================================
    // Topology Errors
    // ========================================================================
    /// Empty coupling map
    #[error("Coupling map is empty")]
    EmptyCouplingMap,

    /// Invalid coupling
    #[error("Invalid coupling ({0}, {1}): qubits must be different")]
    InvalidCoupling(usize, usize),

    // ========================================================================
    // Allocation Errors
    // ========================================================================
    /// No frequency assignment separates the bins at the final threshold
    /// Gantree: SolverInfeasible // 복구 가능
    #[error("No separated assignment of {bins} bins in [{band_lo:.3}, {band_hi:.3}] GHz; using even spacing")]
    SolverInfeasible {
        band_lo: f64,
        band_hi: f64,
        bins: usize,
    },

    /// Randomized recoloring never met the color budget
    /// Gantree: ColorBudgetUnmet // 복구 가능
    #[error("Color budget {budget} unmet after {attempts} attempts: best coloring uses {colors}")]
    ColorBudgetUnmet {
        budget: usize,
        colors: usize,
        attempts: usize,
    },

    /// Solver asked for zero bins
    #[error("Degenerate allocation: {bins} bins requested")]
    DegenerateAllocation { bins: usize },

    /// Two-qubit gate that is not iswap, sqrt-iswap or controlled-phase
    /// Gantree: UnrecognizedGate{{name,label}} // 설정 오류
    #[error("Gate {name}({label}) not recognized: supports iswap, sqrtiswap, cz")]
    UnrecognizedGate { name: String, label: String },

    /// Scheduling policy with no implementation
    /// Gantree: UnsupportedScheduler(String) // 설정 오류
    #[error("Scheduler '{0}' is not implemented")]
    UnsupportedScheduler(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for xfreq operations
/// Gantree: XfreqResult<T> // type alias
pub type XfreqResult<T> = Result<T, XfreqError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for XfreqError {
    fn from(err: serde_json::Error) -> Self {
        XfreqError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for XfreqError {
    fn from(err: std::io::Error) -> Self {
        XfreqError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl XfreqError {
    /// Check if the error is a degradation the pipeline recovers from
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            XfreqError::SolverInfeasible { .. } | XfreqError::ColorBudgetUnmet { .. }
        )
    }

    /// Check if the error is a configuration error that stops a run
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            XfreqError::UnrecognizedGate { .. }
                | XfreqError::UnsupportedScheduler(_)
                | XfreqError::InvalidConfig(_)
                | XfreqError::InvalidDevice(_)
                | XfreqError::InvalidMapping(_)
        )
    }

    /// Check if the error is a circuit error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            XfreqError::GateQubitMismatch { .. }
                | XfreqError::TopologyViolation { .. }
                | XfreqError::InvalidQasm(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
