//! Run configuration for xfreq scheduling
//!
//! Gantree: L4_Schedule → ScheduleConfig
//!
//! Scheduling policy, decomposition scheme, color budget and the
//! knobs for seeded randomness and flux jitter.

use serde::{Deserialize, Serialize};
use std::fmt;
use xfreq_core::constants::{coloring, solver};
use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::NativeGate;

/// Layer scheduling policy
/// Gantree: SchedulerPolicy // 스케줄러 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SchedulerPolicy {
    /// Compact layers greedily against the connectivity graph
    Greedy,
    /// Keep the circuit's own layering
    #[default]
    Layered,
    /// Not implemented; rejected at validation
    Hybrid,
}

impl SchedulerPolicy {
    /// Parse a policy name
    /// Gantree: parse(name) -> Result<Self> // 정책 파싱
    pub fn parse(name: &str) -> XfreqResult<Self> {
        match name.to_lowercase().as_str() {
            "greedy" => Ok(SchedulerPolicy::Greedy),
            "layered" | "other" | "none" => Ok(SchedulerPolicy::Layered),
            "hybrid" => Ok(SchedulerPolicy::Hybrid),
            other => Err(XfreqError::UnsupportedScheduler(other.to_string())),
        }
    }
}

impl fmt::Display for SchedulerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerPolicy::Greedy => write!(f, "greedy"),
            SchedulerPolicy::Layered => write!(f, "layered"),
            SchedulerPolicy::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Decomposition onto native two-qubit gates
/// Gantree: DecompositionScheme // 분해 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DecompositionScheme {
    /// Controlled-phase everywhere
    #[default]
    Cphase,
    /// Controlled-phase where crosstalk neighbours are active, iSWAP elsewhere
    Flexible,
    /// iSWAP everywhere
    ISwap,
    /// sqrt(iSWAP) everywhere
    SqrtISwap,
}

impl DecompositionScheme {
    /// Parse a scheme name
    pub fn parse(name: &str) -> XfreqResult<Self> {
        match name.to_lowercase().as_str() {
            "cphase" | "cz" => Ok(DecompositionScheme::Cphase),
            "flexible" => Ok(DecompositionScheme::Flexible),
            "iswap" => Ok(DecompositionScheme::ISwap),
            "sqrtiswap" | "sqrt_iswap" => Ok(DecompositionScheme::SqrtISwap),
            other => Err(XfreqError::InvalidConfig(format!(
                "unknown decomposition '{}'",
                other
            ))),
        }
    }

    /// Whether interaction frequencies sit in the anharmonicity-shifted band
    pub fn uses_shifted_band(&self) -> bool {
        matches!(
            self,
            DecompositionScheme::Cphase | DecompositionScheme::Flexible
        )
    }

    /// Native gate of a fixed scheme (`None` for flexible)
    pub fn native(&self) -> Option<NativeGate> {
        match self {
            DecompositionScheme::Cphase => Some(NativeGate::Cz),
            DecompositionScheme::ISwap => Some(NativeGate::ISwap),
            DecompositionScheme::SqrtISwap => Some(NativeGate::SqrtISwap),
            DecompositionScheme::Flexible => None,
        }
    }
}

impl fmt::Display for DecompositionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompositionScheme::Cphase => write!(f, "cphase"),
            DecompositionScheme::Flexible => write!(f, "flexible"),
            DecompositionScheme::ISwap => write!(f, "iswap"),
            DecompositionScheme::SqrtISwap => write!(f, "sqrtiswap"),
        }
    }
}

/// Scheduling run configuration
/// Gantree: ScheduleConfig // 실행 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    // ========================================================================
    // Pipeline
    // ========================================================================
    /// Scheduling policy
    pub scheduler: SchedulerPolicy,

    /// Decomposition scheme
    pub decomposition: DecompositionScheme,

    /// Maximum colors per sub-layer (0 = unbounded)
    pub color_budget: usize,

    // ========================================================================
    // Limits
    // ========================================================================
    /// Randomized recoloring attempts before giving up on the budget
    pub recolor_attempts: usize,

    /// Interaction bin counts above this use even spacing directly
    pub max_solver_bins: usize,

    // ========================================================================
    // Execution
    // ========================================================================
    /// Standard deviation of flux noise (flux quanta); `None` disables jitter
    pub flux_noise_sigma: Option<f64>,

    /// Random seed for recoloring and flux jitter
    pub seed: Option<u64>,

    /// Verbosity (above 0 logs every emitted sub-layer)
    pub verbosity: u8,
}

impl ScheduleConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Layered, controlled-phase, unbounded colors
    pub fn new() -> Self {
        Self {
            scheduler: SchedulerPolicy::Layered,
            decomposition: DecompositionScheme::Cphase,
            color_budget: 0,
            recolor_attempts: coloring::RECOLOR_MAX_ATTEMPTS,
            max_solver_bins: solver::MAX_SOLVER_BINS,
            flux_noise_sigma: None,
            seed: None,
            verbosity: 0,
        }
    }

    /// Greedy rescheduling with controlled-phase
    pub fn greedy() -> Self {
        Self {
            scheduler: SchedulerPolicy::Greedy,
            ..Self::new()
        }
    }

    /// Controlled-phase decomposition with a color budget
    pub fn cphase(color_budget: usize) -> Self {
        Self {
            color_budget,
            ..Self::new()
        }
    }

    /// Flexible decomposition
    pub fn flexible() -> Self {
        Self {
            decomposition: DecompositionScheme::Flexible,
            ..Self::new()
        }
    }

    /// Fixed seed, for reproducible runs
    pub fn reproducible(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set scheduling policy
    pub fn with_scheduler(mut self, scheduler: SchedulerPolicy) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Set decomposition scheme
    pub fn with_decomposition(mut self, decomposition: DecompositionScheme) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Set color budget
    pub fn with_color_budget(mut self, budget: usize) -> Self {
        self.color_budget = budget;
        self
    }

    /// Set recoloring attempts
    pub fn with_recolor_attempts(mut self, attempts: usize) -> Self {
        self.recolor_attempts = attempts;
        self
    }

    /// Set solver bin limit
    pub fn with_max_solver_bins(mut self, bins: usize) -> Self {
        self.max_solver_bins = bins;
        self
    }

    /// Enable flux jitter
    pub fn with_flux_noise(mut self, sigma: f64) -> Self {
        self.flux_noise_sigma = Some(sigma);
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set verbosity
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    ///
    /// A hybrid scheduler is rejected here, before any layer runs.
    pub fn validate(&self) -> XfreqResult<()> {
        if self.scheduler == SchedulerPolicy::Hybrid {
            return Err(XfreqError::UnsupportedScheduler(self.scheduler.to_string()));
        }

        if self.color_budget > 0 && self.recolor_attempts == 0 {
            return Err(XfreqError::InvalidConfig(
                "recolor_attempts must be > 0 with a color budget".into(),
            ));
        }

        if let Some(sigma) = self.flux_noise_sigma {
            if !sigma.is_finite() || sigma < 0.0 {
                return Err(XfreqError::InvalidConfig(format!(
                    "flux noise sigma must be finite and >= 0, got {}",
                    sigma
                )));
            }
        }

        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScheduleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScheduleConfig({}, {}, budget={}",
            self.scheduler, self.decomposition, self.color_budget
        )?;
        if let Some(sigma) = self.flux_noise_sigma {
            write!(f, ", flux_sigma={}", sigma)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Tests
// ============================================================================
