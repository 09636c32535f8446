//! Device descriptor for xfreq
//!
//! Gantree: L2_Device → Device
//!
//! Frequency band, margins, anharmonicity and coupling of a tunable
//! transmon chip, together with its connectivity and crosstalk graphs.
//! Immutable for the duration of a scheduling run.

use crate::gate_times::GateTimes;
use serde::{Deserialize, Serialize};
use std::fmt;
use xfreq_core::constants::{coloring, physics};
use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::{CrosstalkGraph, Ghz, Topology};

/// Tunable-transmon device
/// Gantree: Device // 디바이스
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Upper edge of the tunable band (GHz)
    /// Gantree: omega_max: f64 // 최대 주파수
    pub omega_max: Ghz,

    /// Lower edge of the tunable band (GHz)
    pub omega_min: Ghz,

    /// Interaction band width below `omega_max` (GHz)
    pub delta_int: Ghz,

    /// Guard between interaction and park bands (GHz)
    pub delta_ext: Ghz,

    /// Park band width above `omega_min` (GHz)
    pub delta_park: Ghz,

    /// Anharmonicity (GHz, negative)
    /// Gantree: alpha: f64 // 비조화성
    pub alpha: Ghz,

    /// Qubit-qubit coupling strength
    pub cqq: f64,

    /// Small-junction Josephson energy (GHz)
    pub ejs: f64,

    /// Large-junction Josephson energy (GHz)
    pub ejl: f64,

    /// Charging energy (GHz)
    pub ec: f64,

    /// Duration table for frequency-independent gates
    pub gate_times: GateTimes,

    topology: Topology,
    crosstalk: CrosstalkGraph,
    name: Option<String>,
}

impl Device {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Device over a topology with the default crosstalk reach
    /// Gantree: from_topology(topo) -> Self // 생성자
    pub fn from_topology(topology: Topology) -> Self {
        Self::with_reach(topology, coloring::DEFAULT_CROSSTALK_REACH)
    }

    /// Device over a topology with an explicit crosstalk reach
    pub fn with_reach(topology: Topology, reach: usize) -> Self {
        let crosstalk = CrosstalkGraph::augmented(&topology, reach);
        Self {
            omega_max: physics::OMEGA_MAX,
            omega_min: physics::OMEGA_MIN,
            delta_int: physics::DELTA_INT,
            delta_ext: physics::DELTA_EXT,
            delta_park: physics::DELTA_PARK,
            alpha: physics::ALPHA,
            cqq: physics::CQQ,
            ejs: physics::EJS,
            ejl: physics::EJL,
            ec: physics::EC,
            gate_times: GateTimes::default(),
            topology,
            crosstalk,
            name: None,
        }
    }

    /// Square-lattice device
    /// Gantree: grid(rows, cols) -> Self // 그리드
    pub fn grid(rows: usize, cols: usize) -> Self {
        Self::from_topology(Topology::grid(rows, cols)).with_name(format!("grid_{}x{}", rows, cols))
    }

    /// Linear-chain device
    pub fn linear(n: usize) -> Self {
        Self::from_topology(Topology::linear(n)).with_name(format!("linear_{}", n))
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set the tunable band
    pub fn with_band(mut self, omega_min: Ghz, omega_max: Ghz) -> Self {
        self.omega_min = omega_min;
        self.omega_max = omega_max;
        self
    }

    /// Set interaction, guard and park margins
    pub fn with_margins(mut self, delta_int: Ghz, delta_ext: Ghz, delta_park: Ghz) -> Self {
        self.delta_int = delta_int;
        self.delta_ext = delta_ext;
        self.delta_park = delta_park;
        self
    }

    /// Set anharmonicity
    pub fn with_alpha(mut self, alpha: Ghz) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set coupling strength
    pub fn with_cqq(mut self, cqq: f64) -> Self {
        self.cqq = cqq;
        self
    }

    /// Set junction and charging energies
    pub fn with_junctions(mut self, ejs: f64, ejl: f64, ec: f64) -> Self {
        self.ejs = ejs;
        self.ejl = ejl;
        self.ec = ec;
        self
    }

    /// Replace the gate-time table
    pub fn with_gate_times(mut self, gate_times: GateTimes) -> Self {
        self.gate_times = gate_times;
        self
    }

    /// Replace the crosstalk graph
    /// Gantree: with_crosstalk(graph) -> Self // 크로스토크 교체
    pub fn with_crosstalk(mut self, crosstalk: CrosstalkGraph) -> Self {
        self.crosstalk = crosstalk;
        self
    }

    /// Set device name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of physical qubits
    pub fn num_qubits(&self) -> usize {
        self.topology.num_qubits()
    }

    /// Connectivity graph
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Crosstalk graph
    pub fn crosstalk(&self) -> &CrosstalkGraph {
        &self.crosstalk
    }

    /// Device name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Park band `[omega_min, omega_min + delta_park]`
    pub fn park_band(&self) -> (Ghz, Ghz) {
        (self.omega_min, self.omega_min + self.delta_park)
    }

    /// Interaction band below `omega_max`
    /// Gantree: interaction_band(shifted) -> (lo, hi) // 상호작용 대역
    ///
    /// Controlled-phase interactions sit one anharmonicity lower, so
    /// `shifted` moves the upper edge to `omega_max + alpha`.
    pub fn interaction_band(&self, shifted: bool) -> (Ghz, Ghz) {
        let hi = if shifted {
            self.omega_max + self.alpha
        } else {
            self.omega_max
        };
        (self.omega_max - self.delta_int, hi)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate physical parameters
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> XfreqResult<()> {
        let all_finite = [
            self.omega_max,
            self.omega_min,
            self.delta_int,
            self.delta_ext,
            self.delta_park,
            self.alpha,
            self.cqq,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(XfreqError::InvalidDevice("parameters must be finite".into()));
        }

        if self.omega_min >= self.omega_max {
            return Err(XfreqError::InvalidDevice(format!(
                "empty band [{}, {}]",
                self.omega_min, self.omega_max
            )));
        }

        if self.delta_int <= 0.0 || self.delta_park <= 0.0 || self.delta_ext < 0.0 {
            return Err(XfreqError::InvalidDevice(format!(
                "margins must be positive: int={}, ext={}, park={}",
                self.delta_int, self.delta_ext, self.delta_park
            )));
        }

        if self.alpha >= 0.0 || self.delta_int + self.alpha <= 0.0 {
            return Err(XfreqError::InvalidDevice(format!(
                "anharmonicity {} must be negative and smaller than delta_int",
                self.alpha
            )));
        }

        if self.cqq <= 0.0 {
            return Err(XfreqError::InvalidDevice(format!(
                "coupling strength must be positive: {}",
                self.cqq
            )));
        }

        if self.ejs <= 0.0 || self.ejl <= 0.0 || self.ec <= 0.0 {
            return Err(XfreqError::InvalidDevice(
                "junction and charging energies must be positive".into(),
            ));
        }

        if !self.gate_times.is_valid() {
            return Err(XfreqError::InvalidDevice("negative gate time".into()));
        }

        if self.num_qubits() == 0 {
            return Err(XfreqError::InvalidDevice("device has no qubits".into()));
        }

        if let Some(c) = self
            .crosstalk
            .nodes()
            .find(|c| c.hi() >= self.num_qubits())
        {
            return Err(XfreqError::InvalidDevice(format!(
                "crosstalk coupling {} outside device",
                c
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> XfreqResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> XfreqResult<Self> {
        let device: Device = serde_json::from_str(json)?;
        device.validate()?;
        Ok(device)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Device({}{} qubits, {} couplings, {} crosstalk pairs)",
            self.name
                .as_ref()
                .map(|n| format!("{}, ", n))
                .unwrap_or_default(),
            self.num_qubits(),
            self.topology.num_edges(),
            self.crosstalk.num_conflicts()
        )?;
        writeln!(
            f,
            "  Band: [{:.3}, {:.3}] GHz, alpha={:.3} GHz",
            self.omega_min, self.omega_max, self.alpha
        )?;
        write!(
            f,
            "  Margins: int={:.3}, ext={:.3}, park={:.3} GHz; Cqq={}",
            self.delta_int, self.delta_ext, self.delta_park, self.cqq
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
