//! # xfreq Device
//!
//! Device description for the frequency allocator: band and margins,
//! gate-time table, and the flux-noise jitter model.
//!
//! ## Gantree Architecture
//!
//! ```text
//! xfreq_device // L2: Device
//!     Device // 디바이스 기술자
//!         omega_max, omega_min, delta_int, delta_ext, delta_park
//!         alpha, cqq, ejs, ejl, ec
//!         topology, crosstalk, gate_times
//!         grid(), linear(), from_topology(), validate()
//!     GateTimes // 게이트 시간
//!         transmon(), with_gate_time(), gate_duration()
//!     FluxNoise // 플럭스 노이즈
//!         transition_frequency(), deviation_at(), sample()
//!     FluxJitter // 시드 지터
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use xfreq_device::prelude::*;
//!
//! let device = Device::grid(3, 3).with_alpha(-0.22);
//! assert!(device.validate().is_ok());
//!
//! let (lo, hi) = device.interaction_band(true);
//! assert!(lo < hi);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Device descriptor (Gantree: L2_Device → Device)
pub mod device;

/// Gate timing table (Gantree: L2_Device → GateTimes)
pub mod gate_times;

/// Flux-noise jitter (Gantree: L2_Device → FluxNoise)
pub mod flux;

// ============================================================================
// Re-exports
// ============================================================================

pub use device::Device;
pub use flux::{FluxJitter, FluxNoise};
pub use gate_times::GateTimes;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::device::Device;
    pub use crate::flux::{FluxJitter, FluxNoise};
    pub use crate::gate_times::GateTimes;
}

// ============================================================================
// Integration Tests
// ============================================================================
