//! # xfreq Schedule
//!
//! Layer-by-layer scheduling of a circuit on a tunable-transmon device:
//! decomposition onto native two-qubit gates, optional greedy
//! rescheduling and color limiting, crosstalk coloring, frequency
//! allocation and timing, accumulated into an [`Ir`].
//!
//! ## Gantree Architecture
//!
//! ```text
//! xfreq_schedule // L4: Schedule
//!     ScheduleConfig // 실행 설정
//!         SchedulerPolicy, DecompositionScheme, validate()
//!     Decompose // 네이티브 분해
//!         decompose_gate(), decompose_layer(), flexible_native()
//!     Reschedule // 탐욕 재배치
//!         reschedule(), adjacent()
//!     LimitColors // 색 제한
//!         limit_colors()
//!     FrequencyAllocator // 주파수 할당
//!         new(), assign_interaction(), idle_pairs()
//!     Timing // 상호작용 시간
//!         interaction_time(), interaction_timing()
//!     Ir + Accumulator // 중간 표현 + 누적
//!
//! L5: Integration
//!     LayerPipeline // 레이어 파이프라인
//!         run(circuit, mapping) -> Ir
//!     schedule() // 단일 호출
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use xfreq_schedule::prelude::*;
//! use xfreq_core::CircuitBuilder;
//! use xfreq_device::Device;
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h(0)
//!     .cz(0, 1)
//!     .cz(1, 2)
//!     .build();
//!
//! let device = Device::linear(3);
//! let ir = schedule(&circuit, &device, None, &ScheduleConfig::default()).unwrap();
//!
//! assert_eq!(ir.num_interactions(), 2);
//! println!("{}", ir.summary());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Run configuration (Gantree: L4_Schedule → ScheduleConfig)
pub mod config;

/// Native decomposition (Gantree: L4_Schedule → Decompose)
pub mod decompose;

/// Greedy rescheduling (Gantree: L4_Schedule → Reschedule)
pub mod reschedule;

/// Color limiting (Gantree: L4_Schedule → LimitColors)
pub mod limit;

/// Frequency allocation (Gantree: L4_Schedule → FrequencyAllocator)
pub mod frequency;

/// Interaction timing (Gantree: L4_Schedule → Timing)
pub mod timing;

/// Intermediate representation (Gantree: L4_Schedule → Ir)
pub mod ir;

/// IR accumulation (Gantree: L4_Schedule → Accumulator)
pub mod accumulator;

/// Layer pipeline (Gantree: L5_Integration → LayerPipeline)
pub mod pipeline;

// ============================================================================
// Re-exports
// ============================================================================

pub use accumulator::Accumulator;
pub use config::{DecompositionScheme, ScheduleConfig, SchedulerPolicy};
pub use decompose::{decompose_gate, decompose_layer};
pub use frequency::FrequencyAllocator;
pub use ir::{Instruction, Ir, IrLayer};
pub use limit::limit_colors;
pub use pipeline::{schedule, LayerPipeline, PipelineStage};
pub use reschedule::reschedule;
pub use timing::{interaction_time, interaction_timing, InteractionTiming};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::config::{DecompositionScheme, ScheduleConfig, SchedulerPolicy};
    pub use crate::ir::{Instruction, Ir, IrLayer};
    pub use crate::pipeline::{schedule, LayerPipeline, PipelineStage};
}

// ============================================================================
// Integration Tests
// ============================================================================
