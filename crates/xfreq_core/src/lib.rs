//! # xfreq Core
//!
//! Foundation types, circuits, topology and crosstalk graphs for the
//! crosstalk-aware frequency allocator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! xfreq_core // L0+L1: Foundation + Circuit
//!     L0_Foundation // 기반 타입/상수/에러
//!         CoreTypes // 핵심 타입, 정규화된 Coupling
//!         Constants // 물리/솔버/컬러링 상수
//!         Errors // 에러 타입
//!     L1_Circuit // 회로 구조
//!         Gate // 게이트 enum + 네이티브 2Q
//!         Circuit // 회로 구조체 + ASAP 레이어
//!         CircuitBuilder // 빌더 패턴
//!         Topology // 연결 그래프
//!         CrosstalkGraph // 크로스토크 그래프
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use xfreq_core::prelude::*;
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h(0)
//!     .cz(0, 1)
//!     .cz(1, 2)
//!     .measure_all()
//!     .build();
//!
//! assert_eq!(circuit.layers().len(), 4);
//! ```
//!
//! ## Crosstalk Graph
//!
//! ```rust
//! use xfreq_core::prelude::*;
//!
//! let topo = Topology::grid(2, 2);
//! let crosstalk = CrosstalkGraph::augmented(&topo, 0);
//!
//! assert_eq!(crosstalk.num_nodes(), 4);
//! assert!(topo.validate_circuit(&CircuitBuilder::new(4).cz(0, 1).build()).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Quantum gates (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Circuit → CircuitBuilder)
pub mod builder;

/// Qubit topology (Gantree: L1_Circuit → Topology)
pub mod topology;

/// Crosstalk graph (Gantree: L1_Circuit → CrosstalkGraph)
pub mod crosstalk;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::{Circuit, Layer};
pub use constants::{coloring, physics, solver};
pub use crosstalk::CrosstalkGraph;
pub use error::{XfreqError, XfreqResult};
pub use gate::{Gate, NativeGate};
pub use topology::Topology;
pub use types::{Angle, ColorId, Coupling, Ghz, Nanos, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use xfreq_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::{Circuit, Layer};
    pub use crate::constants::{coloring, physics, solver};
    pub use crate::crosstalk::CrosstalkGraph;
    pub use crate::error::{XfreqError, XfreqResult};
    pub use crate::gate::{Gate, NativeGate};
    pub use crate::topology::Topology;
    pub use crate::types::{Angle, ColorId, Coupling, Ghz, Nanos, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_grid_circuit_layers_and_validation() {
        let topo = Topology::grid(2, 3);
        let circuit = CircuitBuilder::new(6)
            .h_layer()
            .cz(0, 1)
            .cz(4, 5)
            .iswap(1, 2)
            .measure_all()
            .build();

        assert!(topo.validate_circuit(&circuit).is_ok());

        // measurements land as soon as their qubit is free
        let layers = circuit.layers();
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[0].len(), 6);
        assert_eq!(layers[1], vec![Gate::Cz(0, 1), Gate::Cz(4, 5), Gate::Measure(3)]);
        assert_eq!(
            layers[2],
            vec![Gate::ISwap(1, 2), Gate::Measure(0), Gate::Measure(4), Gate::Measure(5)]
        );
        assert_eq!(layers[3], vec![Gate::Measure(1), Gate::Measure(2)]);
    }

    #[test]
    fn test_crosstalk_over_grid() {
        let topo = Topology::grid(2, 2);
        let graph = CrosstalkGraph::augmented(&topo, 0);

        // 2x2 grid is a 4-cycle: every coupling touches two others
        for coupling in topo.couplings() {
            assert_eq!(graph.neighbors(coupling).count(), 2);
        }

        let wide = CrosstalkGraph::augmented(&topo, 1);
        assert_eq!(wide.num_conflicts(), 6);
    }

    #[test]
    fn test_qasm_roundtrip() {
        let original = CircuitBuilder::new(3)
            .h(0)
            .cx(0, 1)
            .sqrt_iswap(1, 2)
            .rz(0, 1.5707963267948966)
            .measure_all()
            .build();

        let parsed = Circuit::from_qasm(&original.to_qasm()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_remap_then_validate() {
        let topo = Topology::linear(4);
        let logical = CircuitBuilder::new(2).cz(0, 1).build();

        let ok = logical.remap(&[2, 3], topo.num_qubits()).unwrap();
        assert!(topo.validate_circuit(&ok).is_ok());

        let bad = logical.remap(&[0, 3], topo.num_qubits()).unwrap();
        assert!(matches!(
            topo.validate_circuit(&bad),
            Err(XfreqError::TopologyViolation { q1: 0, q2: 3 })
        ));
    }
}
