//! # xfreq Color
//!
//! Crosstalk coloring of the couplings active in a layer, with a
//! budgeted randomized recoloring fallback, and the once-per-run park
//! coloring of the connectivity graph.
//!
//! ## Gantree Architecture
//!
//! ```text
//! xfreq_color // L3: Color
//!     ConflictGraph // petgraph 충돌 그래프 + 탐욕 컬러링
//!         color_greedy_with(), relabel_dense(), num_colors()
//!     CrosstalkColorer // 활성 결합 컬러링
//!         induced(), color() -> ColoringOutcome
//!     ParkColoring // 유휴 주파수 컬러링
//!         from_topology(), park_color_id()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use xfreq_color::prelude::*;
//! use xfreq_core::{CrosstalkGraph, Topology};
//!
//! let topology = Topology::grid(2, 3);
//! let crosstalk = CrosstalkGraph::augmented(&topology, 1);
//!
//! let mut colorer = CrosstalkColorer::new(0, Some(1));
//! let outcome = colorer.color(&crosstalk, topology.couplings());
//! assert!(outcome.num_colors >= 1);
//!
//! let park = ParkColoring::from_topology(&topology);
//! assert_eq!(park.num_colors(), 2);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Conflict graph (Gantree: L3_Color → ConflictGraph)
pub mod graph;

/// Active coupling coloring (Gantree: L3_Color → CrosstalkColorer)
pub mod coloring;

/// Park coloring (Gantree: L3_Color → ParkColoring)
pub mod idle;

// ============================================================================
// Re-exports
// ============================================================================

pub use coloring::{ColoringOutcome, CrosstalkColorer};
pub use graph::{num_colors, relabel_dense, ConflictGraph};
pub use idle::{park_color_id, ParkColoring};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::coloring::{ColoringOutcome, CrosstalkColorer};
    pub use crate::idle::{park_color_id, ParkColoring};
}

// ============================================================================
// Integration Tests
// ============================================================================
