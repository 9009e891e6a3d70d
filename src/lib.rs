//! # sample-elim - Weighted Sample Elimination
//!
//! Blue-noise point sampling. Given an oversampled set of 2D or 3D points,
//! remove the most crowded ones until a target count remains. The survivors
//! approximate a Poisson-disk distribution: evenly spread, no clumps, no
//! visible grid.
//!
//! ## Pipeline
//!
//! 1. **Radius**: from the domain measure and target count, the largest
//!    Poisson-disk radius `r` achievable (hexagonal packing in 2D, FCC in 3D).
//! 2. **Weights**: each point is penalised by every neighbour closer than
//!    `d_max = 2r`, with a steep falloff.
//! 3. **Elimination**: repeatedly drop the heaviest point and update only its
//!    neighbours.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       sample-elim                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (pure math, no I/O)                                   │
//! │    PointSet, Bounds, SamplingParams, WeightFunction,        │
//! │    IndexedMaxHeap, EliminationConfig, SamplingError         │
//! │                                                              │
//! │  PORTS (trait contracts)                                     │
//! │    Neighborhood                                              │
//! │                                                              │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Index: KdTree, Flat                                      │
//! │    Codec: flat and tagged buffers                           │
//! │    API: C ABI, Python bindings                              │
//! │                                                              │
//! │  ENGINE (orchestration)                                      │
//! │    SampleEliminator, Sampler                                │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use nalgebra::Point2;
//! use sample_elim::{PointSet, Sampler, SamplingParams};
//!
//! let points: PointSet<f64, 2> = (0..400)
//!     .map(|i| Point2::new((i % 20) as f64 / 20.0, (i / 20) as f64 / 20.0))
//!     .collect();
//!
//! let sampled = Sampler::default()
//!     .sample(&points, &SamplingParams::new(2, 1.0, 40))
//!     .unwrap();
//!
//! assert_eq!(sampled.len(), 40);
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure math, no I/O
/// Contains: PointSet, Bounds, radius calculator, weights, heap, config, errors
pub mod core;

/// Port definitions - trait contracts for adapters
/// Contains: Neighborhood trait
pub mod ports;

/// Adapter implementations - swappable components
/// Contains: index, codec, ffi, python submodules
pub mod adapters;

/// Engine - orchestration layer
/// Contains: SampleEliminator, Sampler
pub mod engine;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{
    compute_elimination_radius, elimination_threshold, Bounds, Coordinate, EliminationConfig,
    ErrorKind, IndexKind, PointSet, SamplingError, SamplingParams, SamplingResult, ScalarKind,
};

// Port traits
pub use crate::ports::{Neighbor, Neighborhood};

// Adapters
pub use crate::adapters::index::{FlatIndex, KdTree};
pub use crate::adapters::ffi::SampleStatus;

// Engine
pub use crate::engine::{Generated, SampleEliminator, Sampler, DEFAULT_OVERSAMPLING};
