//! # Core Domain
//!
//! Pure math, no I/O. The foundation of the sampler.
//!
//! This module contains the fundamental types and operations:
//! - `Coordinate` - `f32` / `f64` coordinate precision
//! - `PointSet` - An ordered set of 2D or 3D points
//! - `Bounds` - Axis-aligned domain box
//! - `SamplingParams` - Dimension, domain measure, target count
//! - `WeightFunction` - Neighbour weight falloff
//! - `IndexedMaxHeap` - Priority structure with decrease-key
//!
//! ## Design Principles
//!
//! - All functions are pure (deterministic, no side effects)
//! - No I/O operations
//! - Generic over precision and dimensionality, never over host point types

mod scalar;
mod point_set;
mod bounds;
pub mod params;
pub mod weight;
pub mod heap;
pub mod config;
pub mod error;

// Re-exports
pub use scalar::{Coordinate, ScalarKind};
pub use point_set::PointSet;
pub use bounds::Bounds;
pub use params::{compute_elimination_radius, elimination_threshold, SamplingParams};
pub use weight::WeightFunction;
pub use heap::IndexedMaxHeap;
pub use config::{EliminationConfig, IndexKind};
pub use error::{ErrorKind, SamplingError, SamplingResult};
