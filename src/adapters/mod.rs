//! # Adapters
//!
//! Swappable implementations of port traits, and the edges of the crate.
//!
//! This is where the hexagonal architecture meets reality:
//! - Index adapters: KdTree (default), Flat (brute force)
//! - Point codec: flat and tagged byte buffers
//! - C ABI for foreign hosts
//! - Python bindings (when enabled)
//!
//! Host point types never reach the engine; they are translated here.

pub mod index;
pub mod codec;
pub mod ffi;

#[cfg(feature = "python")]
pub mod python;
