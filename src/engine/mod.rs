//! # Engine
//!
//! The orchestration layer that wires everything together.
//!
//! This is where:
//! - Configuration is applied
//! - The neighbourhood index is chosen and built
//! - Weighted elimination runs
//! - The unified [`Sampler`] interface is exposed

mod eliminator;
mod sampler;

pub use eliminator::SampleEliminator;
pub use sampler::{Generated, Sampler, DEFAULT_OVERSAMPLING};
