//! # Ports
//!
//! Trait definitions for adapters. Contracts only, no implementations.
//!
//! This is the hexagonal architecture boundary:
//! - Ports define WHAT operations are needed
//! - Adapters define HOW they're implemented
//!
//! The engine only talks to the `Neighborhood` port; which spatial index
//! answers it is a configuration choice.

mod neighborhood;

pub use neighborhood::{Neighbor, Neighborhood};
