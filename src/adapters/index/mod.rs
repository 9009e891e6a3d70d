//! # Index Adapters
//!
//! Implementations of the Neighborhood port for different index backends.
//!
//! Available adapters:
//! - `KdTree` - Bucketed kd-tree (exact, O(log n + k) per query)
//! - `FlatIndex` - Brute force search (exact, O(n) per query)
//!
//! `build_index` picks one from an `IndexKind`.

mod flat;
mod kd_tree;

pub use flat::FlatIndex;
pub use kd_tree::KdTree;

use nalgebra::Point;

use crate::core::{Coordinate, IndexKind};
use crate::ports::Neighborhood;

/// Build the configured index over `positions` tagged with `sources`
///
/// Both vectors must have the same length.
pub(crate) fn build_index<T: Coordinate, const D: usize>(
    kind: IndexKind,
    positions: Vec<Point<T, D>>,
    sources: Vec<usize>,
    leaf_size: usize,
) -> Box<dyn Neighborhood<T, D>> {
    match kind {
        IndexKind::KdTree => Box::new(KdTree::from_entries(positions, sources, leaf_size)),
        IndexKind::Flat => Box::new(FlatIndex::from_entries(positions, sources)),
    }
}
