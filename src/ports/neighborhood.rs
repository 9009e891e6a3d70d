//! # Neighborhood Port
//!
//! Fixed-radius neighbour queries over an indexed point set.
//!
//! Every indexed entry carries a *source id*. Normally that is the entry's
//! position in the input, but periodic (tiled) indexes hold ghost copies whose
//! source id points back at the original point, so one source can be reported
//! more than once.
//!
//! Implemented by index adapters (KdTree, Flat).

use nalgebra::Point;

use crate::core::Coordinate;

/// A neighbour found by a radius query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<T> {
    /// Source id of the indexed entry
    pub id: usize,

    /// Squared distance from the query origin
    pub distance_squared: T,
}

impl<T> Neighbor<T> {
    pub fn new(id: usize, distance_squared: T) -> Self {
        Self { id, distance_squared }
    }
}

/// Trait for radius queries
///
/// Index adapters implement this trait.
pub trait Neighborhood<T: Coordinate, const D: usize>: Send + Sync {
    /// Call `visit(source_id, squared_distance)` for every entry within
    /// `radius` of `origin` (inclusive)
    fn for_each_within(&self, origin: &Point<T, D>, radius: T, visit: &mut dyn FnMut(usize, T));

    /// Number of indexed entries, ghosts included
    fn len(&self) -> usize;

    /// Check if the index is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collect every entry within `radius` of `origin`
    fn within(&self, origin: &Point<T, D>, radius: T) -> Vec<Neighbor<T>> {
        let mut found = Vec::new();
        self.for_each_within(origin, radius, &mut |id, d2| found.push(Neighbor::new(id, d2)));
        found
    }
}
