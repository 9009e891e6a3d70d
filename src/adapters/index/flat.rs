//! # Flat Index Adapter
//!
//! Brute force radius search.
//! Compares the query against ALL entries - O(n) per query.
//!
//! Good for:
//! - Testing (reference answers for the kd-tree)
//! - Small inputs (a few hundred points)
//!
//! Not good for:
//! - Large inputs (use `KdTree` instead)

use nalgebra::Point;

use crate::core::Coordinate;
use crate::ports::Neighborhood;

/// Brute force index - scans every entry
pub struct FlatIndex<T: Coordinate, const D: usize> {
    /// Indexed positions
    positions: Vec<Point<T, D>>,

    /// Source id of each position
    sources: Vec<usize>,
}

impl<T: Coordinate, const D: usize> FlatIndex<T, D> {
    /// Index `points`, each entry's source id being its position in the slice
    pub fn from_points(points: &[Point<T, D>]) -> Self {
        Self {
            positions: points.to_vec(),
            sources: (0..points.len()).collect(),
        }
    }

    /// Index explicit entries (positions with their source ids)
    pub(crate) fn from_entries(positions: Vec<Point<T, D>>, sources: Vec<usize>) -> Self {
        debug_assert_eq!(positions.len(), sources.len());
        Self { positions, sources }
    }
}

impl<T: Coordinate, const D: usize> Neighborhood<T, D> for FlatIndex<T, D> {
    fn for_each_within(&self, origin: &Point<T, D>, radius: T, visit: &mut dyn FnMut(usize, T)) {
        let r2 = radius * radius;
        for (position, &source) in self.positions.iter().zip(&self.sources) {
            let d2 = nalgebra::distance_squared(origin, position);
            if d2 <= r2 {
                visit(source, d2);
            }
        }
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}
