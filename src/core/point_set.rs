//! # Point Set
//!
//! An ordered sequence of points. Order carries no meaning for elimination
//! but is kept exactly through the marshal so that buffers round-trip.

use nalgebra::Point;

use super::error::{SamplingError, SamplingResult};
use super::scalar::Coordinate;

/// An ordered set of `D`-dimensional points with `T` coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet<T: Coordinate, const D: usize> {
    points: Vec<Point<T, D>>,
}

impl<T: Coordinate, const D: usize> PointSet<T, D> {
    pub fn new(points: Vec<Point<T, D>>) -> Self {
        Self { points }
    }

    /// Build from flattened coordinates (`x0, y0, [z0,] x1, ...`)
    ///
    /// Fails if the slice length is not a multiple of `D`.
    pub fn from_flat(coords: &[T]) -> SamplingResult<Self> {
        if coords.len() % D != 0 {
            return Err(SamplingError::BufferSizeMismatch {
                expected: (coords.len() / D + 1) * D,
                actual: coords.len(),
            });
        }

        let points = coords
            .chunks_exact(D)
            .map(|chunk| Point::from_slice(chunk))
            .collect();

        Ok(Self { points })
    }

    /// Flatten back to `x0, y0, [z0,] x1, ...`
    pub fn to_flat(&self) -> Vec<T> {
        let mut coords = Vec::with_capacity(self.points.len() * D);
        for p in &self.points {
            coords.extend(p.coords.iter().copied());
        }
        coords
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point<T, D>] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point<T, D>> + '_ {
        self.points.iter()
    }

    /// Pick the points at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            points: indices.iter().map(|&i| self.points[i]).collect(),
        }
    }

    /// Index of the first point with a NaN or infinite coordinate
    pub fn first_non_finite(&self) -> Option<usize> {
        self.points
            .iter()
            .position(|p| p.coords.iter().any(|c| !c.is_finite_value()))
    }
}

impl<T: Coordinate, const D: usize> From<Vec<Point<T, D>>> for PointSet<T, D> {
    fn from(points: Vec<Point<T, D>>) -> Self {
        Self::new(points)
    }
}

impl<T: Coordinate, const D: usize> FromIterator<Point<T, D>> for PointSet<T, D> {
    fn from_iter<I: IntoIterator<Item = Point<T, D>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
