//! # Bounds
//!
//! Axis-aligned box used for periodic (tiled) elimination and for
//! oversampling a region before elimination.

use nalgebra::{Point, SVector};
use rand::Rng;

use super::error::{SamplingError, SamplingResult};
use super::scalar::Coordinate;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T: Coordinate, const D: usize> {
    pub min: Point<T, D>,
    pub max: Point<T, D>,
}

impl<T: Coordinate, const D: usize> Bounds<T, D> {
    /// Create bounds, rejecting inverted or non-finite boxes
    ///
    /// A zero extent is allowed, so a planar rectangle can live in 3D.
    pub fn new(min: Point<T, D>, max: Point<T, D>) -> SamplingResult<Self> {
        for axis in 0..D {
            let (lo, hi) = (min[axis], max[axis]);
            if !lo.is_finite_value() || !hi.is_finite_value() || hi < lo {
                return Err(SamplingError::InvalidConfig(format!(
                    "bounds axis {} must satisfy min <= max, got [{}, {}]",
                    axis,
                    lo.as_f64(),
                    hi.as_f64()
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// The unit box `[0, 1]^D`
    pub fn unit() -> Self {
        Self {
            min: Point::origin(),
            max: Point::from(SVector::repeat(T::one())),
        }
    }

    /// Edge lengths
    pub fn extent(&self) -> SVector<T, D> {
        self.max - self.min
    }

    /// Product of the first `dimension` edge lengths (area in 2D, volume in 3D)
    pub fn measure(&self, dimension: usize) -> f64 {
        let extent = self.extent();
        (0..dimension.min(D)).map(|axis| extent[axis].as_f64()).product()
    }

    /// Shrink the first `dimension` axes by the same border on every side
    ///
    /// The border is `(1 - scale)` times the shortest non-zero extent among
    /// those axes, so a `scale` of 1 returns the box unchanged. Axes past
    /// `dimension` are left alone.
    pub fn inset_uniform(&self, scale: f64, dimension: usize) -> SamplingResult<Self> {
        if !(scale.is_finite() && scale > 0.0 && scale <= 1.0) {
            return Err(SamplingError::InvalidConfig(format!(
                "border scale must be in (0, 1], got {}",
                scale
            )));
        }

        let extent = self.extent();
        let sampled = dimension.min(D);
        let mut shortest: Option<T> = None;
        for axis in 0..sampled {
            let e = extent[axis];
            if e > T::zero() && shortest.map_or(true, |s| e < s) {
                shortest = Some(e);
            }
        }
        let Some(shortest) = shortest else {
            return Ok(*self);
        };

        let border = shortest * T::from_scalar(1.0 - scale) / T::from_scalar(2.0);
        let mut inset = *self;
        for axis in 0..sampled {
            if extent[axis] > T::zero() {
                inset.min[axis] += border;
                inset.max[axis] -= border;
            }
        }
        Ok(inset)
    }

    pub fn contains(&self, p: &Point<T, D>) -> bool {
        (0..D).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }

    /// Draw a uniform point inside the box
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<T, D> {
        let extent = self.extent();
        let mut p = self.min;
        for axis in 0..D {
            let u: f64 = rng.gen();
            p[axis] += extent[axis] * T::from_scalar(u);
        }
        p
    }

    /// Periodic copies of `p` that land within `margin` of the box
    ///
    /// Shifts `p` by every combination of `-extent, 0, +extent` per axis
    /// (excluding the identity) and keeps the copies inside the box grown
    /// by `margin`.
    pub fn ghost_copies(&self, p: &Point<T, D>, margin: T) -> Vec<Point<T, D>> {
        let extent = self.extent();
        let mut copies = Vec::new();

        // 3^D shift combinations, encoded base 3 (0 = -1, 1 = 0, 2 = +1)
        let combos = 3usize.pow(D as u32);
        for code in 0..combos {
            let mut shifted = *p;
            let mut rest = code;
            let mut identity = true;
            let mut flat_shift = false;

            for axis in 0..D {
                if rest % 3 != 1 && extent[axis] <= T::zero() {
                    flat_shift = true;
                }
                match rest % 3 {
                    0 => {
                        shifted[axis] -= extent[axis];
                        identity = false;
                    }
                    2 => {
                        shifted[axis] += extent[axis];
                        identity = false;
                    }
                    _ => {}
                }
                rest /= 3;
            }

            // Shifting along a zero-extent axis lands back on `p`
            if identity || flat_shift {
                continue;
            }

            let near = (0..D).all(|axis| {
                shifted[axis] >= self.min[axis] - margin && shifted[axis] <= self.max[axis] + margin
            });
            if near {
                copies.push(shifted);
            }
        }

        copies
    }
}
