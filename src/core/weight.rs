//! # Weight Falloff
//!
//! How much a neighbour at distance `d` contributes to a point's weight:
//!
//! ```text
//! w(d) = (1 - max(d, d_min) / d_max)^alpha    for d < d_max
//! w(d) = 0                                    otherwise
//! ```
//!
//! Non-increasing in `d`. With weight limiting off, `d_min = 0`.

use super::scalar::Coordinate;

/// Weight contribution of one neighbour, as a function of squared distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightFunction<T: Coordinate> {
    d_max: T,
    d_min: T,
    alpha: T,
}

impl<T: Coordinate> WeightFunction<T> {
    /// Falloff over `d_max` with exponent `alpha`, no lower clamp
    pub fn new(d_max: T, alpha: T) -> Self {
        Self {
            d_max,
            d_min: T::zero(),
            alpha,
        }
    }

    /// Clamp distances below `d_max * fraction`
    pub fn with_limit_fraction(mut self, fraction: T) -> Self {
        self.d_min = self.d_max * fraction;
        self
    }

    pub fn d_max(&self) -> T {
        self.d_max
    }

    pub fn d_min(&self) -> T {
        self.d_min
    }

    /// Weight for a neighbour at squared distance `d2`
    pub fn weight(&self, d2: T) -> T {
        let mut d = d2.sqrt();
        if d >= self.d_max {
            return T::zero();
        }
        if d < self.d_min {
            d = self.d_min;
        }
        (T::one() - d / self.d_max).powf(self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_beyond_threshold() {
        let w = WeightFunction::new(1.0f64, 8.0);
        assert_eq!(w.weight(1.0), 0.0);
        assert_eq!(w.weight(4.0), 0.0);
    }

    #[test]
    fn test_coincident_points_weigh_one() {
        let w = WeightFunction::new(0.5f32, 8.0);
        assert_eq!(w.weight(0.0), 1.0);
    }

    #[test]
    fn test_monotonic_falloff() {
        let w = WeightFunction::new(2.0f64, 8.0);
        let mut last = f64::INFINITY;
        for i in 0..=40 {
            let d = i as f64 * 0.05;
            let value = w.weight(d * d);
            assert!(value <= last);
            assert!(value >= 0.0);
            last = value;
        }
    }

    #[test]
    fn test_limit_clamps_close_neighbours() {
        let w = WeightFunction::new(1.0f64, 2.0).with_limit_fraction(0.5);

        assert_relative_eq!(w.d_min(), 0.5);
        // Everything closer than d_min weighs the same as d_min
        assert_relative_eq!(w.weight(0.0), 0.25);
        assert_relative_eq!(w.weight(0.1 * 0.1), 0.25);
        assert_relative_eq!(w.weight(0.75 * 0.75), 0.0625);
    }
}
