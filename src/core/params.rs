//! # Sampling Parameters
//!
//! Derives the elimination threshold from the target count and the measure
//! of the domain.
//!
//! ## Maximum Poisson-disk radius
//!
//! The largest radius `r` such that `n` non-overlapping disks (2D) or spheres
//! (3D) fit into a domain of measure `A` at closest-packing density:
//!
//! ```text
//! a = A / n                     (measure per sample)
//! 2D, hexagonal:  r = sqrt(a / (2 * sqrt(3)))
//! 3D, FCC:        r = cbrt(a / (4 * sqrt(2)))
//! ```
//!
//! Elimination compares pairwise separations, so the engine's threshold is the
//! diameter `2r`.

use super::error::{SamplingError, SamplingResult};

/// Supported sampling dimensions
pub const SUPPORTED_DIMENSIONS: [usize; 2] = [2, 3];

pub(crate) fn check_dimension(dimension: usize) -> SamplingResult<()> {
    if SUPPORTED_DIMENSIONS.contains(&dimension) {
        Ok(())
    } else {
        Err(SamplingError::UnsupportedDimension(dimension))
    }
}

/// Maximum Poisson-disk radius for `target_count` samples in `domain_measure`
pub fn compute_elimination_radius(
    dimension: usize,
    target_count: usize,
    domain_measure: f64,
) -> SamplingResult<f64> {
    check_dimension(dimension)?;
    if target_count == 0 {
        return Err(SamplingError::InvalidTargetCount);
    }
    if !(domain_measure.is_finite() && domain_measure > 0.0) {
        return Err(SamplingError::InvalidDomainMeasure(domain_measure));
    }

    let sample_measure = domain_measure / target_count as f64;

    let radius = match dimension {
        2 => (sample_measure / (2.0 * 3f64.sqrt())).sqrt(),
        _ => (sample_measure / (4.0 * 2f64.sqrt())).cbrt(),
    };

    Ok(radius)
}

/// Pairwise elimination threshold, the diameter `2 * r`
pub fn elimination_threshold(
    dimension: usize,
    target_count: usize,
    domain_measure: f64,
) -> SamplingResult<f64> {
    Ok(2.0 * compute_elimination_radius(dimension, target_count, domain_measure)?)
}

/// Fraction of the threshold below which weight falloff is clamped
///
/// `(1 - (output / input)^gamma) * beta`. Close to `beta` for heavy
/// oversampling, shrinking to zero as output approaches input.
pub fn weight_limit_fraction(input_count: usize, output_count: usize, beta: f64, gamma: f64) -> f64 {
    if input_count == 0 {
        return 0.0;
    }
    let ratio = output_count as f64 / input_count as f64;
    (1.0 - ratio.powf(gamma)) * beta
}

/// Growth of the threshold each time the sample count halves
pub fn progressive_radius_multiplier(dimension: usize) -> f64 {
    match dimension {
        2 => 2f64.sqrt(),
        d => 2f64.powf(1.0 / d as f64),
    }
}

/// The parameters a caller supplies for one elimination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    /// Sampling dimension, 2 or 3
    pub dimension: usize,

    /// Area (2D) or volume (3D) of the sampled domain
    pub domain_measure: f64,

    /// Number of points to keep
    pub target_count: usize,
}

impl SamplingParams {
    pub fn new(dimension: usize, domain_measure: f64, target_count: usize) -> Self {
        Self {
            dimension,
            domain_measure,
            target_count,
        }
    }

    /// Check the parameters on their own and against an input of `input_count`
    pub fn validate(&self, input_count: usize) -> SamplingResult<()> {
        check_dimension(self.dimension)?;
        if self.target_count == 0 {
            return Err(SamplingError::InvalidTargetCount);
        }
        if !(self.domain_measure.is_finite() && self.domain_measure > 0.0) {
            return Err(SamplingError::InvalidDomainMeasure(self.domain_measure));
        }
        if self.target_count > input_count {
            return Err(SamplingError::TargetExceedsInput {
                target: self.target_count,
                input: input_count,
            });
        }
        Ok(())
    }

    pub fn radius(&self) -> SamplingResult<f64> {
        compute_elimination_radius(self.dimension, self.target_count, self.domain_measure)
    }

    pub fn threshold(&self) -> SamplingResult<f64> {
        elimination_threshold(self.dimension, self.target_count, self.domain_measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_radius_2d() {
        // 100 samples in the unit square
        let r = compute_elimination_radius(2, 100, 1.0).unwrap();
        assert_relative_eq!(r, (0.01 / (2.0 * 3f64.sqrt())).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(r, 0.053728, epsilon = 1e-5);
    }

    #[test]
    fn test_radius_3d() {
        let r = compute_elimination_radius(3, 1000, 1.0).unwrap();
        assert_relative_eq!(r, (0.001 / (4.0 * 2f64.sqrt())).cbrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_hexagonal_packing_density() {
        // n disks of radius r cover pi / (2 sqrt 3) of the domain
        let n = 250;
        let r = compute_elimination_radius(2, n, 4.0).unwrap();
        let covered = n as f64 * std::f64::consts::PI * r * r / 4.0;
        assert_relative_eq!(covered, std::f64::consts::PI / (2.0 * 3f64.sqrt()), epsilon = 1e-12);
    }

    #[test]
    fn test_radius_shrinks_with_count() {
        let few = compute_elimination_radius(3, 10, 8.0).unwrap();
        let many = compute_elimination_radius(3, 1000, 8.0).unwrap();
        assert!(many < few);
    }

    #[test]
    fn test_threshold_is_diameter() {
        let r = compute_elimination_radius(2, 42, 3.5).unwrap();
        let d = elimination_threshold(2, 42, 3.5).unwrap();
        assert_eq!(d, 2.0 * r);
    }

    #[test]
    fn test_radius_rejects_bad_input() {
        assert_eq!(
            compute_elimination_radius(4, 10, 1.0),
            Err(SamplingError::UnsupportedDimension(4))
        );
        assert_eq!(
            compute_elimination_radius(2, 0, 1.0),
            Err(SamplingError::InvalidTargetCount)
        );
        assert_eq!(
            compute_elimination_radius(2, 10, 0.0),
            Err(SamplingError::InvalidDomainMeasure(0.0))
        );
        assert!(compute_elimination_radius(3, 10, f64::NAN).is_err());
    }

    #[test]
    fn test_weight_limit_fraction() {
        assert_relative_eq!(weight_limit_fraction(1000, 100, 0.65, 1.5), (1.0 - 0.1f64.powf(1.5)) * 0.65);
        assert_eq!(weight_limit_fraction(100, 100, 0.65, 1.5), 0.0);
    }

    #[test]
    fn test_progressive_multiplier() {
        assert_relative_eq!(progressive_radius_multiplier(2), 2f64.sqrt());
        assert_relative_eq!(progressive_radius_multiplier(3), 2f64.cbrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_params_validate() {
        let params = SamplingParams::new(2, 1.0, 100);
        assert!(params.validate(1000).is_ok());
        assert_eq!(
            params.validate(50),
            Err(SamplingError::TargetExceedsInput { target: 100, input: 50 })
        );
        assert_eq!(
            SamplingParams::new(1, 1.0, 1).validate(10),
            Err(SamplingError::UnsupportedDimension(1))
        );
    }
}
