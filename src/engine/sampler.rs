//! # Sampler
//!
//! The main entry point.
//!
//! Wires the radius calculator, the elimination engine and the codec
//! together:
//! - typed sampling of a [`PointSet`] from [`SamplingParams`]
//! - the flat-buffer compute-and-eliminate call used by foreign hosts
//! - tagged-buffer elimination and marshal round-trips
//! - generating an oversampled uniform input and thinning it

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::adapters::codec;
use crate::core::{
    Bounds, Coordinate, EliminationConfig, PointSet, SamplingError, SamplingParams,
    SamplingResult, ScalarKind,
};

use super::SampleEliminator;

/// Default ratio of generated to kept points
pub const DEFAULT_OVERSAMPLING: usize = 16;

/// Output of [`Sampler::generate_and_eliminate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T: Coordinate, const D: usize> {
    /// The uniform random input
    pub generated: PointSet<T, D>,

    /// The eliminated subset
    pub sampled: PointSet<T, D>,
}

/// The sample elimination front end
///
/// Holds an [`EliminationConfig`] and applies it to every call.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    config: EliminationConfig,
}

impl Sampler {
    pub fn new(config: EliminationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EliminationConfig {
        &self.config
    }

    /// An engine carrying this sampler's configuration
    pub fn eliminator<T: Coordinate, const D: usize>(&self) -> SampleEliminator<T, D> {
        SampleEliminator::new(self.config)
    }

    // ========================================================================
    // TYPED SAMPLING
    // ========================================================================

    /// Thin `points` to `params.target_count` using the radius implied by
    /// `params`
    pub fn sample<T: Coordinate, const D: usize>(
        &self,
        points: &PointSet<T, D>,
        params: &SamplingParams,
    ) -> SamplingResult<PointSet<T, D>> {
        self.sample_with(&self.eliminator(), points, params)
    }

    /// Like [`sample`](Self::sample), treating `bounds` as a periodic domain
    pub fn sample_tiled<T: Coordinate, const D: usize>(
        &self,
        points: &PointSet<T, D>,
        params: &SamplingParams,
        bounds: Bounds<T, D>,
    ) -> SamplingResult<PointSet<T, D>> {
        self.sample_with(&self.eliminator().with_tiling(bounds), points, params)
    }

    fn sample_with<T: Coordinate, const D: usize>(
        &self,
        eliminator: &SampleEliminator<T, D>,
        points: &PointSet<T, D>,
        params: &SamplingParams,
    ) -> SamplingResult<PointSet<T, D>> {
        params.validate(points.len())?;
        let threshold = params.threshold()?;

        debug!(
            input = points.len(),
            target = params.target_count,
            measure = params.domain_measure,
            threshold,
            "sampling"
        );

        eliminator.eliminate(
            points,
            params.target_count,
            T::from_scalar(threshold),
            params.dimension,
        )
    }

    // ========================================================================
    // FLAT BUFFERS
    // ========================================================================

    /// Decode a flat buffer, eliminate, and encode the survivors
    ///
    /// `input` holds `input_count * dimension` little-endian `T` values.
    /// Returns the output buffer and its point count.
    pub fn compute_and_eliminate<T: Coordinate>(
        &self,
        input: &[u8],
        input_count: usize,
        dimension: usize,
        domain_measure: f64,
        target_count: usize,
    ) -> SamplingResult<(Vec<u8>, usize)> {
        let params = SamplingParams::new(dimension, domain_measure, target_count);

        match dimension {
            2 => self.flat_pass::<T, 2>(input, input_count, &params),
            3 => self.flat_pass::<T, 3>(input, input_count, &params),
            d => Err(SamplingError::UnsupportedDimension(d)),
        }
    }

    fn flat_pass<T: Coordinate, const D: usize>(
        &self,
        input: &[u8],
        input_count: usize,
        params: &SamplingParams,
    ) -> SamplingResult<(Vec<u8>, usize)> {
        // Cheap argument checks before touching the buffer
        params.validate(input_count)?;

        let points = codec::decode_flat::<T, D>(input, input_count)?;
        let sampled = self.sample(&points, params)?;
        let output = codec::encode_flat(&sampled)?;

        Ok((output, sampled.len()))
    }

    // ========================================================================
    // TAGGED BUFFERS
    // ========================================================================

    /// Eliminate a serialized point set, returning the serialized survivors
    ///
    /// Precision and point dimensionality come from the header. The sampling
    /// dimension defaults to the point dimensionality; pass `Some(2)` to
    /// sample 3D points over a planar domain.
    pub fn eliminate_encoded(
        &self,
        input: &[u8],
        domain_measure: f64,
        target_count: usize,
        dimension: Option<usize>,
    ) -> SamplingResult<Vec<u8>> {
        let header = codec::peek_header(input)?;
        let params = SamplingParams::new(
            dimension.unwrap_or(header.dimension),
            domain_measure,
            target_count,
        );

        match (header.scalar, header.dimension) {
            (ScalarKind::F32, 2) => self.encoded_pass::<f32, 2>(input, &params),
            (ScalarKind::F32, 3) => self.encoded_pass::<f32, 3>(input, &params),
            (ScalarKind::F64, 2) => self.encoded_pass::<f64, 2>(input, &params),
            (ScalarKind::F64, 3) => self.encoded_pass::<f64, 3>(input, &params),
            (_, d) => Err(SamplingError::UnsupportedDimension(d)),
        }
    }

    fn encoded_pass<T: Coordinate, const D: usize>(
        &self,
        input: &[u8],
        params: &SamplingParams,
    ) -> SamplingResult<Vec<u8>> {
        let points = codec::decode_points::<T, D>(input)?;
        let sampled = self.sample(&points, params)?;
        codec::encode_points(&sampled)
    }

    /// Decode and re-encode a serialized single point
    pub fn roundtrip_point(&self, input: &[u8]) -> SamplingResult<Vec<u8>> {
        codec::roundtrip_point(input)
    }

    /// Decode and re-encode a serialized point set
    pub fn roundtrip_points(&self, input: &[u8]) -> SamplingResult<Vec<u8>> {
        codec::roundtrip_points(input)
    }

    // ========================================================================
    // GENERATION
    // ========================================================================

    /// Draw `target_count * oversampling` uniform points in `bounds` and
    /// eliminate them down to `target_count`
    ///
    /// A `border_scale` below 1 first insets `bounds` by an equal border on
    /// every sampled side (see [`Bounds::inset_uniform`]), keeping points off
    /// the edges. The domain measure is the volume of the inset box over its
    /// first `dimension` axes. A fixed `seed` makes the result reproducible.
    pub fn generate_and_eliminate<T: Coordinate, const D: usize>(
        &self,
        bounds: &Bounds<T, D>,
        target_count: usize,
        oversampling: usize,
        border_scale: f64,
        seed: Option<u64>,
        dimension: usize,
    ) -> SamplingResult<Generated<T, D>> {
        if oversampling == 0 {
            return Err(SamplingError::InvalidConfig(
                "oversampling must be at least 1".to_string(),
            ));
        }
        let count = target_count.checked_mul(oversampling).ok_or_else(|| {
            SamplingError::InvalidConfig(format!(
                "{} points at {}x oversampling overflows",
                target_count, oversampling
            ))
        })?;

        let bounds = bounds.inset_uniform(border_scale, dimension)?;
        let params = SamplingParams::new(dimension, bounds.measure(dimension), target_count);
        params.validate(count)?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generated: PointSet<T, D> = (0..count).map(|_| bounds.sample_uniform(&mut rng)).collect();

        let sampled = self.sample(&generated, &params)?;
        Ok(Generated { generated, sampled })
    }
}
