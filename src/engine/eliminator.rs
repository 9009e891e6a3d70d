//! # Sample Eliminator
//!
//! Weighted sample elimination: thin an oversampled point set down to a
//! target count so the survivors approximate blue noise.
//!
//! ## Algorithm
//!
//! 1. Index every input point (kd-tree by default).
//! 2. Give each point a weight: the sum of `w(d)` over its neighbours within
//!    the threshold `d_max`. Clustered points weigh more.
//! 3. Pop the heaviest point from an indexed max-heap, then subtract its
//!    contribution from each live neighbour (decrease-key). Only neighbours
//!    within `d_max` change; nothing is recomputed globally.
//! 4. Stop when `target_count` points remain.
//!
//! Equal weights are broken by lowest input index, so identical inputs
//! always eliminate in the same order. Survivors are returned in input
//! order unless progressive ordering is on.

use nalgebra::Point;
use tracing::debug;

use crate::adapters::index::build_index;
use crate::core::params::{check_dimension, progressive_radius_multiplier, weight_limit_fraction};
use crate::core::{
    Bounds, Coordinate, EliminationConfig, IndexedMaxHeap, PointSet, SamplingError,
    SamplingResult, WeightFunction,
};
use crate::ports::Neighborhood;

/// Result of one elimination pass, as indices into the pass input
struct Pass {
    /// Kept points, ascending
    survivors: Vec<usize>,

    /// Eliminated points, first removed first
    removed: Vec<usize>,
}

/// The elimination engine
#[derive(Debug, Clone, PartialEq)]
pub struct SampleEliminator<T: Coordinate, const D: usize> {
    config: EliminationConfig,

    /// Periodic domain, when tiling
    tiling: Option<Bounds<T, D>>,
}

impl<T: Coordinate, const D: usize> Default for SampleEliminator<T, D> {
    fn default() -> Self {
        Self::new(EliminationConfig::default())
    }
}

impl<T: Coordinate, const D: usize> SampleEliminator<T, D> {
    pub fn new(config: EliminationConfig) -> Self {
        Self {
            config,
            tiling: None,
        }
    }

    /// Treat the domain as periodic inside `bounds`
    pub fn with_tiling(mut self, bounds: Bounds<T, D>) -> Self {
        self.tiling = Some(bounds);
        self
    }

    pub fn config(&self) -> &EliminationConfig {
        &self.config
    }

    pub fn tiling(&self) -> Option<&Bounds<T, D>> {
        self.tiling.as_ref()
    }

    /// Eliminate `input` down to `target_count` points
    ///
    /// `threshold` is the pairwise distance `d_max` beyond which points do not
    /// influence each other; `dimension` is the sampling dimension (2 or 3,
    /// at most `D`, so 3D points can be sampled as a planar domain).
    pub fn eliminate(
        &self,
        input: &PointSet<T, D>,
        target_count: usize,
        threshold: T,
        dimension: usize,
    ) -> SamplingResult<PointSet<T, D>> {
        let indices = self.eliminate_indices(input, target_count, threshold, dimension)?;
        Ok(input.select(&indices))
    }

    /// Like [`eliminate`](Self::eliminate), returning indices into `input`
    pub fn eliminate_indices(
        &self,
        input: &PointSet<T, D>,
        target_count: usize,
        threshold: T,
        dimension: usize,
    ) -> SamplingResult<Vec<usize>> {
        self.config.validate()?;
        check_dimension(dimension)?;

        if dimension > D {
            return Err(SamplingError::DimensionExceedsPoints {
                dimension,
                points: D,
            });
        }
        if target_count > input.len() {
            return Err(SamplingError::TargetExceedsInput {
                target: target_count,
                input: input.len(),
            });
        }
        if !(threshold.is_finite_value() && threshold > T::zero()) {
            return Err(SamplingError::InvalidThreshold(threshold.as_f64()));
        }
        if let Some(index) = input.first_non_finite() {
            return Err(SamplingError::NonFiniteCoordinate { index });
        }
        if let Some(bounds) = &self.tiling {
            if let Some(index) = input.iter().position(|p| !bounds.contains(p)) {
                return Err(SamplingError::PointOutsideBounds { index });
            }
        }

        debug!(
            input = input.len(),
            target = target_count,
            threshold = threshold.as_f64(),
            dimension,
            tiled = self.tiling.is_some(),
            "eliminating samples"
        );

        let pass = self.run(input.points(), target_count, threshold);
        debug!(removed = pass.removed.len(), "elimination finished");

        if !self.config.progressive {
            return Ok(pass.survivors);
        }

        Ok(self.progressive_order(input.points(), pass.survivors, threshold, dimension))
    }

    fn weight_function(&self, input_count: usize, output_count: usize, d_max: T) -> WeightFunction<T> {
        let weight = WeightFunction::new(d_max, T::from_scalar(self.config.alpha));
        if !self.config.weight_limiting {
            return weight;
        }

        let fraction = weight_limit_fraction(
            input_count,
            output_count,
            self.config.beta,
            self.config.gamma,
        );
        weight.with_limit_fraction(T::from_scalar(fraction))
    }

    /// Index `points`, plus periodic ghosts when tiling
    fn index(&self, points: &[Point<T, D>], d_max: T) -> Box<dyn Neighborhood<T, D>> {
        let mut positions = points.to_vec();
        let mut sources: Vec<usize> = (0..points.len()).collect();

        if let Some(bounds) = &self.tiling {
            for (source, p) in points.iter().enumerate() {
                for ghost in bounds.ghost_copies(p, d_max) {
                    positions.push(ghost);
                    sources.push(source);
                }
            }
        }

        build_index(self.config.index, positions, sources, self.config.leaf_size)
    }

    fn run(&self, points: &[Point<T, D>], target_count: usize, d_max: T) -> Pass {
        let n = points.len();
        if target_count >= n {
            return Pass {
                survivors: (0..n).collect(),
                removed: Vec::new(),
            };
        }

        let (removed, _) = self.remove_heaviest(points, target_count, d_max);

        let mut alive = vec![true; n];
        for &i in &removed {
            alive[i] = false;
        }

        Pass {
            survivors: (0..n).filter(|&i| alive[i]).collect(),
            removed,
        }
    }

    /// Greedy removal loop; returns the removal order and the final heap
    fn remove_heaviest(
        &self,
        points: &[Point<T, D>],
        target_count: usize,
        d_max: T,
    ) -> (Vec<usize>, IndexedMaxHeap<T>) {
        let n = points.len();
        let index = self.index(points, d_max);
        let weight = self.weight_function(n, target_count, d_max);

        let mut weights = vec![T::zero(); n];
        for (i, p) in points.iter().enumerate() {
            let mut total = T::zero();
            index.for_each_within(p, d_max, &mut |j: usize, d2: T| {
                if j != i {
                    total += weight.weight(d2);
                }
            });
            weights[i] = total;
        }

        let mut heap = IndexedMaxHeap::new(weights);
        let mut removed = Vec::with_capacity(n.saturating_sub(target_count));

        while heap.len() > target_count {
            let Some(i) = heap.pop() else {
                break;
            };
            removed.push(i);

            index.for_each_within(&points[i], d_max, &mut |j: usize, d2: T| {
                if j != i && heap.contains(j) {
                    // Rounding drift must not push a weight below zero
                    let mut key = heap.key(j) - weight.weight(d2);
                    if key < T::zero() {
                        key = T::zero();
                    }
                    heap.update(j, key);
                }
            });
        }

        (removed, heap)
    }

    /// Reorder `survivors` so every prefix is itself well spread
    ///
    /// Repeatedly halves the leading block with a threshold grown by the
    /// progressive multiplier. At each level the kept half goes first, then
    /// the eliminated half with the last removed first.
    fn progressive_order(
        &self,
        points: &[Point<T, D>],
        survivors: Vec<usize>,
        threshold: T,
        dimension: usize,
    ) -> Vec<usize> {
        let multiplier = T::from_scalar(progressive_radius_multiplier(dimension));
        let mut order = survivors;
        let mut d_max = threshold;
        let mut in_size = order.len();

        while in_size >= 3 {
            let out_size = in_size / 2;
            d_max *= multiplier;

            let subset: Vec<Point<T, D>> = order[..in_size].iter().map(|&i| points[i]).collect();
            let pass = self.run(&subset, out_size, d_max);

            let level: Vec<usize> = pass
                .survivors
                .iter()
                .chain(pass.removed.iter().rev())
                .map(|&k| order[k])
                .collect();
            order[..in_size].copy_from_slice(&level);

            in_size = out_size;
        }

        debug!(count = order.len(), "progressive ordering finished");
        order
    }
}
