//! # Python Bindings
//!
//! PyO3 bindings for sample elimination.
//!
//! ## Python API
//!
//! ```python
//! from sample_elim import SamplerConfig, eliminate, elimination_radius, sample_rectangle
//!
//! # Thin 1000 random points in the unit square down to 100
//! kept = eliminate(points, domain_measure=1.0, target_count=100)
//!
//! # Radius implied by 100 samples per unit area
//! r = elimination_radius(2, 100, 1.0)
//!
//! # Generate and eliminate in one call, reproducibly
//! generated, sampled = sample_rectangle((0, 0), (10, 5), 200, seed=7)
//!
//! # Same, keeping a 10% border off the edges
//! generated, sampled = sample_rectangle((0, 0), (10, 5), 200, border_scale=0.9, seed=7)
//!
//! # Custom tuning
//! config = SamplerConfig().with_alpha(6.0).with_progressive(True)
//! kept = eliminate(points, 1.0, 100, config=config)
//! ```

use pyo3::exceptions::{PyMemoryError, PyValueError};
use pyo3::prelude::*;

use crate::core::{
    compute_elimination_radius, Bounds, EliminationConfig, ErrorKind, PointSet, SamplingError,
    SamplingParams,
};
use crate::engine::{Sampler, DEFAULT_OVERSAMPLING};
use nalgebra::Point2;

fn to_py_err(error: SamplingError) -> PyErr {
    match error.kind() {
        ErrorKind::AllocationFailure => PyMemoryError::new_err(format!("{}", error)),
        _ => PyValueError::new_err(format!("{}", error)),
    }
}

/// Python wrapper for the elimination configuration
#[pyclass(name = "SamplerConfig")]
#[derive(Clone, Default)]
pub struct PySamplerConfig {
    inner: EliminationConfig,
}

#[pymethods]
impl PySamplerConfig {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Set the weight falloff exponent (default: 8)
    fn with_alpha(mut slf: PyRefMut<'_, Self>, alpha: f64) -> PyRefMut<'_, Self> {
        slf.inner.alpha = alpha;
        slf
    }

    /// Set the weight limiting upper bound (default: 0.65)
    fn with_beta(mut slf: PyRefMut<'_, Self>, beta: f64) -> PyRefMut<'_, Self> {
        slf.inner.beta = beta;
        slf
    }

    /// Set the weight limiting exponent (default: 1.5)
    fn with_gamma(mut slf: PyRefMut<'_, Self>, gamma: f64) -> PyRefMut<'_, Self> {
        slf.inner.gamma = gamma;
        slf
    }

    fn with_weight_limiting(mut slf: PyRefMut<'_, Self>, on: bool) -> PyRefMut<'_, Self> {
        slf.inner.weight_limiting = on;
        slf
    }

    /// Order output so every prefix is itself well spread
    fn with_progressive(mut slf: PyRefMut<'_, Self>, on: bool) -> PyRefMut<'_, Self> {
        slf.inner.progressive = on;
        slf
    }

    fn __repr__(&self) -> String {
        format!(
            "SamplerConfig(alpha={}, beta={}, gamma={}, weight_limiting={}, progressive={})",
            self.inner.alpha,
            self.inner.beta,
            self.inner.gamma,
            self.inner.weight_limiting,
            self.inner.progressive
        )
    }
}

fn sampler(config: Option<&PySamplerConfig>) -> Sampler {
    Sampler::new(config.map(|c| c.inner).unwrap_or_default())
}

fn rows<const D: usize>(set: &PointSet<f64, D>) -> Vec<Vec<f64>> {
    set.iter().map(|p| p.coords.iter().copied().collect()).collect()
}

fn eliminate_rows<const D: usize>(
    sampler: &Sampler,
    points: &[Vec<f64>],
    params: &SamplingParams,
) -> PyResult<Vec<Vec<f64>>> {
    let flat: Vec<f64> = points.iter().flatten().copied().collect();
    let set = PointSet::<f64, D>::from_flat(&flat).map_err(to_py_err)?;
    let sampled = sampler.sample(&set, params).map_err(to_py_err)?;
    Ok(rows(&sampled))
}

/// Maximum Poisson-disk radius for `target_count` samples
///
/// Args:
///     dimension: 2 or 3
///     target_count: Number of samples
///     domain_measure: Area (2D) or volume (3D) of the domain
#[pyfunction]
fn elimination_radius(dimension: usize, target_count: usize, domain_measure: f64) -> PyResult<f64> {
    compute_elimination_radius(dimension, target_count, domain_measure).map_err(to_py_err)
}

/// Eliminate a list of 2D or 3D points down to `target_count`
///
/// Args:
///     points: List of [x, y] or [x, y, z] coordinates
///     domain_measure: Area (2D) or volume (3D) of the sampled domain
///     target_count: Number of points to keep
///     dimension: Sampling dimension, defaults to the point dimensionality
///     config: Optional SamplerConfig
///
/// Returns:
///     list: The kept points, in input order
#[pyfunction]
#[pyo3(signature = (points, domain_measure, target_count, dimension=None, config=None))]
fn eliminate(
    points: Vec<Vec<f64>>,
    domain_measure: f64,
    target_count: usize,
    dimension: Option<usize>,
    config: Option<PyRef<'_, PySamplerConfig>>,
) -> PyResult<Vec<Vec<f64>>> {
    let width = points.first().map(Vec::len).unwrap_or(2);
    if let Some(row) = points.iter().position(|p| p.len() != width) {
        return Err(PyValueError::new_err(format!(
            "Point {} has {} coordinates, expected {}",
            row,
            points[row].len(),
            width
        )));
    }

    let sampler = sampler(config.as_deref());
    let params = SamplingParams::new(dimension.unwrap_or(width), domain_measure, target_count);

    match width {
        2 => eliminate_rows::<2>(&sampler, &points, &params),
        3 => eliminate_rows::<3>(&sampler, &points, &params),
        d => Err(to_py_err(SamplingError::UnsupportedDimension(d))),
    }
}

/// Generate uniform points in a rectangle and eliminate them
///
/// Args:
///     min: (x, y) lower corner
///     max: (x, y) upper corner
///     target_count: Number of points to keep
///     oversampling: Generated points per kept point (default: 16)
///     border_scale: Below 1.0, keep an equal border off every edge (default: 1.0)
///     seed: Optional seed for reproducible generation
///     config: Optional SamplerConfig
///
/// Returns:
///     tuple: (generated, sampled) point lists
#[pyfunction]
#[pyo3(signature = (min, max, target_count, oversampling=DEFAULT_OVERSAMPLING, border_scale=1.0, seed=None, config=None))]
fn sample_rectangle(
    min: (f64, f64),
    max: (f64, f64),
    target_count: usize,
    oversampling: usize,
    border_scale: f64,
    seed: Option<u64>,
    config: Option<PyRef<'_, PySamplerConfig>>,
) -> PyResult<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    let bounds = Bounds::new(Point2::new(min.0, min.1), Point2::new(max.0, max.1)).map_err(to_py_err)?;

    let generated = sampler(config.as_deref())
        .generate_and_eliminate(&bounds, target_count, oversampling, border_scale, seed, 2)
        .map_err(to_py_err)?;

    Ok((rows(&generated.generated), rows(&generated.sampled)))
}

/// Weighted sample elimination Python module
#[pymodule]
fn sample_elim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySamplerConfig>()?;
    m.add_function(wrap_pyfunction!(eliminate, m)?)?;
    m.add_function(wrap_pyfunction!(elimination_radius, m)?)?;
    m.add_function(wrap_pyfunction!(sample_rectangle, m)?)?;

    m.add("__doc__", "Blue-noise point sampling by weighted sample elimination")?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
