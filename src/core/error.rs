//! # Errors
//!
//! One variant per concrete failure, grouped into three kinds:
//!
//! - `InvalidArgument` - caller bug (bad counts, dimension, measure, threshold)
//! - `CorruptBuffer` - a buffer that does not match what it claims to hold
//! - `AllocationFailure` - an output buffer could not be reserved
//!
//! None of these are retried internally.

use thiserror::Error;

/// Result type for sampling operations
pub type SamplingResult<T> = Result<T, SamplingError>;

/// Coarse classification of a [`SamplingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    CorruptBuffer,
    AllocationFailure,
}

/// Errors raised by the calculator, the engine and the marshal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("Target count {target} exceeds input count {input}")]
    TargetExceedsInput { target: usize, input: usize },

    #[error("Unsupported sampling dimension {0}, expected 2 or 3")]
    UnsupportedDimension(usize),

    #[error("Sampling dimension {dimension} exceeds point dimensionality {points}")]
    DimensionExceedsPoints { dimension: usize, points: usize },

    #[error("Domain measure must be positive and finite, got {0}")]
    InvalidDomainMeasure(f64),

    #[error("Target count must be at least 1")]
    InvalidTargetCount,

    #[error("Elimination threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    #[error("Point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("Point {index} lies outside the tiling bounds")]
    PointOutsideBounds { index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Null pointer passed for '{0}'")]
    NullPointer(&'static str),

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid magic bytes")]
    InvalidMagic,

    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Could not allocate {requested} bytes for the output buffer")]
    AllocationFailure { requested: usize },
}

impl SamplingError {
    /// The kind of failure, as reported across the foreign boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            SamplingError::TargetExceedsInput { .. }
            | SamplingError::UnsupportedDimension(_)
            | SamplingError::DimensionExceedsPoints { .. }
            | SamplingError::InvalidDomainMeasure(_)
            | SamplingError::InvalidTargetCount
            | SamplingError::InvalidThreshold(_)
            | SamplingError::NonFiniteCoordinate { .. }
            | SamplingError::PointOutsideBounds { .. }
            | SamplingError::InvalidConfig(_)
            | SamplingError::NullPointer(_) => ErrorKind::InvalidArgument,

            SamplingError::BufferSizeMismatch { .. }
            | SamplingError::InvalidMagic
            | SamplingError::UnsupportedVersion(_)
            | SamplingError::MalformedHeader(_) => ErrorKind::CorruptBuffer,

            SamplingError::AllocationFailure { .. } => ErrorKind::AllocationFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SamplingError::TargetExceedsInput { target: 5, input: 2 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            SamplingError::PointOutsideBounds { index: 3 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(SamplingError::InvalidMagic.kind(), ErrorKind::CorruptBuffer);
        assert_eq!(
            SamplingError::BufferSizeMismatch { expected: 16, actual: 12 }.kind(),
            ErrorKind::CorruptBuffer
        );
        assert_eq!(
            SamplingError::AllocationFailure { requested: 1 }.kind(),
            ErrorKind::AllocationFailure
        );
    }

    #[test]
    fn test_error_display() {
        let err = SamplingError::TargetExceedsInput { target: 10, input: 3 };
        assert_eq!(format!("{}", err), "Target count 10 exceeds input count 3");
    }
}
