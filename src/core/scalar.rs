//! # Coordinate Scalars
//!
//! The engine is generic over coordinate precision. `f32` and `f64` are the two
//! supported scalars; each knows its wire tag and little-endian byte layout.

use nalgebra::RealField;

/// Wire tag for the coordinate precision
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    F32 = 0,
    F64 = 1,
}

impl ScalarKind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(ScalarKind::F32),
            1 => Some(ScalarKind::F64),
            _ => None,
        }
    }

    /// Bytes per coordinate
    pub fn width(&self) -> usize {
        match self {
            ScalarKind::F32 => 4,
            ScalarKind::F64 => 8,
        }
    }
}

/// A floating-point coordinate type usable by the engine and the marshal
pub trait Coordinate: RealField + Copy {
    /// Wire tag
    const KIND: ScalarKind;

    /// Bytes per coordinate
    const WIDTH: usize;

    /// Append the little-endian bytes of `self`
    fn write_le(self, out: &mut Vec<u8>);

    /// Read from exactly `WIDTH` little-endian bytes
    fn read_le(bytes: &[u8]) -> Self;

    fn from_scalar(v: f64) -> Self;

    fn as_f64(self) -> f64;

    fn is_finite_value(self) -> bool;
}

impl Coordinate for f32 {
    const KIND: ScalarKind = ScalarKind::F32;
    const WIDTH: usize = 4;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[..4]);
        f32::from_le_bytes(raw)
    }

    fn from_scalar(v: f64) -> Self {
        v as f32
    }

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
}

impl Coordinate for f64 {
    const KIND: ScalarKind = ScalarKind::F64;
    const WIDTH: usize = 8;

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[..8]);
        f64::from_le_bytes(raw)
    }

    fn from_scalar(v: f64) -> Self {
        v
    }

    fn as_f64(self) -> f64 {
        self
    }

    fn is_finite_value(self) -> bool {
        self.is_finite()
    }
}
