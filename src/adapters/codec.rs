//! # Point Codec
//!
//! Byte layouts for moving points across the foreign boundary.
//!
//! ## Flat buffers
//!
//! A dense run of `count * dimension` little-endian scalars, no header. The
//! caller states the count; the buffer length must match it exactly.
//!
//! ## Tagged buffers
//!
//! ```text
//! offset  size  field
//! 0       4     magic      "PSET" (point set) | "PNT\0" (single point)
//! 4       4     version    u32 LE, currently 1
//! 8       1     scalar     0 = f32, 1 = f64
//! 9       1     dimension  2 | 3
//! 10      2     reserved   zero
//! 12      8     count      u64 LE (always 1 for a single point)
//! 20      ...   coordinates, count * dimension scalars LE
//! ```
//!
//! The total length is checked against the header before any coordinate is
//! read. Output buffers are reserved fallibly so an oversized request
//! surfaces as [`SamplingError::AllocationFailure`].

use nalgebra::Point;

use crate::core::{Coordinate, PointSet, SamplingError, SamplingResult, ScalarKind};

/// Magic bytes of a serialized point set
pub const POINT_SET_MAGIC: [u8; 4] = *b"PSET";

/// Magic bytes of a serialized single point
pub const POINT_MAGIC: [u8; 4] = *b"PNT\0";

/// Current format version
pub const FORMAT_VERSION: u32 = 1;

/// Header size in bytes
pub const HEADER_LEN: usize = 20;

/// What a tagged buffer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Point,
    PointSet,
}

impl Payload {
    fn magic(&self) -> [u8; 4] {
        match self {
            Payload::Point => POINT_MAGIC,
            Payload::PointSet => POINT_SET_MAGIC,
        }
    }
}

/// Decoded header of a tagged buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub payload: Payload,
    pub scalar: ScalarKind,
    pub dimension: usize,
    pub count: usize,
}

impl Header {
    fn for_points<T: Coordinate, const D: usize>(payload: Payload, count: usize) -> Self {
        Self {
            payload,
            scalar: T::KIND,
            dimension: D,
            count,
        }
    }

    /// Coordinate bytes following the header
    pub fn payload_len(&self) -> Option<usize> {
        self.count
            .checked_mul(self.dimension)?
            .checked_mul(self.scalar.width())
    }

    /// Header plus coordinates
    pub fn total_len(&self) -> Option<usize> {
        self.payload_len()?.checked_add(HEADER_LEN)
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.payload.magic());
        out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        out.push(self.scalar as u8);
        out.push(self.dimension as u8);
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(&(self.count as u64).to_le_bytes());
    }

    /// Parse and validate the header of `bytes`, including its total length
    pub fn parse(bytes: &[u8]) -> SamplingResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(SamplingError::BufferSizeMismatch {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let payload = match &bytes[0..4] {
            m if m == &POINT_SET_MAGIC[..] => Payload::PointSet,
            m if m == &POINT_MAGIC[..] => Payload::Point,
            _ => return Err(SamplingError::InvalidMagic),
        };

        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if version != FORMAT_VERSION {
            return Err(SamplingError::UnsupportedVersion(version));
        }

        let scalar = ScalarKind::from_u8(bytes[8]).ok_or_else(|| {
            SamplingError::MalformedHeader(format!("unknown scalar tag {}", bytes[8]))
        })?;

        let dimension = bytes[9] as usize;
        if !(2..=3).contains(&dimension) {
            return Err(SamplingError::MalformedHeader(format!(
                "dimension {} is not 2 or 3",
                dimension
            )));
        }

        if bytes[10] != 0 || bytes[11] != 0 {
            return Err(SamplingError::MalformedHeader(
                "reserved bytes are not zero".to_string(),
            ));
        }

        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[12..20]);
        let count = usize::try_from(u64::from_le_bytes(raw)).map_err(|_| {
            SamplingError::MalformedHeader("count does not fit in memory".to_string())
        })?;

        if payload == Payload::Point && count != 1 {
            return Err(SamplingError::MalformedHeader(format!(
                "single point buffer declares {} points",
                count
            )));
        }

        let header = Self {
            payload,
            scalar,
            dimension,
            count,
        };

        let expected = header.total_len().ok_or_else(|| {
            SamplingError::MalformedHeader(format!("count {} overflows the buffer size", count))
        })?;
        if bytes.len() != expected {
            return Err(SamplingError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(header)
    }

    fn expect<T: Coordinate, const D: usize>(&self, payload: Payload) -> SamplingResult<()> {
        if self.payload != payload {
            return Err(SamplingError::MalformedHeader(format!(
                "expected {:?}, found {:?}",
                payload, self.payload
            )));
        }
        if self.scalar != T::KIND || self.dimension != D {
            return Err(SamplingError::MalformedHeader(format!(
                "expected {:?} x{}, found {:?} x{}",
                T::KIND,
                D,
                self.scalar,
                self.dimension
            )));
        }
        Ok(())
    }
}

/// Read the header of a tagged buffer without decoding its coordinates
pub fn peek_header(bytes: &[u8]) -> SamplingResult<Header> {
    Header::parse(bytes)
}

/// Reserve an output buffer whose length was computed with checked arithmetic
fn output_buffer(len: Option<usize>) -> SamplingResult<Vec<u8>> {
    let len = len.ok_or(SamplingError::AllocationFailure { requested: usize::MAX })?;
    allocate(len)
}

/// Reserve an empty buffer of exactly `len` bytes
fn allocate(len: usize) -> SamplingResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| SamplingError::AllocationFailure { requested: len })?;
    Ok(buffer)
}

fn write_coordinates<T: Coordinate, const D: usize>(points: &[Point<T, D>], out: &mut Vec<u8>) {
    for p in points {
        for &c in p.coords.iter() {
            c.write_le(out);
        }
    }
}

fn read_coordinates<T: Coordinate, const D: usize>(bytes: &[u8]) -> Vec<Point<T, D>> {
    bytes
        .chunks_exact(T::WIDTH * D)
        .map(|chunk| {
            let coords: [T; D] = std::array::from_fn(|axis| T::read_le(&chunk[axis * T::WIDTH..]));
            Point::from(coords)
        })
        .collect()
}

// ============================================================================
// Flat buffers
// ============================================================================

/// Bytes of a flat buffer holding `count` points
pub fn flat_len<T: Coordinate, const D: usize>(count: usize) -> Option<usize> {
    count.checked_mul(D)?.checked_mul(T::WIDTH)
}

/// Decode `count` points from a headerless flat buffer
pub fn decode_flat<T: Coordinate, const D: usize>(
    bytes: &[u8],
    count: usize,
) -> SamplingResult<PointSet<T, D>> {
    let expected = flat_len::<T, D>(count).ok_or(SamplingError::BufferSizeMismatch {
        expected: usize::MAX,
        actual: bytes.len(),
    })?;

    if bytes.len() != expected {
        return Err(SamplingError::BufferSizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(PointSet::new(read_coordinates(bytes)))
}

/// Encode `points` as a headerless flat buffer
pub fn encode_flat<T: Coordinate, const D: usize>(points: &PointSet<T, D>) -> SamplingResult<Vec<u8>> {
    let mut out = output_buffer(flat_len::<T, D>(points.len()))?;
    write_coordinates(points.points(), &mut out);
    Ok(out)
}

// ============================================================================
// Tagged buffers
// ============================================================================

fn encode_tagged<T: Coordinate, const D: usize>(
    payload: Payload,
    points: &[Point<T, D>],
) -> SamplingResult<Vec<u8>> {
    let header = Header::for_points::<T, D>(payload, points.len());
    let mut out = output_buffer(header.total_len())?;
    header.write(&mut out);
    write_coordinates(points, &mut out);
    Ok(out)
}

/// Serialize a point set
pub fn encode_points<T: Coordinate, const D: usize>(points: &PointSet<T, D>) -> SamplingResult<Vec<u8>> {
    encode_tagged(Payload::PointSet, points.points())
}

/// Deserialize a point set of the given precision and dimension
pub fn decode_points<T: Coordinate, const D: usize>(bytes: &[u8]) -> SamplingResult<PointSet<T, D>> {
    let header = Header::parse(bytes)?;
    header.expect::<T, D>(Payload::PointSet)?;
    Ok(PointSet::new(read_coordinates(&bytes[HEADER_LEN..])))
}

/// Serialize a single point
pub fn encode_point<T: Coordinate, const D: usize>(point: &Point<T, D>) -> SamplingResult<Vec<u8>> {
    encode_tagged(Payload::Point, std::slice::from_ref(point))
}

/// Deserialize a single point of the given precision and dimension
pub fn decode_point<T: Coordinate, const D: usize>(bytes: &[u8]) -> SamplingResult<Point<T, D>> {
    let header = Header::parse(bytes)?;
    header.expect::<T, D>(Payload::Point)?;

    read_coordinates(&bytes[HEADER_LEN..])
        .into_iter()
        .next()
        .ok_or_else(|| SamplingError::MalformedHeader("missing coordinates".to_string()))
}

/// Decode a serialized single point and encode it again
///
/// Dispatches on the precision and dimension in the header.
pub fn roundtrip_point(bytes: &[u8]) -> SamplingResult<Vec<u8>> {
    let header = Header::parse(bytes)?;
    match (header.scalar, header.dimension) {
        (ScalarKind::F32, 2) => encode_point(&decode_point::<f32, 2>(bytes)?),
        (ScalarKind::F32, 3) => encode_point(&decode_point::<f32, 3>(bytes)?),
        (ScalarKind::F64, 2) => encode_point(&decode_point::<f64, 2>(bytes)?),
        (ScalarKind::F64, 3) => encode_point(&decode_point::<f64, 3>(bytes)?),
        (_, d) => Err(SamplingError::UnsupportedDimension(d)),
    }
}

/// Decode a serialized point set and encode it again
pub fn roundtrip_points(bytes: &[u8]) -> SamplingResult<Vec<u8>> {
    let header = Header::parse(bytes)?;
    match (header.scalar, header.dimension) {
        (ScalarKind::F32, 2) => encode_points(&decode_points::<f32, 2>(bytes)?),
        (ScalarKind::F32, 3) => encode_points(&decode_points::<f32, 3>(bytes)?),
        (ScalarKind::F64, 2) => encode_points(&decode_points::<f64, 2>(bytes)?),
        (ScalarKind::F64, 3) => encode_points(&decode_points::<f64, 3>(bytes)?),
        (_, d) => Err(SamplingError::UnsupportedDimension(d)),
    }
}
