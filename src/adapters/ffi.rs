//! # C ABI
//!
//! `extern "C"` entry points for hosts that load the crate as a shared
//! library.
//!
//! ## Conventions
//!
//! - Every call returns a [`SampleStatus`].
//! - Output is written through `out_*` pointers. They are reset to null / 0
//!   on entry, so a failed call never hands back a buffer.
//! - A returned buffer belongs to the caller and must be released with
//!   [`pse_buffer_free`], passing the length that came with it.
//! - A null input pointer is accepted only together with a zero length.
//!
//! ```c
//! uint8_t *out; size_t out_len, out_count;
//! if (pse_compute_and_eliminate(in, in_len, n, 2, 1.0, 100,
//!                               &out, &out_len, &out_count) == PSE_OK) {
//!     /* use out */
//!     pse_buffer_free(out, out_len);
//! }
//! ```

use std::ptr;
use std::slice;

use tracing::warn;

use crate::core::{Coordinate, ErrorKind, SamplingError, SamplingResult};
use crate::engine::Sampler;

/// Outcome of a C ABI call
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStatus {
    Ok = 0,
    InvalidArgument = 1,
    CorruptBuffer = 2,
    AllocationFailure = 3,
}

impl From<ErrorKind> for SampleStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => SampleStatus::InvalidArgument,
            ErrorKind::CorruptBuffer => SampleStatus::CorruptBuffer,
            ErrorKind::AllocationFailure => SampleStatus::AllocationFailure,
        }
    }
}

impl From<&SamplingError> for SampleStatus {
    fn from(error: &SamplingError) -> Self {
        error.kind().into()
    }
}

/// Borrow `len` bytes at `ptr`
///
/// # Safety
///
/// A non-null `ptr` must be valid for reads of `len` bytes for `'a`.
unsafe fn input_slice<'a>(ptr: *const u8, len: usize) -> SamplingResult<&'a [u8]> {
    if ptr.is_null() {
        if len == 0 {
            return Ok(&[]);
        }
        return Err(SamplingError::NullPointer("input"));
    }
    Ok(slice::from_raw_parts(ptr, len))
}

/// Reset the output slots, failing if any of them is null
///
/// # Safety
///
/// Non-null pointers must be valid for writes.
unsafe fn reset_outputs(out_buffer: *mut *mut u8, out_len: *mut usize) -> SamplingResult<()> {
    if out_buffer.is_null() {
        return Err(SamplingError::NullPointer("out_buffer"));
    }
    if out_len.is_null() {
        return Err(SamplingError::NullPointer("out_len"));
    }
    *out_buffer = ptr::null_mut();
    *out_len = 0;
    Ok(())
}

/// Move `buffer` to the caller
///
/// # Safety
///
/// Both pointers must be valid for writes.
unsafe fn hand_off(buffer: Vec<u8>, out_buffer: *mut *mut u8, out_len: *mut usize) {
    let boxed = buffer.into_boxed_slice();
    *out_len = boxed.len();
    *out_buffer = Box::into_raw(boxed) as *mut u8;
}

fn report(call: &'static str, error: SamplingError) -> SampleStatus {
    let status = SampleStatus::from(&error);
    warn!(call, ?status, %error, "sampling call failed");
    status
}

/// Shared body of the flat-buffer entry points
///
/// # Safety
///
/// See [`pse_compute_and_eliminate`].
#[allow(clippy::too_many_arguments)]
unsafe fn compute_and_eliminate_raw<T: Coordinate>(
    call: &'static str,
    input: *const u8,
    input_len: usize,
    input_count: usize,
    dimension: u32,
    domain_measure: f64,
    target_count: usize,
    out_buffer: *mut *mut u8,
    out_len: *mut usize,
    out_count: *mut usize,
) -> SampleStatus {
    let result = (|| -> SamplingResult<(Vec<u8>, usize)> {
        if out_count.is_null() {
            return Err(SamplingError::NullPointer("out_count"));
        }
        reset_outputs(out_buffer, out_len)?;
        *out_count = 0;

        let bytes = input_slice(input, input_len)?;
        Sampler::default().compute_and_eliminate::<T>(
            bytes,
            input_count,
            dimension as usize,
            domain_measure,
            target_count,
        )
    })();

    match result {
        Ok((buffer, count)) => {
            hand_off(buffer, out_buffer, out_len);
            *out_count = count;
            SampleStatus::Ok
        }
        Err(error) => report(call, error),
    }
}

/// Eliminate a flat buffer of `f64` points
///
/// `input` holds `input_count * dimension` little-endian `f64` values. On
/// success `out_buffer` holds `out_count` points in the same layout.
///
/// # Safety
///
/// `input` must be valid for reads of `input_len` bytes (or null with
/// `input_len == 0`). The `out_*` pointers must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn pse_compute_and_eliminate(
    input: *const u8,
    input_len: usize,
    input_count: usize,
    dimension: u32,
    domain_measure: f64,
    target_count: usize,
    out_buffer: *mut *mut u8,
    out_len: *mut usize,
    out_count: *mut usize,
) -> SampleStatus {
    compute_and_eliminate_raw::<f64>(
        "pse_compute_and_eliminate",
        input,
        input_len,
        input_count,
        dimension,
        domain_measure,
        target_count,
        out_buffer,
        out_len,
        out_count,
    )
}

/// [`pse_compute_and_eliminate`] for `f32` coordinates
///
/// # Safety
///
/// Same contract as [`pse_compute_and_eliminate`].
#[no_mangle]
pub unsafe extern "C" fn pse_compute_and_eliminate_f32(
    input: *const u8,
    input_len: usize,
    input_count: usize,
    dimension: u32,
    domain_measure: f64,
    target_count: usize,
    out_buffer: *mut *mut u8,
    out_len: *mut usize,
    out_count: *mut usize,
) -> SampleStatus {
    compute_and_eliminate_raw::<f32>(
        "pse_compute_and_eliminate_f32",
        input,
        input_len,
        input_count,
        dimension,
        domain_measure,
        target_count,
        out_buffer,
        out_len,
        out_count,
    )
}

/// Eliminate a tagged point-set buffer
///
/// `dimension` is the sampling dimension; 0 means the dimension stored in
/// the header.
///
/// # Safety
///
/// Same contract as [`pse_compute_and_eliminate`].
#[no_mangle]
pub unsafe extern "C" fn pse_eliminate_encoded(
    input: *const u8,
    input_len: usize,
    domain_measure: f64,
    target_count: usize,
    dimension: u32,
    out_buffer: *mut *mut u8,
    out_len: *mut usize,
) -> SampleStatus {
    let result = (|| -> SamplingResult<Vec<u8>> {
        reset_outputs(out_buffer, out_len)?;
        let bytes = input_slice(input, input_len)?;
        let dimension = (dimension != 0).then_some(dimension as usize);
        Sampler::default().eliminate_encoded(bytes, domain_measure, target_count, dimension)
    })();

    match result {
        Ok(buffer) => {
            hand_off(buffer, out_buffer, out_len);
            SampleStatus::Ok
        }
        Err(error) => report("pse_eliminate_encoded", error),
    }
}

/// Shared body of the round-trip entry points
///
/// # Safety
///
/// See [`pse_point_roundtrip`].
unsafe fn roundtrip_raw(
    call: &'static str,
    roundtrip: fn(&[u8]) -> SamplingResult<Vec<u8>>,
    input: *const u8,
    input_len: usize,
    out_buffer: *mut *mut u8,
    out_len: *mut usize,
) -> SampleStatus {
    let result = (|| -> SamplingResult<Vec<u8>> {
        reset_outputs(out_buffer, out_len)?;
        roundtrip(input_slice(input, input_len)?)
    })();

    match result {
        Ok(buffer) => {
            hand_off(buffer, out_buffer, out_len);
            SampleStatus::Ok
        }
        Err(error) => report(call, error),
    }
}

/// Decode a tagged single point and encode it again
///
/// # Safety
///
/// Same contract as [`pse_compute_and_eliminate`].
#[no_mangle]
pub unsafe extern "C" fn pse_point_roundtrip(
    input: *const u8,
    input_len: usize,
    out_buffer: *mut *mut u8,
    out_len: *mut usize,
) -> SampleStatus {
    roundtrip_raw(
        "pse_point_roundtrip",
        crate::adapters::codec::roundtrip_point,
        input,
        input_len,
        out_buffer,
        out_len,
    )
}

/// Decode a tagged point set and encode it again
///
/// # Safety
///
/// Same contract as [`pse_compute_and_eliminate`].
#[no_mangle]
pub unsafe extern "C" fn pse_point_array_roundtrip(
    input: *const u8,
    input_len: usize,
    out_buffer: *mut *mut u8,
    out_len: *mut usize,
) -> SampleStatus {
    roundtrip_raw(
        "pse_point_array_roundtrip",
        crate::adapters::codec::roundtrip_points,
        input,
        input_len,
        out_buffer,
        out_len,
    )
}

/// Release a buffer returned by any `pse_*` call. Null is a no-op.
///
/// # Safety
///
/// `buffer` and `len` must come from one successful `pse_*` call, and the
/// buffer must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn pse_buffer_free(buffer: *mut u8, len: usize) {
    if buffer.is_null() {
        return;
    }
    drop(Box::from_raw(ptr::slice_from_raw_parts_mut(buffer, len)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::codec;
    use crate::core::PointSet;
    use nalgebra::Point3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn flat_points(n: usize, dim: usize) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(n as u64);
        (0..n * dim)
            .flat_map(|_| rng.gen::<f64>().to_le_bytes())
            .collect()
    }

    /// Copy out and free a returned buffer
    unsafe fn take(buffer: *mut u8, len: usize) -> Vec<u8> {
        let copy = slice::from_raw_parts(buffer, len).to_vec();
        pse_buffer_free(buffer, len);
        copy
    }

    #[test]
    fn test_compute_and_eliminate_ok() {
        let input = flat_points(500, 2);
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 0;
        let mut out_count: usize = 0;

        let status = unsafe {
            pse_compute_and_eliminate(
                input.as_ptr(),
                input.len(),
                500,
                2,
                1.0,
                50,
                &mut out,
                &mut out_len,
                &mut out_count,
            )
        };

        assert_eq!(status, SampleStatus::Ok);
        assert_eq!(out_count, 50);
        assert_eq!(out_len, 50 * 2 * 8);

        let output = unsafe { take(out, out_len) };
        assert_eq!(output.len(), out_len);
    }

    #[test]
    fn test_target_too_large_is_invalid_argument() {
        let input = flat_points(10, 3);
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 7;
        let mut out_count: usize = 7;

        let status = unsafe {
            pse_compute_and_eliminate(
                input.as_ptr(),
                input.len(),
                10,
                3,
                1.0,
                20,
                &mut out,
                &mut out_len,
                &mut out_count,
            )
        };

        assert_eq!(status, SampleStatus::InvalidArgument);
        assert!(out.is_null());
        assert_eq!(out_len, 0);
        assert_eq!(out_count, 0);
    }

    #[test]
    fn test_short_buffer_is_corrupt() {
        let input = flat_points(10, 2);
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 0;
        let mut out_count: usize = 0;

        let status = unsafe {
            pse_compute_and_eliminate(
                input.as_ptr(),
                input.len() - 1,
                10,
                2,
                1.0,
                5,
                &mut out,
                &mut out_len,
                &mut out_count,
            )
        };

        assert_eq!(status, SampleStatus::CorruptBuffer);
        assert!(out.is_null());
    }

    #[test]
    fn test_null_pointers() {
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 0;
        let mut out_count: usize = 0;

        let status = unsafe {
            pse_compute_and_eliminate(
                ptr::null(),
                16,
                1,
                2,
                1.0,
                1,
                &mut out,
                &mut out_len,
                &mut out_count,
            )
        };
        assert_eq!(status, SampleStatus::InvalidArgument);

        let input = flat_points(4, 2);
        let status = unsafe {
            pse_compute_and_eliminate(
                input.as_ptr(),
                input.len(),
                4,
                2,
                1.0,
                2,
                ptr::null_mut(),
                &mut out_len,
                &mut out_count,
            )
        };
        assert_eq!(status, SampleStatus::InvalidArgument);

        let status = unsafe { pse_point_roundtrip(input.as_ptr(), input.len(), &mut out, ptr::null_mut()) };
        assert_eq!(status, SampleStatus::InvalidArgument);
    }

    #[test]
    fn test_f32_entry_point() {
        let mut rng = StdRng::seed_from_u64(5);
        let input: Vec<u8> = (0..200 * 3).flat_map(|_| rng.gen::<f32>().to_le_bytes()).collect();
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 0;
        let mut out_count: usize = 0;

        let status = unsafe {
            pse_compute_and_eliminate_f32(
                input.as_ptr(),
                input.len(),
                200,
                3,
                1.0,
                20,
                &mut out,
                &mut out_len,
                &mut out_count,
            )
        };

        assert_eq!(status, SampleStatus::Ok);
        assert_eq!(out_len, 20 * 3 * 4);
        unsafe { pse_buffer_free(out, out_len) };
    }

    #[test]
    fn test_eliminate_encoded() {
        let mut rng = StdRng::seed_from_u64(6);
        let points: PointSet<f64, 3> = (0..300)
            .map(|_| Point3::new(rng.gen(), rng.gen(), rng.gen()))
            .collect();
        let input = codec::encode_points(&points).unwrap();
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 0;

        let status = unsafe {
            pse_eliminate_encoded(input.as_ptr(), input.len(), 1.0, 30, 0, &mut out, &mut out_len)
        };
        assert_eq!(status, SampleStatus::Ok);

        let output = unsafe { take(out, out_len) };
        assert_eq!(codec::decode_points::<f64, 3>(&output).unwrap().len(), 30);
    }

    #[test]
    fn test_roundtrips() {
        let point = codec::encode_point(&Point3::new(1.0f32, 2.0, 3.0)).unwrap();
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 0;

        let status = unsafe { pse_point_roundtrip(point.as_ptr(), point.len(), &mut out, &mut out_len) };
        assert_eq!(status, SampleStatus::Ok);
        assert_eq!(unsafe { take(out, out_len) }, point);

        let set: PointSet<f64, 3> = (0..100).map(|i| Point3::new(i as f64, 0.0, -1.0)).collect();
        let bytes = codec::encode_points(&set).unwrap();

        let status = unsafe {
            pse_point_array_roundtrip(bytes.as_ptr(), bytes.len(), &mut out, &mut out_len)
        };
        assert_eq!(status, SampleStatus::Ok);
        assert_eq!(unsafe { take(out, out_len) }, bytes);
    }

    #[test]
    fn test_corrupt_roundtrip() {
        let mut out: *mut u8 = ptr::null_mut();
        let mut out_len: usize = 0;
        let garbage = [0u8; 32];

        let status = unsafe {
            pse_point_array_roundtrip(garbage.as_ptr(), garbage.len(), &mut out, &mut out_len)
        };

        assert_eq!(status, SampleStatus::CorruptBuffer);
        assert!(out.is_null());
        assert_eq!(out_len, 0);
    }

    #[test]
    fn test_allocation_failure_status() {
        let error = SamplingError::AllocationFailure { requested: usize::MAX };
        assert_eq!(SampleStatus::from(&error), SampleStatus::AllocationFailure);
        assert_eq!(report("pse_compute_and_eliminate", error), SampleStatus::AllocationFailure);
        assert_eq!(SampleStatus::AllocationFailure as i32, 3);

        assert_eq!(
            report("pse_eliminate_encoded", SamplingError::PointOutsideBounds { index: 0 }),
            SampleStatus::InvalidArgument
        );
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { pse_buffer_free(ptr::null_mut(), 0) };
    }
}
