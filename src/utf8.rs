use crate::{CborError, ErrorCode};

#[cfg(feature = "simdutf8")]
use simdutf8::basic as simd_utf8;

/// Validates a text payload and borrows it as `&str`.
///
/// # Errors
///
/// `InvalidUtf8` at `off` when the payload is not valid UTF-8.
#[inline]
pub(crate) fn validate(bytes: &[u8], off: usize) -> Result<&str, CborError> {
    #[cfg(feature = "simdutf8")]
    let checked = simd_utf8::from_utf8(bytes);

    #[cfg(not(feature = "simdutf8"))]
    let checked = core::str::from_utf8(bytes);

    checked.map_err(|_| CborError::new(ErrorCode::InvalidUtf8, off))
}
