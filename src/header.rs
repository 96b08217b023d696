//! Item-header decoding: the initial byte and its argument.
//!
//! Every CBOR item starts with one byte whose top three bits select the
//! major type and whose low five bits either hold a small literal value,
//! select 1/2/4/8 following big-endian argument bytes (24..=27), or mark
//! the indefinite-length form (31).

use half::f16;

use crate::source::ByteSource;
use crate::{CborError, ErrorCode};

/// Major type 0: unsigned integer.
pub(crate) const MAJOR_UNSIGNED: u8 = 0;
/// Major type 1: negative integer.
pub(crate) const MAJOR_NEGATIVE: u8 = 1;
/// Major type 2: byte string.
pub(crate) const MAJOR_BYTES: u8 = 2;
/// Major type 3: text string.
pub(crate) const MAJOR_TEXT: u8 = 3;
/// Major type 4: array.
pub(crate) const MAJOR_ARRAY: u8 = 4;
/// Major type 5: map.
pub(crate) const MAJOR_MAP: u8 = 5;
/// Major type 6: semantic tag.
pub(crate) const MAJOR_TAG: u8 = 6;
/// Major type 7: simple values and floats.
pub(crate) const MAJOR_SIMPLE: u8 = 7;

/// Additional-info value marking the indefinite-length form.
pub(crate) const INDEFINITE_LENGTH: u8 = 31;

/// The break byte terminating indefinite-length containers and strings.
pub(crate) const BREAK_BYTE: u8 = 0xff;

/// Major type of an initial byte: its top three bits.
#[inline]
#[must_use]
pub const fn major_type(initial: u8) -> u8 {
    initial >> 5
}

/// Additional info of an initial byte: its low five bits.
#[inline]
#[must_use]
pub const fn additional_info(initial: u8) -> u8 {
    initial & 0x1f
}

fn read_byte<S: ByteSource>(source: &mut S, off: usize) -> Result<u8, CborError> {
    source
        .next_byte()
        .ok_or(CborError::new(ErrorCode::UnexpectedEof, off))
}

fn read_be_bytes<S: ByteSource, const N: usize>(
    source: &mut S,
    off: usize,
) -> Result<[u8; N], CborError> {
    let mut buf = [0u8; N];
    for slot in &mut buf {
        *slot = read_byte(source, off)?;
    }
    Ok(buf)
}

/// Decodes the unsigned argument selected by `info`, the initial byte
/// having already been consumed at `off`.
///
/// # Errors
///
/// `UnexpectedEof` on truncated argument bytes, `LengthRequired` for the
/// indefinite-length marker, `InvalidInitialByte` for the reserved
/// additional-info values 28..=30.
pub(crate) fn read_uint_for_info<S: ByteSource>(
    source: &mut S,
    info: u8,
    off: usize,
) -> Result<u64, CborError> {
    match info {
        0..=23 => Ok(u64::from(info)),
        24 => Ok(u64::from(read_byte(source, off)?)),
        25 => Ok(u64::from(u16::from_be_bytes(read_be_bytes(source, off)?))),
        26 => Ok(u64::from(u32::from_be_bytes(read_be_bytes(source, off)?))),
        27 => Ok(u64::from_be_bytes(read_be_bytes(source, off)?)),
        INDEFINITE_LENGTH => Err(CborError::new(ErrorCode::LengthRequired, off)),
        _ => Err(CborError::new(ErrorCode::InvalidInitialByte, off)),
    }
}

/// Consumes an item header and decodes its unsigned argument.
///
/// # Errors
///
/// See [`read_uint_for_info`].
pub(crate) fn read_uint_argument<S: ByteSource>(source: &mut S) -> Result<u64, CborError> {
    let off = source.position();
    let initial = read_byte(source, off)?;
    read_uint_for_info(source, additional_info(initial), off)
}

/// Consumes a negative-integer header and decodes the value `-1 - n`.
///
/// # Errors
///
/// `NumberTooLarge` when the offset value does not fit `i64`, plus the
/// argument-decoding errors of [`read_uint_argument`].
pub(crate) fn read_int_argument<S: ByteSource>(source: &mut S) -> Result<i64, CborError> {
    let off = source.position();
    let n = read_uint_argument(source)?;
    let n = i64::try_from(n).map_err(|_| CborError::new(ErrorCode::NumberTooLarge, off))?;
    Ok(-1 - n)
}

/// Consumes a length header and returns the definite length as `usize`.
///
/// # Errors
///
/// `LengthOverflow` when the declared length does not fit `usize`, plus
/// the argument-decoding errors of [`read_uint_argument`].
pub(crate) fn read_length<S: ByteSource>(source: &mut S) -> Result<usize, CborError> {
    let off = source.position();
    let len = read_uint_argument(source)?;
    usize::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, off))
}

/// Consumes a float item (major type 7, info 25/26/27) and promotes it to
/// binary64.
///
/// Half-precision values go through `half::f16`, which covers subnormals,
/// infinities and NaN.
///
/// # Errors
///
/// `UnexpectedEof` on truncation, `InvalidInitialByte` if the item is not
/// one of the three float widths.
pub(crate) fn read_float<S: ByteSource>(source: &mut S) -> Result<f64, CborError> {
    let off = source.position();
    let initial = read_byte(source, off)?;
    match additional_info(initial) {
        25 => {
            let bits = u16::from_be_bytes(read_be_bytes(source, off)?);
            Ok(f16::from_bits(bits).to_f64())
        }
        26 => {
            let bits = u32::from_be_bytes(read_be_bytes(source, off)?);
            Ok(f64::from(f32::from_bits(bits)))
        }
        27 => {
            let bits = u64::from_be_bytes(read_be_bytes(source, off)?);
            Ok(f64::from_bits(bits))
        }
        _ => Err(CborError::new(ErrorCode::InvalidInitialByte, off)),
    }
}
