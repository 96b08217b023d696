use core::fmt;

/// A structured error code identifying the reason decoding stopped.
///
/// This enum is intentionally stable and string-free to support `no_std` and to remain hot-path friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Unexpected end-of-input while decoding an item.
    UnexpectedEof,
    /// Reserved additional-info value (28..=30), or an unassigned simple value.
    InvalidInitialByte,
    /// A definite length was required but the indefinite-length marker was present.
    LengthRequired,
    /// Break byte (0xff) outside an indefinite-length container or string.
    UnexpectedBreak,
    /// Integer argument does not fit the emitted `i64` representation.
    NumberTooLarge,
    /// Structurally invalid input: mismatched indefinite-string chunk type,
    /// stacked semantic tags, a decimal-fraction or bigfloat array whose
    /// arity is not exactly 2, or an unsupported map key type.
    Malformed,
    /// Nesting depth limit exceeded.
    MaxNestingDepthExceeded,
    /// A declared length does not fit `usize`.
    LengthOverflow,
    /// Text string payload is not valid UTF-8.
    InvalidUtf8,
}

/// A decode error with a stable code and a byte offset.
///
/// Offsets refer to the position of the item whose decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset into the input where the error was detected.
    pub offset: usize,
}

impl CborError {
    /// Construct a decode error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.code {
            ErrorCode::UnexpectedEof => "unexpected end of input",
            ErrorCode::InvalidInitialByte => "invalid initial byte",
            ErrorCode::LengthRequired => "definite length required",
            ErrorCode::UnexpectedBreak => "break outside indefinite-length item",
            ErrorCode::NumberTooLarge => "integer does not fit i64",
            ErrorCode::Malformed => "malformed CBOR item",
            ErrorCode::MaxNestingDepthExceeded => "nesting depth limit exceeded",
            ErrorCode::LengthOverflow => "length overflow",
            ErrorCode::InvalidUtf8 => "text must be valid UTF-8",
        };

        write!(f, "cbor error at {}: {msg}", self.offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CborError {}
