//! The semantic-tag registry and the annotations it produces.

/// Tag 0: RFC 3339 date/time text string.
pub(crate) const TAG_DATE_TIME: u64 = 0;
/// Tag 1: epoch-based numeric time.
pub(crate) const TAG_EPOCH_TIME: u64 = 1;
/// Tag 2: positive bignum byte string.
pub(crate) const TAG_POSITIVE_BIGNUM: u64 = 2;
/// Tag 3: negative bignum byte string.
pub(crate) const TAG_NEGATIVE_BIGNUM: u64 = 3;
/// Tag 4: decimal-fraction array.
pub(crate) const TAG_DECIMAL_FRACTION: u64 = 4;
/// Tag 5: bigfloat array.
pub(crate) const TAG_BIGFLOAT: u64 = 5;
/// Tag 21: expected base64url rendering of a byte string.
pub(crate) const TAG_EXPECT_BASE64URL: u64 = 21;
/// Tag 22: expected base64 rendering of a byte string.
pub(crate) const TAG_EXPECT_BASE64: u64 = 22;
/// Tag 23: expected base16 rendering of a byte string.
pub(crate) const TAG_EXPECT_BASE16: u64 = 23;

/// Semantic annotation attached to a handler event.
///
/// Items carry at most one annotation; a tag preceding an item type it
/// does not apply to is dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SemanticTag {
    /// No annotation.
    #[default]
    None,
    /// Numeric epoch time (tag 1).
    EpochTime,
    /// RFC 3339 date/time text (tag 0).
    DateTime,
    /// Decimal fraction rendered to text (tag 4).
    DecimalFraction,
    /// Bigfloat array (tag 5).
    Bigfloat,
    /// The CBOR `undefined` simple value.
    Undefined,
}

/// Suggested textual rendering for a byte-string value (tags 21..=23).
///
/// The reader does not transcode; the hint travels with the event for
/// downstream serialisers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ByteStringFormat {
    /// No suggested rendering.
    #[default]
    None,
    /// Base16 (tag 23).
    Base16,
    /// Base64 (tag 22).
    Base64,
    /// Base64url (tag 21).
    Base64Url,
}
