//! The content-handler contract the reader drives.

use crate::tag::{ByteStringFormat, SemanticTag};

/// Diagnostic position handle passed with every event.
///
/// The input is binary, so the line is always 1 and the column is the
/// 1-based byte offset of the item that produced the event. Both are
/// diagnostic, not semantic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    column: usize,
}

impl Context {
    #[inline]
    pub(crate) const fn new(column: usize) -> Self {
        Self { column }
    }

    /// Line number; always 1 for binary input.
    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        1
    }

    /// 1-based byte offset of the item that produced the event.
    #[inline]
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

/// Formatting hints attached to floating-point events.
///
/// The reader always passes the default; the type exists so handlers that
/// re-serialise can thread precision through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct FloatOptions {
    /// Significant-digit count, if the producer specified one.
    pub precision: Option<u8>,
}

/// Event sink driven by [`CborReader`](crate::CborReader).
///
/// All methods default to no-ops, so a handler implements only the events
/// it cares about. Events arrive in strict document order: every
/// `begin_*` is balanced by exactly one matching `end_*`, and a child
/// container's events all arrive before its parent's `end_*`. Inside an
/// object, `name` and value events alternate starting with `name`.
#[allow(unused_variables)]
pub trait ContentHandler {
    /// Start of an array. `len` is `None` for the indefinite form.
    fn begin_array(&mut self, len: Option<usize>, tag: SemanticTag, ctx: &Context) {}

    /// End of the matching array.
    fn end_array(&mut self, ctx: &Context) {}

    /// Start of a map. `len` is the pair count, `None` for the indefinite form.
    fn begin_object(&mut self, len: Option<usize>, tag: SemanticTag, ctx: &Context) {}

    /// End of the matching map.
    fn end_object(&mut self, ctx: &Context) {}

    /// A map key.
    fn name(&mut self, name: &str, ctx: &Context) {}

    /// A text-string value.
    fn string_value(&mut self, value: &str, tag: SemanticTag, ctx: &Context) {}

    /// A byte-string value with its suggested rendering.
    fn byte_string_value(
        &mut self,
        value: &[u8],
        format: ByteStringFormat,
        tag: SemanticTag,
        ctx: &Context,
    ) {
    }

    /// An arbitrary-precision integer, rendered to exact decimal text.
    fn bignum_value(&mut self, value: &str, ctx: &Context) {}

    /// An unsigned integer value.
    fn uint64_value(&mut self, value: u64, tag: SemanticTag, ctx: &Context) {}

    /// A negative integer value.
    fn int64_value(&mut self, value: i64, tag: SemanticTag, ctx: &Context) {}

    /// A floating-point value promoted to binary64.
    fn double_value(&mut self, value: f64, options: &FloatOptions, tag: SemanticTag, ctx: &Context) {
    }

    /// A boolean value.
    fn bool_value(&mut self, value: bool, tag: SemanticTag, ctx: &Context) {}

    /// Null (`tag == SemanticTag::None`) or undefined
    /// (`tag == SemanticTag::Undefined`).
    fn null_value(&mut self, tag: SemanticTag, ctx: &Context) {}

    /// Called once each time a top-level item completes.
    fn flush(&mut self) {}
}
