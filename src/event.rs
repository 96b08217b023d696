//! Owned event records and a collecting handler.
//!
//! [`Event`] is the enum rendering of the [`ContentHandler`] contract:
//! each handler call maps to one record with owned payloads.
//! [`EventCollector`] records the sequence, which is also how the
//! integration suites assert on reader output.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::handler::{ContentHandler, Context, FloatOptions};
use crate::tag::{ByteStringFormat, SemanticTag};

/// One recorded handler event.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Event {
    /// Start of an array.
    BeginArray {
        /// Declared length; `None` for the indefinite form.
        len: Option<usize>,
        /// Array annotation.
        tag: SemanticTag,
    },
    /// End of the matching array.
    EndArray,
    /// Start of a map.
    BeginObject {
        /// Declared pair count; `None` for the indefinite form.
        len: Option<usize>,
        /// Map annotation.
        tag: SemanticTag,
    },
    /// End of the matching map.
    EndObject,
    /// A map key.
    Name(String),
    /// A text-string value.
    String {
        /// The text.
        value: String,
        /// Annotation.
        tag: SemanticTag,
    },
    /// A byte-string value.
    ByteString {
        /// The bytes.
        value: Vec<u8>,
        /// Suggested rendering.
        format: ByteStringFormat,
        /// Annotation.
        tag: SemanticTag,
    },
    /// An arbitrary-precision integer as decimal text.
    Bignum(String),
    /// An unsigned integer.
    Uint64 {
        /// The value.
        value: u64,
        /// Annotation.
        tag: SemanticTag,
    },
    /// A negative integer.
    Int64 {
        /// The value.
        value: i64,
        /// Annotation.
        tag: SemanticTag,
    },
    /// A floating-point value.
    Double {
        /// The value, promoted to binary64.
        value: f64,
        /// Annotation.
        tag: SemanticTag,
    },
    /// A boolean.
    Bool {
        /// The value.
        value: bool,
        /// Annotation.
        tag: SemanticTag,
    },
    /// Null or undefined.
    Null {
        /// `SemanticTag::Undefined` for the undefined simple value.
        tag: SemanticTag,
    },
    /// A top-level item completed.
    Flush,
}

/// A handler that records every event in document order.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    /// New empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded events.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume the collector, returning the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl ContentHandler for EventCollector {
    fn begin_array(&mut self, len: Option<usize>, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::BeginArray { len, tag });
    }

    fn end_array(&mut self, _ctx: &Context) {
        self.events.push(Event::EndArray);
    }

    fn begin_object(&mut self, len: Option<usize>, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::BeginObject { len, tag });
    }

    fn end_object(&mut self, _ctx: &Context) {
        self.events.push(Event::EndObject);
    }

    fn name(&mut self, name: &str, _ctx: &Context) {
        self.events.push(Event::Name(name.to_string()));
    }

    fn string_value(&mut self, value: &str, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::String {
            value: value.to_string(),
            tag,
        });
    }

    fn byte_string_value(
        &mut self,
        value: &[u8],
        format: ByteStringFormat,
        tag: SemanticTag,
        _ctx: &Context,
    ) {
        self.events.push(Event::ByteString {
            value: value.to_vec(),
            format,
            tag,
        });
    }

    fn bignum_value(&mut self, value: &str, _ctx: &Context) {
        self.events.push(Event::Bignum(value.to_string()));
    }

    fn uint64_value(&mut self, value: u64, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::Uint64 { value, tag });
    }

    fn int64_value(&mut self, value: i64, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::Int64 { value, tag });
    }

    fn double_value(&mut self, value: f64, _options: &FloatOptions, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::Double { value, tag });
    }

    fn bool_value(&mut self, value: bool, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::Bool { value, tag });
    }

    fn null_value(&mut self, tag: SemanticTag, _ctx: &Context) {
        self.events.push(Event::Null { tag });
    }

    fn flush(&mut self) {
        self.events.push(Event::Flush);
    }
}
