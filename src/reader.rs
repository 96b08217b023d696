//! The pull-then-push reader state machine.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::bignum::render_bignum;
use crate::decimal::render_decimal_fraction;
use crate::handler::{ContentHandler, Context, FloatOptions};
use crate::header::{self, additional_info, major_type, BREAK_BYTE, INDEFINITE_LENGTH};
use crate::limits::ReaderLimits;
use crate::source::ByteSource;
use crate::tag::{self, ByteStringFormat, SemanticTag};
use crate::utf8;
use crate::{CborError, ErrorCode};

/// A streaming CBOR reader.
///
/// The reader pulls bytes from its [`ByteSource`] and pushes typed events
/// into a [`ContentHandler`]. One [`read`](Self::read) call decodes
/// exactly one top-level item, recursing through containers; nothing is
/// materialised beyond the current string/bignum payload.
///
/// ```
/// use cbor_sax::{CborReader, Event, EventCollector, SemanticTag, SliceSource};
///
/// let mut reader = CborReader::new(SliceSource::new(&[0x18, 0x7b]));
/// let mut handler = EventCollector::new();
/// reader.read(&mut handler)?;
/// assert_eq!(
///     handler.events(),
///     [
///         Event::Uint64 { value: 123, tag: SemanticTag::None },
///         Event::Flush,
///     ]
/// );
/// # Ok::<(), cbor_sax::CborError>(())
/// ```
pub struct CborReader<S> {
    source: S,
    limits: ReaderLimits,
    nesting_depth: usize,
    // Emission scratch, reused across events; cleared before each use.
    text: String,
    payload: Vec<u8>,
}

impl<S: ByteSource> CborReader<S> {
    /// Construct a reader with default limits.
    pub fn new(source: S) -> Self {
        Self::with_limits(source, ReaderLimits::default())
    }

    /// Construct a reader with explicit limits.
    pub fn with_limits(source: S, limits: ReaderLimits) -> Self {
        Self {
            source,
            limits,
            nesting_depth: 0,
            text: String::new(),
            payload: Vec::new(),
        }
    }

    /// Borrow the source, e.g. to inspect
    /// [`ReadSource::io_error`](crate::ReadSource::io_error).
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Consume the reader, returning its source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Returns `true` when the source has no more bytes.
    pub fn is_eof(&mut self) -> bool {
        self.source.is_eof()
    }

    /// Clears decode state so reading can start over.
    ///
    /// Required after an error before the reader is used again, typically
    /// together with a fresh source.
    pub fn reset(&mut self) {
        self.nesting_depth = 0;
        self.text.clear();
        self.payload.clear();
    }

    /// Decode exactly one top-level item, driving handler events.
    ///
    /// On success the source is positioned just after the item, child
    /// items included, and the handler has been flushed.
    ///
    /// # Errors
    ///
    /// Decoding stops at the first error with no further events; the
    /// reader state is unspecified until [`reset`](Self::reset).
    pub fn read<H: ContentHandler>(&mut self, handler: &mut H) -> Result<(), CborError> {
        self.read_item(handler)?;
        if self.nesting_depth == 0 {
            handler.flush();
        }
        Ok(())
    }

    /// Decode top-level items until the source is exhausted.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn read_to_end<H: ContentHandler>(&mut self, handler: &mut H) -> Result<(), CborError> {
        while !self.source.is_eof() {
            self.read(handler)?;
        }
        Ok(())
    }

    fn read_item<H: ContentHandler>(&mut self, handler: &mut H) -> Result<(), CborError> {
        let item_tag = self.capture_tag()?;

        let off = self.source.position();
        let initial = self.peek_byte(off)?;

        match major_type(initial) {
            header::MAJOR_UNSIGNED => {
                let value = header::read_uint_argument(&mut self.source)?;
                handler.uint64_value(value, annotate_number(item_tag), &Context::new(off + 1));
            }
            header::MAJOR_NEGATIVE => {
                let value = header::read_int_argument(&mut self.source)?;
                handler.int64_value(value, annotate_number(item_tag), &Context::new(off + 1));
            }
            header::MAJOR_BYTES => self.read_byte_string(item_tag, off, handler)?,
            header::MAJOR_TEXT => self.read_text_string(item_tag, off, handler)?,
            header::MAJOR_ARRAY => self.read_array(item_tag, off, handler)?,
            header::MAJOR_MAP => self.read_map(off, handler)?,
            // capture_tag consumed the tag and rejected stacking, so major
            // type 6 cannot reach dispatch.
            header::MAJOR_TAG => return Err(CborError::new(ErrorCode::Malformed, off)),
            header::MAJOR_SIMPLE => self.read_simple(item_tag, off, handler)?,
            _ => unreachable!("major type out of range"),
        }
        Ok(())
    }

    /// Captures the semantic tag preceding the next item, if any.
    ///
    /// At most one tag applies per item; stacked tags are rejected.
    fn capture_tag(&mut self) -> Result<Option<u64>, CborError> {
        match self.source.peek() {
            Some(b) if major_type(b) == header::MAJOR_TAG => {}
            _ => return Ok(None),
        }
        let value = header::read_uint_argument(&mut self.source)?;

        match self.source.peek() {
            Some(b) if major_type(b) == header::MAJOR_TAG => Err(CborError::new(
                ErrorCode::Malformed,
                self.source.position(),
            )),
            _ => Ok(Some(value)),
        }
    }

    fn peek_byte(&mut self, off: usize) -> Result<u8, CborError> {
        self.source
            .peek()
            .ok_or(CborError::new(ErrorCode::UnexpectedEof, off))
    }

    fn enter_container(&mut self, off: usize) -> Result<(), CborError> {
        if self.nesting_depth >= self.limits.max_nesting_depth {
            return Err(CborError::new(ErrorCode::MaxNestingDepthExceeded, off));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    fn leave_container(&mut self) {
        self.nesting_depth -= 1;
    }

    /// Reads a byte- or text-string payload into the payload scratch.
    ///
    /// Indefinite-length strings are concatenated eagerly; every chunk
    /// must be a definite-length string of the same major type.
    fn read_string_payload(&mut self, major: u8, off: usize) -> Result<(), CborError> {
        self.payload.clear();

        let initial = self.peek_byte(off)?;
        if additional_info(initial) != INDEFINITE_LENGTH {
            return self.read_definite_chunk(off);
        }

        self.source.skip_byte();
        loop {
            let chunk_off = self.source.position();
            let b = self.peek_byte(chunk_off)?;
            if b == BREAK_BYTE {
                self.source.skip_byte();
                return Ok(());
            }
            if major_type(b) != major || additional_info(b) == INDEFINITE_LENGTH {
                return Err(CborError::new(ErrorCode::Malformed, chunk_off));
            }
            self.read_definite_chunk(chunk_off)?;
        }
    }

    fn read_definite_chunk(&mut self, off: usize) -> Result<(), CborError> {
        let len = header::read_length(&mut self.source)?;
        let got = self.source.read_into(len, &mut self.payload);
        if got < len {
            return Err(CborError::new(ErrorCode::UnexpectedEof, off));
        }
        Ok(())
    }

    fn read_byte_string<H: ContentHandler>(
        &mut self,
        item_tag: Option<u64>,
        off: usize,
        handler: &mut H,
    ) -> Result<(), CborError> {
        self.read_string_payload(header::MAJOR_BYTES, off)?;
        let ctx = Context::new(off + 1);

        match item_tag {
            Some(tag::TAG_POSITIVE_BIGNUM) => {
                self.text.clear();
                render_bignum(false, &self.payload, &mut self.text);
                handler.bignum_value(&self.text, &ctx);
            }
            Some(tag::TAG_NEGATIVE_BIGNUM) => {
                self.text.clear();
                render_bignum(true, &self.payload, &mut self.text);
                handler.bignum_value(&self.text, &ctx);
            }
            Some(tag::TAG_EXPECT_BASE64URL) => {
                handler.byte_string_value(
                    &self.payload,
                    ByteStringFormat::Base64Url,
                    SemanticTag::None,
                    &ctx,
                );
            }
            Some(tag::TAG_EXPECT_BASE64) => {
                handler.byte_string_value(
                    &self.payload,
                    ByteStringFormat::Base64,
                    SemanticTag::None,
                    &ctx,
                );
            }
            Some(tag::TAG_EXPECT_BASE16) => {
                handler.byte_string_value(
                    &self.payload,
                    ByteStringFormat::Base16,
                    SemanticTag::None,
                    &ctx,
                );
            }
            _ => handler.byte_string_value(
                &self.payload,
                ByteStringFormat::None,
                SemanticTag::None,
                &ctx,
            ),
        }
        Ok(())
    }

    fn read_text_string<H: ContentHandler>(
        &mut self,
        item_tag: Option<u64>,
        off: usize,
        handler: &mut H,
    ) -> Result<(), CborError> {
        self.read_string_payload(header::MAJOR_TEXT, off)?;
        let value = utf8::validate(&self.payload, off)?;

        let string_tag = if item_tag == Some(tag::TAG_DATE_TIME) {
            SemanticTag::DateTime
        } else {
            SemanticTag::None
        };
        handler.string_value(value, string_tag, &Context::new(off + 1));
        Ok(())
    }

    fn read_array<H: ContentHandler>(
        &mut self,
        item_tag: Option<u64>,
        off: usize,
        handler: &mut H,
    ) -> Result<(), CborError> {
        if item_tag == Some(tag::TAG_DECIMAL_FRACTION) {
            return self.read_decimal_fraction(off, handler);
        }

        let array_tag = if item_tag == Some(tag::TAG_BIGFLOAT) {
            SemanticTag::Bigfloat
        } else {
            SemanticTag::None
        };

        let initial = self.peek_byte(off)?;
        if additional_info(initial) == INDEFINITE_LENGTH {
            self.source.skip_byte();
            self.enter_container(off)?;
            handler.begin_array(None, array_tag, &Context::new(off + 1));

            let mut children = 0usize;
            loop {
                let child_off = self.source.position();
                match self.source.peek() {
                    Some(BREAK_BYTE) => {
                        self.source.skip_byte();
                        break;
                    }
                    Some(_) => {
                        self.read_item(handler)?;
                        children += 1;
                    }
                    None => return Err(CborError::new(ErrorCode::UnexpectedEof, child_off)),
                }
            }
            if array_tag == SemanticTag::Bigfloat && children != 2 {
                return Err(CborError::new(ErrorCode::Malformed, off));
            }

            handler.end_array(&Context::new(self.source.position()));
            self.leave_container();
        } else {
            let len = header::read_length(&mut self.source)?;
            if array_tag == SemanticTag::Bigfloat && len != 2 {
                return Err(CborError::new(ErrorCode::Malformed, off));
            }
            self.enter_container(off)?;
            handler.begin_array(Some(len), array_tag, &Context::new(off + 1));

            for _ in 0..len {
                self.read_item(handler)?;
            }

            handler.end_array(&Context::new(self.source.position()));
            self.leave_container();
        }
        Ok(())
    }

    fn read_map<H: ContentHandler>(
        &mut self,
        off: usize,
        handler: &mut H,
    ) -> Result<(), CborError> {
        let initial = self.peek_byte(off)?;
        if additional_info(initial) == INDEFINITE_LENGTH {
            self.source.skip_byte();
            self.enter_container(off)?;
            handler.begin_object(None, SemanticTag::None, &Context::new(off + 1));

            loop {
                let child_off = self.source.position();
                match self.source.peek() {
                    Some(BREAK_BYTE) => {
                        self.source.skip_byte();
                        break;
                    }
                    Some(_) => {
                        self.parse_name(handler)?;
                        self.read_item(handler)?;
                    }
                    None => return Err(CborError::new(ErrorCode::UnexpectedEof, child_off)),
                }
            }

            handler.end_object(&Context::new(self.source.position()));
            self.leave_container();
        } else {
            let len = header::read_length(&mut self.source)?;
            self.enter_container(off)?;
            handler.begin_object(Some(len), SemanticTag::None, &Context::new(off + 1));

            for _ in 0..len {
                self.parse_name(handler)?;
                self.read_item(handler)?;
            }

            handler.end_object(&Context::new(self.source.position()));
            self.leave_container();
        }
        Ok(())
    }

    /// Parses a map key and emits the `name` event.
    ///
    /// Text keys pass through; integer keys are coerced to their decimal
    /// rendering so every pair produces exactly one `name`. Other key
    /// types fail.
    fn parse_name<H: ContentHandler>(&mut self, handler: &mut H) -> Result<(), CborError> {
        let off = self.source.position();
        let initial = self.peek_byte(off)?;

        match major_type(initial) {
            header::MAJOR_TEXT => {
                self.read_string_payload(header::MAJOR_TEXT, off)?;
                let name = utf8::validate(&self.payload, off)?;
                handler.name(name, &Context::new(off + 1));
            }
            header::MAJOR_UNSIGNED => {
                let value = header::read_uint_argument(&mut self.source)?;
                self.text.clear();
                let _ = write!(self.text, "{value}");
                handler.name(&self.text, &Context::new(off + 1));
            }
            header::MAJOR_NEGATIVE => {
                let value = header::read_int_argument(&mut self.source)?;
                self.text.clear();
                let _ = write!(self.text, "{value}");
                handler.name(&self.text, &Context::new(off + 1));
            }
            _ => return Err(CborError::new(ErrorCode::Malformed, off)),
        }
        Ok(())
    }

    fn read_simple<H: ContentHandler>(
        &mut self,
        item_tag: Option<u64>,
        off: usize,
        handler: &mut H,
    ) -> Result<(), CborError> {
        let initial = self.peek_byte(off)?;
        let ctx = Context::new(off + 1);

        match additional_info(initial) {
            20 => {
                self.source.skip_byte();
                handler.bool_value(false, SemanticTag::None, &ctx);
            }
            21 => {
                self.source.skip_byte();
                handler.bool_value(true, SemanticTag::None, &ctx);
            }
            22 => {
                self.source.skip_byte();
                handler.null_value(SemanticTag::None, &ctx);
            }
            23 => {
                self.source.skip_byte();
                handler.null_value(SemanticTag::Undefined, &ctx);
            }
            25..=27 => {
                let value = header::read_float(&mut self.source)?;
                handler.double_value(
                    value,
                    &FloatOptions::default(),
                    annotate_number(item_tag),
                    &ctx,
                );
            }
            INDEFINITE_LENGTH => return Err(CborError::new(ErrorCode::UnexpectedBreak, off)),
            _ => return Err(CborError::new(ErrorCode::InvalidInitialByte, off)),
        }
        Ok(())
    }

    /// Reads a tag-4 array and emits its rendering as a single string
    /// event in place of the array structure.
    fn read_decimal_fraction<H: ContentHandler>(
        &mut self,
        off: usize,
        handler: &mut H,
    ) -> Result<(), CborError> {
        let initial = self.peek_byte(off)?;
        let indefinite = additional_info(initial) == INDEFINITE_LENGTH;
        if indefinite {
            self.source.skip_byte();
        } else {
            let len = header::read_length(&mut self.source)?;
            if len != 2 {
                return Err(CborError::new(ErrorCode::Malformed, off));
            }
        }

        let exponent = self.read_exponent()?;
        let mut digits = String::new();
        self.read_mantissa_digits(&mut digits)?;

        if indefinite {
            let end = self.source.position();
            match self.source.next_byte() {
                Some(BREAK_BYTE) => {}
                Some(_) => return Err(CborError::new(ErrorCode::Malformed, end)),
                None => return Err(CborError::new(ErrorCode::UnexpectedEof, end)),
            }
        }

        self.text.clear();
        render_decimal_fraction(exponent, &digits, &mut self.text);
        handler.string_value(&self.text, SemanticTag::DecimalFraction, &Context::new(off + 1));
        Ok(())
    }

    fn read_exponent(&mut self) -> Result<i64, CborError> {
        let off = self.source.position();
        let initial = self.peek_byte(off)?;
        match major_type(initial) {
            header::MAJOR_UNSIGNED => {
                let v = header::read_uint_argument(&mut self.source)?;
                i64::try_from(v).map_err(|_| CborError::new(ErrorCode::NumberTooLarge, off))
            }
            header::MAJOR_NEGATIVE => header::read_int_argument(&mut self.source),
            _ => Err(CborError::new(ErrorCode::Malformed, off)),
        }
    }

    fn read_mantissa_digits(&mut self, digits: &mut String) -> Result<(), CborError> {
        let off = self.source.position();
        let initial = self.peek_byte(off)?;

        match major_type(initial) {
            header::MAJOR_UNSIGNED => {
                let v = header::read_uint_argument(&mut self.source)?;
                let _ = write!(digits, "{v}");
                Ok(())
            }
            header::MAJOR_NEGATIVE => {
                let v = header::read_int_argument(&mut self.source)?;
                let _ = write!(digits, "{v}");
                Ok(())
            }
            header::MAJOR_TAG => {
                let t = header::read_uint_argument(&mut self.source)?;
                let negative = match t {
                    tag::TAG_POSITIVE_BIGNUM => false,
                    tag::TAG_NEGATIVE_BIGNUM => true,
                    _ => return Err(CborError::new(ErrorCode::Malformed, off)),
                };

                let payload_off = self.source.position();
                let b = self.peek_byte(payload_off)?;
                if major_type(b) != header::MAJOR_BYTES {
                    return Err(CborError::new(ErrorCode::Malformed, payload_off));
                }
                self.read_string_payload(header::MAJOR_BYTES, payload_off)?;
                render_bignum(negative, &self.payload, digits);
                Ok(())
            }
            _ => Err(CborError::new(ErrorCode::Malformed, off)),
        }
    }
}

const fn annotate_number(item_tag: Option<u64>) -> SemanticTag {
    match item_tag {
        Some(tag::TAG_EPOCH_TIME) => SemanticTag::EpochTime,
        _ => SemanticTag::None,
    }
}
