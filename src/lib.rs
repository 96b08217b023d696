//! # cbor-sax
//!
//! Streaming SAX-style decoder for CBOR (RFC 7049).
//!
//! A [`CborReader`] pulls bytes from a [`ByteSource`] and pushes typed
//! events into a [`ContentHandler`]: scalars arrive as single value
//! events, containers bracket their children with begin/end events, and
//! recognised semantic tags re-shape how the following item is surfaced.
//!
//! ## Design principles
//!
//! - **Streaming first.**
//!   Nothing is materialised beyond the current string/bignum payload;
//!   memory is bounded by nesting depth plus the largest single payload.
//! - **Tags re-shape events.**
//!   Bignums (tags 2/3) and decimal fractions (tag 4) are rendered to
//!   exact decimal text; date-time, epoch-time and bigfloat travel as
//!   [`SemanticTag`] annotations, and tags 21..=23 as a
//!   [`ByteStringFormat`] rendering hint.
//! - **Structured errors.**
//!   Every failure carries a stable [`ErrorCode`] and the byte offset
//!   where it was detected. No local recovery is attempted.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`CborError`]
//!   and provides [`ReadSource`] over `std::io::Read`.
//! - `simdutf8` *(default)*: SIMD-accelerated UTF-8 validation of text
//!   strings.
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible and requires `alloc` for payload
//! buffers and decimal rendering.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod bignum;
mod decimal;
mod error;
mod event;
mod handler;
mod header;
mod limits;
mod reader;
mod source;
mod tag;
mod utf8;

pub use crate::error::{CborError, ErrorCode};
pub use crate::event::{Event, EventCollector};
pub use crate::handler::{ContentHandler, Context, FloatOptions};
pub use crate::header::{additional_info, major_type};
pub use crate::limits::{ReaderLimits, DEFAULT_MAX_NESTING_DEPTH};
pub use crate::reader::CborReader;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use crate::source::ReadSource;
pub use crate::source::{ByteSource, SliceSource};
pub use crate::tag::{ByteStringFormat, SemanticTag};
