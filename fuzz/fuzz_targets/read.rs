#![no_main]

use libfuzzer_sys::fuzz_target;

use cbor_sax::{CborReader, ContentHandler, ReaderLimits, SliceSource};

struct Sink;

impl ContentHandler for Sink {}

fuzz_target!(|data: &[u8]| {
    let limits = ReaderLimits {
        max_nesting_depth: 64,
    };
    let mut reader = CborReader::with_limits(SliceSource::new(data), limits);
    let _ = reader.read_to_end(&mut Sink);
});
