use cbor_sax::{
    ByteStringFormat, CborError, CborReader, ErrorCode, Event, EventCollector, SemanticTag,
    SliceSource,
};

fn decode(bytes: &[u8]) -> Vec<Event> {
    let mut reader = CborReader::new(SliceSource::new(bytes));
    let mut handler = EventCollector::new();
    reader.read(&mut handler).unwrap();
    handler.into_events()
}

fn decode_err(bytes: &[u8]) -> CborError {
    let mut reader = CborReader::new(SliceSource::new(bytes));
    let mut handler = EventCollector::new();
    reader.read(&mut handler).unwrap_err()
}

fn uint(value: u64) -> Event {
    Event::Uint64 {
        value,
        tag: SemanticTag::None,
    }
}

#[test]
fn uint_with_one_byte_argument() {
    assert_eq!(decode(&[0x18, 0x7b]), [uint(123), Event::Flush]);
}

#[test]
fn negative_int_applies_offset() {
    assert_eq!(
        decode(&[0x38, 0x63]),
        [
            Event::Int64 {
                value: -100,
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
}

#[test]
fn tag_1_annotates_uint_as_epoch_time() {
    assert_eq!(
        decode(&[0xc1, 0x1a, 0x51, 0x4b, 0x67, 0xb0]),
        [
            Event::Uint64 {
                value: 1_363_896_240,
                tag: SemanticTag::EpochTime
            },
            Event::Flush
        ]
    );
}

#[test]
fn tag_1_annotates_double_as_epoch_time() {
    assert_eq!(
        decode(&[0xc1, 0xfb, 0x41, 0xd4, 0x52, 0xd9, 0xec, 0x20, 0x00, 0x00]),
        [
            Event::Double {
                value: 1_363_896_240.5,
                tag: SemanticTag::EpochTime
            },
            Event::Flush
        ]
    );
}

#[test]
fn tag_0_annotates_text_as_date_time() {
    let mut bytes = vec![0xc0, 0x74];
    bytes.extend_from_slice(b"2013-03-21T20:04:00Z");
    assert_eq!(
        decode(&bytes),
        [
            Event::String {
                value: "2013-03-21T20:04:00Z".to_string(),
                tag: SemanticTag::DateTime
            },
            Event::Flush
        ]
    );
}

#[test]
fn tag_2_emits_positive_bignum() {
    let bytes = [0xc2, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        decode(&bytes),
        [
            Event::Bignum("18446744073709551616".to_string()),
            Event::Flush
        ]
    );
}

#[test]
fn tag_3_emits_negative_bignum() {
    let bytes = [0xc3, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        decode(&bytes),
        [
            Event::Bignum("-18446744073709551616".to_string()),
            Event::Flush
        ]
    );
}

#[test]
fn tag_4_replaces_array_with_decimal_string() {
    assert_eq!(
        decode(&[0xc4, 0x82, 0x21, 0x19, 0x6a, 0xb3]),
        [
            Event::String {
                value: "273.15".to_string(),
                tag: SemanticTag::DecimalFraction
            },
            Event::Flush
        ]
    );
}

#[test]
fn tag_4_accepts_bignum_mantissa() {
    // [-10, 2^64] as a decimal fraction.
    let bytes = [
        0xc4, 0x82, 0x29, 0xc2, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0,
    ];
    assert_eq!(
        decode(&bytes),
        [
            Event::String {
                value: "1844674407.3709551616".to_string(),
                tag: SemanticTag::DecimalFraction
            },
            Event::Flush
        ]
    );
}

#[test]
fn tag_4_accepts_indefinite_two_element_array() {
    assert_eq!(
        decode(&[0xc4, 0x9f, 0x21, 0x19, 0x6a, 0xb3, 0xff]),
        [
            Event::String {
                value: "273.15".to_string(),
                tag: SemanticTag::DecimalFraction
            },
            Event::Flush
        ]
    );
}

#[test]
fn tag_5_annotates_array_as_bigfloat() {
    // 1.5 encoded as a bigfloat: [-1, 3].
    assert_eq!(
        decode(&[0xc5, 0x82, 0x20, 0x03]),
        [
            Event::BeginArray {
                len: Some(2),
                tag: SemanticTag::Bigfloat
            },
            Event::Int64 {
                value: -1,
                tag: SemanticTag::None
            },
            uint(3),
            Event::EndArray,
            Event::Flush
        ]
    );
}

#[test]
fn tags_21_to_23_set_byte_string_format() {
    let cases = [
        (0xd5u8, ByteStringFormat::Base64Url),
        (0xd6, ByteStringFormat::Base64),
        (0xd7, ByteStringFormat::Base16),
    ];
    for (tag_byte, format) in cases {
        let bytes = [tag_byte, 0x44, 0x01, 0x02, 0x03, 0x04];
        assert_eq!(
            decode(&bytes),
            [
                Event::ByteString {
                    value: vec![1, 2, 3, 4],
                    format,
                    tag: SemanticTag::None
                },
                Event::Flush
            ]
        );
    }
}

#[test]
fn untagged_byte_string_has_no_format() {
    assert_eq!(
        decode(&[0x43, 0xaa, 0xbb, 0xcc]),
        [
            Event::ByteString {
                value: vec![0xaa, 0xbb, 0xcc],
                format: ByteStringFormat::None,
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
}

#[test]
fn unknown_tag_is_consumed_without_annotation() {
    // tag(100) 1
    assert_eq!(decode(&[0xd8, 0x64, 0x01]), [uint(1), Event::Flush]);
}

#[test]
fn tag_on_inapplicable_type_is_dropped() {
    // tag(1) "a": epoch time does not apply to text.
    assert_eq!(
        decode(&[0xc1, 0x61, 0x61]),
        [
            Event::String {
                value: "a".to_string(),
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
}

#[test]
fn indefinite_array_emits_no_length() {
    assert_eq!(
        decode(&[0x9f, 0x01, 0x02, 0x03, 0xff]),
        [
            Event::BeginArray {
                len: None,
                tag: SemanticTag::None
            },
            uint(1),
            uint(2),
            uint(3),
            Event::EndArray,
            Event::Flush
        ]
    );
}

#[test]
fn definite_map_alternates_names_and_values() {
    assert_eq!(
        decode(&[0xa2, 0x61, 0x61, 0x01, 0x61, 0x62, 0x02]),
        [
            Event::BeginObject {
                len: Some(2),
                tag: SemanticTag::None
            },
            Event::Name("a".to_string()),
            uint(1),
            Event::Name("b".to_string()),
            uint(2),
            Event::EndObject,
            Event::Flush
        ]
    );
}

#[test]
fn integer_map_keys_are_coerced_to_text() {
    assert_eq!(
        decode(&[0xa2, 0x01, 0x61, 0x61, 0x20, 0x61, 0x62]),
        [
            Event::BeginObject {
                len: Some(2),
                tag: SemanticTag::None
            },
            Event::Name("1".to_string()),
            Event::String {
                value: "a".to_string(),
                tag: SemanticTag::None
            },
            Event::Name("-1".to_string()),
            Event::String {
                value: "b".to_string(),
                tag: SemanticTag::None
            },
            Event::EndObject,
            Event::Flush
        ]
    );
}

#[test]
fn indefinite_text_string_concatenates_chunks() {
    let bytes = [
        0x7f, 0x65, 0x73, 0x74, 0x72, 0x65, 0x61, 0x64, 0x6d, 0x69, 0x6e, 0x67, 0xff,
    ];
    assert_eq!(
        decode(&bytes),
        [
            Event::String {
                value: "streaming".to_string(),
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
}

#[test]
fn indefinite_byte_string_concatenates_chunks() {
    let bytes = [0x5f, 0x42, 0x01, 0x02, 0x43, 0x03, 0x04, 0x05, 0xff];
    assert_eq!(
        decode(&bytes),
        [
            Event::ByteString {
                value: vec![1, 2, 3, 4, 5],
                format: ByteStringFormat::None,
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
}

#[test]
fn empty_indefinite_string_is_empty_value() {
    assert_eq!(
        decode(&[0x7f, 0xff]),
        [
            Event::String {
                value: String::new(),
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
}

#[test]
fn simples_map_to_bool_null_undefined() {
    assert_eq!(
        decode(&[0xf4]),
        [
            Event::Bool {
                value: false,
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
    assert_eq!(
        decode(&[0xf5]),
        [
            Event::Bool {
                value: true,
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
    assert_eq!(
        decode(&[0xf6]),
        [
            Event::Null {
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
    assert_eq!(
        decode(&[0xf7]),
        [
            Event::Null {
                tag: SemanticTag::Undefined
            },
            Event::Flush
        ]
    );
}

#[test]
fn half_float_promotes_to_double() {
    assert_eq!(
        decode(&[0xf9, 0x3c, 0x00]),
        [
            Event::Double {
                value: 1.0,
                tag: SemanticTag::None
            },
            Event::Flush
        ]
    );
}

#[test]
fn nested_containers_emit_in_document_order() {
    // [1, [2, 3], {"x": [4]}]
    let bytes = [
        0x83, 0x01, 0x82, 0x02, 0x03, 0xa1, 0x61, 0x78, 0x81, 0x04,
    ];
    assert_eq!(
        decode(&bytes),
        [
            Event::BeginArray {
                len: Some(3),
                tag: SemanticTag::None
            },
            uint(1),
            Event::BeginArray {
                len: Some(2),
                tag: SemanticTag::None
            },
            uint(2),
            uint(3),
            Event::EndArray,
            Event::BeginObject {
                len: Some(1),
                tag: SemanticTag::None
            },
            Event::Name("x".to_string()),
            Event::BeginArray {
                len: Some(1),
                tag: SemanticTag::None
            },
            uint(4),
            Event::EndArray,
            Event::EndObject,
            Event::EndArray,
            Event::Flush
        ]
    );
}

#[test]
fn truncated_argument_fails_with_unexpected_eof() {
    let err = decode_err(&[0x19, 0x01]);
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
}

#[test]
fn truncated_string_payload_fails_with_unexpected_eof() {
    let err = decode_err(&[0x62, 0x61]);
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
}

#[test]
fn missing_break_fails_with_unexpected_eof() {
    let err = decode_err(&[0x9f, 0x01]);
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
}

#[test]
fn reserved_additional_info_is_rejected() {
    for initial in [0x1cu8, 0x1d, 0x1e] {
        let err = decode_err(&[initial]);
        assert_eq!(err.code, ErrorCode::InvalidInitialByte);
        assert_eq!(err.offset, 0);
    }
}

#[test]
fn indefinite_marker_on_integer_requires_length() {
    let err = decode_err(&[0x1f]);
    assert_eq!(err.code, ErrorCode::LengthRequired);
}

#[test]
fn top_level_break_is_rejected() {
    let err = decode_err(&[0xff]);
    assert_eq!(err.code, ErrorCode::UnexpectedBreak);
}

#[test]
fn break_inside_definite_array_is_rejected() {
    let err = decode_err(&[0x81, 0xff]);
    assert_eq!(err.code, ErrorCode::UnexpectedBreak);
}

#[test]
fn negative_integer_outside_i64_is_rejected() {
    let err = decode_err(&[0x3b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    assert_eq!(err.code, ErrorCode::NumberTooLarge);
}

#[test]
fn stacked_tags_are_rejected() {
    let err = decode_err(&[0xc1, 0xc2, 0x42, 0x01, 0x02]);
    assert_eq!(err.code, ErrorCode::Malformed);
    assert_eq!(err.offset, 1);
}

#[test]
fn mismatched_indefinite_chunk_type_is_rejected() {
    // Text chunk inside an indefinite byte string.
    let err = decode_err(&[0x5f, 0x61, 0x61, 0xff]);
    assert_eq!(err.code, ErrorCode::Malformed);
}

#[test]
fn nested_indefinite_chunk_is_rejected() {
    let err = decode_err(&[0x5f, 0x5f, 0xff, 0xff]);
    assert_eq!(err.code, ErrorCode::Malformed);
}

#[test]
fn byte_string_map_key_is_rejected() {
    let err = decode_err(&[0xa1, 0x41, 0x00, 0x00]);
    assert_eq!(err.code, ErrorCode::Malformed);
}

#[test]
fn decimal_fraction_with_wrong_arity_is_rejected() {
    assert_eq!(decode_err(&[0xc4, 0x81, 0x01]).code, ErrorCode::Malformed);
    assert_eq!(
        decode_err(&[0xc4, 0x83, 0x01, 0x02, 0x03]).code,
        ErrorCode::Malformed
    );
    assert_eq!(
        decode_err(&[0xc4, 0x9f, 0x21, 0x19, 0x6a, 0xb3, 0x00, 0xff]).code,
        ErrorCode::Malformed
    );
}

#[test]
fn decimal_fraction_with_non_integer_exponent_is_rejected() {
    let err = decode_err(&[0xc4, 0x82, 0x61, 0x61, 0x01]);
    assert_eq!(err.code, ErrorCode::Malformed);
}

#[test]
fn bigfloat_with_wrong_arity_is_rejected() {
    assert_eq!(decode_err(&[0xc5, 0x81, 0x01]).code, ErrorCode::Malformed);
}

#[test]
fn invalid_utf8_text_is_rejected() {
    let err = decode_err(&[0x62, 0xff, 0xfe]);
    assert_eq!(err.code, ErrorCode::InvalidUtf8);
}

#[test]
fn unassigned_simple_values_are_rejected() {
    assert_eq!(decode_err(&[0xe0]).code, ErrorCode::InvalidInitialByte);
    assert_eq!(decode_err(&[0xf8, 0x20]).code, ErrorCode::InvalidInitialByte);
}

#[test]
fn empty_input_fails_with_unexpected_eof() {
    let err = decode_err(&[]);
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
    assert_eq!(err.offset, 0);
}
