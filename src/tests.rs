use crate::{CborReader, CborWriter, ConformanceMode, ErrorKind, ReaderState};
use chrono::{DateTime, Utc};
use hex_literal::hex;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

/// Read one data item of any shape and write it back unchanged.
fn transcode(reader: &mut CborReader, writer: &mut CborWriter) {
    match reader.peek_state().unwrap() {
        ReaderState::UnsignedInteger => writer.write_u64(reader.read_u64().unwrap()).unwrap(),
        ReaderState::NegativeInteger => writer.write_i64(reader.read_i64().unwrap()).unwrap(),
        ReaderState::Bytes => writer.write_bytes(&reader.read_bytes().unwrap()).unwrap(),
        ReaderState::Str => writer.write_str(&reader.read_str().unwrap()).unwrap(),
        ReaderState::StartArray => {
            let len = reader.read_start_array().unwrap().unwrap();
            writer.write_start_array(len).unwrap();
            for _ in 0..len {
                transcode(reader, writer);
            }
            reader.read_end_array().unwrap();
            writer.write_end_array().unwrap();
        }
        ReaderState::StartDict => {
            let len = reader.read_start_dict().unwrap().unwrap();
            writer.write_start_dict(len).unwrap();
            for _ in 0..len * 2 {
                transcode(reader, writer);
            }
            reader.read_end_dict().unwrap();
            writer.write_end_dict().unwrap();
        }
        ReaderState::Tag => {
            writer.write_tag(reader.read_tag().unwrap()).unwrap();
            transcode(reader, writer);
        }
        ReaderState::Bool => writer.write_bool(reader.read_bool().unwrap()).unwrap(),
        ReaderState::Null => {
            reader.read_null().unwrap();
            writer.write_null().unwrap();
        }
        ReaderState::UndefinedValue => {
            reader.read_undefined().unwrap();
            writer.write_undefined().unwrap();
        }
        ReaderState::SimpleValue => writer.write_simple(reader.read_simple().unwrap()).unwrap(),
        ReaderState::HalfFloat => writer.write_f16(reader.read_f16().unwrap()).unwrap(),
        ReaderState::SingleFloat => writer.write_f32(reader.read_f32().unwrap()).unwrap(),
        ReaderState::DoubleFloat => writer.write_f64(reader.read_f64().unwrap()).unwrap(),
        state => panic!("cannot transcode {state}"),
    }
}

/// Decode a canonical item via peek-driven dispatch and expect the
/// re-encoding to be byte-identical.
fn assert_reencodes(bytes: &[u8]) {
    let mut reader = CborReader::new(bytes);
    let mut writer = CborWriter::new();
    transcode(&mut reader, &mut writer);
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);
    assert_eq!(writer.as_slice(), bytes, "{bytes:x?}");
}

///////////////////////////////////////////////////////////////////////////////////////////////////
// Test vectors below taken from [RFC 8949 Appendix A](https://www.rfc-editor.org/rfc/rfc8949#appendix-A)
///////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn appendix_a_unsigned_integers() {
    for (bytes, value) in [
        (hex!("00").as_slice(), 0u64),
        (&hex!("17"), 23),
        (&hex!("1818"), 24),
        (&hex!("1903e8"), 1000),
        (&hex!("1b000000e8d4a51000"), 1_000_000_000_000),
    ] {
        let mut reader = CborReader::new(bytes);
        assert_eq!(reader.read_u64().unwrap(), value);
        assert_eq!(reader.bytes_remaining(), 0);
        assert_reencodes(bytes);
    }
}

#[test]
fn appendix_a_negative_integers() {
    for (bytes, value) in [(hex!("20").as_slice(), -1i64), (&hex!("3863"), -100)] {
        let mut reader = CborReader::new(bytes);
        assert_eq!(reader.read_i64().unwrap(), value);
        assert_reencodes(bytes);
    }
}

#[test]
fn appendix_a_strings() {
    let mut reader = CborReader::new(&hex!("40"));
    assert_eq!(reader.read_bytes().unwrap(), Vec::<u8>::new());
    assert_reencodes(&hex!("40"));

    let mut reader = CborReader::new(&hex!("4401020304"));
    assert_eq!(reader.read_bytes().unwrap(), vec![1, 2, 3, 4]);
    assert_reencodes(&hex!("4401020304"));

    let mut reader = CborReader::new(&hex!("60"));
    assert_eq!(reader.read_str().unwrap(), "");
    assert_reencodes(&hex!("60"));

    let mut reader = CborReader::new(&hex!("6449455446"));
    assert_eq!(reader.read_str().unwrap(), "IETF");
    assert_reencodes(&hex!("6449455446"));

    let mut reader = CborReader::new(&hex!("62c3bc"));
    assert_eq!(reader.read_str().unwrap(), "ü");
    assert_reencodes(&hex!("62c3bc"));
}

#[test]
fn appendix_a_containers() {
    let mut reader = CborReader::new(&hex!("80"));
    assert_eq!(reader.read_start_array().unwrap(), Some(0));
    reader.read_end_array().unwrap();
    assert_reencodes(&hex!("80"));

    let mut reader = CborReader::new(&hex!("83010203"));
    assert_eq!(reader.read_start_array().unwrap(), Some(3));
    assert_eq!(reader.read_u64().unwrap(), 1);
    assert_eq!(reader.read_u64().unwrap(), 2);
    assert_eq!(reader.read_u64().unwrap(), 3);
    reader.read_end_array().unwrap();
    assert_reencodes(&hex!("83010203"));

    let mut reader = CborReader::new(&hex!("a201020304"));
    assert_eq!(reader.read_start_dict().unwrap(), Some(2));
    assert_eq!(reader.read_u64().unwrap(), 1);
    assert_eq!(reader.read_u64().unwrap(), 2);
    assert_eq!(reader.read_u64().unwrap(), 3);
    assert_eq!(reader.read_u64().unwrap(), 4);
    reader.read_end_dict().unwrap();
    assert_reencodes(&hex!("a201020304"));

    let mut reader = CborReader::new(&hex!("a26161016162820203"));
    assert_eq!(reader.read_start_dict().unwrap(), Some(2));
    assert_eq!(reader.read_str().unwrap(), "a");
    assert_eq!(reader.read_u64().unwrap(), 1);
    assert_eq!(reader.read_str().unwrap(), "b");
    assert_eq!(reader.read_start_array().unwrap(), Some(2));
    assert_eq!(reader.read_u64().unwrap(), 2);
    assert_eq!(reader.read_u64().unwrap(), 3);
    reader.read_end_array().unwrap();
    reader.read_end_dict().unwrap();
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);
    assert_reencodes(&hex!("a26161016162820203"));
}

#[test]
fn appendix_a_simple_values() {
    let mut reader = CborReader::new(&hex!("f4"));
    assert!(!reader.read_bool().unwrap());
    let mut reader = CborReader::new(&hex!("f5"));
    assert!(reader.read_bool().unwrap());
    let mut reader = CborReader::new(&hex!("f6"));
    reader.read_null().unwrap();
    let mut reader = CborReader::new(&hex!("f7"));
    reader.read_undefined().unwrap();

    let mut reader = CborReader::new(&hex!("f0"));
    assert_eq!(reader.read_simple().unwrap(), 16);
    let mut reader = CborReader::new(&hex!("f8ff"));
    assert_eq!(reader.read_simple().unwrap(), 255);

    for bytes in [
        hex!("f4").as_slice(),
        &hex!("f5"),
        &hex!("f6"),
        &hex!("f7"),
        &hex!("f0"),
        &hex!("f8ff"),
    ] {
        assert_reencodes(bytes);
    }
}

#[test]
fn appendix_a_floats() {
    let mut reader = CborReader::new(&hex!("f90000"));
    assert_eq!(reader.read_f16().unwrap(), 0.0);
    let mut reader = CborReader::new(&hex!("f93c00"));
    assert_eq!(reader.read_f16().unwrap(), 1.0);
    let mut reader = CborReader::new(&hex!("f93e00"));
    assert_eq!(reader.read_f16().unwrap(), 1.5);
    let mut reader = CborReader::new(&hex!("fa47c35000"));
    assert_eq!(reader.read_f32().unwrap(), 100000.0);
    let mut reader = CborReader::new(&hex!("fb3ff199999999999a"));
    assert_eq!(reader.read_f64().unwrap(), 1.1);

    for bytes in [
        hex!("f90000").as_slice(),
        &hex!("f93c00"),
        &hex!("f93e00"),
        &hex!("fa47c35000"),
        &hex!("fb3ff199999999999a"),
    ] {
        assert_reencodes(bytes);
    }
}

#[test]
fn appendix_a_tags() {
    let bytes = hex!("c074323031332d30332d32315432303a30343a30305a");
    let mut reader = CborReader::new(&bytes);
    let datetime = reader.read_datetime().unwrap();
    assert_eq!(datetime.to_rfc3339(), "2013-03-21T20:04:00+00:00");
    let mut writer = CborWriter::new();
    writer.write_datetime(&datetime).unwrap();
    assert_eq!(writer.as_slice(), bytes);

    let bytes = hex!("c11a514b67b0");
    let mut reader = CborReader::new(&bytes);
    let time = reader.read_unix_time().unwrap();
    assert_eq!(time.timestamp(), 1363896240);
    assert_eq!(time.timestamp_subsec_nanos(), 0);
    let mut writer = CborWriter::new();
    writer.write_unix_time(&time).unwrap();
    assert_eq!(writer.as_slice(), bytes);

    let bytes = hex!("d82076687474703a2f2f7777772e6578616d706c652e636f6d");
    let mut reader = CborReader::new(&bytes);
    assert_eq!(reader.read_tag().unwrap(), 32);
    assert_eq!(reader.read_str().unwrap(), "http://www.example.com");
    let mut writer = CborWriter::new();
    writer.write_uri("http://www.example.com").unwrap();
    assert_eq!(writer.as_slice(), bytes);
}

#[test]
fn appendix_a_indefinite_length_items() {
    let mut reader = CborReader::new(&hex!("5f42010243030405ff"));
    assert_eq!(reader.read_bytes().unwrap(), vec![1, 2, 3, 4, 5]);
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);

    let mut reader = CborReader::new(&hex!("7f657374726561646d696e67ff"));
    assert_eq!(reader.read_str().unwrap(), "streaming");

    // [_ 1, [2, 3], [_ 4, 5]]
    let mut reader = CborReader::new(&hex!("9f018202039f0405ffff"));
    assert_eq!(reader.read_start_array().unwrap(), None);
    assert_eq!(reader.read_u64().unwrap(), 1);
    assert_eq!(reader.read_start_array().unwrap(), Some(2));
    assert_eq!(reader.read_u64().unwrap(), 2);
    assert_eq!(reader.read_u64().unwrap(), 3);
    reader.read_end_array().unwrap();
    assert_eq!(reader.read_start_array().unwrap(), None);
    assert_eq!(reader.read_u64().unwrap(), 4);
    assert_eq!(reader.read_u64().unwrap(), 5);
    reader.read_end_array().unwrap();
    reader.read_end_array().unwrap();
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);

    // {_ "a": 1, "b": [_ 2, 3]}
    let mut reader = CborReader::new(&hex!("bf61610161629f0203ffff"));
    assert_eq!(reader.read_start_dict().unwrap(), None);
    assert_eq!(reader.read_str().unwrap(), "a");
    assert_eq!(reader.read_u64().unwrap(), 1);
    assert_eq!(reader.read_str().unwrap(), "b");
    assert_eq!(reader.read_start_array().unwrap(), None);
    assert_eq!(reader.read_u64().unwrap(), 2);
    assert_eq!(reader.read_u64().unwrap(), 3);
    reader.read_end_array().unwrap();
    reader.read_end_dict().unwrap();
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);
}

///////////////////////////////////////////////////////////////////////////////////////////////////
// Round-trip properties
///////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn round_trip_unsigned() {
    for value in [
        0u64,
        1,
        23,
        24,
        255,
        256,
        65535,
        65536,
        u64::from(u32::MAX),
        u64::from(u32::MAX) + 1,
        u64::MAX,
    ] {
        let mut writer = CborWriter::new();
        writer.write_u64(value).unwrap();
        let mut reader = CborReader::new(writer.as_slice());
        assert_eq!(reader.read_u64().unwrap(), value);
        assert_eq!(reader.bytes_remaining(), 0);
    }
}

#[test]
fn round_trip_signed() {
    for value in [0i64, 1, -1, -24, -25, -256, -257, i64::MAX, i64::MIN] {
        let mut writer = CborWriter::new();
        writer.write_i64(value).unwrap();
        let mut reader = CborReader::new(writer.as_slice());
        assert_eq!(reader.read_i64().unwrap(), value);
    }
}

#[test]
fn round_trip_narrow_integers() {
    let mut writer = CborWriter::new();
    writer.write_u8(200).unwrap();
    writer.write_u16(50000).unwrap();
    writer.write_u32(3_000_000_000).unwrap();
    writer.write_i8(-100).unwrap();
    writer.write_i16(-30000).unwrap();
    writer.write_i32(-2_000_000_000).unwrap();
    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_u8().unwrap(), 200);
    assert_eq!(reader.read_u16().unwrap(), 50000);
    assert_eq!(reader.read_u32().unwrap(), 3_000_000_000);
    assert_eq!(reader.read_i8().unwrap(), -100);
    assert_eq!(reader.read_i16().unwrap(), -30000);
    assert_eq!(reader.read_i32().unwrap(), -2_000_000_000);
}

#[test]
#[allow(clippy::float_cmp)]
fn round_trip_floats() {
    for value in [0.0f32, -0.0, 1.0, 1.5, -4.0, 65504.0, f32::INFINITY] {
        let mut writer = CborWriter::new();
        writer.write_f16(value).unwrap();
        let mut reader = CborReader::new(writer.as_slice());
        assert_eq!(reader.read_f16().unwrap(), value);
    }
    for value in [0.0f32, 0.1, 100000.0, f32::MAX, f32::NEG_INFINITY] {
        let mut writer = CborWriter::new();
        writer.write_f32(value).unwrap();
        let mut reader = CborReader::new(writer.as_slice());
        assert_eq!(reader.read_f32().unwrap(), value);
    }
    for value in [0.0f64, 1.1, 1.0e300, -4.1, f64::MIN_POSITIVE] {
        let mut writer = CborWriter::new();
        writer.write_f64(value).unwrap();
        let mut reader = CborReader::new(writer.as_slice());
        assert_eq!(reader.read_f64().unwrap(), value);
    }

    let mut writer = CborWriter::new();
    writer.write_f64(f64::NAN).unwrap();
    writer.write_f16(f32::NAN).unwrap();
    let mut reader = CborReader::new(writer.as_slice());
    assert!(reader.read_f64().unwrap().is_nan());
    assert!(reader.read_f16().unwrap().is_nan());
}

#[test]
fn round_trip_strings() {
    let long_bytes = vec![0xab; 1000];
    let single = [0x42u8];
    for bytes in [&[] as &[u8], single.as_slice(), long_bytes.as_slice()] {
        let mut writer = CborWriter::new();
        writer.write_bytes(bytes).unwrap();
        let mut reader = CborReader::new(writer.as_slice());
        assert_eq!(reader.read_bytes().unwrap(), bytes);
    }

    let long_text = "x".repeat(1000);
    for text in ["", "hello", "exampleα≤β", long_text.as_str()] {
        let mut writer = CborWriter::new();
        writer.write_str(text).unwrap();
        let mut reader = CborReader::new(writer.as_slice());
        assert_eq!(reader.read_str().unwrap(), text);
    }
}

#[test]
fn chunked_strings_collapse_to_the_atomic_value() {
    let chunks: [&[u8]; 4] = [b"", b"ab", b"c", b"defg"];
    let mut writer = CborWriter::new();
    writer.write_start_indefinite_bytes().unwrap();
    for chunk in chunks {
        writer.write_bytes_chunk(chunk).unwrap();
    }
    writer.write_end_indefinite_bytes().unwrap();
    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_bytes().unwrap(), b"abcdefg");

    let mut writer = CborWriter::new();
    writer.write_start_indefinite_str().unwrap();
    for chunk in ["example", "α≤", "β"] {
        writer.write_str_chunk(chunk).unwrap();
    }
    writer.write_end_indefinite_str().unwrap();
    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_str().unwrap(), "exampleα≤β");

    // zero chunks are a valid empty string
    let mut writer = CborWriter::new();
    writer.write_start_indefinite_str().unwrap();
    writer.write_end_indefinite_str().unwrap();
    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_str().unwrap(), "");
}

#[test]
fn container_balancing() {
    let mut writer = CborWriter::new();
    writer.write_start_array(2).unwrap();
    writer.write_start_dict(1).unwrap();
    writer.write_str("deep").unwrap();
    writer.write_start_indefinite_array().unwrap();
    writer.write_u64(1).unwrap();
    writer.write_end_array().unwrap();
    writer.write_end_dict().unwrap();
    writer.write_start_indefinite_dict().unwrap();
    writer.write_str("k").unwrap();
    writer.write_null().unwrap();
    writer.write_end_dict().unwrap();
    writer.write_end_array().unwrap();
    assert_eq!(writer.nesting_depth(), 0);

    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_start_array().unwrap(), Some(2));
    assert_eq!(reader.read_start_dict().unwrap(), Some(1));
    assert_eq!(reader.read_str().unwrap(), "deep");
    assert_eq!(reader.read_start_array().unwrap(), None);
    assert_eq!(reader.read_u64().unwrap(), 1);
    reader.read_end_array().unwrap();
    reader.read_end_dict().unwrap();
    assert_eq!(reader.read_start_dict().unwrap(), None);
    assert_eq!(reader.read_str().unwrap(), "k");
    assert!(reader.try_read_null().unwrap());
    reader.read_end_dict().unwrap();
    reader.read_end_array().unwrap();
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);
    assert_eq!(reader.nesting_depth(), 0);
}

#[test]
fn skip_behaves_like_reading_in_full() {
    // three root values: 1, {"a": [true, null], "b": 2(h'0100')}, "tail"
    let mut writer = CborWriter::new();
    writer.write_u64(1).unwrap();
    writer.write_start_dict(2).unwrap();
    writer.write_str("a").unwrap();
    writer.write_start_array(2).unwrap();
    writer.write_bool(true).unwrap();
    writer.write_null().unwrap();
    writer.write_end_array().unwrap();
    writer.write_str("b").unwrap();
    writer.write_big_int(&(BigInt::from(u64::MAX) + 1u32)).unwrap();
    writer.write_end_dict().unwrap();
    writer.write_str("tail").unwrap();
    let bytes = writer.to_vec();

    let mut skipping = CborReader::new(&bytes);
    assert_eq!(skipping.read_u64().unwrap(), 1);
    skipping.skip_value().unwrap();
    assert_eq!(skipping.read_str().unwrap(), "tail");
    assert_eq!(skipping.peek_state().unwrap(), ReaderState::Finished);

    let mut reading = CborReader::new(&bytes);
    assert_eq!(reading.read_u64().unwrap(), 1);
    let mut discard = CborWriter::new();
    transcode(&mut reading, &mut discard);
    assert_eq!(reading.current_offset(), skipping.current_offset() - 5);
    assert_eq!(reading.read_str().unwrap(), "tail");
}

#[test]
fn encoded_value_is_bit_exact() {
    for bytes in [
        hex!("00").as_slice(),
        &hex!("3863"),
        &hex!("a26161016162820203"),
        &hex!("9f018202039f0405ffff"),
        &hex!("c249010000000000000000"),
        &hex!("fb3ff199999999999a"),
        &hex!("5f42010243030405ff"),
    ] {
        let mut reader = CborReader::new(bytes);
        assert_eq!(reader.read_encoded_value().unwrap(), bytes, "{bytes:x?}");
        assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
// End-to-end scenarios
///////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn scenario_record_dict() {
    let mut writer = CborWriter::new();
    writer.write_start_dict(2).unwrap();
    writer.write_str("name").unwrap();
    writer.write_str("Alice").unwrap();
    writer.write_str("age").unwrap();
    writer.write_u64(30).unwrap();
    writer.write_end_dict().unwrap();
    assert_eq!(
        writer.as_slice(),
        hex!("a2646e616d6565416c69636563616765181e")
    );

    let mut reader = CborReader::new(writer.as_slice());
    let mut name = None;
    let mut age = None;
    assert_eq!(reader.read_start_dict().unwrap(), Some(2));
    while reader.peek_state().unwrap() != ReaderState::EndDict {
        match reader.read_str().unwrap().as_str() {
            "name" => name = Some(reader.read_str().unwrap()),
            "age" => age = Some(reader.read_u64().unwrap()),
            _ => reader.skip_value().unwrap(),
        }
    }
    reader.read_end_dict().unwrap();
    assert_eq!(name.as_deref(), Some("Alice"));
    assert_eq!(age, Some(30));
}

#[test]
fn scenario_bignum_beyond_u64() {
    let value = BigInt::from(2).pow(128);
    let mut writer = CborWriter::new();
    writer.write_big_int(&value).unwrap();
    let mut expected = hex!("c251").to_vec();
    expected.push(0x01);
    expected.extend_from_slice(&[0; 16]);
    assert_eq!(writer.as_slice(), expected);

    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_big_int().unwrap(), value);
}

#[test]
fn scenario_negative_bignum() {
    let value = -(BigInt::from(2).pow(128));
    let mut writer = CborWriter::new();
    writer.write_big_int(&value).unwrap();
    // magnitude on the wire is 2^128 - 1
    let mut expected = hex!("c350").to_vec();
    expected.extend_from_slice(&[0xff; 16]);
    assert_eq!(writer.as_slice(), expected);

    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_big_int().unwrap(), value);
}

#[test]
fn scenario_nesting_cap() {
    let mut writer = CborWriter::new().with_max_nesting_depth(3);
    writer.write_start_array(1).unwrap();
    writer.write_start_array(1).unwrap();
    writer.write_start_array(1).unwrap();
    assert_eq!(
        writer.write_start_array(1).unwrap_err().kind(),
        ErrorKind::NestingDepthExceeded
    );
}

#[test]
fn scenario_canonical_writer() {
    let mut writer = CborWriter::new().with_conformance_mode(ConformanceMode::Canonical);
    assert_eq!(
        writer.write_start_indefinite_array().unwrap_err().kind(),
        ErrorKind::IndefiniteLengthNotAllowed
    );
}

#[test]
fn scenario_skip_in_the_middle() {
    // [1, {"nested": [2, 3]}, 4]
    let bytes = hex!("8301a1666e6573746564820203 04");
    let mut reader = CborReader::new(&bytes);
    assert_eq!(reader.read_start_array().unwrap(), Some(3));
    assert_eq!(reader.read_u64().unwrap(), 1);
    reader.skip_value().unwrap();
    assert_eq!(reader.read_u64().unwrap(), 4);
    reader.read_end_array().unwrap();
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);
}

#[test]
fn time_tags_round_trip() {
    let whole = DateTime::<Utc>::from_timestamp(1363896240, 0).unwrap();
    let mut writer = CborWriter::new();
    writer.write_unix_time(&whole).unwrap();
    assert_eq!(writer.as_slice(), hex!("c11a514b67b0"));
    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_unix_time().unwrap(), whole);

    let fractional = DateTime::<Utc>::from_timestamp(1363896240, 500_000_000).unwrap();
    let mut writer = CborWriter::new();
    writer.write_unix_time(&fractional).unwrap();
    assert_eq!(writer.as_slice(), hex!("c1fb41d452d9ec200000"));
    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_unix_time().unwrap(), fractional);

    let parsed = DateTime::parse_from_rfc3339("2013-03-21T20:04:00.5+01:00").unwrap();
    let mut writer = CborWriter::new();
    writer.write_datetime(&parsed).unwrap();
    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_datetime().unwrap(), parsed);
}

#[test]
fn self_described_and_embedded_cbor() {
    let mut inner = CborWriter::new();
    inner.write_str("inner").unwrap();

    let mut writer = CborWriter::new();
    writer.write_self_described_cbor().unwrap();
    writer.write_encoded_cbor(inner.as_slice()).unwrap();
    assert_eq!(writer.as_slice()[..3], hex!("d9d9f7"));

    let mut reader = CborReader::new(writer.as_slice());
    assert_eq!(reader.read_tag().unwrap(), 55799);
    assert_eq!(reader.read_tag().unwrap(), 24);
    let embedded = reader.read_bytes().unwrap();
    let mut reader = CborReader::new(&embedded);
    assert_eq!(reader.read_str().unwrap(), "inner");
}

#[test]
fn multiple_root_values() {
    let mut writer = CborWriter::new().with_multiple_root_values(true);
    writer.write_u64(1).unwrap();
    writer.write_str("two").unwrap();
    writer.write_bool(true).unwrap();

    let mut reader = CborReader::new(writer.as_slice()).with_multiple_root_values(true);
    assert_eq!(reader.read_u64().unwrap(), 1);
    assert_eq!(reader.read_str().unwrap(), "two");
    assert!(reader.read_bool().unwrap());
    assert_eq!(reader.peek_state().unwrap(), ReaderState::Finished);
}
