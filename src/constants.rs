//! Wire-level constants of the CBOR format.

pub const MAJOR_POS: u8 = 0;
pub const MAJOR_NEG: u8 = 1;
pub const MAJOR_BYTES: u8 = 2;
pub const MAJOR_STR: u8 = 3;
pub const MAJOR_ARRAY: u8 = 4;
pub const MAJOR_DICT: u8 = 5;
pub const MAJOR_TAG: u8 = 6;
pub const MAJOR_LIT: u8 = 7;

/// standard date/time string, RFC 3339
pub const TAG_ISO8601: u64 = 0;
/// epoch-based date/time
pub const TAG_EPOCH: u64 = 1;
/// positive bignum
pub const TAG_BIGNUM_POS: u64 = 2;
/// negative bignum, represents `-1 - n`
pub const TAG_BIGNUM_NEG: u64 = 3;
/// decimal fraction
pub const TAG_FRACTION: u64 = 4;
/// bigfloat
pub const TAG_BIGFLOAT: u64 = 5;
/// expected conversion to base64url
pub const TAG_BASE64URL_EXPECTED: u64 = 21;
/// expected conversion to base64
pub const TAG_BASE64_EXPECTED: u64 = 22;
/// expected conversion to base16
pub const TAG_BASE16_EXPECTED: u64 = 23;
/// byte string holding an encoded CBOR data item
pub const TAG_CBOR_ITEM: u64 = 24;
/// URI, RFC 3986
pub const TAG_URI: u64 = 32;
/// base64url-encoded text
pub const TAG_BASE64URL: u64 = 33;
/// base64-encoded text
pub const TAG_BASE64: u64 = 34;
/// regular expression, PCRE/ECMA262
pub const TAG_REGEX: u64 = 35;
/// MIME message, RFC 2045
pub const TAG_MIME: u64 = 36;
/// self-described CBOR
pub const TAG_CBOR_MARKER: u64 = 55799;

pub const LIT_FALSE: u8 = 20;
pub const LIT_TRUE: u8 = 21;
pub const LIT_NULL: u8 = 22;
pub const LIT_UNDEFINED: u8 = 23;
pub const LIT_FLOAT16: u8 = 25;
pub const LIT_FLOAT32: u8 = 26;
pub const LIT_FLOAT64: u8 = 27;

pub const INDEFINITE_SIZE: u8 = 31;
pub const STOP_BYTE: u8 = 0xff;
