//! A low-level streaming codec for CBOR ([RFC 8949](https://www.rfc-editor.org/rfc/rfc8949)).
//!
//! This crate offers two complementary state machines: [`CborWriter`] appends
//! a sequence of CBOR data items to a growing byte buffer and [`CborReader`]
//! walks a borrowed byte slice producing typed values. Both enforce the
//! structural rules of the format — container framing, indefinite-length
//! chunking, tag-plus-content pairing — without imposing any higher-level
//! value model on top.
//!
//! # Example
//!
//! ```
//! use cbor_stream::{CborReader, CborWriter, ReaderState};
//!
//! let mut writer = CborWriter::new();
//! writer.write_start_dict(2).unwrap();
//! writer.write_str("name").unwrap();
//! writer.write_str("Alice").unwrap();
//! writer.write_str("age").unwrap();
//! writer.write_u64(30).unwrap();
//! writer.write_end_dict().unwrap();
//!
//! let mut reader = CborReader::new(writer.as_slice());
//! let len = reader.read_start_dict().unwrap();
//! assert_eq!(len, Some(2));
//! while reader.peek_state().unwrap() != ReaderState::EndDict {
//!     let key = reader.read_str().unwrap();
//!     match key.as_str() {
//!         "name" => assert_eq!(reader.read_str().unwrap(), "Alice"),
//!         "age" => assert_eq!(reader.read_u64().unwrap(), 30),
//!         _ => reader.skip_value().unwrap(),
//!     }
//! }
//! reader.read_end_dict().unwrap();
//! ```
//!
//! The writer is always minimal in its argument widths; the
//! [`ConformanceMode`] only gates indefinite-length usage on the writing
//! side, while the reader additionally enforces minimal encodings and UTF-8
//! validity under [`ConformanceMode::Strict`] and above.

use std::fmt::{Display, Formatter};

mod codec;
pub mod constants;
mod error;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{CborError, ErrorKind, Result};
pub use reader::CborReader;
pub use writer::CborWriter;

/// The 3-bit major type occupying the high bits of every initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MajorType {
    UnsignedInteger = 0,
    NegativeInteger = 1,
    ByteString = 2,
    TextString = 3,
    Array = 4,
    Dict = 5,
    Tag = 6,
    SimpleOrFloat = 7,
}

impl MajorType {
    pub(crate) fn from_high_bits(bits: u8) -> Self {
        match bits & 7 {
            0 => MajorType::UnsignedInteger,
            1 => MajorType::NegativeInteger,
            2 => MajorType::ByteString,
            3 => MajorType::TextString,
            4 => MajorType::Array,
            5 => MajorType::Dict,
            6 => MajorType::Tag,
            _ => MajorType::SimpleOrFloat,
        }
    }
}

/// How strictly the writer and reader enforce the encoding rules of
/// RFC 8949.
///
/// The modes form a ladder: every restriction of a mode also applies to all
/// stricter modes.
///
///  - `Lax` accepts any well-formed CBOR.
///  - `Strict` additionally requires minimal argument encodings and valid
///    UTF-8 in text strings.
///  - `Canonical` additionally rejects indefinite-length items
///    (RFC 8949 §4.2.1).
///  - `Ctap2Canonical` carries the same restrictions as `Canonical` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ConformanceMode {
    #[default]
    Lax,
    Strict,
    Canonical,
    Ctap2Canonical,
}

impl ConformanceMode {
    /// Non-minimal argument encodings are rejected when reading.
    pub fn requires_minimal_arguments(self) -> bool {
        self >= ConformanceMode::Strict
    }

    /// Text strings are validated chunk by chunk when reading.
    pub fn validates_utf8(self) -> bool {
        self >= ConformanceMode::Strict
    }

    /// Indefinite-length items may be written and read.
    pub fn allows_indefinite_length(self) -> bool {
        self < ConformanceMode::Canonical
    }
}

/// Classification of the next data item produced by
/// [`CborReader::peek_state`].
///
/// The `Display` renderings are stable and intended for diagnostics, most
/// prominently inside [`ErrorKind::TypeMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReaderState {
    /// no classification has been made
    #[default]
    Undefined,
    UnsignedInteger,
    NegativeInteger,
    /// a definite-length byte string
    Bytes,
    /// a definite-length text string
    Str,
    StartArray,
    EndArray,
    StartDict,
    EndDict,
    Tag,
    SimpleValue,
    HalfFloat,
    SingleFloat,
    DoubleFloat,
    Null,
    Bool,
    /// the simple value `undefined`
    UndefinedValue,
    StartIndefiniteBytes,
    EndIndefiniteBytes,
    StartIndefiniteStr,
    EndIndefiniteStr,
    /// all input has been consumed at nesting depth zero
    Finished,
}

impl Display for ReaderState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReaderState::Undefined => "Undefined",
            ReaderState::UnsignedInteger => "UnsignedInteger",
            ReaderState::NegativeInteger => "NegativeInteger",
            ReaderState::Bytes => "Bytes",
            ReaderState::Str => "Str",
            ReaderState::StartArray => "StartArray",
            ReaderState::EndArray => "EndArray",
            ReaderState::StartDict => "StartDict",
            ReaderState::EndDict => "EndDict",
            ReaderState::Tag => "Tag",
            ReaderState::SimpleValue => "SimpleValue",
            ReaderState::HalfFloat => "HalfFloat",
            ReaderState::SingleFloat => "SingleFloat",
            ReaderState::DoubleFloat => "DoubleFloat",
            ReaderState::Null => "Null",
            ReaderState::Bool => "Bool",
            ReaderState::UndefinedValue => "UndefinedValue",
            ReaderState::StartIndefiniteBytes => "StartIndefiniteBytes",
            ReaderState::EndIndefiniteBytes => "EndIndefiniteBytes",
            ReaderState::StartIndefiniteStr => "StartIndefiniteStr",
            ReaderState::EndIndefiniteStr => "EndIndefiniteStr",
            ReaderState::Finished => "Finished",
        };
        f.write_str(name)
    }
}
