use crate::ReaderState;
use std::fmt::{Debug, Display};
use thiserror::Error;

/// Failure modes of the writer and reader state machines.
///
/// Structural kinds describe malformed framing on the wire, `TypeMismatch`
/// carries the classifier states involved, and the mode-violation kinds are
/// only produced under [`Strict`](crate::ConformanceMode::Strict) or
/// stricter conformance. `DuplicateKey` and `UnsortedKeys` are reserved for
/// canonical dict validation and currently never raised.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// the provided bytes end in the middle of a data item
    #[error("unexpected end of data")]
    UnexpectedEndOfData,
    /// a break byte (0xFF) outside any indefinite-length item
    #[error("unexpected break")]
    UnexpectedBreak,
    /// an indefinite-length item is not terminated by a break byte
    #[error("missing break for indefinite-length item")]
    MissingBreak,
    /// a container holds fewer items than declared, or a dict key without value
    #[error("incomplete container")]
    IncompleteContainer,
    /// a definite-length container holds more items than declared
    #[error("extra items in container")]
    ExtraItems,
    #[error("invalid major type")]
    InvalidMajorType,
    #[error("invalid simple value")]
    InvalidSimpleValue,
    /// malformed initial byte or argument
    #[error("invalid CBOR data")]
    InvalidCbor,
    #[error("invalid UTF-8 in text string")]
    InvalidUtf8,
    /// the decoded integer does not fit the requested width
    #[error("integer overflow")]
    Overflow,
    /// the next data item is not of the requested type
    #[error("expected {expected} but got {actual}")]
    TypeMismatch {
        expected: ReaderState,
        actual: ReaderState,
    },
    /// non-minimal argument encoding in strict or canonical mode
    #[error("non-canonical encoding")]
    NonCanonical,
    #[error("indefinite length not allowed in canonical mode")]
    IndefiniteLengthNotAllowed,
    #[error("maximum nesting depth exceeded")]
    NestingDepthExceeded,
    /// operation does not fit the current container state
    #[error("invalid state for this operation")]
    InvalidState,
    /// reserved for buffer-bounded variants
    #[error("buffer too small")]
    BufferTooSmall,
    /// reserved for canonical dict validation
    #[error("duplicate key in dict")]
    DuplicateKey,
    /// reserved for canonical dict validation
    #[error("dict keys are not sorted")]
    UnsortedKeys,
}

/// Error container carrying the byte offset at which the failure occurred.
///
/// For reader errors the offset points into the input slice, for writer
/// errors it is the length of the output buffer at the time of the failure.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    kind: ErrorKind,
    offset: usize,
}

impl CborError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Get the error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the byte offset at which the error occurred.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Display for CborError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl Debug for CborError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for CborError {}

pub type Result<T> = std::result::Result<T, CborError>;
