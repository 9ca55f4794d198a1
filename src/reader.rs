use crate::{
    codec::{f16_bits_to_f32, initial_byte, split_initial_byte, Frame},
    constants::*,
    error::{CborError, ErrorKind, Result},
    ConformanceMode, MajorType, ReaderState,
};
use chrono::{DateTime, FixedOffset, Utc};
use num_bigint::{BigInt, Sign};

/// Streaming CBOR decoder.
///
/// The reader walks a borrowed byte slice via an offset, mirroring the
/// writer's stack of open-container frames. [`peek_state`](Self::peek_state)
/// classifies the next data item without consuming bytes; the typed read
/// operations verify the classification, consume the item and account for
/// it in the enclosing container.
///
/// ```
/// use cbor_stream::CborReader;
///
/// let mut reader = CborReader::new(&[0x83, 0x01, 0x02, 0x03]);
/// let len = reader.read_start_array().unwrap();
/// assert_eq!(len, Some(3));
/// for expected in 1..=3 {
///     assert_eq!(reader.read_u64().unwrap(), expected);
/// }
/// reader.read_end_array().unwrap();
/// ```
#[derive(Debug)]
pub struct CborReader<'a> {
    data: &'a [u8],
    offset: usize,
    mode: ConformanceMode,
    max_nesting_depth: usize,
    frames: Vec<Frame>,
    cached_state: Option<ReaderState>,
    #[allow(dead_code)]
    allow_multiple_root_values: bool,
}

impl<'a> CborReader<'a> {
    /// Create a reader over the given bytes with lax conformance and the
    /// default maximum nesting depth of 64.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            mode: ConformanceMode::Lax,
            max_nesting_depth: 64,
            frames: Vec::with_capacity(16),
            cached_state: None,
            allow_multiple_root_values: false,
        }
    }

    /// Configure the conformance mode.
    pub fn with_conformance_mode(mut self, mode: ConformanceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Configure the maximum number of open container frames.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Accept more than one data item at nesting depth zero.
    pub fn with_multiple_root_values(mut self, allow: bool) -> Self {
        self.allow_multiple_root_values = allow;
        self
    }

    /// Number of bytes left between the current offset and the end of the
    /// input.
    pub fn bytes_remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Current position in the input slice.
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Number of currently open container frames.
    pub fn nesting_depth(&self) -> usize {
        self.frames.len()
    }

    /// Rewind to the beginning of the input.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.frames.clear();
        self.cached_state = None;
    }

    /// Replace the input and rewind.
    pub fn reset_with_data(&mut self, data: &'a [u8]) {
        self.data = data;
        self.reset();
    }

    fn err(&self, kind: ErrorKind) -> CborError {
        CborError::new(kind, self.offset)
    }

    fn mismatch(&self, expected: ReaderState, actual: ReaderState) -> CborError {
        self.err(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Classify the next data item without consuming bytes.
    ///
    /// The classification is cached until the next consuming read, so
    /// repeated peeks are free. At nesting depth zero an exhausted input
    /// yields [`ReaderState::Finished`]; inside a container it is an error.
    pub fn peek_state(&mut self) -> Result<ReaderState> {
        if let Some(state) = self.cached_state {
            return Ok(state);
        }
        let state = self.classify()?;
        self.cached_state = Some(state);
        Ok(state)
    }

    fn classify(&self) -> Result<ReaderState> {
        // a filled definite container ends without inspecting the byte
        if let Some(frame) = self.frames.last() {
            if let Some(len) = frame.len {
                if frame.items >= len {
                    return Ok(if frame.major == MajorType::Dict {
                        ReaderState::EndDict
                    } else {
                        ReaderState::EndArray
                    });
                }
            }
        }

        let Some(&byte) = self.data.get(self.offset) else {
            return if self.frames.is_empty() {
                Ok(ReaderState::Finished)
            } else {
                Err(self.err(ErrorKind::UnexpectedEndOfData))
            };
        };

        if byte == STOP_BYTE {
            let Some(frame) = self.frames.last() else {
                return Err(self.err(ErrorKind::UnexpectedBreak));
            };
            if !frame.is_indefinite() {
                return Err(self.err(ErrorKind::UnexpectedBreak));
            }
            return match frame.major {
                MajorType::Array => Ok(ReaderState::EndArray),
                MajorType::Dict => {
                    if frame.key_written {
                        // break between a key and its value
                        Err(self.err(ErrorKind::IncompleteContainer))
                    } else {
                        Ok(ReaderState::EndDict)
                    }
                }
                MajorType::ByteString => Ok(ReaderState::EndIndefiniteBytes),
                MajorType::TextString => Ok(ReaderState::EndIndefiniteStr),
                _ => unreachable!(),
            };
        }

        let (mt, ai) = split_initial_byte(byte);
        match mt {
            MAJOR_POS => Ok(ReaderState::UnsignedInteger),
            MAJOR_NEG => Ok(ReaderState::NegativeInteger),
            MAJOR_BYTES => Ok(if ai == INDEFINITE_SIZE {
                ReaderState::StartIndefiniteBytes
            } else {
                ReaderState::Bytes
            }),
            MAJOR_STR => Ok(if ai == INDEFINITE_SIZE {
                ReaderState::StartIndefiniteStr
            } else {
                ReaderState::Str
            }),
            MAJOR_ARRAY => Ok(ReaderState::StartArray),
            MAJOR_DICT => Ok(ReaderState::StartDict),
            MAJOR_TAG => Ok(ReaderState::Tag),
            MAJOR_LIT => match ai {
                LIT_FALSE | LIT_TRUE => Ok(ReaderState::Bool),
                LIT_NULL => Ok(ReaderState::Null),
                LIT_UNDEFINED => Ok(ReaderState::UndefinedValue),
                24 => Ok(ReaderState::SimpleValue),
                LIT_FLOAT16 => Ok(ReaderState::HalfFloat),
                LIT_FLOAT32 => Ok(ReaderState::SingleFloat),
                LIT_FLOAT64 => Ok(ReaderState::DoubleFloat),
                ai if ai < LIT_FALSE => Ok(ReaderState::SimpleValue),
                _ => Err(self.err(ErrorKind::InvalidSimpleValue)),
            },
            _ => unreachable!(),
        }
    }

    fn expect_state(&mut self, expected: ReaderState) -> Result<()> {
        let actual = self.peek_state()?;
        if actual != expected {
            return Err(self.mismatch(expected, actual));
        }
        Ok(())
    }

    /// Account for one complete data item in the enclosing frame.
    fn advance_container(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            if frame.major == MajorType::Dict {
                if frame.key_written {
                    frame.key_written = false;
                    frame.items += 1;
                } else {
                    frame.key_written = true;
                }
            } else {
                frame.items += 1;
            }
        }
        self.cached_state = None;
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let Some(slice) = self.data.get(self.offset..self.offset + N) else {
            return Err(self.err(ErrorKind::UnexpectedEndOfData));
        };
        let mut buf = [0u8; N];
        buf.copy_from_slice(slice);
        self.offset += N;
        Ok(buf)
    }

    fn take_slice(&mut self, len: u64) -> Result<&'a [u8]> {
        let data = self.data;
        let len = usize::try_from(len).map_err(|_| self.err(ErrorKind::UnexpectedEndOfData))?;
        let end = self
            .offset
            .checked_add(len)
            .ok_or_else(|| self.err(ErrorKind::UnexpectedEndOfData))?;
        let Some(slice) = data.get(self.offset..end) else {
            return Err(self.err(ErrorKind::UnexpectedEndOfData));
        };
        self.offset = end;
        Ok(slice)
    }

    /// Consume an item head of the given major type and decode its
    /// argument, `None` meaning indefinite length.
    ///
    /// Under strict or stricter conformance, non-minimal argument widths
    /// are rejected as `NonCanonical`.
    fn read_argument(&mut self, major: u8) -> Result<Option<u64>> {
        let start = self.offset;
        let Some(&byte) = self.data.get(self.offset) else {
            return Err(self.err(ErrorKind::UnexpectedEndOfData));
        };
        let (mt, ai) = split_initial_byte(byte);
        if mt != major {
            return Err(CborError::new(ErrorKind::InvalidCbor, start));
        }
        self.offset += 1;
        let minimal = self.mode.requires_minimal_arguments();
        let value = match ai {
            ai if ai < 24 => u64::from(ai),
            24 => {
                let value = u64::from(self.take::<1>()?[0]);
                if minimal && value < 24 {
                    return Err(CborError::new(ErrorKind::NonCanonical, start));
                }
                value
            }
            25 => {
                let value = u64::from(u16::from_be_bytes(self.take()?));
                if minimal && value <= 0xff {
                    return Err(CborError::new(ErrorKind::NonCanonical, start));
                }
                value
            }
            26 => {
                let value = u64::from(u32::from_be_bytes(self.take()?));
                if minimal && value <= 0xffff {
                    return Err(CborError::new(ErrorKind::NonCanonical, start));
                }
                value
            }
            27 => {
                let value = u64::from_be_bytes(self.take()?);
                if minimal && value <= 0xffff_ffff {
                    return Err(CborError::new(ErrorKind::NonCanonical, start));
                }
                value
            }
            INDEFINITE_SIZE => return Ok(None),
            _ => return Err(CborError::new(ErrorKind::InvalidCbor, start)),
        };
        Ok(Some(value))
    }

    /// Like [`read_argument`](Self::read_argument) but treating indefinite
    /// length as malformed.
    fn read_definite_argument(&mut self, major: u8) -> Result<u64> {
        let start = self.offset;
        match self.read_argument(major)? {
            Some(value) => Ok(value),
            None => Err(CborError::new(ErrorKind::InvalidCbor, start)),
        }
    }

    /// Read an unsigned integer of up to 64 bits.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.expect_state(ReaderState::UnsignedInteger)?;
        self.cached_state = None;
        let value = self.read_definite_argument(MAJOR_POS)?;
        self.advance_container();
        Ok(value)
    }

    /// Read a signed integer of up to 64 bits, from either integer major
    /// type.
    pub fn read_i64(&mut self) -> Result<i64> {
        let state = self.peek_state()?;
        match state {
            ReaderState::UnsignedInteger => {
                self.cached_state = None;
                let value = self.read_definite_argument(MAJOR_POS)?;
                let value = i64::try_from(value).map_err(|_| self.err(ErrorKind::Overflow))?;
                self.advance_container();
                Ok(value)
            }
            ReaderState::NegativeInteger => {
                self.cached_state = None;
                let value = self.read_definite_argument(MAJOR_NEG)?;
                if value > i64::MAX as u64 {
                    return Err(self.err(ErrorKind::Overflow));
                }
                self.advance_container();
                Ok(-1 - value as i64)
            }
            actual => Err(self.mismatch(ReaderState::UnsignedInteger, actual)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.read_u64()?;
        u8::try_from(value).map_err(|_| self.err(ErrorKind::Overflow))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let value = self.read_u64()?;
        u16::try_from(value).map_err(|_| self.err(ErrorKind::Overflow))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self.read_u64()?;
        u32::try_from(value).map_err(|_| self.err(ErrorKind::Overflow))
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        let value = self.read_i64()?;
        i8::try_from(value).map_err(|_| self.err(ErrorKind::Overflow))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let value = self.read_i64()?;
        i16::try_from(value).map_err(|_| self.err(ErrorKind::Overflow))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let value = self.read_i64()?;
        i32::try_from(value).map_err(|_| self.err(ErrorKind::Overflow))
    }

    /// Read an integer of arbitrary size.
    ///
    /// Accepts plain integers of both major types (including negative
    /// values whose magnitude exceeds `i64`) as well as tag 2 / tag 3
    /// bignums, whose byte-string content is interpreted as a big-endian
    /// magnitude.
    pub fn read_big_int(&mut self) -> Result<BigInt> {
        match self.peek_state()? {
            ReaderState::UnsignedInteger => Ok(BigInt::from(self.read_u64()?)),
            ReaderState::NegativeInteger => {
                // decode the argument once; -1 - n needs no second pass
                self.cached_state = None;
                let raw = self.read_definite_argument(MAJOR_NEG)?;
                self.advance_container();
                Ok(-(BigInt::from(raw) + 1u32))
            }
            ReaderState::Tag => {
                let start = self.offset;
                let tag = self.read_tag()?;
                match tag {
                    TAG_BIGNUM_POS => {
                        let bytes = self.read_bytes()?;
                        Ok(BigInt::from_bytes_be(Sign::Plus, &bytes))
                    }
                    TAG_BIGNUM_NEG => {
                        let bytes = self.read_bytes()?;
                        Ok(-(BigInt::from_bytes_be(Sign::Plus, &bytes) + 1u32))
                    }
                    _ => Err(CborError::new(
                        ErrorKind::TypeMismatch {
                            expected: ReaderState::UnsignedInteger,
                            actual: ReaderState::Tag,
                        },
                        start,
                    )),
                }
            }
            actual => Err(self.mismatch(ReaderState::UnsignedInteger, actual)),
        }
    }

    /// Read a byte string.
    ///
    /// An indefinite-length byte string is collapsed into a single buffer
    /// by concatenating its definite-length chunks up to the break byte; in
    /// canonical modes it is rejected instead.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let state = self.peek_state()?;
        if state == ReaderState::StartIndefiniteBytes {
            return self.read_indefinite_string(MAJOR_BYTES);
        }
        if state != ReaderState::Bytes {
            return Err(self.mismatch(ReaderState::Bytes, state));
        }
        self.cached_state = None;
        let len = self.read_definite_argument(MAJOR_BYTES)?;
        let bytes = self.take_slice(len)?.to_vec();
        self.advance_container();
        Ok(bytes)
    }

    /// Read a text string.
    ///
    /// Indefinite-length strings are collapsed like byte strings, with each
    /// chunk's UTF-8 validated in strict mode. The result is always
    /// validated — a Rust `String` cannot carry invalid UTF-8, so unlike
    /// the minimality checks this is not mode-gated.
    pub fn read_str(&mut self) -> Result<String> {
        let state = self.peek_state()?;
        if state == ReaderState::StartIndefiniteStr {
            let bytes = self.read_indefinite_string(MAJOR_STR)?;
            return String::from_utf8(bytes).map_err(|_| self.err(ErrorKind::InvalidUtf8));
        }
        if state != ReaderState::Str {
            return Err(self.mismatch(ReaderState::Str, state));
        }
        self.cached_state = None;
        let len = self.read_definite_argument(MAJOR_STR)?;
        let start = self.offset;
        let text = match std::str::from_utf8(self.take_slice(len)?) {
            Ok(text) => text.to_owned(),
            Err(_) => return Err(CborError::new(ErrorKind::InvalidUtf8, start)),
        };
        self.advance_container();
        Ok(text)
    }

    fn read_indefinite_string(&mut self, major: u8) -> Result<Vec<u8>> {
        if !self.mode.allows_indefinite_length() {
            return Err(self.err(ErrorKind::IndefiniteLengthNotAllowed));
        }
        self.offset += 1;
        self.cached_state = None;
        let mut result = Vec::new();
        loop {
            let Some(&byte) = self.data.get(self.offset) else {
                return Err(self.err(ErrorKind::UnexpectedEndOfData));
            };
            if byte == STOP_BYTE {
                self.offset += 1;
                break;
            }
            // chunks must be definite-length strings of the same major type
            if byte >> 5 != major {
                return Err(self.err(ErrorKind::InvalidCbor));
            }
            let len = self.read_definite_argument(major)?;
            let start = self.offset;
            let chunk = self.take_slice(len)?;
            if major == MAJOR_STR
                && self.mode.validates_utf8()
                && std::str::from_utf8(chunk).is_err()
            {
                return Err(CborError::new(ErrorKind::InvalidUtf8, start));
            }
            result.extend_from_slice(chunk);
        }
        self.advance_container();
        Ok(result)
    }

    /// Read the start of an array, returning its declared length or `None`
    /// for indefinite length.
    pub fn read_start_array(&mut self) -> Result<Option<u64>> {
        self.read_start_container(MajorType::Array, MAJOR_ARRAY, ReaderState::StartArray)
    }

    /// Read the end of an array, consuming the break byte of an indefinite
    /// one.
    pub fn read_end_array(&mut self) -> Result<()> {
        self.read_end_container(MajorType::Array, ReaderState::EndArray)
    }

    /// Read the start of a dict, returning its declared pair count or
    /// `None` for indefinite length.
    pub fn read_start_dict(&mut self) -> Result<Option<u64>> {
        self.read_start_container(MajorType::Dict, MAJOR_DICT, ReaderState::StartDict)
    }

    /// Read the end of a dict, consuming the break byte of an indefinite
    /// one.
    pub fn read_end_dict(&mut self) -> Result<()> {
        self.read_end_container(MajorType::Dict, ReaderState::EndDict)
    }

    fn read_start_container(
        &mut self,
        major: MajorType,
        major_bits: u8,
        expected: ReaderState,
    ) -> Result<Option<u64>> {
        self.expect_state(expected)?;
        if self.frames.len() >= self.max_nesting_depth {
            return Err(self.err(ErrorKind::NestingDepthExceeded));
        }
        if self.data.get(self.offset) == Some(&initial_byte(major_bits, INDEFINITE_SIZE)) {
            if !self.mode.allows_indefinite_length() {
                return Err(self.err(ErrorKind::IndefiniteLengthNotAllowed));
            }
            self.offset += 1;
            self.cached_state = None;
            self.frames.push(Frame::indefinite(major));
            return Ok(None);
        }
        self.cached_state = None;
        let len = self.read_definite_argument(major_bits)?;
        self.frames.push(Frame::definite(major, len));
        Ok(Some(len))
    }

    fn read_end_container(&mut self, major: MajorType, expected: ReaderState) -> Result<()> {
        self.expect_state(expected)?;
        let Some(frame) = self.frames.last() else {
            return Err(self.err(ErrorKind::InvalidState));
        };
        if frame.major != major {
            return Err(self.err(ErrorKind::InvalidState));
        }
        if frame.is_indefinite() {
            if self.data.get(self.offset) != Some(&STOP_BYTE) {
                return Err(self.err(ErrorKind::MissingBreak));
            }
            self.offset += 1;
        }
        self.frames.pop();
        self.advance_container();
        Ok(())
    }

    /// Read a semantic tag.
    ///
    /// Symmetric with [`CborWriter::write_tag`](crate::CborWriter::write_tag),
    /// this does **not** advance the enclosing container — the tagged
    /// content does.
    pub fn read_tag(&mut self) -> Result<u64> {
        self.expect_state(ReaderState::Tag)?;
        self.cached_state = None;
        self.read_definite_argument(MAJOR_TAG)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        self.expect_state(ReaderState::Bool)?;
        self.cached_state = None;
        let lit = self.data[self.offset] & 0x1f;
        self.offset += 1;
        self.advance_container();
        Ok(lit == LIT_TRUE)
    }

    pub fn read_null(&mut self) -> Result<()> {
        self.expect_state(ReaderState::Null)?;
        self.cached_state = None;
        self.offset += 1;
        self.advance_container();
        Ok(())
    }

    pub fn read_undefined(&mut self) -> Result<()> {
        self.expect_state(ReaderState::UndefinedValue)?;
        self.cached_state = None;
        self.offset += 1;
        self.advance_container();
        Ok(())
    }

    /// Consume a null value if one is next, leaving the stream untouched
    /// otherwise.
    pub fn try_read_null(&mut self) -> Result<bool> {
        if self.peek_state()? == ReaderState::Null {
            self.read_null()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Read a simple value.
    ///
    /// The assigned values 20–23 (false, true, null, undefined) may be read
    /// through this operation as well. Two-byte simple values below 32 are
    /// rejected as `NonCanonical` in strict mode.
    pub fn read_simple(&mut self) -> Result<u8> {
        match self.peek_state()? {
            ReaderState::SimpleValue
            | ReaderState::Bool
            | ReaderState::Null
            | ReaderState::UndefinedValue => {}
            actual => return Err(self.mismatch(ReaderState::SimpleValue, actual)),
        }
        self.cached_state = None;
        let start = self.offset;
        let ai = self.data[self.offset] & 0x1f;
        self.offset += 1;
        let value = if ai == 24 {
            let Some(&value) = self.data.get(self.offset) else {
                return Err(self.err(ErrorKind::UnexpectedEndOfData));
            };
            self.offset += 1;
            if self.mode.requires_minimal_arguments() && value < 32 {
                return Err(CborError::new(ErrorKind::NonCanonical, start));
            }
            value
        } else {
            ai
        };
        self.advance_container();
        Ok(value)
    }

    /// Read a half-precision float, widened to `f32`.
    pub fn read_f16(&mut self) -> Result<f32> {
        self.expect_state(ReaderState::HalfFloat)?;
        self.cached_state = None;
        self.offset += 1;
        let bits = u16::from_be_bytes(self.take()?);
        self.advance_container();
        Ok(f16_bits_to_f32(bits))
    }

    /// Read a single-precision float.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.expect_state(ReaderState::SingleFloat)?;
        self.cached_state = None;
        self.offset += 1;
        let bits = u32::from_be_bytes(self.take()?);
        self.advance_container();
        Ok(f32::from_bits(bits))
    }

    /// Read a double-precision float.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.expect_state(ReaderState::DoubleFloat)?;
        self.cached_state = None;
        self.offset += 1;
        let bits = u64::from_be_bytes(self.take()?);
        self.advance_container();
        Ok(f64::from_bits(bits))
    }

    /// Read a float of any of the three widths, widened to `f64`.
    pub fn read_float(&mut self) -> Result<f64> {
        match self.peek_state()? {
            ReaderState::HalfFloat => Ok(f64::from(self.read_f16()?)),
            ReaderState::SingleFloat => Ok(f64::from(self.read_f32()?)),
            ReaderState::DoubleFloat => self.read_f64(),
            actual => Err(self.mismatch(ReaderState::DoubleFloat, actual)),
        }
    }

    /// Read tag 0 followed by an RFC 3339 date/time string.
    pub fn read_datetime(&mut self) -> Result<DateTime<FixedOffset>> {
        let start = self.offset;
        let tag = self.read_tag()?;
        if tag != TAG_ISO8601 {
            return Err(CborError::new(ErrorKind::InvalidCbor, start));
        }
        let text = self.read_str()?;
        DateTime::parse_from_rfc3339(&text).map_err(|_| CborError::new(ErrorKind::InvalidCbor, start))
    }

    /// Read tag 1 followed by an epoch-based time, either an integer number
    /// of seconds or a float with fractional seconds.
    pub fn read_unix_time(&mut self) -> Result<DateTime<Utc>> {
        let start = self.offset;
        let tag = self.read_tag()?;
        if tag != TAG_EPOCH {
            return Err(CborError::new(ErrorKind::InvalidCbor, start));
        }
        match self.peek_state()? {
            ReaderState::UnsignedInteger | ReaderState::NegativeInteger => {
                let secs = self.read_i64()?;
                DateTime::from_timestamp(secs, 0).ok_or(CborError::new(ErrorKind::Overflow, start))
            }
            ReaderState::HalfFloat | ReaderState::SingleFloat | ReaderState::DoubleFloat => {
                let seconds = self.read_float()?;
                Ok(DateTime::from_timestamp_nanos((seconds * 1e9) as i64))
            }
            actual => Err(self.mismatch(ReaderState::UnsignedInteger, actual)),
        }
    }

    /// Skip the next data item, descending into arrays, dicts and tag
    /// chains structurally.
    ///
    /// ```
    /// use cbor_stream::CborReader;
    ///
    /// // [1, {"nested": [2, 3]}, 4]
    /// let mut reader = CborReader::new(&[
    ///     0x83, 0x01, 0xa1, 0x66, b'n', b'e', b's', b't', b'e', b'd', 0x82, 0x02, 0x03, 0x04,
    /// ]);
    /// reader.read_start_array().unwrap();
    /// assert_eq!(reader.read_u64().unwrap(), 1);
    /// reader.skip_value().unwrap();
    /// assert_eq!(reader.read_u64().unwrap(), 4);
    /// reader.read_end_array().unwrap();
    /// ```
    pub fn skip_value(&mut self) -> Result<()> {
        while self.peek_state()? == ReaderState::Tag {
            self.read_tag()?;
        }
        match self.peek_state()? {
            ReaderState::UnsignedInteger => {
                self.cached_state = None;
                self.read_definite_argument(MAJOR_POS)?;
                self.advance_container();
                Ok(())
            }
            ReaderState::NegativeInteger => {
                self.cached_state = None;
                self.read_definite_argument(MAJOR_NEG)?;
                self.advance_container();
                Ok(())
            }
            ReaderState::Bytes => self.skip_definite_string(MAJOR_BYTES),
            ReaderState::Str => self.skip_definite_string(MAJOR_STR),
            ReaderState::StartIndefiniteBytes => self.skip_indefinite_string(MAJOR_BYTES),
            ReaderState::StartIndefiniteStr => self.skip_indefinite_string(MAJOR_STR),
            ReaderState::StartArray => self.skip_array(),
            ReaderState::StartDict => self.skip_dict(),
            ReaderState::Bool => self.read_bool().map(drop),
            ReaderState::Null => self.read_null(),
            ReaderState::UndefinedValue => self.read_undefined(),
            ReaderState::SimpleValue => self.read_simple().map(drop),
            ReaderState::HalfFloat => self.read_f16().map(drop),
            ReaderState::SingleFloat => self.read_f32().map(drop),
            ReaderState::DoubleFloat => self.read_f64().map(drop),
            _ => Err(self.err(ErrorKind::InvalidState)),
        }
    }

    fn skip_definite_string(&mut self, major: u8) -> Result<()> {
        self.cached_state = None;
        let len = self.read_definite_argument(major)?;
        self.take_slice(len)?;
        self.advance_container();
        Ok(())
    }

    fn skip_indefinite_string(&mut self, major: u8) -> Result<()> {
        if !self.mode.allows_indefinite_length() {
            return Err(self.err(ErrorKind::IndefiniteLengthNotAllowed));
        }
        self.offset += 1;
        self.cached_state = None;
        loop {
            let Some(&byte) = self.data.get(self.offset) else {
                return Err(self.err(ErrorKind::UnexpectedEndOfData));
            };
            if byte == STOP_BYTE {
                self.offset += 1;
                break;
            }
            if byte >> 5 != major {
                return Err(self.err(ErrorKind::InvalidCbor));
            }
            let len = self.read_definite_argument(major)?;
            self.take_slice(len)?;
        }
        self.advance_container();
        Ok(())
    }

    fn skip_array(&mut self) -> Result<()> {
        match self.read_start_array()? {
            None => {
                while self.peek_state()? != ReaderState::EndArray {
                    self.skip_value()?;
                }
            }
            Some(len) => {
                for _ in 0..len {
                    self.skip_value()?;
                }
            }
        }
        self.read_end_array()
    }

    fn skip_dict(&mut self) -> Result<()> {
        match self.read_start_dict()? {
            None => {
                while self.peek_state()? != ReaderState::EndDict {
                    self.skip_value()?;
                    self.skip_value()?;
                }
            }
            Some(len) => {
                for _ in 0..len {
                    self.skip_value()?;
                    self.skip_value()?;
                }
            }
        }
        self.read_end_dict()
    }

    /// Skip the next data item and return a copy of its exact encoding.
    pub fn read_encoded_value(&mut self) -> Result<Vec<u8>> {
        let start = self.offset;
        self.skip_value()?;
        Ok(self.data[start..self.offset].to_vec())
    }
}
