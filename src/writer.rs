use crate::{
    codec::{f16_bits_to_f32, f32_to_f16_bits, initial_byte, write_info, Frame},
    constants::*,
    error::{CborError, ErrorKind, Result},
    ConformanceMode, MajorType,
};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use num_bigint::{BigInt, Sign};

/// Streaming CBOR encoder.
///
/// The writer appends data items to a growable byte buffer while a stack of
/// open-container frames enforces nesting depth, conformance-mode
/// restrictions and definite-length item counts. Argument widths are always
/// minimal; the configured [`ConformanceMode`] only gates whether
/// indefinite-length items may be started.
///
/// ```
/// use cbor_stream::CborWriter;
///
/// let mut writer = CborWriter::new();
/// writer.write_start_array(3).unwrap();
/// writer.write_u64(1).unwrap();
/// writer.write_u64(2).unwrap();
/// writer.write_u64(3).unwrap();
/// writer.write_end_array().unwrap();
///
/// assert_eq!(writer.as_slice(), [0x83, 0x01, 0x02, 0x03]);
/// ```
#[derive(Debug)]
pub struct CborWriter {
    buffer: Vec<u8>,
    mode: ConformanceMode,
    max_nesting_depth: usize,
    frames: Vec<Frame>,
    // set once a complete item has been written at depth zero; multiple
    // root items are currently always permitted
    #[allow(dead_code)]
    root_value_written: bool,
    #[allow(dead_code)]
    allow_multiple_root_values: bool,
}

impl Default for CborWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CborWriter {
    /// Create a writer with an empty buffer, lax conformance and the default
    /// maximum nesting depth of 64.
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(256),
            mode: ConformanceMode::Lax,
            max_nesting_depth: 64,
            frames: Vec::with_capacity(16),
            root_value_written: false,
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

    /// Pre-allocate the output buffer.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.buffer = Vec::with_capacity(capacity);
        self
    }

    /// Accept more than one data item at nesting depth zero.
    pub fn with_multiple_root_values(mut self, allow: bool) -> Self {
        self.allow_multiple_root_values = allow;
        self
    }

    /// The encoded bytes written so far.
    ///
    /// The returned slice aliases the internal buffer; take a fresh view
    /// after every mutation, or use [`to_vec`](Self::to_vec) for a snapshot.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// A copy of the encoded bytes written so far.
    pub fn to_vec(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of currently open container frames.
    pub fn nesting_depth(&self) -> usize {
        self.frames.len()
    }

    /// Clear the buffer and all open frames for reuse.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.frames.clear();
        self.root_value_written = false;
    }

    fn err(&self, kind: ErrorKind) -> CborError {
        CborError::new(kind, self.buffer.len())
    }

    fn check_nesting_depth(&self) -> Result<()> {
        if self.frames.len() >= self.max_nesting_depth {
            Err(self.err(ErrorKind::NestingDepthExceeded))
        } else {
            Ok(())
        }
    }

    /// Account for one complete data item in the enclosing frame.
    fn advance_container(&mut self) {
        match self.frames.last_mut() {
            None => self.root_value_written = true,
            Some(frame) if frame.major == MajorType::Dict => {
                if frame.key_written {
                    frame.key_written = false;
                    frame.items += 1;
                } else {
                    frame.key_written = true;
                }
            }
            Some(frame) => frame.items += 1,
        }
    }

    /// Write an unsigned integer of up to 64 bits.
    ///
    /// ```
    /// # use cbor_stream::CborWriter;
    /// let mut writer = CborWriter::new();
    /// writer.write_u64(1000).unwrap();
    /// # assert_eq!(writer.as_slice(), [0x19, 0x03, 0xe8]);
    /// ```
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        write_info(&mut self.buffer, MAJOR_POS, value);
        self.advance_container();
        Ok(())
    }

    /// Write a signed integer of up to 64 bits.
    ///
    /// Negative values are emitted under major type 1, which represents
    /// `-1 - n`.
    ///
    /// ```
    /// # use cbor_stream::CborWriter;
    /// let mut writer = CborWriter::new();
    /// writer.write_i64(-100).unwrap();
    /// # assert_eq!(writer.as_slice(), [0x38, 0x63]);
    /// ```
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        if value >= 0 {
            write_info(&mut self.buffer, MAJOR_POS, value as u64);
        } else {
            write_info(&mut self.buffer, MAJOR_NEG, (-1 - value) as u64);
        }
        self.advance_container();
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_u64(value.into())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_u64(value.into())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_u64(value.into())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_i64(value.into())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_i64(value.into())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_i64(value.into())
    }

    /// Write an integer of arbitrary size.
    ///
    /// Values that fit into 64 bits are written as plain integers, anything
    /// larger becomes a bignum: tag 2 (positive) or tag 3 (negative)
    /// followed by a byte string holding the big-endian magnitude, with the
    /// usual `-1 - n` offset for tag 3.
    pub fn write_big_int(&mut self, value: &BigInt) -> Result<()> {
        if let Ok(small) = i64::try_from(value) {
            return self.write_i64(small);
        }
        if let Ok(small) = u64::try_from(value) {
            return self.write_u64(small);
        }
        let (tag, magnitude) = if value.sign() == Sign::Minus {
            (TAG_BIGNUM_NEG, value.magnitude().clone() - 1u32)
        } else {
            (TAG_BIGNUM_POS, value.magnitude().clone())
        };
        self.write_tag(tag)?;
        self.write_bytes(&magnitude.to_bytes_be())
    }

    /// Write an optional integer of arbitrary size, `None` becoming null.
    pub fn write_opt_big_int(&mut self, value: Option<&BigInt>) -> Result<()> {
        match value {
            Some(value) => self.write_big_int(value),
            None => self.write_null(),
        }
    }

    /// Write a definite-length byte string.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        write_info(&mut self.buffer, MAJOR_BYTES, value.len() as u64);
        self.buffer.extend_from_slice(value);
        self.advance_container();
        Ok(())
    }

    /// Write a definite-length text string.
    ///
    /// The length prefix counts UTF-8 bytes, not characters.
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        write_info(&mut self.buffer, MAJOR_STR, value.len() as u64);
        self.buffer.extend_from_slice(value.as_bytes());
        self.advance_container();
        Ok(())
    }

    /// Start a definite-length array of `len` items.
    ///
    /// Every item written afterwards counts towards `len`;
    /// [`write_end_array`](Self::write_end_array) verifies the count.
    pub fn write_start_array(&mut self, len: u64) -> Result<()> {
        self.check_nesting_depth()?;
        write_info(&mut self.buffer, MAJOR_ARRAY, len);
        self.frames.push(Frame::definite(MajorType::Array, len));
        Ok(())
    }

    /// Start an indefinite-length array, terminated by
    /// [`write_end_array`](Self::write_end_array).
    pub fn write_start_indefinite_array(&mut self) -> Result<()> {
        self.start_indefinite(MajorType::Array)
    }

    /// End the innermost array.
    ///
    /// For indefinite arrays this emits the break byte; for definite arrays
    /// it verifies that exactly the declared number of items has been
    /// written.
    pub fn write_end_array(&mut self) -> Result<()> {
        self.end_container(MajorType::Array)
    }

    /// Start a definite-length dict of `len` key/value pairs.
    pub fn write_start_dict(&mut self, len: u64) -> Result<()> {
        self.check_nesting_depth()?;
        write_info(&mut self.buffer, MAJOR_DICT, len);
        self.frames.push(Frame::definite(MajorType::Dict, len));
        Ok(())
    }

    /// Start an indefinite-length dict, terminated by
    /// [`write_end_dict`](Self::write_end_dict).
    pub fn write_start_indefinite_dict(&mut self) -> Result<()> {
        self.start_indefinite(MajorType::Dict)
    }

    /// End the innermost dict.
    ///
    /// Fails with `IncompleteContainer` if the last pair has a key but no
    /// value, and verifies the declared pair count for definite dicts.
    pub fn write_end_dict(&mut self) -> Result<()> {
        self.end_container(MajorType::Dict)
    }

    fn start_indefinite(&mut self, major: MajorType) -> Result<()> {
        if !self.mode.allows_indefinite_length() {
            return Err(self.err(ErrorKind::IndefiniteLengthNotAllowed));
        }
        self.check_nesting_depth()?;
        self.buffer.push(initial_byte(major as u8, INDEFINITE_SIZE));
        self.frames.push(Frame::indefinite(major));
        Ok(())
    }

    fn end_container(&mut self, major: MajorType) -> Result<()> {
        let frame = match self.frames.last() {
            Some(frame) if frame.major == major => *frame,
            _ => return Err(self.err(ErrorKind::InvalidState)),
        };
        if frame.key_written {
            return Err(self.err(ErrorKind::IncompleteContainer));
        }
        match frame.len {
            None => self.buffer.push(STOP_BYTE),
            Some(len) if frame.items < len => {
                return Err(self.err(ErrorKind::IncompleteContainer))
            }
            Some(len) if frame.items > len => return Err(self.err(ErrorKind::ExtraItems)),
            Some(_) => {}
        }
        self.frames.pop();
        self.advance_container();
        Ok(())
    }

    /// Start an indefinite-length byte string composed of definite-length
    /// chunks.
    ///
    /// ```
    /// # use cbor_stream::CborWriter;
    /// let mut writer = CborWriter::new();
    /// writer.write_start_indefinite_bytes().unwrap();
    /// writer.write_bytes_chunk(&[1, 2]).unwrap();
    /// writer.write_bytes_chunk(&[3]).unwrap();
    /// writer.write_end_indefinite_bytes().unwrap();
    /// # assert_eq!(writer.as_slice(), [0x5f, 0x42, 1, 2, 0x41, 3, 0xff]);
    /// ```
    pub fn write_start_indefinite_bytes(&mut self) -> Result<()> {
        self.start_indefinite(MajorType::ByteString)
    }

    /// Write one definite-length chunk of the open indefinite byte string.
    ///
    /// Chunks do not advance the enclosing container; only the terminating
    /// [`write_end_indefinite_bytes`](Self::write_end_indefinite_bytes)
    /// completes the data item.
    pub fn write_bytes_chunk(&mut self, value: &[u8]) -> Result<()> {
        self.check_chunk_frame(MajorType::ByteString)?;
        write_info(&mut self.buffer, MAJOR_BYTES, value.len() as u64);
        self.buffer.extend_from_slice(value);
        Ok(())
    }

    /// Terminate the open indefinite byte string.
    pub fn write_end_indefinite_bytes(&mut self) -> Result<()> {
        self.end_indefinite_string(MajorType::ByteString)
    }

    /// Start an indefinite-length text string composed of definite-length
    /// chunks.
    pub fn write_start_indefinite_str(&mut self) -> Result<()> {
        self.start_indefinite(MajorType::TextString)
    }

    /// Write one definite-length chunk of the open indefinite text string.
    pub fn write_str_chunk(&mut self, value: &str) -> Result<()> {
        self.check_chunk_frame(MajorType::TextString)?;
        write_info(&mut self.buffer, MAJOR_STR, value.len() as u64);
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Terminate the open indefinite text string.
    pub fn write_end_indefinite_str(&mut self) -> Result<()> {
        self.end_indefinite_string(MajorType::TextString)
    }

    fn check_chunk_frame(&self, major: MajorType) -> Result<()> {
        match self.frames.last() {
            Some(frame) if frame.major == major && frame.is_indefinite() => Ok(()),
            _ => Err(self.err(ErrorKind::InvalidState)),
        }
    }

    fn end_indefinite_string(&mut self, major: MajorType) -> Result<()> {
        self.check_chunk_frame(major)?;
        self.buffer.push(STOP_BYTE);
        self.frames.pop();
        self.advance_container();
        Ok(())
    }

    /// Write a semantic tag.
    ///
    /// A tag annotates the next data item, so this is the one operation that
    /// does **not** advance the enclosing container — the tagged content
    /// does. Tag chains are permitted.
    pub fn write_tag(&mut self, tag: u64) -> Result<()> {
        write_info(&mut self.buffer, MAJOR_TAG, tag);
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        let lit = if value { LIT_TRUE } else { LIT_FALSE };
        self.buffer.push(initial_byte(MAJOR_LIT, lit));
        self.advance_container();
        Ok(())
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.buffer.push(initial_byte(MAJOR_LIT, LIT_NULL));
        self.advance_container();
        Ok(())
    }

    pub fn write_undefined(&mut self) -> Result<()> {
        self.buffer.push(initial_byte(MAJOR_LIT, LIT_UNDEFINED));
        self.advance_container();
        Ok(())
    }

    /// Write a simple value.
    ///
    /// Values below 24 use the immediate form, values from 32 the one-byte
    /// form. The band 24–31 is reserved by RFC 8949 and rejected. The
    /// assigned values 20–23 (false, true, null, undefined) are permitted
    /// through this operation as well.
    pub fn write_simple(&mut self, value: u8) -> Result<()> {
        if (24..32).contains(&value) {
            return Err(self.err(ErrorKind::InvalidSimpleValue));
        }
        if value < 24 {
            self.buffer.push(initial_byte(MAJOR_LIT, value));
        } else {
            self.buffer.push(initial_byte(MAJOR_LIT, 24));
            self.buffer.push(value);
        }
        self.advance_container();
        Ok(())
    }

    /// Write a half-precision float, narrowing the given value.
    ///
    /// Narrowing truncates: subnormal results flush to zero and overflow
    /// clamps to infinity. Use [`write_float`](Self::write_float) to pick a
    /// width that is guaranteed lossless.
    pub fn write_f16(&mut self, value: f32) -> Result<()> {
        self.buffer.push(initial_byte(MAJOR_LIT, LIT_FLOAT16));
        self.buffer
            .extend_from_slice(&f32_to_f16_bits(value).to_be_bytes());
        self.advance_container();
        Ok(())
    }

    /// Write a single-precision float.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.buffer.push(initial_byte(MAJOR_LIT, LIT_FLOAT32));
        self.buffer.extend_from_slice(&value.to_bits().to_be_bytes());
        self.advance_container();
        Ok(())
    }

    /// Write a double-precision float.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.buffer.push(initial_byte(MAJOR_LIT, LIT_FLOAT64));
        self.buffer.extend_from_slice(&value.to_bits().to_be_bytes());
        self.advance_container();
        Ok(())
    }

    /// Write a float using the narrowest width that round-trips exactly.
    ///
    /// NaN always takes the 64-bit form so that no payload bits are lost.
    ///
    /// ```
    /// # use cbor_stream::CborWriter;
    /// let mut writer = CborWriter::new();
    /// writer.write_float(1.5).unwrap();
    /// writer.write_float(100000.0).unwrap();
    /// writer.write_float(1.1).unwrap();
    /// assert_eq!(
    ///     writer.as_slice()[..3],
    ///     [0xf9, 0x3e, 0x00]
    /// );
    /// ```
    pub fn write_float(&mut self, value: f64) -> Result<()> {
        let narrow = value as f32;
        if f64::from(narrow) == value {
            let half = f32_to_f16_bits(narrow);
            if f16_bits_to_f32(half) == narrow && !value.is_nan() {
                return self.write_f16(narrow);
            }
            return self.write_f32(narrow);
        }
        self.write_f64(value)
    }

    /// Write tag 0 followed by the RFC 3339 rendering of the given instant,
    /// with subsecond digits only where needed.
    pub fn write_datetime(&mut self, value: &DateTime<FixedOffset>) -> Result<()> {
        self.write_tag(TAG_ISO8601)?;
        self.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    /// Write tag 1 followed by the epoch-based time: an integer when the
    /// instant falls on a whole second, a double otherwise.
    pub fn write_unix_time(&mut self, value: &DateTime<Utc>) -> Result<()> {
        self.write_tag(TAG_EPOCH)?;
        let nanos = value.timestamp_subsec_nanos();
        if nanos == 0 {
            self.write_i64(value.timestamp())
        } else {
            self.write_f64(value.timestamp() as f64 + f64::from(nanos) / 1e9)
        }
    }

    /// Write tag 32 followed by the given URI as a text string.
    pub fn write_uri(&mut self, value: &str) -> Result<()> {
        self.write_tag(TAG_URI)?;
        self.write_str(value)
    }

    /// Write the self-described CBOR tag (55799).
    ///
    /// Like any tag this annotates the following data item.
    pub fn write_self_described_cbor(&mut self) -> Result<()> {
        self.write_tag(TAG_CBOR_MARKER)
    }

    /// Write tag 24 followed by a byte string holding pre-encoded CBOR.
    pub fn write_encoded_cbor(&mut self, value: &[u8]) -> Result<()> {
        self.write_tag(TAG_CBOR_ITEM)?;
        self.write_bytes(value)
    }

    /// Append raw bytes without any framing or bookkeeping.
    ///
    /// Misuse breaks every invariant this writer maintains; the bytes must
    /// amount to zero complete data items (e.g. a hand-rolled item head) or
    /// be accounted for by other means.
    pub fn write_raw(&mut self, value: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(value);
        Ok(())
    }
}
