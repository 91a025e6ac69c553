//! Binary buffers for the wire side of record codecs
//!
//! [`ByteBuf`] appends, [`ByteReader`] consumes. Both agree on a small set of
//! layouts:
//!
//! | Layout | Encoding |
//! |--------|----------|
//! | bool | 1 byte, 0 = false, anything else = true |
//! | i16 / i32 / i64 / f32 / f64 | fixed width, big-endian |
//! | VarInt (i32) | 7-bit groups, least significant first, high bit = more, max 5 bytes |
//! | VarLong (i64) | same as VarInt, max 10 bytes |
//! | string | VarInt byte length, then UTF-8 bytes |
//! | byte array | VarInt length, then raw bytes |
//!
//! Negative VarInts are written as their two's-complement unsigned value,
//! so they always take the maximum width.
//!
//! There is no framing: the reader has no idea where one value ends and the
//! next begins except through the order in which values are read.

use crate::error::BufferError;
use crate::limits::CodecLimits;
use byteorder::{BigEndian, ByteOrder};

/// Maximum encoded width of a VarInt
pub const VAR_INT_MAX_BYTES: usize = 5;

/// Maximum encoded width of a VarLong
pub const VAR_LONG_MAX_BYTES: usize = 10;

const CONTINUE_BIT: u8 = 0x80;
const SEGMENT_BITS: u8 = 0x7F;

/// Growable output buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuf {
    bytes: Vec<u8>,
}

impl ByteBuf {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Written bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the written bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    /// Reader over the written bytes with default limits
    pub fn reader(&self) -> ByteReader<'_> {
        ByteReader::new(&self.bytes)
    }

    /// Write a `bool`
    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    /// Write a `u8`
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Write an `i16`
    pub fn write_i16(&mut self, value: i16) {
        let mut tmp = [0u8; 2];
        BigEndian::write_i16(&mut tmp, value);
        self.bytes.extend_from_slice(&tmp);
    }

    /// Write an `i32`
    pub fn write_i32(&mut self, value: i32) {
        let mut tmp = [0u8; 4];
        BigEndian::write_i32(&mut tmp, value);
        self.bytes.extend_from_slice(&tmp);
    }

    /// Write an `i64`
    pub fn write_i64(&mut self, value: i64) {
        let mut tmp = [0u8; 8];
        BigEndian::write_i64(&mut tmp, value);
        self.bytes.extend_from_slice(&tmp);
    }

    /// Write a `f32`
    pub fn write_f32(&mut self, value: f32) {
        let mut tmp = [0u8; 4];
        BigEndian::write_f32(&mut tmp, value);
        self.bytes.extend_from_slice(&tmp);
    }

    /// Write a `f64`
    pub fn write_f64(&mut self, value: f64) {
        let mut tmp = [0u8; 8];
        BigEndian::write_f64(&mut tmp, value);
        self.bytes.extend_from_slice(&tmp);
    }

    /// Write a VarInt
    pub fn write_var_int(&mut self, value: i32) {
        let mut rest = value as u32;
        loop {
            if rest & !(SEGMENT_BITS as u32) == 0 {
                self.bytes.push(rest as u8);
                return;
            }
            self.bytes.push((rest as u8 & SEGMENT_BITS) | CONTINUE_BIT);
            rest >>= 7;
        }
    }

    /// Write a VarLong
    pub fn write_var_long(&mut self, value: i64) {
        let mut rest = value as u64;
        loop {
            if rest & !(SEGMENT_BITS as u64) == 0 {
                self.bytes.push(rest as u8);
                return;
            }
            self.bytes.push((rest as u8 & SEGMENT_BITS) | CONTINUE_BIT);
            rest >>= 7;
        }
    }

    /// Write a collection length as a VarInt
    ///
    /// Lengths beyond `i32::MAX` cannot be represented on the wire. They are
    /// clamped, and a stream written that way is corrupt: the elements that
    /// follow no longer match the count.
    pub fn write_length(&mut self, len: usize) {
        debug_assert!(len <= i32::MAX as usize, "length {} exceeds VarInt range", len);
        self.write_var_int(i32::try_from(len).unwrap_or(i32::MAX));
    }

    /// Write a length-prefixed UTF-8 string
    pub fn write_utf(&mut self, value: &str) {
        self.write_byte_array(value.as_bytes());
    }

    /// Write a length-prefixed byte array
    pub fn write_byte_array(&mut self, value: &[u8]) {
        self.write_length(value.len());
        self.bytes.extend_from_slice(value);
    }
}

impl From<ByteBuf> for Vec<u8> {
    fn from(buf: ByteBuf) -> Self {
        buf.bytes
    }
}

/// Cursor over borrowed bytes
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    limits: CodecLimits,
}

impl<'a> ByteReader<'a> {
    /// Reader with default limits
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_limits(bytes, CodecLimits::default())
    }

    /// Reader with explicit limits
    pub fn with_limits(bytes: &'a [u8], limits: CodecLimits) -> Self {
        Self {
            bytes,
            pos: 0,
            limits,
        }
    }

    /// Limits in effect for this reader
    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Check if every byte has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], BufferError> {
        if self.remaining() < n {
            return Err(BufferError::Underrun {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a `bool`
    pub fn read_bool(&mut self) -> Result<bool, BufferError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a `u8`
    pub fn read_u8(&mut self) -> Result<u8, BufferError> {
        Ok(self.take(1)?[0])
    }

    /// Read an `i16`
    pub fn read_i16(&mut self) -> Result<i16, BufferError> {
        Ok(BigEndian::read_i16(self.take(2)?))
    }

    /// Read an `i32`
    pub fn read_i32(&mut self) -> Result<i32, BufferError> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    /// Read an `i64`
    pub fn read_i64(&mut self) -> Result<i64, BufferError> {
        Ok(BigEndian::read_i64(self.take(8)?))
    }

    /// Read a `f32`
    pub fn read_f32(&mut self) -> Result<f32, BufferError> {
        Ok(BigEndian::read_f32(self.take(4)?))
    }

    /// Read a `f64`
    pub fn read_f64(&mut self) -> Result<f64, BufferError> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Read a VarInt
    pub fn read_var_int(&mut self) -> Result<i32, BufferError> {
        let mut result: u32 = 0;
        for i in 0..VAR_INT_MAX_BYTES {
            let byte = self.read_u8()?;
            result |= ((byte & SEGMENT_BITS) as u32) << (7 * i);
            if byte & CONTINUE_BIT == 0 {
                return Ok(result as i32);
            }
        }
        Err(BufferError::VarIntTooLong {
            max_bytes: VAR_INT_MAX_BYTES,
        })
    }

    /// Read a VarLong
    pub fn read_var_long(&mut self) -> Result<i64, BufferError> {
        let mut result: u64 = 0;
        for i in 0..VAR_LONG_MAX_BYTES {
            let byte = self.read_u8()?;
            result |= ((byte & SEGMENT_BITS) as u64) << (7 * i);
            if byte & CONTINUE_BIT == 0 {
                return Ok(result as i64);
            }
        }
        Err(BufferError::VarIntTooLong {
            max_bytes: VAR_LONG_MAX_BYTES,
        })
    }

    /// Read a collection length, bounded by `max_collection_len`
    pub fn read_length(&mut self) -> Result<usize, BufferError> {
        let max = self.limits.max_collection_len;
        self.read_bounded_length(max)
    }

    /// Read a length-prefixed UTF-8 string, bounded by `max_string_bytes`
    pub fn read_utf(&mut self) -> Result<String, BufferError> {
        let bytes = self.read_byte_slice(self.limits.max_string_bytes)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| BufferError::InvalidUtf8)
    }

    /// Read a length-prefixed byte array, bounded by `max_collection_len`
    pub fn read_byte_array(&mut self) -> Result<Vec<u8>, BufferError> {
        let max = self.limits.max_collection_len;
        Ok(self.read_byte_slice(max)?.to_vec())
    }

    fn read_byte_slice(&mut self, max: usize) -> Result<&'a [u8], BufferError> {
        let len = self.read_bounded_length(max)?;
        self.take(len)
    }

    fn read_bounded_length(&mut self, max: usize) -> Result<usize, BufferError> {
        let length = self.read_var_int()?;
        match usize::try_from(length) {
            Ok(len) if len <= max => Ok(len),
            _ => Err(BufferError::LengthOutOfBounds {
                length: i64::from(length),
                max,
            }),
        }
    }
}
