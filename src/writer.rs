//! Bramble encoder.

use crate::error::Result;
use crate::types::{
    zigzag_encode, Options, VARINT_SINGLE_BYTE_MAX, VARINT_U128_TAG, VARINT_U16_TAG,
    VARINT_U32_TAG, VARINT_U64_TAG,
};

const INITIAL_CAPACITY: usize = 256;

/// Writer encodes Bramble data into a binary buffer.
///
/// All multi-byte values are written little-endian.
pub struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    /// Creates a new writer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a new writer with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Returns the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the encoded bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Resets the writer for reuse.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Writes a raw byte.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.buffer.push(value);
        Ok(())
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Writes an unsigned 16-bit integer (little-endian).
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes an unsigned 32-bit integer (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes an unsigned 64-bit integer (little-endian).
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes an unsigned 128-bit integer (little-endian).
    pub fn write_u128(&mut self, value: u128) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a signed 8-bit integer (two's complement).
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.buffer.push(value as u8);
        Ok(())
    }

    /// Writes a signed 16-bit integer (two's complement, little-endian).
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a signed 32-bit integer (two's complement, little-endian).
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a signed 64-bit integer (two's complement, little-endian).
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a signed 128-bit integer (two's complement, little-endian).
    pub fn write_i128(&mut self, value: i128) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a 32-bit float (IEEE 754, little-endian).
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a 64-bit float (IEEE 754, little-endian).
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a boolean as a single byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_byte(if value { 1 } else { 0 })
    }

    /// Writes an unsigned varint.
    ///
    /// Values up to 250 occupy the tag byte itself; larger values are a
    /// width tag followed by the smallest little-endian field that holds
    /// the value.
    pub fn write_varint(&mut self, value: u128) -> Result<()> {
        if value <= VARINT_SINGLE_BYTE_MAX as u128 {
            self.buffer.push(value as u8);
        } else if value <= u16::MAX as u128 {
            self.buffer.push(VARINT_U16_TAG);
            self.buffer.extend_from_slice(&(value as u16).to_le_bytes());
        } else if value <= u32::MAX as u128 {
            self.buffer.push(VARINT_U32_TAG);
            self.buffer.extend_from_slice(&(value as u32).to_le_bytes());
        } else if value <= u64::MAX as u128 {
            self.buffer.push(VARINT_U64_TAG);
            self.buffer.extend_from_slice(&(value as u64).to_le_bytes());
        } else {
            self.buffer.push(VARINT_U128_TAG);
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
        Ok(())
    }

    /// Writes a signed varint using ZigZag encoding.
    pub fn write_svarint(&mut self, value: i128) -> Result<()> {
        self.write_varint(zigzag_encode(value))
    }

    /// Writes a collection or string length prefix.
    ///
    /// Fixed u64 in default mode, varint in varint mode.
    pub fn write_len(&mut self, len: usize, opts: Options) -> Result<()> {
        if opts.varint {
            self.write_varint(len as u128)
        } else {
            self.write_u64(len as u64)
        }
    }

    /// Writes an enum variant discriminant.
    ///
    /// Fixed u32 in default mode, varint in varint mode.
    pub fn write_discriminant(&mut self, index: u32, opts: Options) -> Result<()> {
        if opts.varint {
            self.write_varint(index as u128)
        } else {
            self.write_u32(index)
        }
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
