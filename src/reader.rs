//! Bramble decoder.

use crate::error::{Error, Result};
use crate::types::{
    zigzag_decode, Options, VARINT_SINGLE_BYTE_MAX, VARINT_U128_TAG, VARINT_U16_TAG,
    VARINT_U32_TAG, VARINT_U64_TAG,
};

/// Reader decodes Bramble data from a binary buffer.
///
/// The reader borrows the input and never copies or mutates it; the
/// unconsumed tail stays available through [`Reader::rest`].
pub struct Reader<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            pos: 0,
        }
    }

    /// Returns the current position in the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// Returns true if there is more data to read.
    pub fn has_more(&self) -> bool {
        self.pos < self.buffer.len()
    }

    /// Returns the unconsumed tail of the input.
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.pos..]
    }

    /// Checks if there are enough bytes available.
    fn check_available(&self, needed: usize) -> Result<()> {
        if self.pos + needed > self.buffer.len() {
            return Err(Error::truncated(needed, self.remaining()));
        }
        Ok(())
    }

    /// Reads a raw byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.check_available(1)?;
        let value = self.buffer[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads raw bytes.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        self.check_available(length)?;
        let bytes = &self.buffer[self.pos..self.pos + length];
        self.pos += length;
        Ok(bytes)
    }

    /// Reads exactly `N` bytes into an array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Reads an unsigned 16-bit integer (little-endian).
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads an unsigned 32-bit integer (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads an unsigned 64-bit integer (little-endian).
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads an unsigned 128-bit integer (little-endian).
    pub fn read_u128(&mut self) -> Result<u128> {
        Ok(u128::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 8-bit integer (two's complement).
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_byte()? as i8)
    }

    /// Reads a signed 16-bit integer (two's complement, little-endian).
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 32-bit integer (two's complement, little-endian).
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 64-bit integer (two's complement, little-endian).
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 128-bit integer (two's complement, little-endian).
    pub fn read_i128(&mut self) -> Result<i128> {
        Ok(i128::from_le_bytes(self.read_array()?))
    }

    /// Reads a 32-bit float (IEEE 754, little-endian).
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Reads a 64-bit float (IEEE 754, little-endian).
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Reads a boolean. Only 0x00 and 0x01 are accepted.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::InvalidBool(other)),
        }
    }

    /// Reads an unsigned varint.
    ///
    /// A tag byte up to 250 is the value itself; otherwise the tag names
    /// the width of the little-endian field that follows.
    pub fn read_varint(&mut self) -> Result<u128> {
        let tag = self.read_byte()?;
        if tag <= VARINT_SINGLE_BYTE_MAX {
            return Ok(tag as u128);
        }
        match tag {
            VARINT_U16_TAG => Ok(self.read_u16()? as u128),
            VARINT_U32_TAG => Ok(self.read_u32()? as u128),
            VARINT_U64_TAG => Ok(self.read_u64()? as u128),
            VARINT_U128_TAG => self.read_u128(),
            other => Err(Error::InvalidVarint(other)),
        }
    }

    /// Reads a signed varint using ZigZag decoding.
    pub fn read_svarint(&mut self) -> Result<i128> {
        Ok(zigzag_decode(self.read_varint()?))
    }

    /// Reads a collection or string length prefix.
    ///
    /// Fixed u64 in default mode, varint in varint mode.
    pub fn read_len(&mut self, opts: Options) -> Result<usize> {
        let raw = if opts.varint {
            self.read_varint()?
        } else {
            self.read_u64()? as u128
        };
        usize::try_from(raw).map_err(|_| Error::LengthOverflow(raw))
    }

    /// Reads an enum variant discriminant.
    ///
    /// Fixed u32 in default mode, varint in varint mode.
    pub fn read_discriminant(&mut self, opts: Options) -> Result<u128> {
        if opts.varint {
            self.read_varint()
        } else {
            Ok(self.read_u32()? as u128)
        }
    }
}
