//! Boundary-checked bit and byte reader
//!
//! Bits are pulled MSB-first through a one-byte cache. Every byte-aligned
//! read discards whatever is left in the cache first.
//!
//! The read boundary is an absolute offset. Any read that would touch a byte
//! at or beyond it fails with [`SwfError::BoundaryExceeded`]; the boundary
//! may be moved in either direction, so callers that narrow it for a nested
//! structure save and restore the outer value themselves.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Result, SwfError};

/// No boundary narrower than the end of the data
pub const NO_BOUNDARY: u64 = u64::MAX;

/// Sequential reader over an in-memory byte buffer
#[derive(Debug, Clone)]
pub struct BitReader {
    data: Vec<u8>,
    position: usize,
    bit_cache: u8,
    bits_left: u8,
    boundary: u64,
}

impl BitReader {
    /// Create a reader positioned at offset 0 with no boundary.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            position: 0,
            bit_cache: 0,
            bits_left: 0,
            boundary: NO_BOUNDARY,
        }
    }

    /// Absolute offset of the next byte to be fetched.
    pub fn offset(&self) -> u64 {
        self.position as u64
    }

    pub fn boundary(&self) -> u64 {
        self.boundary
    }

    pub fn set_boundary(&mut self, boundary: u64) {
        self.boundary = boundary;
    }

    /// Total length of the underlying data.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes that can still be read before the boundary or the end of data.
    pub fn available(&self) -> u64 {
        self.limit().saturating_sub(self.offset())
    }

    /// Unread bytes after the current position, ignoring the boundary.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Replace everything after the current position.
    ///
    /// Used to splice a decompressed body in behind the uncompressed header.
    pub fn replace_remaining(&mut self, tail: Vec<u8>) {
        self.data.truncate(self.position);
        self.data.extend(tail);
    }

    /// Discard any cached sub-byte bits.
    #[inline]
    pub fn byte_align(&mut self) {
        self.bits_left = 0;
        self.bit_cache = 0;
    }

    fn limit(&self) -> u64 {
        self.boundary.min(self.len())
    }

    fn check(&self, count: usize) -> Result<()> {
        let offset = self.offset();
        let end = offset + count as u64;
        if end > self.boundary {
            return Err(SwfError::BoundaryExceeded {
                offset,
                boundary: self.boundary,
            });
        }
        if end > self.len() {
            return Err(SwfError::StreamExhausted { offset });
        }
        Ok(())
    }

    fn next_byte(&mut self) -> Result<u8> {
        self.check(1)?;
        let byte = self.data[self.position];
        self.position += 1;
        Ok(byte)
    }

    /// Take `count` aligned bytes.
    fn take(&mut self, count: usize) -> Result<&[u8]> {
        self.byte_align();
        self.check(count)?;
        let start = self.position;
        self.position += count;
        Ok(&self.data[start..self.position])
    }

    // ---------------------------------------------------------------
    // Bit fields
    // ---------------------------------------------------------------

    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_left == 0 {
            self.bit_cache = self.next_byte()?;
            self.bits_left = 8;
        }
        self.bits_left -= 1;
        Ok((self.bit_cache >> self.bits_left) & 1 == 1)
    }

    /// Read an unsigned field of `bits` bits (0 to 32).
    pub fn read_ub(&mut self, bits: u32) -> Result<u32> {
        if bits > 32 {
            return Err(SwfError::Malformed(format!(
                "bit field width {} exceeds 32",
                bits
            )));
        }
        let mut remaining = bits;
        let mut value: u64 = 0;
        while remaining > 0 {
            if self.bits_left == 0 {
                self.bit_cache = self.next_byte()?;
                self.bits_left = 8;
            }
            let take = remaining.min(self.bits_left as u32);
            let shift = self.bits_left as u32 - take;
            let chunk = (self.bit_cache as u32 >> shift) & ((1u32 << take) - 1);
            value = (value << take) | chunk as u64;
            self.bits_left -= take as u8;
            remaining -= take;
        }
        Ok(value as u32)
    }

    /// Read a signed field of `bits` bits, sign-extended.
    pub fn read_sb(&mut self, bits: u32) -> Result<i32> {
        if bits == 0 {
            return Ok(0);
        }
        let raw = self.read_ub(bits)?;
        let shift = 32 - bits;
        Ok(((raw << shift) as i32) >> shift)
    }

    /// Read a 16.16 fixed-point field of `bits` bits.
    pub fn read_fb(&mut self, bits: u32) -> Result<f64> {
        Ok(self.read_sb(bits)? as f64 / 65536.0)
    }

    // ---------------------------------------------------------------
    // Byte-aligned values
    // ---------------------------------------------------------------

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    pub fn read_u24(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u24(self.take(3)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// 32-bit 16.16 fixed point.
    pub fn read_fixed(&mut self) -> Result<f64> {
        Ok(self.read_i32()? as f64 / 65536.0)
    }

    /// 16-bit 8.8 fixed point.
    pub fn read_fixed8(&mut self) -> Result<f64> {
        Ok(self.read_i16()? as f64 / 256.0)
    }

    /// Variable-length unsigned integer: 7-bit groups, low group first.
    pub fn read_encoded_u32(&mut self) -> Result<u32> {
        let mut value: u64 = 0;
        for group in 0..5 {
            let byte = self.read_u8()?;
            value |= ((byte & 0x7F) as u64) << (7 * group);
            if byte & 0x80 == 0 {
                break;
            }
        }
        Ok(value as u32)
    }

    /// Null-terminated UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        self.byte_align();
        let mut bytes = Vec::new();
        loop {
            let byte = self.next_byte()?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        String::from_utf8(bytes).map_err(|e| SwfError::Encoding(e.to_string()))
    }

    /// Read exactly `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        Ok(self.take(count)?.to_vec())
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Read everything up to the active boundary.
    pub fn read_to_boundary(&mut self) -> Result<Vec<u8>> {
        self.byte_align();
        let end = if self.boundary == NO_BOUNDARY {
            self.len()
        } else {
            self.boundary
        };
        let count = end.saturating_sub(self.offset()) as usize;
        self.read_bytes(count)
    }
}
