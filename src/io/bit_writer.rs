//! Bit and byte writer over a growable buffer
//!
//! Mirror of [`BitReader`](super::BitReader). Bit fields are packed
//! MSB-first; byte-aligned writes flush a partially filled byte first.
//! Field writers reject values that do not fit the declared width.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Result, SwfError};

use super::bit_width::{to_fixed16, to_fixed8};

/// Sequential writer into an in-memory buffer
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    bit_cache: u8,
    bits_used: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all written data.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.bit_cache = 0;
        self.bits_used = 0;
    }

    /// Write out a partially filled byte, padding with zero bits.
    pub fn byte_align(&mut self) {
        if self.bits_used > 0 {
            self.buffer.push(self.bit_cache);
            self.bit_cache = 0;
            self.bits_used = 0;
        }
    }

    /// Number of bytes written so far (partial byte included).
    pub fn size(&mut self) -> usize {
        self.byte_align();
        self.buffer.len()
    }

    /// Bytes written so far (partial byte included).
    pub fn bytes(&mut self) -> &[u8] {
        self.byte_align();
        &self.buffer
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.byte_align();
        self.buffer
    }

    // ---------------------------------------------------------------
    // Bit fields
    // ---------------------------------------------------------------

    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_cache |= 0x80 >> self.bits_used;
        }
        self.bits_used += 1;
        if self.bits_used == 8 {
            self.buffer.push(self.bit_cache);
            self.bit_cache = 0;
            self.bits_used = 0;
        }
    }

    /// Write `value` into an unsigned field of `bits` bits.
    pub fn write_ub(&mut self, value: u32, bits: u32) -> Result<()> {
        if bits > 32 || (bits < 32 && (value as u64) >= (1u64 << bits)) {
            return Err(SwfError::BitWidthOverflow {
                value: value as i64,
                bits,
                signed: false,
            });
        }
        for i in (0..bits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Write `value` into a signed field of `bits` bits.
    pub fn write_sb(&mut self, value: i32, bits: u32) -> Result<()> {
        let fits = match bits {
            0 => value == 0,
            1..=32 => {
                let min = -(1i64 << (bits - 1));
                let max = (1i64 << (bits - 1)) - 1;
                (min..=max).contains(&(value as i64))
            }
            _ => false,
        };
        if !fits {
            return Err(SwfError::BitWidthOverflow {
                value: value as i64,
                bits,
                signed: true,
            });
        }
        let raw = value as u32;
        for i in (0..bits).rev() {
            self.write_bit((raw >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Write a 16.16 fixed-point field of `bits` bits.
    pub fn write_fb(&mut self, value: f64, bits: u32) -> Result<()> {
        self.write_sb(to_fixed16(value), bits)
    }

    // ---------------------------------------------------------------
    // Byte-aligned values
    // ---------------------------------------------------------------

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.byte_align();
        self.buffer.write_u8(value)?;
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.byte_align();
        self.buffer.write_u16::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.byte_align();
        self.buffer.write_i16::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_u24(&mut self, value: u32) -> Result<()> {
        if value > 0x00FF_FFFF {
            return Err(SwfError::BitWidthOverflow {
                value: value as i64,
                bits: 24,
                signed: false,
            });
        }
        self.byte_align();
        self.buffer.write_u24::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.byte_align();
        self.buffer.write_u32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.byte_align();
        self.buffer.write_i32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.byte_align();
        self.buffer.write_u64::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.byte_align();
        self.buffer.write_i64::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.byte_align();
        self.buffer.write_f32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.byte_align();
        self.buffer.write_f64::<LittleEndian>(value)?;
        Ok(())
    }

    /// 32-bit 16.16 fixed point.
    pub fn write_fixed(&mut self, value: f64) -> Result<()> {
        self.write_i32(to_fixed16(value))
    }

    /// 16-bit 8.8 fixed point.
    pub fn write_fixed8(&mut self, value: f64) -> Result<()> {
        self.write_i16(to_fixed8(value))
    }

    /// Variable-length unsigned integer: 7-bit groups, low group first.
    pub fn write_encoded_u32(&mut self, value: u32) -> Result<()> {
        let mut rest = value;
        loop {
            let group = (rest & 0x7F) as u8;
            rest >>= 7;
            if rest == 0 {
                return self.write_u8(group);
            }
            self.write_u8(group | 0x80)?;
        }
    }

    /// Null-terminated UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_bytes(value.as_bytes())?;
        self.write_u8(0)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.byte_align();
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}
