//! Bit-level I/O for the entropy and dictionary coders.
//!
//! This module provides `BitWriter` and `BitReader`, an in-memory bitstream
//! backed by a byte vector. Huffman codes, Golomb code words, LZW codes and
//! packed palette indices are all written through it.
//!
//! # Bit Ordering
//!
//! Bits are packed MSB-first (Most Significant Bit first): the first bit
//! written lands in bit 7 of byte 0. Multi-bit values are written from their
//! most significant bit down, so a code reads left to right exactly as it is
//! printed.
//!
//! # Padding
//!
//! The backing buffer is byte-granular. [`BitWriter::finish`] pads the last
//! byte with zero bits and reports the exact number of bits written; readers
//! are created with that count via [`BitReader::with_bit_len`] and never
//! consume the padding.
//!
//! # Example
//!
//! ```
//! use oxicodec_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let (bytes, bit_len) = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//! assert_eq!(bit_len, 7);
//!
//! let mut reader = BitReader::with_bit_len(&bytes, bit_len).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! assert!(reader.read_bit().is_err());
//! ```

use crate::error::{CodecError, Result};

/// MSB-first bit writer that grows its backing buffer as needed.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Partially filled byte (bits occupy the high end).
    pending: u8,
    /// Number of bits in `pending`.
    pending_bits: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl BitWriter {
    /// Create an empty bit writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bit writer with room for `bytes` bytes of output.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.pending |= (bit as u8) << (7 - self.pending_bits);
        self.pending_bits += 1;
        self.total_bits_written += 1;

        if self.pending_bits == 8 {
            self.output.push(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }
    }

    /// Write the low `count` bits of `value`, most significant bit first.
    ///
    /// `count` may be 0 (no-op) up to 64.
    #[inline]
    pub fn write_bits(&mut self, value: u64, count: u8) {
        debug_assert!(count <= 64, "Cannot write more than 64 bits at once");

        let mut remaining = count;

        // Top up the pending byte first, then emit whole bytes directly.
        while remaining > 0 {
            if self.pending_bits == 0 && remaining >= 8 {
                let shift = remaining - 8;
                self.output.push((value >> shift) as u8);
                self.total_bits_written += 8;
                remaining -= 8;
            } else {
                remaining -= 1;
                self.write_bit((value >> remaining) & 1 == 1);
            }
        }
    }

    /// Write `count` copies of `bit`.
    pub fn write_repeated(&mut self, bit: bool, count: u64) {
        for _ in 0..count {
            self.write_bit(bit);
        }
    }

    /// Pad the final byte with zero bits and return the buffer together with
    /// the number of meaningful bits.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        if self.pending_bits > 0 {
            self.output.push(self.pending);
        }
        (self.output, self.total_bits_written)
    }
}

/// MSB-first bit reader over a byte slice with an explicit bit length.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Number of meaningful bits in `data`.
    bit_len: u64,
    /// Next bit to read.
    position: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() as u64 * 8,
            position: 0,
        }
    }

    /// Create a reader limited to the first `bit_len` bits of `data`.
    ///
    /// Fails with [`CodecError::Underrun`] if `data` is too short to hold
    /// `bit_len` bits, i.e. the body was truncated.
    pub fn with_bit_len(data: &'a [u8], bit_len: u64) -> Result<Self> {
        let available = data.len() as u64 * 8;
        if bit_len > available {
            return Err(CodecError::underrun(bit_len, available, 0));
        }
        Ok(Self {
            data,
            bit_len,
            position: 0,
        })
    }

    /// Create a reader over a payload body that must hold exactly `bit_len`
    /// bits plus padding.
    ///
    /// A short body is an [`CodecError::Underrun`]; whole unused bytes after
    /// the last meaningful bit are a [`CodecError::CorruptPayload`].
    pub fn exact(data: &'a [u8], bit_len: u64) -> Result<Self> {
        let reader = Self::with_bit_len(data, bit_len)?;
        let needed = bit_len.div_ceil(8);
        if data.len() as u64 > needed {
            return Err(CodecError::corrupt(format!(
                "body has {} bytes, {bit_len} bits need {needed}",
                data.len()
            )));
        }
        Ok(reader)
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.position
    }

    /// Number of meaningful bits not yet read.
    pub fn bits_remaining(&self) -> u64 {
        self.bit_len - self.position
    }

    /// Whether every meaningful bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.bit_len
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.bit_len {
            return Err(CodecError::underrun(1, 0, self.position));
        }
        let byte = self.data[(self.position / 8) as usize];
        let bit = (byte >> (7 - (self.position % 8))) & 1 == 1;
        self.position += 1;
        Ok(bit)
    }

    /// Read `count` bits (0-64), first bit read in the most significant
    /// position of the result.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u64> {
        debug_assert!(count <= 64, "Cannot read more than 64 bits at once");

        let remaining = self.bits_remaining();
        if (count as u64) > remaining {
            return Err(CodecError::underrun(count as u64, remaining, self.position));
        }

        let mut value = 0u64;
        let mut left = count;
        while left > 0 {
            if self.position % 8 == 0 && left >= 8 {
                value = (value << 8) | self.data[(self.position / 8) as usize] as u64;
                self.position += 8;
                left -= 8;
            } else {
                value = (value << 1) | self.read_bit()? as u64;
                left -= 1;
            }
        }
        Ok(value)
    }
}
