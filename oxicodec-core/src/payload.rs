//! Compressed payload framing.
//!
//! Every codec produces a [`CompressedPayload`]: a small self-describing
//! header followed by a codec-specific metadata block and the encoded body.
//!
//! # Wire Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! +--------------+--------------------+------------------+----------+------+
//! | algorithm u8 | original_len u64   | metadata_len u32 | metadata | body |
//! +--------------+--------------------+------------------+----------+------+
//! ```
//!
//! The metadata block is written and parsed with [`MetadataWriter`] and
//! [`MetadataReader`]; short reads inside it are reported as
//! [`CodecError::CorruptPayload`] because the block length is known up front.

use crate::error::{CodecError, Result};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Size of the fixed payload header in bytes.
pub const HEADER_LEN: usize = 1 + 8 + 4;

/// Identifier of the codec that produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AlgorithmId {
    /// Run-length encoding.
    Rle = 1,
    /// Huffman coding.
    Huffman = 2,
    /// Golomb coding.
    Golomb = 3,
    /// Lempel-Ziv-Welch dictionary coding.
    Lzw = 4,
    /// Palette quantization (lossy).
    Quantize = 5,
}

impl AlgorithmId {
    /// All algorithm identifiers, in wire order.
    pub const ALL: [AlgorithmId; 5] = [
        Self::Rle,
        Self::Huffman,
        Self::Golomb,
        Self::Lzw,
        Self::Quantize,
    ];

    /// Parse a wire byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Rle),
            2 => Some(Self::Huffman),
            3 => Some(Self::Golomb),
            4 => Some(Self::Lzw),
            5 => Some(Self::Quantize),
            _ => None,
        }
    }

    /// Wire byte of this identifier.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rle => "rle",
            Self::Huffman => "huffman",
            Self::Golomb => "golomb",
            Self::Lzw => "lzw",
            Self::Quantize => "quantize",
        }
    }

    /// Whether `decode(encode(x)) == x` holds for this algorithm.
    pub fn is_lossless(self) -> bool {
        !matches!(self, Self::Quantize)
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rle" | "run-length" => Ok(Self::Rle),
            "huffman" => Ok(Self::Huffman),
            "golomb" | "rice" => Ok(Self::Golomb),
            "lzw" => Ok(Self::Lzw),
            "quantize" | "quantization" => Ok(Self::Quantize),
            other => Err(CodecError::configuration(format!(
                "unsupported algorithm: {other}"
            ))),
        }
    }
}

/// Output of a single encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPayload {
    /// Codec that produced this payload.
    pub algorithm: AlgorithmId,
    /// Length of the uncompressed input in bytes.
    pub original_length: u64,
    /// Codec-specific parameters needed for decoding.
    pub metadata: Vec<u8>,
    /// Encoded data.
    pub body: Vec<u8>,
}

impl CompressedPayload {
    /// Create a payload.
    pub fn new(
        algorithm: AlgorithmId,
        original_length: u64,
        metadata: Vec<u8>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            algorithm,
            original_length,
            metadata,
            body,
        }
    }

    /// Fail with [`CodecError::CorruptPayload`] unless this payload was
    /// produced by `expected`.
    pub fn expect_algorithm(&self, expected: AlgorithmId) -> Result<()> {
        if self.algorithm != expected {
            return Err(CodecError::corrupt(format!(
                "algorithm mismatch: payload is {}, decoder is {}",
                self.algorithm, expected
            )));
        }
        Ok(())
    }

    /// `original_length` as `usize`, rejecting values this platform cannot
    /// hold in memory.
    pub fn original_len(&self) -> Result<usize> {
        usize::try_from(self.original_length).map_err(|_| {
            CodecError::corrupt(format!(
                "original length {} exceeds addressable memory",
                self.original_length
            ))
        })
    }

    /// Reader positioned at the start of the metadata block.
    pub fn metadata_reader(&self) -> MetadataReader<'_> {
        MetadataReader::new(&self.metadata)
    }

    /// Size of [`Self::to_bytes`] output without building it.
    pub fn serialized_len(&self) -> usize {
        HEADER_LEN + self.metadata.len() + self.body.len()
    }

    /// Serialize to the wire layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.push(self.algorithm.as_byte());
        out.extend_from_slice(&self.original_length.to_le_bytes());
        out.extend_from_slice(&(self.metadata.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.metadata);
        out.extend_from_slice(&self.body);
        out
    }

    /// Parse the wire layout.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(CodecError::corrupt(format!(
                "payload header needs {HEADER_LEN} bytes, found {}",
                data.len()
            )));
        }

        let algorithm = AlgorithmId::from_byte(data[0]).ok_or_else(|| {
            CodecError::corrupt(format!("unknown algorithm id {:#04x}", data[0]))
        })?;

        let mut header = MetadataReader::new(&data[1..HEADER_LEN]);
        let original_length = header.read_u64()?;
        let metadata_len = header.read_u32()? as usize;

        let metadata_end = HEADER_LEN
            .checked_add(metadata_len)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| {
                CodecError::corrupt(format!(
                    "metadata length {metadata_len} exceeds payload size {}",
                    data.len()
                ))
            })?;

        Ok(Self {
            algorithm,
            original_length,
            metadata: data[HEADER_LEN..metadata_end].to_vec(),
            body: data[metadata_end..].to_vec(),
        })
    }

    /// Write the serialized payload to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read a serialized payload from `reader` until end of stream.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }
}

/// Builder for a codec metadata block.
#[derive(Debug, Default, Clone)]
pub struct MetadataWriter {
    buf: Vec<u8>,
}

impl MetadataWriter {
    /// Create an empty metadata block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte.
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    /// Append a little-endian u16.
    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append a little-endian u32.
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append a little-endian u64.
    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Finish the block.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a codec metadata block.
#[derive(Debug, Clone)]
pub struct MetadataReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MetadataReader<'a> {
    /// Create a reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Take the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                CodecError::corrupt(format!(
                    "metadata truncated: need {len} bytes at offset {}, block is {} bytes",
                    self.pos,
                    self.data.len()
                ))
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Fail unless the whole block was consumed.
    pub fn finish(&self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(CodecError::corrupt(format!(
                "{} trailing metadata bytes",
                self.remaining()
            )));
        }
        Ok(())
    }
}
