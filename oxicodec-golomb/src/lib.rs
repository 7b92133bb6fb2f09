//! # OxiCodec-Golomb: Golomb and Rice Coding
//!
//! Codes every byte of the input (or every zig-zag mapped difference between
//! neighbouring bytes) as a Golomb code word with a single divisor `b`.
//! Small values get short code words, so the codec suits data whose values
//! follow a roughly geometric distribution.
//!
//! ## Divisor Selection
//!
//! | [`GolombParameter`] | Divisor                                         |
//! |---------------------|-------------------------------------------------|
//! | `Auto`              | `max(1, round(0.69 * mean))` of the coded values |
//! | `Rice`              | `Auto` rounded to the nearest power of two      |
//! | `Fixed(b)`          | `b`, which must be at least 1                   |
//!
//! ## Metadata Layout
//!
//! ```text
//! bit_count: u64 | b: u32 | mapping: u8 (0 = raw, 1 = delta)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::Codec;
//! use oxicodec_golomb::{GolombCodec, GolombConfig, GolombMapping, GolombParameter};
//!
//! let codec = GolombCodec::new(GolombConfig::new(GolombParameter::Rice, GolombMapping::Delta));
//! let samples: Vec<u8> = (0..200).map(|i| 100 + (i % 7) as u8).collect();
//! let payload = codec.encode(&samples).unwrap();
//! assert!(payload.body.len() < samples.len());
//! assert_eq!(codec.decode(&payload).unwrap(), samples);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod code;
mod config;

pub use code::{code_length, decode_value, encode_value};
pub use config::{GolombConfig, GolombMapping, GolombParameter, estimate_parameter};

use oxicodec_core::{
    AlgorithmId, BitReader, BitWriter, Codec, CodecError, CompressedPayload, MetadataWriter,
    Result,
};

/// Parameters recovered from a Golomb payload's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GolombHeader {
    /// Number of meaningful body bits.
    pub bit_count: u64,
    /// Divisor.
    pub b: u32,
    /// Value mapping.
    pub mapping: GolombMapping,
}

impl GolombHeader {
    /// Parse the metadata block of `payload`.
    pub fn read(payload: &CompressedPayload) -> Result<Self> {
        let mut meta = payload.metadata_reader();
        let bit_count = meta.read_u64()?;
        let b = meta.read_u32()?;
        let mapping_byte = meta.read_u8()?;
        meta.finish()?;

        if b == 0 {
            return Err(CodecError::corrupt("Golomb divisor 0 in metadata"));
        }
        let mapping = GolombMapping::from_byte(mapping_byte).ok_or_else(|| {
            CodecError::corrupt(format!("unknown Golomb mapping {mapping_byte}"))
        })?;

        Ok(Self {
            bit_count,
            b,
            mapping,
        })
    }
}

/// Golomb codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GolombCodec {
    config: GolombConfig,
}

impl GolombCodec {
    /// Create a codec with the given configuration.
    pub fn new(config: GolombConfig) -> Self {
        Self { config }
    }

    /// Codec with a fixed divisor and raw mapping.
    pub fn with_divisor(b: u32) -> Self {
        Self::new(GolombConfig::fixed(b))
    }

    /// Configuration of this codec.
    pub fn config(&self) -> &GolombConfig {
        &self.config
    }

    /// Divisor this codec would use for `input`.
    pub fn divisor_for(&self, input: &[u8]) -> Result<u32> {
        self.config.resolve(&self.config.mapping.map(input))
    }
}

impl Codec for GolombCodec {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Golomb
    }

    fn encode(&self, input: &[u8]) -> Result<CompressedPayload> {
        let mapping = self.config.mapping;
        let values = mapping.map(input);
        let b = self.config.resolve(&values)?;

        let mut writer = BitWriter::with_capacity(input.len());
        for &value in &values {
            encode_value(&mut writer, value, b);
        }
        let (body, bit_count) = writer.finish();

        log::debug!(
            "golomb: {} values, b = {}, mapping {:?}, {} body bits",
            values.len(),
            b,
            mapping,
            bit_count
        );

        let mut meta = MetadataWriter::new();
        meta.write_u64(bit_count)
            .write_u32(b)
            .write_u8(mapping as u8);

        Ok(CompressedPayload::new(
            AlgorithmId::Golomb,
            input.len() as u64,
            meta.into_vec(),
            body,
        ))
    }

    fn decode(&self, payload: &CompressedPayload) -> Result<Vec<u8>> {
        payload.expect_algorithm(AlgorithmId::Golomb)?;
        let header = GolombHeader::read(payload)?;
        let expected = payload.original_len()?;

        let mut reader = BitReader::exact(&payload.body, header.bit_count)?;
        // Each code word has at least its unary terminator.
        if header.bit_count < expected as u64 {
            return Err(CodecError::underrun(expected as u64, header.bit_count, 0));
        }

        let max_value = header.mapping.max_value();
        let mut values = Vec::with_capacity(expected);
        for index in 0..expected {
            let value = decode_value(&mut reader, header.b)?;
            if value > max_value {
                return Err(CodecError::corrupt(format!(
                    "value {value} at index {index} exceeds {max_value}"
                )));
            }
            values.push(value);
        }

        if !reader.is_exhausted() {
            return Err(CodecError::corrupt(format!(
                "{} unused bits after the last code word",
                reader.bits_remaining()
            )));
        }

        log::trace!("golomb: decoded {} values with b = {}", expected, header.b);
        header.mapping.unmap(&values)
    }
}
