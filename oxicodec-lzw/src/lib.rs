//! # OxiCodec-LZW: Pure Rust LZW Compression
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression and decompression
//! with a bounded, prefix-closed dictionary.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Variable code width**: 8 bits for the first code, growing one bit at
//!   a time up to `max_bits`
//! - **Bounded dictionary**: `2^max_bits` entries, then freeze or reset
//! - **No special codes**: the stream holds data codes only; its length is
//!   recorded in the payload metadata
//!
//! ## Code Width
//!
//! Encoder and decoder count the codes since the dictionary was last
//! (re)initialised. The `k`-th code can only name one of the first `256 + k`
//! entries and is written with just enough bits for that:
//!
//! ```text
//! width(k) = bits(min(256 + k, 2^max_bits) - 1)
//! ```
//!
//! Both sides derive the width from the same counter, so there is no
//! "early change" adjustment to keep in sync.
//!
//! ## Metadata Layout
//!
//! ```text
//! bit_count: u64 | max_bits: u8 | overflow: u8 (0 = freeze, 1 = reset)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::Codec;
//! use oxicodec_lzw::{LzwCodec, LzwConfig};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let codec = LzwCodec::new(LzwConfig::default());
//!
//! let payload = codec.encode(original).unwrap();
//! assert!(payload.body.len() < original.len());
//! assert_eq!(codec.decode(&payload).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;

pub use config::{CodeWidth, LzwConfig, OverflowPolicy, ROOT_ENTRIES};
pub use decoder::LzwDecoder;
pub use dictionary::LzwDictionary;
pub use encoder::LzwEncoder;

use oxicodec_core::{AlgorithmId, Codec, CodecError, CompressedPayload, MetadataWriter, Result};

/// Parameters recovered from an LZW payload's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwHeader {
    /// Number of meaningful body bits.
    pub bit_count: u64,
    /// Configuration the payload was encoded with.
    pub config: LzwConfig,
}

impl LzwHeader {
    /// Parse the metadata block of `payload`.
    pub fn read(payload: &CompressedPayload) -> Result<Self> {
        let mut meta = payload.metadata_reader();
        let bit_count = meta.read_u64()?;
        let max_bits = meta.read_u8()?;
        let overflow_byte = meta.read_u8()?;
        meta.finish()?;

        let overflow = OverflowPolicy::from_byte(overflow_byte).ok_or_else(|| {
            CodecError::corrupt(format!("unknown LZW overflow policy {overflow_byte}"))
        })?;
        let config = LzwConfig::new(max_bits, overflow);
        if config.validate().is_err() {
            return Err(CodecError::corrupt(format!(
                "LZW code width {max_bits} in metadata outside {}..={}",
                LzwConfig::MIN_BITS,
                LzwConfig::MAX_BITS
            )));
        }

        Ok(Self { bit_count, config })
    }
}

/// LZW codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LzwCodec {
    config: LzwConfig,
}

impl LzwCodec {
    /// Create a codec with the given configuration.
    pub fn new(config: LzwConfig) -> Self {
        Self { config }
    }

    /// Configuration of this codec.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}

impl Codec for LzwCodec {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Lzw
    }

    fn encode(&self, input: &[u8]) -> Result<CompressedPayload> {
        let mut encoder = LzwEncoder::new(self.config)?;
        let (body, bit_count) = encoder.encode(input);

        let mut meta = MetadataWriter::new();
        meta.write_u64(bit_count)
            .write_u8(self.config.max_bits)
            .write_u8(self.config.overflow as u8);

        Ok(CompressedPayload::new(
            AlgorithmId::Lzw,
            input.len() as u64,
            meta.into_vec(),
            body,
        ))
    }

    /// Decodes with the configuration recorded in the payload, not the one
    /// this codec was built with.
    fn decode(&self, payload: &CompressedPayload) -> Result<Vec<u8>> {
        payload.expect_algorithm(AlgorithmId::Lzw)?;
        let header = LzwHeader::read(payload)?;
        let mut decoder = LzwDecoder::new(header.config)?;
        decoder.decode(&payload.body, header.bit_count, payload.original_len()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_default() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let codec = LzwCodec::default();
        let payload = codec.encode(original).unwrap();
        assert_eq!(codec.decode(&payload).unwrap(), original);
    }

    #[test]
    fn test_metadata_layout() {
        let codec = LzwCodec::new(LzwConfig::new(10, OverflowPolicy::Reset));
        let payload = codec.encode(b"ababab").unwrap();
        assert_eq!(payload.metadata.len(), 10);

        let header = LzwHeader::read(&payload).unwrap();
        assert_eq!(header.bit_count, 35);
        assert_eq!(header.config.max_bits, 10);
        assert_eq!(header.config.overflow, OverflowPolicy::Reset);
    }

    #[test]
    fn test_310_byte_no_truncation() {
        let original = b"This is a test of compression! ".repeat(10);
        assert_eq!(original.len(), 310);

        let codec = LzwCodec::default();
        let payload = codec.encode(&original).unwrap();
        let decompressed = codec.decode(&payload).unwrap();

        assert_eq!(decompressed.len(), 310);
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_empty_input() {
        let codec = LzwCodec::default();
        let payload = codec.encode(b"").unwrap();
        assert!(payload.body.is_empty());
        assert_eq!(codec.decode(&payload).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_single_byte() {
        let codec = LzwCodec::default();
        let payload = codec.encode(b"A").unwrap();
        assert_eq!(payload.body, b"A");
        assert_eq!(codec.decode(&payload).unwrap(), b"A");
    }

    #[test]
    fn test_repeating_pattern() {
        let original = vec![b'X'; 1000];
        let codec = LzwCodec::default();
        let payload = codec.encode(&original).unwrap();

        // Highly repetitive - should compress well
        assert!(payload.body.len() < original.len() / 10);
        assert_eq!(codec.decode(&payload).unwrap(), original);
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let codec = LzwCodec::default();
        let payload = codec.encode(&original).unwrap();
        assert_eq!(codec.decode(&payload).unwrap(), original);
    }

    #[test]
    fn test_invalid_config_on_encode() {
        let codec = LzwCodec::new(LzwConfig::new(17, OverflowPolicy::Freeze));
        assert!(codec.encode(b"abc").unwrap_err().is_configuration());
    }

    #[test]
    fn test_corrupt_metadata() {
        let codec = LzwCodec::default();
        let mut payload = codec.encode(b"abcabc").unwrap();
        payload.metadata[8] = 20;
        assert!(codec.decode(&payload).unwrap_err().is_corrupt());

        let mut payload = codec.encode(b"abcabc").unwrap();
        payload.metadata[9] = 9;
        assert!(codec.decode(&payload).unwrap_err().is_corrupt());
    }

    #[test]
    fn test_decode_uses_recorded_config() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
        let encoder = LzwCodec::new(LzwConfig::new(9, OverflowPolicy::Reset));
        let payload = encoder.encode(&original).unwrap();
        assert_eq!(LzwCodec::default().decode(&payload).unwrap(), original);
    }
}
