//! # OxiCodec Core
//!
//! Core components for the OxiCodec codec library.
//!
//! This crate provides the building blocks shared by every codec:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`payload`]: Self-describing compressed payload framing
//! - [`traits`]: The [`Codec`] capability set
//! - [`metrics`]: Compression ratio / space savings statistics
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiCodec is a flat set of independent codecs on top of this crate:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     Algorithm dispatch, CLI                             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     RLE, Huffman, Golomb, LZW, palette quantization     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream + payload (this crate)                    │
//! │     BitReader/BitWriter, CompressedPayload, metrics     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::bitstream::{BitReader, BitWriter};
//! use oxicodec_core::metrics::CompressionMetrics;
//! use std::time::Duration;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0xABC, 12);
//! let (bytes, bits) = writer.finish();
//!
//! let mut reader = BitReader::with_bit_len(&bytes, bits).unwrap();
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//!
//! let metrics = CompressionMetrics::compute(100, 25, Duration::ZERO).unwrap();
//! assert_eq!(metrics.ratio, 4.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod metrics;
pub mod payload;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{CodecError, Result};
pub use metrics::CompressionMetrics;
pub use payload::{AlgorithmId, CompressedPayload, MetadataReader, MetadataWriter};
pub use traits::Codec;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{CodecError, Result};
    pub use crate::metrics::CompressionMetrics;
    pub use crate::payload::{AlgorithmId, CompressedPayload, MetadataReader, MetadataWriter};
    pub use crate::traits::Codec;
}
