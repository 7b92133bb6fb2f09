//! # OxiCodec
//!
//! Pure Rust implementations of classic compression algorithms behind one
//! tag-based entry point.
//!
//! | [`Algorithm`] | Crate               | Kind                          |
//! |---------------|---------------------|-------------------------------|
//! | `Rle`         | `oxicodec-rle`      | lossless, byte runs           |
//! | `Huffman`     | `oxicodec-huffman`  | lossless, prefix codes        |
//! | `Golomb`      | `oxicodec-golomb`   | lossless, Golomb / Rice codes |
//! | `Lzw`         | `oxicodec-lzw`      | lossless, dictionary          |
//! | `Quantize`    | `oxicodec-quantize` | lossy, RGB/RGBA rasters       |
//!
//! The caller picks the algorithm; nothing is probed at run time. A
//! serialised payload names its algorithm in its first byte, so
//! [`decompress`] and [`detect`] need no hint.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec::{Algorithm, CodecConfig, compress, decompress, detect};
//!
//! let config = CodecConfig::default();
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let payload = compress(Algorithm::Lzw, data, &config).unwrap();
//! let bytes = payload.to_bytes();
//! assert_eq!(detect(&bytes).unwrap(), Algorithm::Lzw);
//! assert_eq!(decompress(&payload, &config).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod algorithm;
mod config;

pub use algorithm::Algorithm;
pub use config::CodecConfig;

pub use oxicodec_golomb as golomb;
pub use oxicodec_huffman as huffman;
pub use oxicodec_lzw as lzw;
pub use oxicodec_quantize as quantize;
pub use oxicodec_rle as rle;

pub use oxicodec_core::{Codec, CodecError, CompressedPayload, CompressionMetrics, Result};

use oxicodec_core::AlgorithmId;
use oxicodec_core::payload::HEADER_LEN;
use oxicodec_golomb::GolombCodec;
use oxicodec_huffman::HuffmanCodec;
use oxicodec_lzw::LzwCodec;
use oxicodec_quantize::{ColorQuantizer, QuantizedImage, RasterImage};
use oxicodec_rle::RleCodec;

/// Byte codec for `algorithm`, `None` for [`Algorithm::Quantize`] which
/// works on rasters rather than byte buffers.
pub fn codec_for(algorithm: Algorithm, config: &CodecConfig) -> Option<Box<dyn Codec>> {
    match algorithm {
        Algorithm::Rle => Some(Box::new(RleCodec)),
        Algorithm::Huffman => Some(Box::new(HuffmanCodec)),
        Algorithm::Golomb => Some(Box::new(GolombCodec::new(config.golomb))),
        Algorithm::Lzw => Some(Box::new(LzwCodec::new(config.lzw))),
        Algorithm::Quantize => None,
    }
}

/// Compress `data` with a lossless algorithm.
///
/// [`Algorithm::Quantize`] is rejected with a configuration error; use
/// [`quantize::ColorQuantizer`] on a raster instead.
pub fn compress(
    algorithm: Algorithm,
    data: &[u8],
    config: &CodecConfig,
) -> Result<CompressedPayload> {
    let codec = codec_for(algorithm, config).ok_or_else(|| {
        CodecError::configuration(format!(
            "{algorithm} works on rasters, not byte buffers"
        ))
    })?;
    log::debug!("compress: {} bytes with {}", data.len(), algorithm);
    codec.encode(data)
}

/// Reduce `image` to at most `k` colours with the quantizer settings of
/// `config`.
pub fn quantize_image(
    image: &RasterImage,
    k: usize,
    config: &CodecConfig,
) -> Result<QuantizedImage> {
    ColorQuantizer::new(config.quantizer).quantize(image, k)
}

/// Decode `payload` with the codec its algorithm tag names.
///
/// Quantize payloads decode to the reconstructed raster's samples.
pub fn decompress(payload: &CompressedPayload, config: &CodecConfig) -> Result<Vec<u8>> {
    let algorithm = Algorithm::from(payload.algorithm);
    log::debug!(
        "decompress: {} payload, {} bytes expected",
        algorithm,
        payload.original_length
    );
    match codec_for(algorithm, config) {
        Some(codec) => codec.decode(payload),
        None => Ok(QuantizedImage::from_payload(payload)?
            .reconstruct()?
            .into_samples()),
    }
}

/// Parse serialised payload bytes and decode them.
pub fn decompress_bytes(bytes: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    decompress(&CompressedPayload::from_bytes(bytes)?, config)
}

/// Algorithm that produced the serialised payload `bytes`.
///
/// Only the fixed header is examined.
pub fn detect(bytes: &[u8]) -> Result<Algorithm> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::corrupt(format!(
            "payload header needs {HEADER_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    AlgorithmId::from_byte(bytes[0])
        .map(Algorithm::from)
        .ok_or_else(|| CodecError::corrupt(format!("unknown algorithm id {:#04x}", bytes[0])))
}
