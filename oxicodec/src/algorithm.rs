//! Algorithm selection tag.

use oxicodec_core::{AlgorithmId, CodecError, Result};
use std::fmt;
use std::str::FromStr;

/// Codec selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Run-length encoding.
    Rle,
    /// Static Huffman coding.
    Huffman,
    /// Golomb / Rice coding.
    Golomb,
    /// Lempel-Ziv-Welch.
    Lzw,
    /// Palette quantization of RGB/RGBA rasters (lossy).
    Quantize,
}

impl Algorithm {
    /// Every algorithm, in wire-id order.
    pub const ALL: [Algorithm; 5] = [
        Self::Rle,
        Self::Huffman,
        Self::Golomb,
        Self::Lzw,
        Self::Quantize,
    ];

    /// The byte-oriented, lossless algorithms.
    pub const LOSSLESS: [Algorithm; 4] = [Self::Rle, Self::Huffman, Self::Golomb, Self::Lzw];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        self.id().name()
    }

    /// Whether decoding restores the exact input.
    pub fn is_lossless(&self) -> bool {
        self.id().is_lossless()
    }

    /// Payload identifier written by this algorithm.
    pub fn id(&self) -> AlgorithmId {
        match self {
            Self::Rle => AlgorithmId::Rle,
            Self::Huffman => AlgorithmId::Huffman,
            Self::Golomb => AlgorithmId::Golomb,
            Self::Lzw => AlgorithmId::Lzw,
            Self::Quantize => AlgorithmId::Quantize,
        }
    }

    /// Typical file extension of a payload.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Rle => "rle.oxc",
            Self::Huffman => "huffman.oxc",
            Self::Golomb => "golomb.oxc",
            Self::Lzw => "lzw.oxc",
            Self::Quantize => "quantize.oxc",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rle => "run-length encoding of repeated bytes",
            Self::Huffman => "static Huffman prefix coding",
            Self::Golomb => "Golomb / Rice coding of byte values",
            Self::Lzw => "Lempel-Ziv-Welch dictionary coding",
            Self::Quantize => "palette quantization of RGB/RGBA rasters (lossy)",
        }
    }
}

impl From<AlgorithmId> for Algorithm {
    fn from(id: AlgorithmId) -> Self {
        match id {
            AlgorithmId::Rle => Self::Rle,
            AlgorithmId::Huffman => Self::Huffman,
            AlgorithmId::Golomb => Self::Golomb,
            AlgorithmId::Lzw => Self::Lzw,
            AlgorithmId::Quantize => Self::Quantize,
        }
    }
}

impl From<Algorithm> for AlgorithmId {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.id()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmId::from_str(s).map(Self::from)
    }
}
