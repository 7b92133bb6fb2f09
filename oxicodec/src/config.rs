//! Bundled codec settings.

use oxicodec_golomb::GolombConfig;
use oxicodec_lzw::LzwConfig;
use oxicodec_quantize::QuantizerConfig;

/// Settings for every configurable codec.
///
/// RLE and Huffman take no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// LZW code width and overflow policy.
    pub lzw: LzwConfig,
    /// Golomb divisor selection and value mapping.
    pub golomb: GolombConfig,
    /// Palette quantizer iteration cap.
    pub quantizer: QuantizerConfig,
}

impl CodecConfig {
    /// Replace the LZW settings.
    pub fn with_lzw(mut self, lzw: LzwConfig) -> Self {
        self.lzw = lzw;
        self
    }

    /// Replace the Golomb settings.
    pub fn with_golomb(mut self, golomb: GolombConfig) -> Self {
        self.golomb = golomb;
        self
    }

    /// Replace the quantizer settings.
    pub fn with_quantizer(mut self, quantizer: QuantizerConfig) -> Self {
        self.quantizer = quantizer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxicodec_golomb::{GolombMapping, GolombParameter};
    use oxicodec_lzw::OverflowPolicy;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.lzw.max_bits, 12);
        assert_eq!(config.lzw.overflow, OverflowPolicy::Freeze);
        assert_eq!(config.golomb.parameter, GolombParameter::Auto);
        assert_eq!(config.golomb.mapping, GolombMapping::Raw);
        assert_eq!(config.quantizer.max_iterations, 32);
    }

    #[test]
    fn test_builders() {
        let config = CodecConfig::default()
            .with_lzw(LzwConfig::new(16, OverflowPolicy::Reset))
            .with_golomb(GolombConfig::fixed(5));
        assert_eq!(config.lzw.max_bits, 16);
        assert_eq!(config.golomb.parameter, GolombParameter::Fixed(5));
    }
}
