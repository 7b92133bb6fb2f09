//! # OxiCodec-Quantize: Palette Quantization
//!
//! Lossy reduction of an RGB or RGBA raster to at most `k` colours.
//!
//! ## Algorithm
//!
//! 1. Build a histogram of the distinct colours
//! 2. With no more than `k` distinct colours, they become the palette as-is
//!    and the reconstruction is exact
//! 3. Otherwise seed `k` centroids by maximin distance and run weighted
//!    Lloyd iterations over the histogram until nothing moves or the
//!    iteration cap is hit
//! 4. Drop duplicate and unused centroids
//! 5. Map every pixel to its nearest palette entry
//!
//! Every step is deterministic: the same image and `k` always produce the
//! same palette.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_quantize::{ColorModel, RasterImage, quantize};
//!
//! let samples = vec![0, 0, 0, 255, 255, 255, 0, 0, 0, 10, 10, 10];
//! let image = RasterImage::new(2, 2, ColorModel::Rgb, samples).unwrap();
//!
//! let quantized = quantize(&image, 2).unwrap();
//! assert_eq!(quantized.palette.len(), 2);
//! let approx = quantized.reconstruct().unwrap();
//! assert_eq!(approx.width(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod image;
mod kmeans;
mod palette;
mod payload;

pub use image::{ColorModel, RasterImage, mean_squared_error};
pub use kmeans::{ColorCount, Refinement, histogram, lookup, maximin_seeds, prune, refine};
pub use palette::{Palette, PixelIndexMap, distance_sq, nearest_index, reconstruct};
pub use payload::QuantizedImage;

use oxicodec_core::{CodecError, Result};

/// Quantizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizerConfig {
    /// Upper bound on Lloyd iterations.
    pub max_iterations: u32,
}

impl QuantizerConfig {
    /// Default iteration cap.
    pub const DEFAULT_MAX_ITERATIONS: u32 = 32;

    /// Settings with the given iteration cap.
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ITERATIONS)
    }
}

/// Palette quantizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorQuantizer {
    config: QuantizerConfig,
}

impl ColorQuantizer {
    /// Smallest palette size accepted.
    pub const MIN_COLORS: usize = 2;
    /// Largest palette size accepted.
    pub const MAX_COLORS: usize = Palette::MAX_LEN;

    /// Create a quantizer with the given settings.
    pub fn new(config: QuantizerConfig) -> Self {
        Self { config }
    }

    /// Settings of this quantizer.
    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    /// Reduce `image` to at most `k` colours.
    pub fn quantize(&self, image: &RasterImage, k: usize) -> Result<QuantizedImage> {
        if !(Self::MIN_COLORS..=Self::MAX_COLORS).contains(&k) {
            return Err(CodecError::configuration(format!(
                "palette size {k} outside {}..={}",
                Self::MIN_COLORS,
                Self::MAX_COLORS
            )));
        }
        if image.pixel_count() == 0 {
            return Err(CodecError::configuration(format!(
                "{}x{} image has no pixels",
                image.width(),
                image.height()
            )));
        }
        let expected = image.width() as u64 * image.height() as u64 * image.model().channels() as u64;
        if image.samples().len() as u64 != expected {
            return Err(CodecError::configuration(format!(
                "raster holds {} samples, expected {expected}",
                image.samples().len()
            )));
        }

        let colors = histogram(image.pixels());
        let centroids = if colors.len() <= k {
            log::debug!(
                "quantize: {} distinct colours fit in k = {}",
                colors.len(),
                k
            );
            colors.iter().map(|c| c.rgba).collect()
        } else {
            let seeds = maximin_seeds(&colors, k);
            let refinement = refine(&colors, seeds, self.config.max_iterations);
            log::debug!(
                "quantize: {} distinct colours, k = {}, {} iterations (converged: {})",
                colors.len(),
                k,
                refinement.iterations,
                refinement.converged
            );
            prune(&colors, &refinement.centroids)
        };

        let palette = Palette::new(image.model(), centroids)?;

        // Resolve each distinct colour once, then map pixels through it.
        let assignment: Vec<u8> = colors.iter().map(|c| palette.nearest(c.rgba)).collect();
        let mut indices = Vec::with_capacity(image.pixel_count());
        for pixel in image.pixels() {
            let index = lookup(&colors, pixel).and_then(|i| assignment.get(i).copied());
            indices.push(index.unwrap_or_else(|| palette.nearest(pixel)));
        }

        log::trace!(
            "quantize: {} pixels mapped onto {} palette entries",
            indices.len(),
            palette.len()
        );

        Ok(QuantizedImage {
            palette,
            indices: PixelIndexMap {
                width: image.width(),
                height: image.height(),
                indices,
            },
        })
    }
}

/// Quantize with the default settings.
pub fn quantize(image: &RasterImage, k: usize) -> Result<QuantizedImage> {
    ColorQuantizer::default().quantize(image, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_image() -> RasterImage {
        let samples = vec![0, 0, 0, 255, 255, 255, 0, 0, 0, 10, 10, 10];
        RasterImage::new(2, 2, ColorModel::Rgb, samples).unwrap()
    }

    #[test]
    fn test_scenario_black_and_white() {
        let quantized = quantize(&scenario_image(), 2).unwrap();
        assert_eq!(
            quantized.palette.colors(),
            &[[3, 3, 3, 255], [255, 255, 255, 255]]
        );
        assert_eq!(quantized.indices.indices, vec![0, 1, 0, 0]);

        let approx = quantized.reconstruct().unwrap();
        assert_eq!(approx.width(), 2);
        assert_eq!(approx.height(), 2);
        assert_eq!(approx.model(), ColorModel::Rgb);
    }

    #[test]
    fn test_exact_when_k_covers_colours() {
        let image = scenario_image();
        let quantized = quantize(&image, 3).unwrap();
        assert_eq!(quantized.palette.len(), 3);
        let approx = quantized.reconstruct().unwrap();
        assert_eq!(approx, image);
        assert_eq!(mean_squared_error(&image, &approx).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_k() {
        let image = scenario_image();
        assert!(quantize(&image, 1).unwrap_err().is_configuration());
        assert!(quantize(&image, 257).unwrap_err().is_configuration());
        assert!(quantize(&image, 0).unwrap_err().is_configuration());
    }

    #[test]
    fn test_zero_pixels() {
        let image = RasterImage::new(0, 5, ColorModel::Rgba, Vec::new()).unwrap();
        assert!(quantize(&image, 4).unwrap_err().is_configuration());
    }

    #[test]
    fn test_single_colour() {
        let image = RasterImage::new(3, 1, ColorModel::Rgb, vec![7; 9]).unwrap();
        let quantized = quantize(&image, 16).unwrap();
        assert_eq!(quantized.palette.len(), 1);
        assert_eq!(quantized.palette.index_bits(), 1);
        assert_eq!(quantized.indices.indices, vec![0, 0, 0]);
    }

    #[test]
    fn test_iteration_cap_respected() {
        let samples: Vec<u8> = (0..=255u8).flat_map(|v| [v, v / 2, 255 - v]).collect();
        let image = RasterImage::new(16, 16, ColorModel::Rgb, samples).unwrap();
        let quantizer = ColorQuantizer::new(QuantizerConfig::new(1));
        let quantized = quantizer.quantize(&image, 4).unwrap();
        assert!(quantized.palette.len() <= 4);
        assert_eq!(quantized.indices.len(), 256);
    }

    #[test]
    fn test_rgba_alpha_kept() {
        let samples = vec![10, 20, 30, 0, 10, 20, 30, 255, 200, 200, 200, 128];
        let image = RasterImage::new(3, 1, ColorModel::Rgba, samples).unwrap();
        let approx = quantize(&image, 3).unwrap().reconstruct().unwrap();
        assert_eq!(approx, image);
    }

    #[test]
    fn test_deterministic() {
        let samples: Vec<u8> = (0..300u32).map(|i| (i * 37 % 251) as u8).collect();
        let image = RasterImage::new(10, 10, ColorModel::Rgb, samples).unwrap();
        assert_eq!(quantize(&image, 5).unwrap(), quantize(&image, 5).unwrap());
    }
}
