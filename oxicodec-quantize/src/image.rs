//! Raster images and pixel error measurement.

use oxicodec_core::{CodecError, Result};

/// Channel layout of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// 8-bit red, green, blue.
    Rgb,
    /// 8-bit red, green, blue, alpha.
    Rgba,
}

impl ColorModel {
    /// Samples per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Parse a channel count.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Expand one pixel to RGBA (alpha 255 for RGB).
    pub(crate) fn to_rgba(self, pixel: &[u8]) -> [u8; 4] {
        match self {
            Self::Rgb => [pixel[0], pixel[1], pixel[2], 255],
            Self::Rgba => [pixel[0], pixel[1], pixel[2], pixel[3]],
        }
    }
}

/// Interleaved 8-bit raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    model: ColorModel,
    samples: Vec<u8>,
}

impl RasterImage {
    /// Wrap `samples` as a `width` x `height` raster.
    ///
    /// Fails with a configuration error if the sample count is not
    /// `width * height * channels`.
    pub fn new(width: u32, height: u32, model: ColorModel, samples: Vec<u8>) -> Result<Self> {
        let expected = (width as u64) * (height as u64) * model.channels() as u64;
        if samples.len() as u64 != expected {
            return Err(CodecError::configuration(format!(
                "{width}x{height} {model:?} raster needs {expected} samples, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            model,
            samples,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the image, returning its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.samples.len() / self.model.channels()
    }

    /// Pixels expanded to RGBA, in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.samples
            .chunks_exact(self.model.channels())
            .map(|p| self.model.to_rgba(p))
    }
}

/// Mean squared error per sample between two rasters of the same shape.
pub fn mean_squared_error(original: &RasterImage, reconstructed: &RasterImage) -> Result<f64> {
    if original.width != reconstructed.width
        || original.height != reconstructed.height
        || original.model != reconstructed.model
    {
        return Err(CodecError::configuration(format!(
            "cannot compare {}x{} {:?} with {}x{} {:?}",
            original.width,
            original.height,
            original.model,
            reconstructed.width,
            reconstructed.height,
            reconstructed.model
        )));
    }
    if original.samples.is_empty() {
        return Ok(0.0);
    }

    let sum: u64 = original
        .samples
        .iter()
        .zip(&reconstructed.samples)
        .map(|(&a, &b)| {
            let d = a as i64 - b as i64;
            (d * d) as u64
        })
        .sum();
    Ok(sum as f64 / original.samples.len() as f64)
}
