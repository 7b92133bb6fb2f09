//! Palettes, index maps and palette reconstruction.

use crate::image::{ColorModel, RasterImage};
use oxicodec_core::{CodecError, Result};

/// Squared Euclidean distance between two RGBA colours.
///
/// RGB colours carry alpha 255 on both sides, so the alpha term vanishes.
#[inline]
pub fn distance_sq(a: [u8; 4], b: [u8; 4]) -> u32 {
    a.iter()
        .zip(&b)
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Index of the entry of `palette` nearest to `color`; ties go to the lowest
/// index. `palette` must not be empty.
pub fn nearest_index(color: [u8; 4], palette: &[[u8; 4]]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = u32::MAX;
    for (i, &p) in palette.iter().enumerate() {
        let dist = distance_sq(color, p);
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }
    best_idx
}

/// Ordered set of 1-256 colours. Index order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    model: ColorModel,
    colors: Vec<[u8; 4]>,
}

impl Palette {
    /// Largest palette an index byte can address.
    pub const MAX_LEN: usize = 256;

    /// Build a palette. RGB entries have their alpha forced to 255.
    ///
    /// Fails with `CorruptPayload` for an empty or oversized palette.
    pub fn new(model: ColorModel, colors: Vec<[u8; 4]>) -> Result<Self> {
        if colors.is_empty() || colors.len() > Self::MAX_LEN {
            return Err(CodecError::corrupt(format!(
                "palette of {} entries outside 1..={}",
                colors.len(),
                Self::MAX_LEN
            )));
        }
        let colors = match model {
            ColorModel::Rgb => colors.into_iter().map(|[r, g, b, _]| [r, g, b, 255]).collect(),
            ColorModel::Rgba => colors,
        };
        Ok(Self { model, colors })
    }

    /// Colour model of the entries.
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Entries in index order.
    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<[u8; 4]> {
        self.colors.get(index).copied()
    }

    /// Index of the nearest entry.
    pub fn nearest(&self, color: [u8; 4]) -> u8 {
        nearest_index(color, &self.colors) as u8
    }

    /// Bits per packed index: `ceil(log2 len)`, at least 1.
    pub fn index_bits(&self) -> u8 {
        let len = self.colors.len() as u32;
        (u32::BITS - (len - 1).leading_zeros()).max(1) as u8
    }
}

/// Palette index of every pixel, in raster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelIndexMap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height` palette indices.
    pub indices: Vec<u8>,
}

impl PixelIndexMap {
    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the map has no pixels.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Rebuild a raster by looking up every index in `palette`.
///
/// Fails with `CorruptPayload` if an index is beyond the palette or the
/// index count does not match the dimensions.
pub fn reconstruct(palette: &Palette, map: &PixelIndexMap) -> Result<RasterImage> {
    let pixels = map.width as u64 * map.height as u64;
    if map.indices.len() as u64 != pixels {
        return Err(CodecError::corrupt(format!(
            "{}x{} index map holds {} indices",
            map.width,
            map.height,
            map.indices.len()
        )));
    }

    let channels = palette.model().channels();
    let mut samples = Vec::with_capacity(map.indices.len() * channels);
    for (position, &index) in map.indices.iter().enumerate() {
        let color = palette.get(index as usize).ok_or_else(|| {
            CodecError::corrupt(format!(
                "pixel {position} uses index {index}, palette has {} entries",
                palette.len()
            ))
        })?;
        samples.extend_from_slice(&color[..channels]);
    }

    RasterImage::new(map.width, map.height, palette.model(), samples)
}
