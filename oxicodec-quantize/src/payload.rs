//! Quantized images and their serialised payload.
//!
//! # Metadata Layout
//!
//! ```text
//! bit_count: u64 | width: u32 | height: u32 | channels: u8 (3 or 4)
//! palette_len: u16 | palette_len x entry (channels bytes each)
//! ```
//!
//! The body holds one index per pixel, packed MSB-first with
//! `max(1, ceil(log2 palette_len))` bits each. `original_length` is the size
//! of the raster's sample buffer.

use crate::image::{ColorModel, RasterImage};
use crate::palette::{Palette, PixelIndexMap, reconstruct};
use oxicodec_core::{
    AlgorithmId, BitReader, BitWriter, CodecError, CompressedPayload, MetadataWriter, Result,
};

/// Output of palette quantization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    /// Selected colours.
    pub palette: Palette,
    /// Palette index of every pixel.
    pub indices: PixelIndexMap,
}

impl QuantizedImage {
    /// Rebuild the approximated raster.
    pub fn reconstruct(&self) -> Result<RasterImage> {
        reconstruct(&self.palette, &self.indices)
    }

    /// Size of the raster this image was quantized from, in bytes.
    pub fn original_len(&self) -> u64 {
        self.indices.len() as u64 * self.palette.model().channels() as u64
    }

    /// Serialise as a `Quantize` payload.
    pub fn to_payload(&self) -> CompressedPayload {
        let bits = self.palette.index_bits();
        let mut writer = BitWriter::with_capacity(self.indices.len() * bits as usize / 8 + 1);
        for &index in &self.indices.indices {
            writer.write_bits(index as u64, bits);
        }
        let (body, bit_count) = writer.finish();

        let channels = self.palette.model().channels();
        let mut meta = MetadataWriter::new();
        meta.write_u64(bit_count)
            .write_u32(self.indices.width)
            .write_u32(self.indices.height)
            .write_u8(channels as u8)
            .write_u16(self.palette.len() as u16);
        for color in self.palette.colors() {
            meta.write_bytes(&color[..channels]);
        }

        CompressedPayload::new(
            AlgorithmId::Quantize,
            self.original_len(),
            meta.into_vec(),
            body,
        )
    }

    /// Parse a `Quantize` payload.
    pub fn from_payload(payload: &CompressedPayload) -> Result<Self> {
        payload.expect_algorithm(AlgorithmId::Quantize)?;

        let mut meta = payload.metadata_reader();
        let bit_count = meta.read_u64()?;
        let width = meta.read_u32()?;
        let height = meta.read_u32()?;
        let channels = meta.read_u8()?;
        let palette_len = meta.read_u16()? as usize;

        let model = ColorModel::from_channels(channels)
            .ok_or_else(|| CodecError::corrupt(format!("unsupported channel count {channels}")))?;
        let mut colors = Vec::with_capacity(palette_len.min(Palette::MAX_LEN));
        for _ in 0..palette_len {
            let entry = meta.read_bytes(model.channels())?;
            let mut rgba = [255u8; 4];
            rgba[..entry.len()].copy_from_slice(entry);
            colors.push(rgba);
        }
        meta.finish()?;
        let palette = Palette::new(model, colors)?;

        let pixels = width as u64 * height as u64;
        if pixels == 0 {
            return Err(CodecError::corrupt("quantized image has no pixels"));
        }
        if pixels.checked_mul(model.channels() as u64) != Some(payload.original_length) {
            return Err(CodecError::corrupt(format!(
                "original length {} does not match a {width}x{height} {model:?} raster",
                payload.original_length
            )));
        }
        let bits = palette.index_bits();
        if pixels.checked_mul(bits as u64) != Some(bit_count) {
            return Err(CodecError::corrupt(format!(
                "{bit_count} body bits for {pixels} indices of {bits} bits"
            )));
        }

        let mut reader = BitReader::exact(&payload.body, bit_count)?;
        let mut indices = Vec::with_capacity(pixels as usize);
        for _ in 0..pixels {
            indices.push(reader.read_bits(bits)? as u8);
        }

        let image = Self {
            palette,
            indices: PixelIndexMap {
                width,
                height,
                indices,
            },
        };
        // Reject out-of-range indices up front.
        if let Some(&bad) = image
            .indices
            .indices
            .iter()
            .find(|&&i| i as usize >= image.palette.len())
        {
            return Err(CodecError::corrupt(format!(
                "index {bad} beyond palette of {} entries",
                image.palette.len()
            )));
        }
        Ok(image)
    }
}
