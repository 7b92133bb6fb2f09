//! Compression statistics.
//!
//! [`CompressionMetrics`] is a pure function of the original size, the
//! compressed size and the elapsed time of the call that produced it.

use crate::error::{CodecError, Result};
use crate::payload::CompressedPayload;
use std::time::Duration;

/// Size and timing statistics for one compression call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionMetrics {
    /// Uncompressed size in bytes.
    pub original_size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// `original_size / compressed_size`.
    pub ratio: f64,
    /// `1 - compressed_size / original_size`; negative when the output grew.
    pub percent_saved: f64,
    /// Wall-clock time of the measured call.
    pub elapsed: Duration,
}

impl CompressionMetrics {
    /// Compute metrics for an (original, compressed) size pair.
    ///
    /// Fails with [`CodecError::Configuration`] when `compressed_size` is 0
    /// and with [`CodecError::EmptyInput`] when `original_size` is 0.
    pub fn compute(original_size: u64, compressed_size: u64, elapsed: Duration) -> Result<Self> {
        if compressed_size == 0 {
            return Err(CodecError::configuration(
                "compressed size must be non-zero to compute a ratio",
            ));
        }
        if original_size == 0 {
            return Err(CodecError::empty_input(
                "space savings are undefined for an empty original",
            ));
        }

        let original = original_size as f64;
        let compressed = compressed_size as f64;

        Ok(Self {
            original_size,
            compressed_size,
            ratio: original / compressed,
            percent_saved: 1.0 - compressed / original,
            elapsed,
        })
    }

    /// Compute metrics against the serialized size of `payload`.
    pub fn from_payload(payload: &CompressedPayload, elapsed: Duration) -> Result<Self> {
        Self::compute(
            payload.original_length,
            payload.serialized_len() as u64,
            elapsed,
        )
    }

    /// Space savings as a percentage (`percent_saved * 100`).
    pub fn space_savings_percent(&self) -> f64 {
        self.percent_saved * 100.0
    }

    /// Whether the compressed form is smaller than the original.
    pub fn is_reduction(&self) -> bool {
        self.compressed_size < self.original_size
    }

    /// Input throughput in bytes per second, `None` for a zero duration.
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.original_size as f64 / secs)
    }
}
