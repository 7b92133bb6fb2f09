//! Core traits for codecs.
//!
//! Every lossless codec implements [`Codec`]: a fixed capability set of
//! `encode`, `decode` and identification. Codec values only hold their
//! configuration; all working state (trees, dictionaries, bitstreams) lives
//! inside a single call, so one codec value can be shared freely.

use crate::error::Result;
use crate::payload::{AlgorithmId, CompressedPayload};

/// A whole-buffer lossless codec.
pub trait Codec {
    /// Identifier written into produced payloads.
    fn algorithm(&self) -> AlgorithmId;

    /// Human-readable codec name.
    fn name(&self) -> &'static str {
        self.algorithm().name()
    }

    /// Compress `input` into a payload. Never mutates the input.
    fn encode(&self, input: &[u8]) -> Result<CompressedPayload>;

    /// Reconstruct the original bytes from a payload produced by
    /// [`Codec::encode`] of the same algorithm.
    ///
    /// Fails with `CorruptPayload` on an algorithm mismatch or inconsistent
    /// metadata and with `Underrun` on a truncated body.
    fn decode(&self, payload: &CompressedPayload) -> Result<Vec<u8>>;

    /// Encode and serialize in one step.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encode(input)?.to_bytes())
    }

    /// Parse and decode in one step.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let payload = CompressedPayload::from_bytes(data)?;
        self.decode(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    /// Stores the input verbatim.
    struct Identity;

    impl Codec for Identity {
        fn algorithm(&self) -> AlgorithmId {
            AlgorithmId::Rle
        }

        fn encode(&self, input: &[u8]) -> Result<CompressedPayload> {
            Ok(CompressedPayload::new(
                self.algorithm(),
                input.len() as u64,
                Vec::new(),
                input.to_vec(),
            ))
        }

        fn decode(&self, payload: &CompressedPayload) -> Result<Vec<u8>> {
            payload.expect_algorithm(self.algorithm())?;
            if payload.body.len() as u64 != payload.original_length {
                return Err(CodecError::corrupt("length mismatch"));
            }
            Ok(payload.body.clone())
        }
    }

    #[test]
    fn test_default_methods() {
        let codec = Identity;
        assert_eq!(codec.name(), "rle");

        let bytes = codec.compress(b"hello").unwrap();
        assert_eq!(codec.decompress(&bytes).unwrap(), b"hello");
        assert!(codec.decompress(&bytes[..4]).unwrap_err().is_corrupt());
    }
}
