//! # OxiCodec-RLE: Run-Length Encoding
//!
//! Replaces each maximal run of identical bytes with a `(value, length)`
//! pair.
//!
//! ## Body Layout
//!
//! The body is a flat sequence of byte pairs:
//!
//! ```text
//! [value][length] [value][length] ...
//! ```
//!
//! `length` is 1-255. A run longer than 255 is split into as many
//! `(value, 255)` pairs as fit plus one pair for the remainder, so the split
//! is always recoverable. There is no metadata beyond the payload's
//! `original_length`. Empty input encodes to an empty body.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::Codec;
//! use oxicodec_rle::{RleCodec, runs};
//!
//! assert_eq!(runs(b"aaaabbbcc"), vec![(b'a', 4), (b'b', 3), (b'c', 2)]);
//!
//! let payload = RleCodec.encode(b"aaaabbbcc").unwrap();
//! assert_eq!(RleCodec.decode(&payload).unwrap(), b"aaaabbbcc");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use oxicodec_core::{AlgorithmId, Codec, CodecError, CompressedPayload, Result};

/// Longest run a single pair can describe.
pub const MAX_RUN: usize = 255;

/// Split `data` into `(value, length)` runs, each at most [`MAX_RUN`] long.
pub fn runs(data: &[u8]) -> Vec<(u8, u8)> {
    let mut result = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let mut run_len = 1;

        // Count consecutive identical bytes
        while i + run_len < data.len() && data[i + run_len] == byte && run_len < MAX_RUN {
            run_len += 1;
        }

        result.push((byte, run_len as u8));
        i += run_len;
    }

    result
}

/// Encode `data` into the pair body.
pub fn encode_body(data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len().min(1 << 16));
    for (value, len) in runs(data) {
        body.push(value);
        body.push(len);
    }
    body
}

/// Expand a pair body produced by [`encode_body`].
///
/// `expected_len` is the length recorded in the payload header; the body must
/// expand to exactly that many bytes.
pub fn decode_body(body: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    if body.len() % 2 != 0 {
        // The last pair lost its length byte.
        return Err(CodecError::underrun(
            16,
            8,
            (body.len() as u64 - 1) * 8,
        ));
    }

    let max_len = (body.len() / 2).saturating_mul(MAX_RUN);
    if expected_len > max_len {
        return Err(CodecError::corrupt(format!(
            "{} run pairs cannot expand to the recorded length of {expected_len} bytes",
            body.len() / 2
        )));
    }
    let mut result = Vec::with_capacity(expected_len);

    for (index, pair) in body.chunks_exact(2).enumerate() {
        let (value, count) = (pair[0], pair[1] as usize);
        if count == 0 {
            return Err(CodecError::corrupt(format!(
                "zero-length run in pair {index}"
            )));
        }
        if result.len() + count > expected_len {
            return Err(CodecError::corrupt(format!(
                "runs expand beyond the recorded length of {expected_len} bytes"
            )));
        }
        result.resize(result.len() + count, value);
    }

    if result.len() != expected_len {
        return Err(CodecError::corrupt(format!(
            "runs expand to {} bytes, header records {expected_len}",
            result.len()
        )));
    }

    Ok(result)
}

/// Run-length codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RleCodec;

impl Codec for RleCodec {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Rle
    }

    fn encode(&self, input: &[u8]) -> Result<CompressedPayload> {
        let body = encode_body(input);
        log::debug!(
            "rle: {} bytes -> {} runs ({} body bytes)",
            input.len(),
            body.len() / 2,
            body.len()
        );
        Ok(CompressedPayload::new(
            AlgorithmId::Rle,
            input.len() as u64,
            Vec::new(),
            body,
        ))
    }

    fn decode(&self, payload: &CompressedPayload) -> Result<Vec<u8>> {
        payload.expect_algorithm(AlgorithmId::Rle)?;
        if !payload.metadata.is_empty() {
            return Err(CodecError::corrupt("run-length payloads carry no metadata"));
        }
        decode_body(&payload.body, payload.original_len()?)
    }
}
