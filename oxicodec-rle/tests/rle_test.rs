//! Run-length codec integration tests.

use oxicodec_core::{AlgorithmId, Codec, CompressedPayload};
use oxicodec_rle::{MAX_RUN, RleCodec, runs};
use proptest::prelude::*;

/// Reproducible pseudo-random bytes (linear congruential generator).
fn pseudo_random(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 32) as u8
        })
        .collect()
}

#[test]
fn test_rle_roundtrip_random_10k() {
    let original = pseudo_random(10_000, 0x123456789ABCDEF0);
    let payload = RleCodec.encode(&original).unwrap();
    assert_eq!(RleCodec.decode(&payload).unwrap(), original);
}

#[test]
fn test_rle_huge_recorded_length_is_corrupt() {
    let payload = CompressedPayload::new(AlgorithmId::Rle, u64::MAX, Vec::new(), vec![b'a', 1]);
    assert!(RleCodec.decode(&payload).unwrap_err().is_corrupt());

    // One pair more than the body can describe.
    let body = vec![b'a', 255, b'b', 255];
    let payload = CompressedPayload::new(AlgorithmId::Rle, 511, Vec::new(), body);
    assert!(RleCodec.decode(&payload).unwrap_err().is_corrupt());
}

#[test]
fn test_rle_serialized_roundtrip() {
    let original = b"WWWWWWWWWWWWBWWWWWWWWWWWWBBBWWWWWWWWWWWWWWWWWWWWWWWWBWWWWWWWWWWWWWW";
    let bytes = RleCodec.compress(original).unwrap();
    assert!(bytes.len() < original.len());
    assert_eq!(RleCodec.decompress(&bytes).unwrap(), original);
}

#[test]
fn test_rle_deterministic() {
    let original = pseudo_random(4096, 7);
    assert_eq!(
        RleCodec.compress(&original).unwrap(),
        RleCodec.compress(&original).unwrap()
    );
}

#[test]
fn test_rle_truncated_serialized_body() {
    let bytes = RleCodec.compress(b"aaaabbbcc").unwrap();
    let payload = CompressedPayload::from_bytes(&bytes[..bytes.len() - 1]).unwrap();
    assert!(RleCodec.decode(&payload).unwrap_err().is_underrun());
}

proptest! {
    #[test]
    fn rle_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let payload = RleCodec.encode(&data).unwrap();
        prop_assert_eq!(RleCodec.decode(&payload).unwrap(), data);
    }

    #[test]
    fn rle_runs_are_bounded_and_maximal(data in prop::collection::vec(0u8..3, 0..2048)) {
        let runs = runs(&data);
        for window in runs.windows(2) {
            // Adjacent runs of the same value only occur at the split point.
            if window[0].0 == window[1].0 {
                prop_assert_eq!(window[0].1 as usize, MAX_RUN);
            }
        }
        prop_assert!(runs.iter().all(|&(_, len)| len >= 1));
    }
}
