//! Dispatch integration tests across every lossless codec.

use oxicodec::golomb::{GolombConfig, GolombMapping, GolombParameter};
use oxicodec::lzw::{LzwConfig, OverflowPolicy};
use oxicodec::{Algorithm, CodecConfig, CompressedPayload, compress, decompress, detect};
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

fn configs() -> Vec<CodecConfig> {
    vec![
        CodecConfig::default(),
        CodecConfig::default()
            .with_lzw(LzwConfig::new(9, OverflowPolicy::Reset))
            .with_golomb(GolombConfig::new(GolombParameter::Rice, GolombMapping::Delta)),
        CodecConfig::default()
            .with_lzw(LzwConfig::new(16, OverflowPolicy::Freeze))
            .with_golomb(GolombConfig::fixed(3)),
    ]
}

#[test]
fn test_edge_inputs_all_codecs() {
    let inputs: Vec<Vec<u8>> = vec![
        Vec::new(),
        vec![0x7f],
        vec![0xAA; 1000],
        pseudo_random(10_000, 42),
        (0..=255).collect(),
    ];
    for config in configs() {
        for algorithm in Algorithm::LOSSLESS {
            for input in &inputs {
                let bytes = compress(algorithm, input, &config).unwrap().to_bytes();
                assert_eq!(detect(&bytes).unwrap(), algorithm);
                let payload = CompressedPayload::from_bytes(&bytes).unwrap();
                assert_eq!(
                    &decompress(&payload, &config).unwrap(),
                    input,
                    "{algorithm} on {} bytes",
                    input.len()
                );
            }
        }
    }
}

#[test]
fn test_deterministic_payloads() {
    let data = pseudo_random(4096, 7);
    let config = CodecConfig::default();
    for algorithm in Algorithm::LOSSLESS {
        let a = compress(algorithm, &data, &config).unwrap().to_bytes();
        let b = compress(algorithm, &data, &config).unwrap().to_bytes();
        assert_eq!(a, b, "{algorithm}");
    }
}

#[test]
fn test_cross_codec_payload_rejected() {
    use oxicodec::Codec;
    use oxicodec::huffman::HuffmanCodec;

    let payload = compress(Algorithm::Rle, b"aaaa", &CodecConfig::default()).unwrap();
    assert!(HuffmanCodec.decode(&payload).unwrap_err().is_corrupt());
}

proptest! {
    #[test]
    fn facade_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        index in 0usize..4,
    ) {
        let algorithm = Algorithm::LOSSLESS[index];
        let config = CodecConfig::default();
        let payload = compress(algorithm, &data, &config).unwrap();
        prop_assert_eq!(decompress(&payload, &config).unwrap(), data);
    }
}
