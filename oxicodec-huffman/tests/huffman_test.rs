//! Huffman codec integration tests.

use oxicodec_core::{Codec, CompressedPayload};
use oxicodec_huffman::{FrequencyTable, HuffmanCodec, HuffmanTree, build_code_table};
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

/// Text-like data with a skewed byte distribution.
fn english_like(size: usize) -> Vec<u8> {
    let phrase = b"it was the best of times, it was the worst of times; ";
    phrase.iter().copied().cycle().take(size).collect()
}

#[test]
fn test_huffman_roundtrip_random_10k() {
    let original = pseudo_random(10_000, 0xDEADBEEF);
    let payload = HuffmanCodec.encode(&original).unwrap();
    assert_eq!(HuffmanCodec.decode(&payload).unwrap(), original);
}

#[test]
fn test_huffman_compresses_skewed_text() {
    let original = english_like(8192);
    let bytes = HuffmanCodec.compress(&original).unwrap();
    assert!(bytes.len() < original.len() * 3 / 4);
    assert_eq!(HuffmanCodec.decompress(&bytes).unwrap(), original);
}

#[test]
fn test_huffman_weighted_length_is_optimal_order() {
    // More frequent symbols never get longer codes.
    let original = english_like(4096);
    let freq = FrequencyTable::from_bytes(&original);
    let table = build_code_table(&original).unwrap();
    for (a, code_a) in table.entries() {
        for (b, code_b) in table.entries() {
            if freq.count(a) > freq.count(b) {
                assert!(code_a.len <= code_b.len, "{a} vs {b}");
            }
        }
    }
}

#[test]
fn test_huffman_truncated_serialized_body() {
    let bytes = HuffmanCodec.compress(&english_like(300)).unwrap();
    let payload = CompressedPayload::from_bytes(&bytes[..bytes.len() - 1]).unwrap();
    assert!(HuffmanCodec.decode(&payload).unwrap_err().is_underrun());
}

#[test]
fn test_huffman_truncated_metadata_is_corrupt() {
    let mut payload = HuffmanCodec.encode(b"abracadabra").unwrap();
    payload.metadata.pop();
    assert!(HuffmanCodec.decode(&payload).unwrap_err().is_corrupt());
}

#[test]
fn test_huffman_tree_rebuild_matches_encoder() {
    let original = pseudo_random(2048, 99);
    let table = build_code_table(&original).unwrap();
    let rebuilt = HuffmanTree::from_code_table(&table).unwrap();
    assert_eq!(rebuilt.leaf_count(), table.len());
}

proptest! {
    #[test]
    fn huffman_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let payload = HuffmanCodec.encode(&data).unwrap();
        prop_assert_eq!(HuffmanCodec.decode(&payload).unwrap(), data);
    }

    #[test]
    fn huffman_codes_are_prefix_free(data in prop::collection::vec(0u8..16, 1..1024)) {
        let table = build_code_table(&data).unwrap();
        prop_assert!(table.is_prefix_free());
        prop_assert_eq!(table.len(), FrequencyTable::from_bytes(&data).distinct());
    }
}
