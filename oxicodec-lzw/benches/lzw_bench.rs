//! Performance benchmarks for oxicodec-lzw
//!
//! This benchmark suite evaluates:
//! - Compression/decompression speed (throughput)
//! - Freeze versus reset overflow policies
//! - Performance across different data sizes

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxicodec_core::Codec;
use oxicodec_lzw::{LzwCodec, LzwConfig, OverflowPolicy};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - all bytes are the same (best compression)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - no patterns (worst compression)
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            // Linear congruential generator
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - realistic scenario
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        text.iter().copied().cycle().take(size).collect()
    }

    /// Grayscale gradient, similar to raw image rows
    pub fn image_like(size: usize) -> Vec<u8> {
        let side = (size as f64).sqrt() as usize;
        let mut data = Vec::with_capacity(size);
        for y in 0..side {
            for x in 0..side {
                data.push((((x * 255 / side) + (y * 255 / side)) / 2) as u8);
            }
        }
        data.resize(size, 128);
        data
    }
}

/// Data sizes
const SIZES: [(&str, usize); 3] = [
    ("small_64KB", 64 * 1024),
    ("medium_256KB", 256 * 1024),
    ("large_1MB", 1024 * 1024),
];

const PATTERNS: [(&str, PatternGenerator); 4] = [
    ("uniform", test_data::uniform as PatternGenerator),
    ("random", test_data::random as PatternGenerator),
    ("text", test_data::text_like as PatternGenerator),
    ("image", test_data::image_like as PatternGenerator),
];

/// Benchmark compression speed for different data sizes and patterns
fn bench_compression_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_speed");
    let codec = LzwCodec::default();

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let data = generator(size);
            let id = format!("{size_name}/{pattern_name}");

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &data, |b, data| {
                b.iter(|| black_box(codec.encode(black_box(data)).unwrap()));
            });
        }
    }

    group.finish();
}

/// Benchmark decompression speed
fn bench_decompression_speed(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_speed");
    let codec = LzwCodec::default();

    for (size_name, size) in SIZES {
        for (pattern_name, generator) in PATTERNS {
            let payload = codec.encode(&generator(size)).unwrap();
            let id = format!("{size_name}/{pattern_name}");

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(&id), &payload, |b, payload| {
                b.iter(|| black_box(codec.decode(black_box(payload)).unwrap()));
            });
        }
    }

    group.finish();
}

/// Compare overflow policies on data that fills the dictionary
fn bench_overflow_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("overflow_policy");
    let data = test_data::text_like(256 * 1024);

    for overflow in [OverflowPolicy::Freeze, OverflowPolicy::Reset] {
        let codec = LzwCodec::new(LzwConfig::new(10, overflow));
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{overflow:?}")),
            &data,
            |b, data| {
                b.iter(|| {
                    let payload = codec.encode(black_box(data)).unwrap();
                    black_box(codec.decode(&payload).unwrap());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compression_speed,
    bench_decompression_speed,
    bench_overflow_policy,
);
criterion_main!(benches);
