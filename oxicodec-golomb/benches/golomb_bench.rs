//! Performance benchmarks for Golomb coding
//!
//! This benchmark suite evaluates:
//! - Encode/decode throughput with an estimated divisor
//! - Raw versus delta mapping on a smooth signal

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxicodec_core::Codec;
use oxicodec_golomb::{GolombCodec, GolombConfig, GolombMapping, GolombParameter};
use std::hint::black_box;

/// Test data sizes
const SIZES: [usize; 3] = [1024, 64 * 1024, 1024 * 1024];

/// Slowly varying signal with small noise
fn generate_signal(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0x123456789ABCDEF0;
    (0..size)
        .map(|i| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let noise = ((seed >> 60) & 0x3) as u8;
            ((i / 64) % 200) as u8 + noise
        })
        .collect()
}

fn bench_golomb(c: &mut Criterion) {
    for mapping in [GolombMapping::Raw, GolombMapping::Delta] {
        let codec = GolombCodec::new(GolombConfig::new(GolombParameter::Rice, mapping));
        let name = format!("golomb_{mapping:?}").to_lowercase();

        let mut group = c.benchmark_group(format!("{name}_encode"));
        for size in SIZES {
            let data = generate_signal(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
                b.iter(|| black_box(codec.encode(black_box(data)).unwrap()))
            });
        }
        group.finish();

        let mut group = c.benchmark_group(format!("{name}_decode"));
        for size in SIZES {
            let payload = codec.encode(&generate_signal(size)).unwrap();
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
                b.iter(|| black_box(codec.decode(black_box(payload)).unwrap()))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_golomb);
criterion_main!(benches);
