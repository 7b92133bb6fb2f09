//! Bench command implementation.

use crate::utils::{create_spinner, format_size};
use oxicodec::{Algorithm, CodecConfig, CompressionMetrics, compress, decompress};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// One measured codec.
struct BenchRow {
    algorithm: Algorithm,
    compressed: usize,
    encode: Duration,
    decode: Duration,
    metrics: Option<CompressionMetrics>,
}

pub fn cmd_bench(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let config = CodecConfig::default();

    let spinner = create_spinner("benchmarking")?;
    let mut rows = Vec::with_capacity(Algorithm::LOSSLESS.len());
    for algorithm in Algorithm::LOSSLESS {
        spinner.set_message(format!("{algorithm}: {} bytes", data.len()));

        let start = Instant::now();
        let payload = compress(algorithm, &data, &config)?;
        let encode = start.elapsed();

        let start = Instant::now();
        let restored = decompress(&payload, &config)?;
        let decode = start.elapsed();
        if restored != data {
            spinner.finish_and_clear();
            return Err(format!("{algorithm} round trip produced different bytes").into());
        }

        rows.push(BenchRow {
            algorithm,
            compressed: payload.serialized_len(),
            encode,
            decode,
            // Empty input has no meaningful ratio.
            metrics: CompressionMetrics::from_payload(&payload, encode).ok(),
        });
    }
    spinner.finish_and_clear();

    println!("{} ({})", input.display(), format_size(data.len() as u64));
    println!(
        "{:<10} {:>12} {:>8} {:>8} {:>12} {:>12}",
        "Algorithm", "Compressed", "Ratio", "Saved", "Encode", "Decode"
    );
    println!("{}", "-".repeat(67));
    for row in &rows {
        let (ratio, saved) = match &row.metrics {
            Some(m) => (
                format!("{:.3}", m.ratio),
                format!("{:.1}%", m.space_savings_percent()),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        println!(
            "{:<10} {:>12} {:>8} {:>8} {:>12} {:>12}",
            row.algorithm.name(),
            row.compressed,
            ratio,
            saved,
            format!("{:.2?}", row.encode),
            format!("{:.2?}", row.decode)
        );
    }

    if let Some(best) = rows
        .iter()
        .filter(|r| r.metrics.is_some())
        .min_by_key(|r| r.compressed)
    {
        println!("{}", "-".repeat(67));
        println!("Smallest: {}", best.algorithm);
    }
    Ok(())
}
