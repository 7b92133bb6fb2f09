//! Compress command implementation.

use crate::utils::{confirm_overwrite, output_path, print_metrics};
use oxicodec::{Algorithm, CodecConfig, CompressionMetrics, compress, decompress};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Parsed arguments of `compress`.
pub struct CompressOptions {
    pub input: PathBuf,
    pub algorithm: Algorithm,
    pub output: Option<PathBuf>,
    pub config: CodecConfig,
    pub force: bool,
}

pub fn cmd_compress(options: &CompressOptions) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(&options.input)?;
    let algorithm = options.algorithm;

    let start = Instant::now();
    let payload = compress(algorithm, &data, &options.config)?;
    let elapsed = start.elapsed();

    // Verification pass
    let restored = decompress(&payload, &options.config)?;
    if restored != data {
        return Err(format!("{algorithm} round trip produced different bytes").into());
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| output_path(&options.input, algorithm.extension()));
    if !confirm_overwrite(&output, options.force)? {
        println!("Skipped: {}", output.display());
        return Ok(());
    }

    let bytes = payload.to_bytes();
    fs::write(&output, &bytes)?;

    println!("Algorithm:   {algorithm}");
    println!("Output:      {}", output.display());
    if data.is_empty() {
        println!("Input is empty; wrote a {}-byte payload", bytes.len());
    } else {
        print_metrics(&CompressionMetrics::from_payload(&payload, elapsed)?);
    }
    Ok(())
}
