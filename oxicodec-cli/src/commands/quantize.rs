//! Quantize command implementation.

use crate::ppm::{read_ppm, write_ppm};
use crate::utils::{confirm_overwrite, output_path, print_metrics};
use oxicodec::quantize::mean_squared_error;
use oxicodec::{CodecConfig, CompressionMetrics, quantize_image};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub fn cmd_quantize(
    input: &Path,
    k: usize,
    output: Option<PathBuf>,
    payload_path: Option<PathBuf>,
    config: &CodecConfig,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = read_ppm(&fs::read(input)?)?;

    let start = Instant::now();
    let quantized = quantize_image(&image, k, config)?;
    let payload = quantized.to_payload();
    let elapsed = start.elapsed();

    let approx = quantized.reconstruct()?;
    let mse = mean_squared_error(&image, &approx)?;

    let output = output.unwrap_or_else(|| output_path(input, "quantized.ppm"));
    if confirm_overwrite(&output, force)? {
        fs::write(&output, write_ppm(&approx))?;
        println!("Image:       {}", output.display());
    } else {
        println!("Skipped: {}", output.display());
    }
    if let Some(path) = payload_path {
        if confirm_overwrite(&path, force)? {
            fs::write(&path, payload.to_bytes())?;
            println!("Payload:     {}", path.display());
        } else {
            println!("Skipped: {}", path.display());
        }
    }

    println!("Size:        {}x{}", image.width(), image.height());
    println!("Palette:     {} of {} colours", quantized.palette.len(), k);
    println!("Index bits:  {}", quantized.palette.index_bits());
    println!("MSE:         {mse:.3}");
    print_metrics(&CompressionMetrics::from_payload(&payload, elapsed)?);
    Ok(())
}
