//! Decompress command implementation.

use crate::ppm::write_ppm;
use crate::utils::{confirm_overwrite, format_size, restored_path};
use oxicodec::quantize::QuantizedImage;
use oxicodec::{Algorithm, CodecConfig, CompressedPayload, decompress, detect};
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    payload_path: &Path,
    output: Option<PathBuf>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(payload_path)?;
    let algorithm = detect(&bytes)?;
    let payload = CompressedPayload::from_bytes(&bytes)?;

    // Quantized payloads are restored as images.
    let (restored, default_output) = if algorithm == Algorithm::Quantize {
        let image = QuantizedImage::from_payload(&payload)?.reconstruct()?;
        let stem = restored_path(payload_path, algorithm.extension());
        (write_ppm(&image), stem.with_extension("ppm"))
    } else {
        (
            decompress(&payload, &CodecConfig::default())?,
            restored_path(payload_path, algorithm.extension()),
        )
    };

    let output = output.unwrap_or(default_output);
    if !confirm_overwrite(&output, force)? {
        println!("Skipped: {}", output.display());
        return Ok(());
    }
    fs::write(&output, &restored)?;

    println!(
        "{}: {} -> {} ({})",
        algorithm,
        payload_path.display(),
        output.display(),
        format_size(restored.len() as u64)
    );
    Ok(())
}
