//! Utility functions for the CLI.

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use oxicodec_core::CompressionMetrics;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Create a spinner with standard styling.
pub fn create_spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

/// Decide whether `path` may be written.
///
/// Asks on the terminal when the file exists and `force` is not set.
pub fn confirm_overwrite(path: &Path, force: bool) -> Result<bool, Box<dyn std::error::Error>> {
    if force || !path.exists() {
        return Ok(true);
    }
    let answer = Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;
    Ok(answer)
}

/// `input` with `suffix` appended to its file name.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Default name for a decompressed file: strips `.oxc` and the algorithm
/// extension when present, otherwise appends `.out`.
pub fn restored_path(payload: &Path, extension: &str) -> PathBuf {
    let text = payload.to_string_lossy();
    match text.strip_suffix(&format!(".{extension}")) {
        Some(stem) if !stem.is_empty() => PathBuf::from(stem),
        _ => output_path(payload, "out"),
    }
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Print compression metrics, one field per line.
pub fn print_metrics(metrics: &CompressionMetrics) {
    println!("Original:    {}", format_size(metrics.original_size));
    println!("Compressed:  {}", format_size(metrics.compressed_size));
    println!("Ratio:       {:.3}", metrics.ratio);
    println!("Saved:       {:.1}%", metrics.space_savings_percent());
    println!("Time:        {:.2?}", metrics.elapsed);
    if let Some(rate) = metrics.throughput() {
        println!("Throughput:  {}/s", format_size(rate as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            output_path(Path::new("data/file.txt"), "lzw.oxc"),
            PathBuf::from("data/file.txt.lzw.oxc")
        );
        assert_eq!(
            restored_path(Path::new("file.txt.lzw.oxc"), "lzw.oxc"),
            PathBuf::from("file.txt")
        );
        assert_eq!(
            restored_path(Path::new("blob.bin"), "lzw.oxc"),
            PathBuf::from("blob.bin.out")
        );
    }
}
