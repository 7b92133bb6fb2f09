//! Inspect command implementation.

use crate::utils::format_size;
use oxicodec::golomb::GolombHeader;
use oxicodec::huffman::HuffmanCodec;
use oxicodec::lzw::LzwHeader;
use oxicodec::quantize::QuantizedImage;
use oxicodec::{Algorithm, CompressedPayload, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON output for a payload.
#[derive(Debug, Serialize, Deserialize)]
struct PayloadJson {
    file: String,
    algorithm: String,
    lossless: bool,
    original_length: u64,
    metadata_length: usize,
    body_length: usize,
    serialized_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<f64>,
    parameters: serde_json::Value,
}

/// Codec parameters recorded in the metadata block.
fn parameters(payload: &CompressedPayload) -> Result<serde_json::Value> {
    let value = match Algorithm::from(payload.algorithm) {
        Algorithm::Rle => serde_json::json!({
            "runs": payload.body.len() / 2,
        }),
        Algorithm::Huffman => {
            let (table, bit_count) = HuffmanCodec::read_table(payload)?;
            serde_json::json!({
                "bit_count": bit_count,
                "symbols": table.len(),
                "max_code_length": table.max_len(),
            })
        }
        Algorithm::Golomb => {
            let header = GolombHeader::read(payload)?;
            serde_json::json!({
                "bit_count": header.bit_count,
                "divisor": header.b,
                "mapping": format!("{:?}", header.mapping).to_lowercase(),
            })
        }
        Algorithm::Lzw => {
            let header = LzwHeader::read(payload)?;
            serde_json::json!({
                "bit_count": header.bit_count,
                "max_bits": header.config.max_bits,
                "overflow": format!("{:?}", header.config.overflow).to_lowercase(),
            })
        }
        Algorithm::Quantize => {
            let image = QuantizedImage::from_payload(payload)?;
            serde_json::json!({
                "width": image.indices.width,
                "height": image.indices.height,
                "channels": image.palette.model().channels(),
                "palette_length": image.palette.len(),
                "index_bits": image.palette.index_bits(),
            })
        }
    };
    Ok(value)
}

pub fn cmd_inspect(path: &Path, json: bool) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    let payload = CompressedPayload::from_bytes(&bytes)?;
    let algorithm = Algorithm::from(payload.algorithm);
    let serialized = payload.serialized_len();

    let output = PayloadJson {
        file: path.display().to_string(),
        algorithm: algorithm.name().to_string(),
        lossless: algorithm.is_lossless(),
        original_length: payload.original_length,
        metadata_length: payload.metadata.len(),
        body_length: payload.body.len(),
        serialized_length: serialized,
        ratio: (serialized > 0 && payload.original_length > 0)
            .then(|| payload.original_length as f64 / serialized as f64),
        parameters: parameters(&payload)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File:        {}", output.file);
    println!(
        "Algorithm:   {} ({})",
        output.algorithm,
        algorithm.description()
    );
    println!("Original:    {}", format_size(output.original_length));
    println!("Metadata:    {} bytes", output.metadata_length);
    println!("Body:        {}", format_size(output.body_length as u64));
    println!("Serialized:  {}", format_size(serialized as u64));
    if let Some(ratio) = output.ratio {
        println!("Ratio:       {ratio:.3}");
    }
    if let Some(fields) = output.parameters.as_object() {
        for (key, value) in fields {
            println!("  {key}: {value}");
        }
    }
    Ok(())
}
