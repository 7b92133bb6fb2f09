//! # OxiCodec-Huffman: Static Huffman Coding
//!
//! Variable-length prefix coding that assigns shorter codes to more frequent
//! byte values.
//!
//! ## Encoding Steps
//!
//! 1. Count byte frequencies ([`FrequencyTable`])
//! 2. Merge the two lightest nodes until one root remains ([`HuffmanTree`]);
//!    ties are broken by insertion order, so the tree is reproducible
//! 3. Take each leaf's depth as its code length and assign canonical codes
//!    ([`CodeTable`])
//! 4. Write every input byte's code into an MSB-first bitstream
//!
//! A lone distinct symbol receives the one-bit code `0`, so the body is
//! never empty for non-empty input.
//!
//! ## Metadata Layout
//!
//! ```text
//! bit_count: u64 | symbol_count: u16 | symbol_count x (symbol: u8, length: u8)
//! ```
//!
//! Pairs are stored in canonical order. The decoder rebuilds the tree from
//! them and rejects any table that is not prefix-free.
//!
//! ## Example
//!
//! ```rust
//! use oxicodec_core::Codec;
//! use oxicodec_huffman::HuffmanCodec;
//!
//! let original = b"aabbbcccc";
//! let payload = HuffmanCodec.encode(original).unwrap();
//! assert_eq!(HuffmanCodec.decode(&payload).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod table;
mod tree;

pub use table::{Code, CodeTable, MAX_CODE_LENGTH};
pub use tree::{FrequencyTable, HuffmanTree, Node};

use oxicodec_core::{
    AlgorithmId, BitReader, BitWriter, Codec, CodecError, CompressedPayload, MetadataWriter,
    Result,
};

/// Build the canonical code table for `data`.
pub fn build_code_table(data: &[u8]) -> Result<CodeTable> {
    let freq = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&freq);
    CodeTable::from_lengths(&tree.code_lengths())
}

/// Huffman codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    /// Parse the code table stored in a payload's metadata.
    ///
    /// Returns the table and the number of meaningful body bits.
    pub fn read_table(payload: &CompressedPayload) -> Result<(CodeTable, u64)> {
        let mut meta = payload.metadata_reader();
        let bit_count = meta.read_u64()?;
        let symbol_count = meta.read_u16()? as usize;
        if symbol_count > 256 {
            return Err(CodecError::corrupt(format!(
                "code table lists {symbol_count} symbols"
            )));
        }

        let mut pairs = Vec::with_capacity(symbol_count);
        for _ in 0..symbol_count {
            let symbol = meta.read_u8()?;
            let len = meta.read_u8()?;
            pairs.push((symbol, len));
        }
        meta.finish()?;

        Ok((CodeTable::canonical(&pairs)?, bit_count))
    }
}

impl Codec for HuffmanCodec {
    fn algorithm(&self) -> AlgorithmId {
        AlgorithmId::Huffman
    }

    fn encode(&self, input: &[u8]) -> Result<CompressedPayload> {
        let table = build_code_table(input)?;
        debug_assert!(table.is_prefix_free());

        let mut writer = BitWriter::with_capacity(input.len() / 2);
        for &byte in input {
            let code = table
                .code(byte)
                .ok_or_else(|| CodecError::corrupt(format!("no code for byte {byte:#04x}")))?;
            writer.write_bits(code.bits, code.len);
        }
        let (body, bit_count) = writer.finish();

        let mut meta = MetadataWriter::new();
        meta.write_u64(bit_count).write_u16(table.len() as u16);
        for (symbol, code) in table.entries() {
            meta.write_u8(symbol).write_u8(code.len);
        }

        log::debug!(
            "huffman: {} bytes, {} symbols, max code length {}, {} body bits",
            input.len(),
            table.len(),
            table.max_len(),
            bit_count
        );

        Ok(CompressedPayload::new(
            AlgorithmId::Huffman,
            input.len() as u64,
            meta.into_vec(),
            body,
        ))
    }

    fn decode(&self, payload: &CompressedPayload) -> Result<Vec<u8>> {
        payload.expect_algorithm(AlgorithmId::Huffman)?;
        let (table, bit_count) = Self::read_table(payload)?;
        let expected = payload.original_len()?;

        if expected > 0 && table.is_empty() {
            return Err(CodecError::corrupt(format!(
                "empty code table for {expected} bytes of output"
            )));
        }

        let tree = HuffmanTree::from_code_table(&table)?;
        let mut reader = BitReader::exact(&payload.body, bit_count)?;

        // Every symbol costs at least one bit.
        if bit_count < expected as u64 {
            return Err(CodecError::underrun(expected as u64, bit_count, 0));
        }

        let mut output = Vec::with_capacity(expected);
        while output.len() < expected {
            output.push(tree.decode_symbol(&mut reader)?);
        }

        if !reader.is_exhausted() {
            return Err(CodecError::corrupt(format!(
                "{} unused bits after the last symbol",
                reader.bits_remaining()
            )));
        }

        log::trace!("huffman: decoded {} bytes from {} bits", expected, bit_count);
        Ok(output)
    }
}
