//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary one step behind it: the
//! entry the encoder added after emitting code `k - 1` only becomes known
//! when code `k` reveals its last byte. A code equal to the next free code
//! is therefore the one case ("KwKwK") where the string must be derived
//! from the previous one.

use crate::config::{CodeWidth, LzwConfig, OverflowPolicy};
use crate::dictionary::LzwDictionary;
use oxicodec_core::{BitReader, CodecError, Result};

/// LZW decoder for decompression.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: LzwDictionary,
    /// Previous code since the last (re)initialisation.
    prev: Option<u32>,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dict: LzwDictionary::for_decoding(config),
            prev: None,
        })
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
        self.prev = None;
    }

    /// Decode one code, appending its string to `output`.
    ///
    /// Fails with `CorruptPayload` if the code is not yet defined or the
    /// output would grow beyond `expected` bytes.
    fn push_code(&mut self, code: u32, output: &mut Vec<u8>, expected: usize) -> Result<()> {
        let next = self.dict.len() as u32;
        let start = output.len();

        if code < next {
            let len = self.dict.string_len(code)?;
            check_room(start, len, expected)?;
            self.dict.append_string(code, output)?;
        } else if code == next
            && !self.dict.is_full()
            && let Some(prev) = self.prev
        {
            // KwKwK: the string is prev + first byte of prev
            let len = self.dict.string_len(prev)? + 1;
            check_room(start, len, expected)?;
            self.dict.append_string(prev, output)?;
            output.push(self.dict.first_byte(prev)?);
        } else {
            return Err(CodecError::corrupt(format!(
                "code {code} at output offset {start} is beyond the next free code {next}"
            )));
        }

        if let Some(prev) = self.prev {
            // Full dictionaries ignore the insert.
            let _ = self.dict.insert(prev, output[start]);
        }
        self.prev = Some(code);

        if self.dict.config().overflow == OverflowPolicy::Reset && self.dict.is_full() {
            self.reset();
        }
        Ok(())
    }

    /// Decode a sequence of codes into exactly `expected` bytes.
    pub fn decode_codes(&mut self, codes: &[u32], expected: usize) -> Result<Vec<u8>> {
        self.reset();
        // A code never expands past the longest dictionary string.
        let bound = codes
            .len()
            .saturating_mul(self.dict.config().max_entries() as usize);
        let mut output = Vec::with_capacity(expected.min(bound));

        for &code in codes {
            self.push_code(code, &mut output, expected)?;
        }

        if output.len() != expected {
            return Err(CodecError::corrupt(format!(
                "codes expand to {} bytes, expected {expected}",
                output.len()
            )));
        }
        Ok(output)
    }

    /// Decode a packed code stream of `bit_count` bits into exactly
    /// `expected` bytes.
    ///
    /// Codes are read until the output is complete; running out of bits
    /// first is an `Underrun`, bits left over afterwards are a
    /// `CorruptPayload`.
    pub fn decode(&mut self, input: &[u8], bit_count: u64, expected: usize) -> Result<Vec<u8>> {
        self.reset();
        let mut reader = BitReader::exact(input, bit_count)?;
        let mut width = CodeWidth::new(*self.dict.config());
        let mut output = Vec::with_capacity(expected.min(input.len().saturating_mul(64)));

        while output.len() < expected {
            let code = reader.read_bits(width.current())? as u32;
            width.advance();
            self.push_code(code, &mut output, expected)?;
        }

        if !reader.is_exhausted() {
            return Err(CodecError::corrupt(format!(
                "{} unused bits after the last code",
                reader.bits_remaining()
            )));
        }

        log::trace!(
            "lzw: decoded {} bytes, {} dictionary entries",
            output.len(),
            self.dict.len()
        );
        Ok(output)
    }

    /// Current number of dictionary entries.
    pub fn dictionary_len(&self) -> usize {
        self.dict.len()
    }
}

fn check_room(start: usize, len: usize, expected: usize) -> Result<()> {
    if start + len > expected {
        return Err(CodecError::corrupt(format!(
            "decoded output overshoots the recorded length of {expected} bytes"
        )));
    }
    Ok(())
}
