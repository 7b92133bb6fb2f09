//! LZW encoder (compression).

use crate::config::{CodeWidth, LzwConfig, OverflowPolicy};
use crate::dictionary::LzwDictionary;
use oxicodec_core::{BitWriter, Result};

/// LZW encoder for compression.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Dictionary for string lookup.
    dict: LzwDictionary,
    /// Number of dictionary resets during the last encode.
    resets: usize,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dict: LzwDictionary::for_encoding(config),
            resets: 0,
        })
    }

    /// Translate `input` into dictionary codes.
    ///
    /// # Algorithm
    ///
    /// 1. Start from the 256 single-byte entries
    /// 2. Extend the current string `w` while `w + c` is in the dictionary
    /// 3. On a miss, output the code for `w`, add `w + c` (or apply the
    ///    overflow policy if the dictionary is full) and restart with `c`
    /// 4. Output the code for the final `w`
    pub fn encode_codes(&mut self, input: &[u8]) -> Vec<u32> {
        self.dict.reset();
        self.resets = 0;

        let mut codes = Vec::with_capacity(input.len() / 2 + 1);
        let Some((&first, rest)) = input.split_first() else {
            return codes;
        };

        // Code of the current string being built
        let mut current = first as u32;

        for &byte in rest {
            if let Some(code) = self.dict.find(current, byte) {
                current = code;
                continue;
            }

            codes.push(current);
            if self.dict.insert(current, byte).is_none()
                && self.dict.config().overflow == OverflowPolicy::Reset
            {
                self.dict.reset();
                self.resets += 1;
            }
            current = byte as u32;
        }

        codes.push(current);
        codes
    }

    /// Encode `input` into a packed MSB-first code stream.
    ///
    /// Returns the stream and its length in bits.
    pub fn encode(&mut self, input: &[u8]) -> (Vec<u8>, u64) {
        let codes = self.encode_codes(input);
        let mut width = CodeWidth::new(*self.dict.config());
        let mut writer = BitWriter::with_capacity(codes.len() * 3 / 2);

        for code in codes {
            writer.write_bits(code as u64, width.current());
            width.advance();
        }

        log::debug!(
            "lzw: {} bytes, {} dictionary entries, {} resets",
            input.len(),
            self.dict.len(),
            self.resets
        );
        writer.finish()
    }

    /// Current number of dictionary entries.
    pub fn dictionary_len(&self) -> usize {
        self.dict.len()
    }

    /// Number of dictionary resets performed by the last encode.
    pub fn resets(&self) -> usize {
        self.resets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ababab() {
        let mut encoder = LzwEncoder::new(LzwConfig::default()).unwrap();
        assert_eq!(encoder.encode_codes(b"ababab"), vec![97, 98, 256, 256]);
        // ab, ba, aba
        assert_eq!(encoder.dictionary_len(), 259);
    }

    #[test]
    fn test_encode_tobeornot() {
        let mut encoder = LzwEncoder::new(LzwConfig::default()).unwrap();
        let codes = encoder.encode_codes(b"TOBEORNOTTOBEORTOBEORNOT");
        assert_eq!(
            codes,
            vec![
                b'T' as u32, b'O' as u32, b'B' as u32, b'E' as u32, b'O' as u32, b'R' as u32,
                b'N' as u32, b'O' as u32, b'T' as u32, 256, 258, 260, 265, 259, 261, 263
            ]
        );
    }

    #[test]
    fn test_code_widths() {
        let mut encoder = LzwEncoder::new(LzwConfig::default()).unwrap();
        // 8 + 9 + 9 + 9 bits
        let (bytes, bits) = encoder.encode(b"ababab");
        assert_eq!(bits, 35);
        assert_eq!(bytes.len(), 5);
        assert_eq!(bytes[0], b'a');
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = LzwEncoder::new(LzwConfig::default()).unwrap();
        assert!(encoder.encode_codes(b"").is_empty());
        assert_eq!(encoder.encode(b""), (Vec::new(), 0));
    }

    #[test]
    fn test_encode_single_byte() {
        let mut encoder = LzwEncoder::new(LzwConfig::default()).unwrap();
        assert_eq!(encoder.encode_codes(b"A"), vec![65]);
        assert_eq!(encoder.encode(b"A"), (vec![65], 8));
    }

    #[test]
    fn test_freeze_bounds_dictionary() {
        let config = LzwConfig::new(9, OverflowPolicy::Freeze);
        let mut encoder = LzwEncoder::new(config).unwrap();
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 7919 % 251) as u8).collect();
        let codes = encoder.encode_codes(&data);
        assert_eq!(encoder.dictionary_len(), 512);
        assert_eq!(encoder.resets(), 0);
        assert!(codes.iter().all(|&c| c < 512));
    }

    #[test]
    fn test_reset_policy_restarts() {
        let config = LzwConfig::new(9, OverflowPolicy::Reset);
        let mut encoder = LzwEncoder::new(config).unwrap();
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 7919 % 251) as u8).collect();
        encoder.encode_codes(&data);
        assert!(encoder.resets() > 0);
        assert!(encoder.dictionary_len() <= 512);
    }

    #[test]
    fn test_invalid_config() {
        let err = LzwEncoder::new(LzwConfig::new(8, OverflowPolicy::Freeze)).unwrap_err();
        assert!(err.is_configuration());
    }
}
