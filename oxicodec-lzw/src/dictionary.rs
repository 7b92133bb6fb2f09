//! LZW dictionary (code table) management.
//!
//! Every entry is stored as the code of its prefix plus one appended byte, so
//! the table stays prefix-closed and adding an entry costs O(1) regardless of
//! the string length. Strings are materialised only when the decoder emits
//! them.

use crate::config::{LzwConfig, ROOT_ENTRIES};
use oxicodec_core::{CodecError, Result};
use std::collections::HashMap;

/// Prefix marker for the 256 root entries.
const NO_PREFIX: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefix: u32,
    byte: u8,
    /// First byte of the full string.
    first: u8,
    /// Length of the full string.
    len: u32,
}

/// LZW dictionary for encoding and decoding.
///
/// The encoder also maintains a reverse mapping `(prefix code, byte) ->
/// code`; the decoder never needs it.
#[derive(Debug)]
pub struct LzwDictionary {
    /// Code table: code -> entry.
    entries: Vec<Entry>,
    /// Reverse lookup (encoding only).
    reverse: Option<HashMap<(u32, u8), u32>>,
    /// Configuration.
    config: LzwConfig,
}

impl LzwDictionary {
    /// Dictionary with reverse lookups, for encoding.
    pub fn for_encoding(config: LzwConfig) -> Self {
        Self::with_lookup(config, true)
    }

    /// Dictionary without reverse lookups, for decoding.
    pub fn for_decoding(config: LzwConfig) -> Self {
        Self::with_lookup(config, false)
    }

    fn with_lookup(config: LzwConfig, lookup: bool) -> Self {
        let mut dict = Self {
            entries: Vec::with_capacity(config.max_entries() as usize),
            reverse: lookup.then(HashMap::new),
            config,
        };
        dict.reset();
        dict
    }

    /// Reset the dictionary to the 256 single-byte entries.
    pub fn reset(&mut self) {
        self.entries.clear();
        if let Some(reverse) = &mut self.reverse {
            reverse.clear();
        }
        self.entries.extend((0..ROOT_ENTRIES).map(|i| Entry {
            prefix: NO_PREFIX,
            byte: i as u8,
            first: i as u8,
            len: 1,
        }));
    }

    /// Add `prefix + byte` and return its code, or `None` if the dictionary
    /// is full.
    pub fn insert(&mut self, prefix: u32, byte: u8) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let parent = *self.entries.get(prefix as usize)?;
        let code = self.entries.len() as u32;
        self.entries.push(Entry {
            prefix,
            byte,
            first: parent.first,
            len: parent.len + 1,
        });
        if let Some(reverse) = &mut self.reverse {
            reverse.insert((prefix, byte), code);
        }
        Some(code)
    }

    /// Code of `prefix + byte`, if present (encoding dictionaries only).
    pub fn find(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.reverse.as_ref()?.get(&(prefix, byte)).copied()
    }

    /// Append the string of `code` to `out`.
    pub fn append_string(&self, code: u32, out: &mut Vec<u8>) -> Result<()> {
        let entry = self.entry(code)?;
        let start = out.len();
        out.resize(start + entry.len as usize, 0);

        let mut cursor = code;
        for slot in out[start..].iter_mut().rev() {
            let e = self.entries[cursor as usize];
            *slot = e.byte;
            cursor = e.prefix;
        }
        Ok(())
    }

    /// Length of the string of `code`.
    pub fn string_len(&self, code: u32) -> Result<usize> {
        Ok(self.entry(code)?.len as usize)
    }

    /// First byte of the string of `code`.
    pub fn first_byte(&self, code: u32) -> Result<u8> {
        Ok(self.entry(code)?.first)
    }

    fn entry(&self, code: u32) -> Result<Entry> {
        self.entries.get(code as usize).copied().ok_or_else(|| {
            CodecError::corrupt(format!(
                "code {code} not in dictionary of {} entries",
                self.entries.len()
            ))
        })
    }

    /// Number of entries, which is also the next code to be assigned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the root entries are never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the dictionary is full.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.config.max_entries() as usize
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
