//! Canonical code tables.
//!
//! Only code lengths are needed to reproduce a canonical code: symbols are
//! sorted by (length, value) and receive consecutive codes, shifting left
//! whenever the length grows. The payload therefore stores `(symbol, length)`
//! pairs and the decoder re-derives the exact same bits.

use oxicodec_core::{CodecError, Result};

/// Longest code the bitstream can emit in one write.
pub const MAX_CODE_LENGTH: u8 = 64;

/// A variable-length code: the low `len` bits of `bits`, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    /// Code bits, right-aligned.
    pub bits: u64,
    /// Number of bits, 1..=64.
    pub len: u8,
}

impl Code {
    /// Whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

/// Mapping from byte value to canonical code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    /// Symbols in canonical order (length, then value).
    order: Vec<u8>,
}

impl CodeTable {
    /// Assign canonical codes to `(symbol, length)` pairs.
    ///
    /// Fails with [`CodecError::CorruptPayload`] on duplicate symbols, a
    /// length outside `1..=64`, or lengths that cannot form a prefix-free
    /// code.
    pub fn canonical(lengths: &[(u8, u8)]) -> Result<Self> {
        let mut seen = [false; 256];
        for &(symbol, len) in lengths {
            if seen[symbol as usize] {
                return Err(CodecError::corrupt(format!(
                    "symbol {symbol:#04x} appears twice in the code table"
                )));
            }
            seen[symbol as usize] = true;
            if len == 0 || len > MAX_CODE_LENGTH {
                return Err(CodecError::corrupt(format!(
                    "code length {len} for symbol {symbol:#04x} outside 1..={MAX_CODE_LENGTH}"
                )));
            }
        }

        let mut sorted = lengths.to_vec();
        sorted.sort_unstable_by_key(|&(symbol, len)| (len, symbol));

        let mut codes = [None; 256];
        let mut next: u128 = 0;
        let mut prev_len = 0u8;

        for &(symbol, len) in &sorted {
            next <<= len - prev_len;
            if next >> len != 0 {
                return Err(CodecError::corrupt(
                    "code lengths oversubscribe the code space (not prefix-free)",
                ));
            }
            codes[symbol as usize] = Some(Code {
                bits: next as u64,
                len,
            });
            next += 1;
            prev_len = len;
        }

        Ok(Self {
            codes,
            order: sorted.into_iter().map(|(symbol, _)| symbol).collect(),
        })
    }

    /// Canonical table for per-symbol lengths as produced by
    /// [`HuffmanTree::code_lengths`](crate::HuffmanTree::code_lengths).
    pub fn from_lengths(lengths: &[u32; 256]) -> Result<Self> {
        let mut pairs = Vec::new();
        for (symbol, &len) in lengths.iter().enumerate() {
            if len == 0 {
                continue;
            }
            let len = u8::try_from(len)
                .ok()
                .filter(|&l| l <= MAX_CODE_LENGTH)
                .ok_or_else(|| {
                    CodecError::configuration(format!(
                        "symbol {symbol:#04x} needs a {len}-bit code, limit is {MAX_CODE_LENGTH}"
                    ))
                })?;
            pairs.push((symbol as u8, len));
        }
        Self::canonical(&pairs)
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// `(symbol, code)` pairs in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.order
            .iter()
            .filter_map(|&symbol| self.codes[symbol as usize].map(|code| (symbol, code)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Longest code length, 0 for an empty table.
    pub fn max_len(&self) -> u8 {
        self.entries().map(|(_, c)| c.len).max().unwrap_or(0)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.entries().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_assignment() {
        // c:1, a:2, b:2 -> c=0, a=10, b=11
        let table = CodeTable::canonical(&[(b'a', 2), (b'b', 2), (b'c', 1)]).unwrap();
        assert_eq!(table.code(b'c'), Some(Code { bits: 0b0, len: 1 }));
        assert_eq!(table.code(b'a'), Some(Code { bits: 0b10, len: 2 }));
        assert_eq!(table.code(b'b'), Some(Code { bits: 0b11, len: 2 }));
        assert_eq!(table.code(b'd'), None);
        assert!(table.is_prefix_free());
        assert_eq!(
            table.entries().map(|(s, _)| s).collect::<Vec<_>>(),
            vec![b'c', b'a', b'b']
        );
        assert_eq!(table.max_len(), 2);
    }

    #[test]
    fn test_rfc1951_example() {
        // Lengths (3,3,3,3,3,2,4,4) for A-H give the codes listed in RFC 1951.
        let pairs: Vec<(u8, u8)> = b"ABCDEFGH"
            .iter()
            .zip([3, 3, 3, 3, 3, 2, 4, 4])
            .map(|(&s, l)| (s, l))
            .collect();
        let table = CodeTable::canonical(&pairs).unwrap();
        assert_eq!(table.code(b'F').unwrap().bits, 0b00);
        assert_eq!(table.code(b'A').unwrap().bits, 0b010);
        assert_eq!(table.code(b'E').unwrap().bits, 0b110);
        assert_eq!(table.code(b'G').unwrap().bits, 0b1110);
        assert_eq!(table.code(b'H').unwrap().bits, 0b1111);
    }

    #[test]
    fn test_oversubscribed_rejected() {
        let err = CodeTable::canonical(&[(1, 1), (2, 1), (3, 1)]).unwrap_err();
        assert!(err.is_corrupt());
        assert!(err.to_string().contains("prefix-free"));
    }

    #[test]
    fn test_invalid_entries_rejected() {
        assert!(CodeTable::canonical(&[(1, 1), (1, 2)]).unwrap_err().is_corrupt());
        assert!(CodeTable::canonical(&[(1, 0)]).unwrap_err().is_corrupt());
        assert!(CodeTable::canonical(&[(1, 65)]).unwrap_err().is_corrupt());
    }

    #[test]
    fn test_single_code() {
        let table = CodeTable::canonical(&[(b'x', 1)]).unwrap();
        assert_eq!(table.code(b'x'), Some(Code { bits: 0, len: 1 }));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_prefix_relation() {
        let short = Code { bits: 0b10, len: 2 };
        assert!(short.is_prefix_of(&Code { bits: 0b101, len: 3 }));
        assert!(!short.is_prefix_of(&Code { bits: 0b111, len: 3 }));
        assert!(!Code { bits: 0b101, len: 3 }.is_prefix_of(&short));
    }
}
