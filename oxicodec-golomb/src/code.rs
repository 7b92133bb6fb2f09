//! Single-value Golomb code words.
//!
//! A value `v` with divisor `b` is written as `q = v / b` one bits, a zero
//! bit, then `r = v % b` in truncated binary. With `k = ceil(log2 b)` and
//! `t = 2^k - b`, remainders below `t` take `k - 1` bits and the rest take
//! `k` bits (stored as `r + t`). A power-of-two `b` therefore degenerates to
//! plain `k`-bit binary (Rice coding) and `b = 1` to pure unary.

use oxicodec_core::{BitReader, BitWriter, CodecError, Result};

/// `ceil(log2 b)` for `b >= 1`.
fn ceil_log2(b: u32) -> u8 {
    (u32::BITS - (b - 1).leading_zeros()) as u8
}

/// Append the code word for `value` with divisor `b` (`b >= 1`).
pub fn encode_value(writer: &mut BitWriter, value: u64, b: u32) {
    debug_assert!(b >= 1, "Golomb divisor must be at least 1");
    let b64 = b as u64;
    let q = value / b64;
    let r = value % b64;

    writer.write_repeated(true, q);
    writer.write_bit(false);

    let k = ceil_log2(b);
    if k == 0 {
        return;
    }
    let t = (1u64 << k) - b64;
    if r < t {
        writer.write_bits(r, k - 1);
    } else {
        writer.write_bits(r + t, k);
    }
}

/// Read one code word written by [`encode_value`] with the same `b`.
///
/// Fails with `Underrun` if the stream ends inside the code word and with
/// `CorruptPayload` if the value does not fit in 64 bits.
pub fn decode_value(reader: &mut BitReader<'_>, b: u32) -> Result<u64> {
    if b == 0 {
        return Err(CodecError::corrupt("Golomb divisor 0"));
    }

    let mut q = 0u64;
    while reader.read_bit()? {
        q += 1;
    }

    let k = ceil_log2(b);
    let r = if k == 0 {
        0
    } else {
        let t = (1u64 << k) - b as u64;
        let head = reader.read_bits(k - 1)?;
        if head < t {
            head
        } else {
            ((head << 1) | reader.read_bit()? as u64) - t
        }
    };

    q.checked_mul(b as u64)
        .and_then(|v| v.checked_add(r))
        .ok_or_else(|| CodecError::corrupt(format!("quotient {q} overflows with divisor {b}")))
}

/// Number of bits [`encode_value`] spends on `value`.
pub fn code_length(value: u64, b: u32) -> u64 {
    let b64 = b as u64;
    let k = ceil_log2(b) as u64;
    let t = (1u64 << k) - b64;
    let remainder_bits = if k == 0 {
        0
    } else if value % b64 < t {
        k - 1
    } else {
        k
    };
    value / b64 + 1 + remainder_bits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(value: u64, b: u32) -> String {
        let mut writer = BitWriter::new();
        encode_value(&mut writer, value, b);
        let (bytes, len) = writer.finish();
        let mut reader = BitReader::with_bit_len(&bytes, len).unwrap();
        (0..len)
            .map(|_| if reader.read_bit().unwrap() { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_ten_with_four() {
        assert_eq!(bits_of(10, 4), "11010");

        let mut writer = BitWriter::new();
        encode_value(&mut writer, 10, 4);
        let (bytes, len) = writer.finish();
        let mut reader = BitReader::with_bit_len(&bytes, len).unwrap();
        assert_eq!(decode_value(&mut reader, 4).unwrap(), 10);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_truncated_binary_b5() {
        // k = 3, t = 3: r in 0..3 uses 2 bits, r in 3..5 uses 3 bits.
        assert_eq!(bits_of(0, 5), "000");
        assert_eq!(bits_of(2, 5), "010");
        assert_eq!(bits_of(3, 5), "0110");
        assert_eq!(bits_of(4, 5), "0111");
        assert_eq!(bits_of(7, 5), "1010");
    }

    #[test]
    fn test_unary_only_for_b1() {
        assert_eq!(bits_of(0, 1), "0");
        assert_eq!(bits_of(3, 1), "1110");
    }

    #[test]
    fn test_code_length_matches_writer() {
        for b in [1u32, 2, 3, 5, 7, 8, 100, 255, 256] {
            for v in [0u64, 1, 2, 6, 7, 100, 255, 510] {
                assert_eq!(code_length(v, b), bits_of(v, b).len() as u64, "v={v} b={b}");
            }
        }
    }

    #[test]
    fn test_decode_underrun() {
        // Two ones with no terminating zero.
        let data = [0b1100_0000];
        let mut reader = BitReader::with_bit_len(&data, 2).unwrap();
        assert!(decode_value(&mut reader, 4).unwrap_err().is_underrun());
    }

    #[test]
    fn test_large_divisor() {
        let mut writer = BitWriter::new();
        encode_value(&mut writer, 200, u32::MAX);
        let (bytes, len) = writer.finish();
        let mut reader = BitReader::with_bit_len(&bytes, len).unwrap();
        assert_eq!(decode_value(&mut reader, u32::MAX).unwrap(), 200);
    }
}
