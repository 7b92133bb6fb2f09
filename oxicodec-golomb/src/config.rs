//! Golomb parameter selection and value mapping.

use oxicodec_core::{CodecError, Result};

/// How the divisor `b` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GolombParameter {
    /// Estimate `b = round(0.69 * mean)` from the mapped values.
    #[default]
    Auto,
    /// Estimate as for `Auto`, then round to the nearest power of two.
    Rice,
    /// Use the given divisor. Zero is rejected at encode time.
    Fixed(u32),
}

/// Which integers are coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum GolombMapping {
    /// Code each byte value directly.
    #[default]
    Raw = 0,
    /// Code the zig-zag mapped difference from the previous byte (the first
    /// byte is taken relative to zero).
    Delta = 1,
}

impl GolombMapping {
    /// Parse the metadata byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Raw),
            1 => Some(Self::Delta),
            _ => None,
        }
    }

    /// Largest integer this mapping can produce.
    pub fn max_value(self) -> u64 {
        match self {
            Self::Raw => 255,
            Self::Delta => 510,
        }
    }

    /// Map bytes to the integers that get coded.
    pub fn map(self, data: &[u8]) -> Vec<u64> {
        match self {
            Self::Raw => data.iter().map(|&b| b as u64).collect(),
            Self::Delta => {
                let mut prev = 0i16;
                data.iter()
                    .map(|&b| {
                        let diff = b as i16 - prev;
                        prev = b as i16;
                        zigzag(diff)
                    })
                    .collect()
            }
        }
    }

    /// Inverse of [`GolombMapping::map`].
    pub fn unmap(self, values: &[u64]) -> Result<Vec<u8>> {
        match self {
            Self::Raw => values
                .iter()
                .map(|&v| {
                    u8::try_from(v).map_err(|_| {
                        CodecError::corrupt(format!("decoded value {v} is not a byte"))
                    })
                })
                .collect(),
            Self::Delta => {
                let mut prev = 0i64;
                values
                    .iter()
                    .map(|&v| {
                        let current = prev + unzigzag(v);
                        let byte = u8::try_from(current).map_err(|_| {
                            CodecError::corrupt(format!(
                                "delta {} from {prev} leaves the byte range",
                                unzigzag(v)
                            ))
                        })?;
                        prev = current;
                        Ok(byte)
                    })
                    .collect()
            }
        }
    }
}

/// Interleave signed differences onto the non-negative integers:
/// 0, -1, 1, -2, 2, ... map to 0, 1, 2, 3, 4, ...
fn zigzag(diff: i16) -> u64 {
    ((diff << 1) ^ (diff >> 15)) as u16 as u64
}

fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Golomb codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GolombConfig {
    /// Divisor selection.
    pub parameter: GolombParameter,
    /// Value mapping.
    pub mapping: GolombMapping,
}

impl GolombConfig {
    /// Create a configuration.
    pub fn new(parameter: GolombParameter, mapping: GolombMapping) -> Self {
        Self { parameter, mapping }
    }

    /// Fixed divisor with raw mapping.
    pub fn fixed(b: u32) -> Self {
        Self::new(GolombParameter::Fixed(b), GolombMapping::Raw)
    }

    /// Resolve the divisor for the mapped `values`.
    pub fn resolve(&self, values: &[u64]) -> Result<u32> {
        match self.parameter {
            GolombParameter::Fixed(0) => Err(CodecError::configuration(
                "Golomb divisor must be at least 1",
            )),
            GolombParameter::Fixed(b) => Ok(b),
            GolombParameter::Auto => Ok(estimate_parameter(values, false)),
            GolombParameter::Rice => Ok(estimate_parameter(values, true)),
        }
    }
}

/// Estimate a divisor from the mean of `values`.
///
/// `b = max(1, round(0.69 * mean))`; an empty slice gives 1. With `rice`
/// the estimate is rounded to the nearest power of two (ties go down).
pub fn estimate_parameter(values: &[u64], rice: bool) -> u32 {
    if values.is_empty() {
        return 1;
    }
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
    let b = ((0.69 * mean).round() as u32).max(1);
    if !rice {
        return b;
    }

    let lower = 1u32 << (31 - b.leading_zeros());
    if lower == b {
        return b;
    }
    let upper = lower << 1;
    if b - lower <= upper - b { lower } else { upper }
}
