//! LZW configuration and the code width schedule.

use oxicodec_core::{CodecError, Result};

/// Number of single-byte root entries.
pub const ROOT_ENTRIES: u32 = 256;

/// What the dictionary does once it holds `2^max_bits` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum OverflowPolicy {
    /// Stop adding entries; existing codes stay valid.
    #[default]
    Freeze = 0,
    /// Drop back to the 256 root entries and start learning again.
    Reset = 1,
}

impl OverflowPolicy {
    /// Parse the metadata byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Freeze),
            1 => Some(Self::Reset),
            _ => None,
        }
    }
}

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Maximum code size in bits (9-16).
    pub max_bits: u8,
    /// Behaviour of a full dictionary.
    pub overflow: OverflowPolicy,
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self {
            max_bits: Self::DEFAULT_BITS,
            overflow: OverflowPolicy::Freeze,
        }
    }
}

impl LzwConfig {
    /// Smallest accepted `max_bits`.
    pub const MIN_BITS: u8 = 9;
    /// Largest accepted `max_bits`.
    pub const MAX_BITS: u8 = 16;
    /// Default `max_bits`.
    pub const DEFAULT_BITS: u8 = 12;

    /// Create a new LZW configuration.
    pub fn new(max_bits: u8, overflow: OverflowPolicy) -> Self {
        Self { max_bits, overflow }
    }

    /// Fail with a configuration error unless `max_bits` is in 9..=16.
    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_BITS..=Self::MAX_BITS).contains(&self.max_bits) {
            return Err(CodecError::configuration(format!(
                "LZW code width {} outside {}..={}",
                self.max_bits,
                Self::MIN_BITS,
                Self::MAX_BITS
            )));
        }
        Ok(())
    }

    /// Maximum number of dictionary entries, `2^max_bits`.
    pub fn max_entries(&self) -> u32 {
        1 << self.max_bits
    }
}

/// Number of bits needed to represent `value` (at least 1).
fn bit_width(value: u32) -> u8 {
    (u32::BITS - value.leading_zeros()).max(1) as u8
}

/// Code width shared by the encoder and the decoder.
///
/// The `k`-th code since the dictionary was (re)initialised can only refer
/// to one of the first `256 + k` entries, so it is written with
/// `bit_width(min(256 + k, 2^max_bits) - 1)` bits.
#[derive(Debug, Clone)]
pub struct CodeWidth {
    config: LzwConfig,
    /// Codes since the last (re)initialisation, capped once the dictionary
    /// is full.
    emitted: u32,
}

impl CodeWidth {
    /// Schedule for a fresh dictionary.
    pub fn new(config: LzwConfig) -> Self {
        Self { config, emitted: 0 }
    }

    /// Width of the next code.
    pub fn current(&self) -> u8 {
        let reachable = (ROOT_ENTRIES + self.emitted).min(self.config.max_entries());
        bit_width(reachable - 1)
    }

    /// Account for one code. Under [`OverflowPolicy::Reset`] the schedule
    /// restarts after the code that fills the dictionary.
    pub fn advance(&mut self) {
        let fill_point = self.config.max_entries() - ROOT_ENTRIES;
        if self.emitted >= fill_point {
            if self.config.overflow == OverflowPolicy::Reset {
                self.emitted = 0;
            }
        } else {
            self.emitted += 1;
        }
    }
}
