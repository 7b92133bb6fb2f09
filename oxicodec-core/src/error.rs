//! Error types for OxiCodec operations.
//!
//! Every codec in the workspace surfaces one of four failure kinds
//! (configuration, empty input, corrupt payload, bitstream underrun) so that
//! callers can react to them without inspecting codec internals. None of them
//! are recovered inside a codec: a failed decode never yields partial output.

use std::io;
use thiserror::Error;

/// The main error type for OxiCodec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Invalid parameter supplied by the caller.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Empty input where the operation does not accept one.
    #[error("Empty input: {context}")]
    EmptyInput {
        /// The operation that rejected the empty input.
        context: String,
    },

    /// The payload is malformed or does not belong to this codec.
    #[error("Corrupt payload: {message}")]
    CorruptPayload {
        /// Description of the inconsistency.
        message: String,
    },

    /// A bitstream read ran past the recorded data.
    #[error(
        "Bitstream underrun at bit {position}: requested {requested} bits, {available} available"
    )]
    Underrun {
        /// Number of bits requested.
        requested: u64,
        /// Number of bits left before the recorded end.
        available: u64,
        /// Bit position of the failed read.
        position: u64,
    },

    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for OxiCodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an empty input error.
    pub fn empty_input(context: impl Into<String>) -> Self {
        Self::EmptyInput {
            context: context.into(),
        }
    }

    /// Create a corrupt payload error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptPayload {
            message: message.into(),
        }
    }

    /// Create a bitstream underrun error.
    pub fn underrun(requested: u64, available: u64, position: u64) -> Self {
        Self::Underrun {
            requested,
            available,
            position,
        }
    }

    /// Returns `true` for [`CodecError::CorruptPayload`].
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptPayload { .. })
    }

    /// Returns `true` for [`CodecError::Underrun`].
    pub fn is_underrun(&self) -> bool {
        matches!(self, Self::Underrun { .. })
    }

    /// Returns `true` for [`CodecError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
