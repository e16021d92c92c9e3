//! Checkpoint error types.

use std::fmt;
use thiserror::Error;

/// Encoding used for a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointFormat {
    Json,
    Bincode,
}

impl fmt::Display for CheckpointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Bincode => f.write_str("bincode"),
        }
    }
}

/// Errors that can occur while saving or resuming a trip
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to encode checkpoint as {format}: {reason}")]
    Encode {
        format: CheckpointFormat,
        reason: String,
    },

    #[error("Failed to decode checkpoint from {format}: {reason}")]
    Decode {
        format: CheckpointFormat,
        reason: String,
    },

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint decoded but its fields contradict each other
    #[error("Inconsistent checkpoint: {0}")]
    Inconsistent(String),
}
