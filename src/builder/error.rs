//! Build errors for the machine builder.

use thiserror::Error;

/// Errors that can occur when building a trip state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("History limit must be at least 1. Call .record_history(false) to keep no history")]
    ZeroHistoryLimit,

    #[error("History limit set while history recording is disabled")]
    LimitWithoutHistory,
}
