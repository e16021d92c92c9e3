//! Builder for constructing trip state machines.

use crate::builder::error::BuildError;
use crate::core::{StateHistory, TripState};
use crate::fsm::TripStateMachine;

/// Builder for constructing trip state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::builder::TripMachineBuilder;
/// use trip_lifecycle::core::TripState;
///
/// let machine = TripMachineBuilder::new()
///     .initial(TripState::Idle)
///     .history_limit(32)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.history().limit(), Some(32));
/// ```
#[derive(Clone, Debug)]
pub struct TripMachineBuilder {
    initial: TripState,
    history_limit: Option<usize>,
    record_history: bool,
}

impl TripMachineBuilder {
    /// Create a builder for an `Idle` machine with unbounded history.
    pub fn new() -> Self {
        Self {
            initial: TripState::Idle,
            history_limit: None,
            record_history: true,
        }
    }

    /// Set the initial state (defaults to `Idle`).
    pub fn initial(mut self, state: TripState) -> Self {
        self.initial = state;
        self
    }

    /// Keep only the most recent `limit` transitions.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Enable or disable history recording (enabled by default).
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Build the state machine.
    /// Returns an error if the history settings contradict each other.
    pub fn build(self) -> Result<TripStateMachine, BuildError> {
        let history = match (self.record_history, self.history_limit) {
            (_, Some(0)) => return Err(BuildError::ZeroHistoryLimit),
            (false, Some(_)) => return Err(BuildError::LimitWithoutHistory),
            (_, Some(limit)) => StateHistory::with_limit(limit),
            (_, None) => StateHistory::new(),
        };

        Ok(TripStateMachine::from_parts(
            self.initial,
            self.record_history,
            history,
        ))
    }
}

impl Default for TripMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
