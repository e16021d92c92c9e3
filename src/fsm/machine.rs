//! The trip state machine.

use crate::builder::TripMachineBuilder;
use crate::core::{Action, State, StateHistory, TransitionRecord, TripState};
use crate::fsm::table::{self, Rule};
use crate::fsm::transition::TransitionResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Dispatch counters of a machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripStats {
    /// Dispatches that moved the machine
    pub accepted: u64,
    /// Dispatches that left the machine where it was
    pub rejected: u64,
    /// Entries into `TripCompleted`
    pub completed_trips: u64,
    /// Entries into `TripCancelled`
    pub cancelled_trips: u64,
}

/// State machine for the lifecycle of one trip.
///
/// The machine holds exactly one [`TripState`] and changes it only through
/// [`dispatch`](Self::dispatch). It never terminates: `TripCompleted` and
/// `TripCancelled` fall back to `Idle` on the next dispatch, so one machine
/// can serve consecutive trips.
///
/// Not designed for concurrent mutation. Callers that drive a trip from
/// several tasks must serialize access themselves.
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::fsm::TripStateMachine;
///
/// let mut machine = TripStateMachine::new();
/// assert_eq!(machine.current_state_name(), "Idle");
///
/// assert_eq!(machine.dispatch("select_car").as_pair(), ("CarSelected", true));
/// assert_eq!(machine.dispatch("start_trip").as_pair(), ("CarSelected", false));
/// assert_eq!(machine.dispatch("cancel").as_pair(), ("TripCancelled", true));
/// assert_eq!(machine.dispatch("anything").as_pair(), ("Idle", true));
/// ```
#[derive(Clone, Debug)]
pub struct TripStateMachine {
    pub(crate) initial: TripState,
    pub(crate) current: TripState,
    pub(crate) record_history: bool,
    pub(crate) history: StateHistory<TripState>,
    pub(crate) stats: TripStats,
}

impl TripStateMachine {
    /// Create a machine in `Idle` with unbounded history.
    pub fn new() -> Self {
        Self::with_initial(TripState::Idle)
    }

    /// Create a machine in `initial` with unbounded history.
    pub fn with_initial(initial: TripState) -> Self {
        Self::from_parts(initial, true, StateHistory::new())
    }

    pub fn builder() -> TripMachineBuilder {
        TripMachineBuilder::new()
    }

    pub(crate) fn from_parts(
        initial: TripState,
        record_history: bool,
        history: StateHistory<TripState>,
    ) -> Self {
        Self {
            initial,
            current: initial,
            record_history,
            history,
            stats: TripStats::default(),
        }
    }

    /// Apply `action` to the current state.
    ///
    /// Accepted actions replace the current state and are recorded in the
    /// history. Rejected actions leave the machine untouched apart from the
    /// rejection counter.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> TransitionResult {
        let action = action.into().canonical();
        let from = self.current;

        let Some(Rule { to, notice }) = table::lookup(from, &action) else {
            self.stats.rejected += 1;
            debug!(
                state = %from,
                action = %action,
                accepted = false,
                "Invalid action in {from} state"
            );
            return TransitionResult::rejected(from, action);
        };

        self.current = to;
        self.stats.accepted += 1;
        match to {
            TripState::TripCompleted => self.stats.completed_trips += 1,
            TripState::TripCancelled => self.stats.cancelled_trips += 1,
            _ => {}
        }

        if from.is_reset() {
            info!(from = %from, action = %action, "{notice}");
        } else {
            debug!(from = %from, to = %to, action = %action, accepted = true, "{notice}");
        }

        if self.record_history {
            self.history.push(TransitionRecord {
                sequence: self.stats.accepted,
                from,
                to,
                action: action.clone(),
                timestamp: Utc::now(),
            });
        }

        TransitionResult::accepted(from, to, action, notice)
    }

    /// Dispatch a raw action label.
    pub fn dispatch_label(&mut self, label: &str) -> TransitionResult {
        self.dispatch(Action::from_label(label))
    }

    /// Whether `action` would be accepted in the current state (pure).
    pub fn can_dispatch(&self, action: &Action) -> bool {
        table::lookup(self.current, action).is_some()
    }

    /// Known actions with an explicit rule in the current state (pure).
    pub fn allowed_actions(&self) -> Vec<Action> {
        table::allowed_actions(self.current)
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> TripState {
        self.current
    }

    /// Canonical name of the current state (pure)
    pub fn current_state_name(&self) -> &'static str {
        self.current.name()
    }

    pub fn initial_state(&self) -> TripState {
        self.initial
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &StateHistory<TripState> {
        &self.history
    }

    pub fn records_history(&self) -> bool {
        self.record_history
    }

    pub fn stats(&self) -> TripStats {
        self.stats
    }
}

impl Default for TripStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
