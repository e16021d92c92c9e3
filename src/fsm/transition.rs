//! Dispatch outcomes.

use crate::core::{Action, State, TripState};
use std::borrow::Cow;
use thiserror::Error;

/// The supplied action has no rule in the current state.
///
/// This is an expected outcome, produced only when a caller converts a
/// rejected [`TransitionResult`] with [`TransitionResult::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid action '{action}' in {state} state")]
pub struct InvalidAction {
    pub state: TripState,
    pub action: Action,
}

/// Result of a single dispatch.
///
/// An accepted result carries the new state; a rejected one carries the
/// unchanged state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionResult {
    from: TripState,
    state: TripState,
    action: Action,
    accepted: bool,
    notice: Cow<'static, str>,
}

impl TransitionResult {
    pub(crate) fn accepted(
        from: TripState,
        to: TripState,
        action: Action,
        notice: &'static str,
    ) -> Self {
        Self {
            from,
            state: to,
            action,
            accepted: true,
            notice: Cow::Borrowed(notice),
        }
    }

    pub(crate) fn rejected(state: TripState, action: Action) -> Self {
        Self {
            from: state,
            state,
            action,
            accepted: false,
            notice: Cow::Owned(format!("Invalid action in {} state.", state.name())),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// State the machine is in after the dispatch.
    pub fn state(&self) -> TripState {
        self.state
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// State the machine was in before the dispatch.
    pub fn from(&self) -> TripState {
        self.from
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Human-readable description of what happened.
    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// The `(state name, accepted)` pair of the in-process API.
    pub fn as_pair(&self) -> (&'static str, bool) {
        (self.state_name(), self.accepted)
    }

    /// Convert a rejection into an [`InvalidAction`] error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trip_lifecycle::fsm::{InvalidAction, TripStateMachine};
    /// use trip_lifecycle::core::{Action, TripState};
    ///
    /// let mut machine = TripStateMachine::new();
    /// let err = machine.dispatch("confirm_order").into_result().unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     InvalidAction { state: TripState::Idle, action: Action::ConfirmOrder }
    /// );
    /// ```
    pub fn into_result(self) -> Result<TripState, InvalidAction> {
        if self.accepted {
            Ok(self.state)
        } else {
            Err(InvalidAction {
                state: self.state,
                action: self.action,
            })
        }
    }
}
