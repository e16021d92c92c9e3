//! The trip transition table.
//!
//! ```text
//! Idle ──select_car──▶ CarSelected ──confirm_order──▶ OrderConfirmed
//!                                                          │
//!                                                     car_arrived
//!                                                          ▼
//! TripCompleted ◀──complete_trip── InTrip ◀──start_trip── CarArrived
//!
//! CarSelected | OrderConfirmed | CarArrived | InTrip ──cancel──▶ TripCancelled
//!
//! TripCompleted | TripCancelled ──(any)──▶ Idle
//! ```

use crate::core::{Action, State, TripState};

/// Outcome of looking up a (state, action) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    /// State the machine moves to.
    pub to: TripState,
    /// Human-readable description of the move.
    pub notice: &'static str,
}

const fn rule(to: TripState, notice: &'static str) -> Option<Rule> {
    Some(Rule { to, notice })
}

/// Look up the rule for `action` in `state`.
///
/// Returns `None` when the pair has no rule. The reset states accept every
/// action, including labels outside the known vocabulary. A known label
/// wrapped in [`Action::Other`] resolves to the same rule as its variant.
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::core::{Action, TripState};
/// use trip_lifecycle::fsm::lookup;
///
/// let rule = lookup(TripState::InTrip, &Action::CompleteTrip).unwrap();
/// assert_eq!(rule.to, TripState::TripCompleted);
///
/// assert!(lookup(TripState::Idle, &Action::ConfirmOrder).is_none());
/// ```
pub fn lookup(state: TripState, action: &Action) -> Option<Rule> {
    use Action as A;
    use TripState as S;

    if let A::Other(label) = action {
        if let Some(known) = A::parse_known(label) {
            return lookup(state, &known);
        }
    }

    match (state, action) {
        (S::Idle, A::SelectCar) => rule(
            S::CarSelected,
            "Car selected. Moving to CarSelected state.",
        ),
        (S::CarSelected, A::ConfirmOrder) => rule(
            S::OrderConfirmed,
            "Order confirmed. Moving to OrderConfirmed state.",
        ),
        (S::CarSelected | S::OrderConfirmed, A::Cancel) => rule(
            S::TripCancelled,
            "Order cancelled. Moving to TripCancelled state.",
        ),
        (S::OrderConfirmed, A::CarArrived) => rule(
            S::CarArrived,
            "Car arrived. Moving to CarArrived state.",
        ),
        (S::CarArrived, A::StartTrip) => rule(S::InTrip, "Trip started. Moving to InTrip state."),
        (S::CarArrived | S::InTrip, A::Cancel) => rule(
            S::TripCancelled,
            "Trip cancelled. Moving to TripCancelled state.",
        ),
        (S::InTrip, A::CompleteTrip) => rule(
            S::TripCompleted,
            "Trip completed. Moving to TripCompleted state.",
        ),
        (S::TripCompleted, _) => rule(S::Idle, "Trip completed. Returning to Idle state."),
        (S::TripCancelled, _) => rule(S::Idle, "Trip cancelled. Returning to Idle state."),
        _ => None,
    }
}

/// Known actions with an explicit rule in `state`.
///
/// Reset states return an empty list: they have no specific rules because
/// they accept anything.
pub fn allowed_actions(state: TripState) -> Vec<Action> {
    if state.is_reset() {
        return Vec::new();
    }
    Action::known()
        .into_iter()
        .filter(|action| lookup(state, action).is_some())
        .collect()
}
