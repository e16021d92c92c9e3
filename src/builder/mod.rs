//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder for trip state machines and the
//! [`state_enum!`](crate::state_enum) macro used to declare state sets.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::TripMachineBuilder;

use crate::core::TripState;
use crate::fsm::TripStateMachine;

/// Create a machine in `initial` that keeps no history.
///
/// Suited to hosts that track many trips at once and only need the current
/// state of each.
///
/// # Example
///
/// ```
/// use trip_lifecycle::builder::lightweight_machine;
/// use trip_lifecycle::core::TripState;
///
/// let mut machine = lightweight_machine(TripState::Idle);
/// machine.dispatch("select_car");
/// assert!(machine.history().is_empty());
/// ```
pub fn lightweight_machine(initial: TripState) -> TripStateMachine {
    TripStateMachine::from_parts(initial, false, crate::core::StateHistory::new())
}
