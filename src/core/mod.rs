//! Core state machine types.
//!
//! This module contains the pure vocabulary of the trip lifecycle:
//! - State definitions via the `State` trait and `TripState`
//! - Action labels
//! - History of accepted transitions

mod action;
mod history;
mod state;

pub use action::Action;
pub use history::{StateHistory, TransitionRecord};
pub use state::{State, TripState, UnknownState};
