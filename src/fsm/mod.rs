//! The trip state machine and its transition table.
//!
//! # Key Concepts
//!
//! - **Table**: a single exhaustive `match` over (state, action) pairs
//! - **Machine**: owns the current state and applies the table on dispatch
//! - **Results**: rejection is a value (`accepted: false`), never a panic
//!
//! Dispatch is synchronous and never blocks. Timeouts such as an expired
//! car search are expressed by the caller as an ordinary `cancel`.

mod machine;
mod table;
mod transition;

pub use machine::{TripStateMachine, TripStats};
pub use table::{allowed_actions, lookup, Rule};
pub use transition::{InvalidAction, TransitionResult};
