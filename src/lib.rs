//! Trip lifecycle: a table-driven state machine for ride-hailing trips
//!
//! A rider moves through a closed set of stages (idle, car selected, order
//! confirmed, car arrived, in trip, completed or cancelled) driven by named
//! actions. The whole contract is one transition table and one `dispatch`
//! operation; everything else in the crate is plumbing around it.
//!
//! # Core Concepts
//!
//! - **State**: `TripState`, a closed enum of seven payload-free variants
//! - **Action**: a label such as `select_car`; unknown labels are valid input
//! - **Dispatch**: looks up (state, action) and either moves or rejects
//! - **Reset**: `TripCompleted` and `TripCancelled` return to `Idle` on any action
//!
//! Rejection is a normal outcome reported through the result value. Nothing
//! on the dispatch path panics or returns an error.
//!
//! # Example
//!
//! ```rust
//! use trip_lifecycle::{TripState, TripStateMachine};
//!
//! let mut machine = TripStateMachine::new();
//!
//! for label in ["select_car", "confirm_order", "car_arrived", "start_trip", "complete_trip"] {
//!     assert!(machine.dispatch(label).is_accepted());
//! }
//! assert_eq!(machine.current_state(), TripState::TripCompleted);
//!
//! let reset = machine.dispatch("whatever");
//! assert_eq!(reset.as_pair(), ("Idle", true));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod fsm;

// Re-export commonly used types
pub use crate::builder::{BuildError, TripMachineBuilder};
pub use crate::checkpoint::{Checkpoint, CheckpointError, CheckpointFormat};
pub use crate::config::{ConfigError, MachineConfig};
pub use crate::core::{Action, State, StateHistory, TransitionRecord, TripState};
pub use crate::fsm::{InvalidAction, TransitionResult, TripStateMachine, TripStats};
