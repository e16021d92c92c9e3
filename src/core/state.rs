//! State trait and the trip lifecycle states.
//!
//! States are plain payload-free values. A machine holds exactly one of them
//! and moves between them by value replacement.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;
use thiserror::Error;

/// Trait for closed sets of state machine states.
///
/// All methods are pure. Implementations are usually generated with
/// [`state_enum!`](crate::state_enum), which derives the canonical name of
/// each variant from its identifier.
///
/// # Required Traits
///
/// - `Copy`: states carry no payload and are swapped by value
/// - `Eq` + `Hash`: states key lookup tables and test fixtures
/// - `Serialize` + `DeserializeOwned`: states are written into checkpoints
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::core::{State, TripState};
///
/// assert_eq!(TripState::InTrip.name(), "InTrip");
/// assert_eq!(TripState::all().len(), 7);
/// assert!(TripState::TripCancelled.is_reset());
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Canonical human-readable name of the state.
    fn name(&self) -> &'static str;

    /// Every state of the set, in declaration order.
    fn all() -> &'static [Self];

    /// Whether this state resets unconditionally on the next dispatch.
    ///
    /// Reset states look terminal but are not: any action moves the
    /// machine out of them.
    ///
    /// Default implementation returns `false`.
    fn is_reset(&self) -> bool {
        false
    }

    /// Look a state up by its canonical name.
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|state| state.name() == name)
    }
}

crate::state_enum! {
    /// Stage of a single ride-hailing trip.
    pub enum TripState {
        /// No trip in progress.
        Idle,
        /// The rider picked a car but has not confirmed.
        CarSelected,
        /// The order is confirmed and a car is on its way.
        OrderConfirmed,
        /// The car is waiting at the pickup point.
        CarArrived,
        /// The rider is on board.
        InTrip,
        /// The trip finished normally.
        TripCompleted,
        /// The trip was cancelled before finishing.
        TripCancelled,
    }
    reset: [TripCompleted, TripCancelled]
}

impl Default for TripState {
    fn default() -> Self {
        Self::Idle
    }
}

/// A state name that matches none of the [`TripState`] variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown trip state '{0}'")]
pub struct UnknownState(pub String);

impl FromStr for TripState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as State>::from_name(s).ok_or_else(|| UnknownState(s.to_string()))
    }
}
