//! Action labels that drive the trip lifecycle.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An external event that may trigger a transition.
///
/// The six known labels map to dedicated variants. Any other label is kept
/// verbatim in [`Action::Other`]: it is a valid input that only the reset
/// states accept. Labels are matched exactly, without trimming or case
/// folding.
///
/// `Other` is never matched by variant: a known label wrapped in `Other`
/// behaves exactly like its dedicated variant, and serializes as the bare
/// label either way.
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::core::Action;
///
/// assert_eq!(Action::from_label("select_car"), Action::SelectCar);
/// assert_eq!(Action::from_label("honk"), Action::Other("honk".to_string()));
/// assert_eq!(Action::StartTrip.label(), "start_trip");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    SelectCar,
    ConfirmOrder,
    Cancel,
    CarArrived,
    StartTrip,
    CompleteTrip,
    /// A label outside the known vocabulary.
    Other(String),
}

impl Action {
    /// The known vocabulary, in lifecycle order.
    pub fn known() -> [Action; 6] {
        [
            Action::SelectCar,
            Action::ConfirmOrder,
            Action::Cancel,
            Action::CarArrived,
            Action::StartTrip,
            Action::CompleteTrip,
        ]
    }

    pub fn from_label(label: &str) -> Self {
        Self::parse_known(label).unwrap_or_else(|| Action::Other(label.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Action::SelectCar => "select_car",
            Action::ConfirmOrder => "confirm_order",
            Action::Cancel => "cancel",
            Action::CarArrived => "car_arrived",
            Action::StartTrip => "start_trip",
            Action::CompleteTrip => "complete_trip",
            Action::Other(label) => label.as_str(),
        }
    }

    /// Whether the label belongs to the known vocabulary.
    pub fn is_known(&self) -> bool {
        match self {
            Action::Other(label) => Self::parse_known(label).is_some(),
            _ => true,
        }
    }

    /// Map a known label carried in `Other` to its dedicated variant.
    pub fn canonical(self) -> Self {
        match self {
            Action::Other(label) => Self::parse_known(&label).unwrap_or(Action::Other(label)),
            known => known,
        }
    }

    pub(crate) fn parse_known(label: &str) -> Option<Self> {
        match label {
            "select_car" => Some(Action::SelectCar),
            "confirm_order" => Some(Action::ConfirmOrder),
            "cancel" => Some(Action::Cancel),
            "car_arrived" => Some(Action::CarArrived),
            "start_trip" => Some(Action::StartTrip),
            "complete_trip" => Some(Action::CompleteTrip),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Action::from_label(s))
    }
}

impl From<&str> for Action {
    fn from(label: &str) -> Self {
        Action::from_label(label)
    }
}

impl From<String> for Action {
    fn from(label: String) -> Self {
        Action::Other(label).canonical()
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}
