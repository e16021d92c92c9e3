//! Transition history tracking.
//!
//! Only accepted dispatches are recorded. A history may be bounded, in which
//! case the oldest records are evicted first.

use super::action::Action;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single accepted transition.
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::core::{Action, TransitionRecord, TripState};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     sequence: 1,
///     from: TripState::Idle,
///     to: TripState::CarSelected,
///     action: Action::SelectCar,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to.to_string(), "CarSelected");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// 1-based position among all accepted dispatches of the machine
    pub sequence: u64,
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The action that triggered the transition
    pub action: Action,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of accepted transitions.
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::core::{Action, StateHistory, TransitionRecord, TripState};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(1);
/// for (sequence, (from, to, action)) in [
///     (TripState::Idle, TripState::CarSelected, Action::SelectCar),
///     (TripState::CarSelected, TripState::TripCancelled, Action::Cancel),
/// ]
/// .into_iter()
/// .enumerate()
/// {
///     history.push(TransitionRecord {
///         sequence: sequence as u64 + 1,
///         from,
///         to,
///         action,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.evicted(), 1);
/// assert_eq!(history.path(), vec![TripState::CarSelected, TripState::TripCancelled]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    records: VecDeque<TransitionRecord<S>>,
    limit: Option<usize>,
    evicted: u64,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            limit: None,
            evicted: 0,
        }
    }

    /// Create an empty history that keeps at most `limit` records.
    ///
    /// A limit of zero keeps nothing; callers that want no history should
    /// disable recording instead. Storage grows with the records pushed,
    /// not with the limit.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
            evicted: 0,
        }
    }

    /// Append a record, evicting the oldest ones beyond the limit.
    pub fn push(&mut self, record: TransitionRecord<S>) {
        self.records.push_back(record);
        if let Some(limit) = self.limit {
            while self.records.len() > limit {
                self.records.pop_front();
                self.evicted += 1;
            }
        }
    }

    /// States traversed by the retained records.
    ///
    /// Returns the `from` state of the first record followed by the `to`
    /// state of each record, or an empty path when nothing is retained.
    pub fn path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Elapsed time between the first and last retained record.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> impl DoubleEndedIterator<Item = &TransitionRecord<S>> + '_ {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of records dropped because of the limit.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}
