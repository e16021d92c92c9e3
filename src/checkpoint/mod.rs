//! Checkpoint and resume for trip state machines.
//!
//! A checkpoint captures everything a machine holds, so a host can park a
//! trip across process restarts and pick it up where it left off. JSON is
//! provided for inspection and bincode for compact storage.

use crate::core::{StateHistory, TransitionRecord, TripState};
use crate::fsm::{lookup, TripStateMachine, TripStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, CheckpointFormat};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a trip state machine.
///
/// # Example
///
/// ```rust
/// use trip_lifecycle::checkpoint::Checkpoint;
/// use trip_lifecycle::fsm::TripStateMachine;
///
/// let mut machine = TripStateMachine::new();
/// machine.dispatch("select_car");
///
/// let bytes = machine.checkpoint().to_bytes().unwrap();
/// let resumed = TripStateMachine::resume(Checkpoint::from_bytes(&bytes).unwrap()).unwrap();
///
/// assert_eq!(resumed.current_state_name(), "CarSelected");
/// assert_eq!(resumed.history().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine
    pub initial_state: TripState,

    /// Current state of the machine
    pub current_state: TripState,

    /// Whether the machine records history
    pub record_history: bool,

    /// Retained transition history
    pub history: StateHistory<TripState>,

    /// Dispatch counters
    pub stats: TripStats,
}

impl Checkpoint {
    /// Check that the checkpoint describes a machine the transition table
    /// could have produced.
    ///
    /// Retained records are replayed against the transition table and must
    /// chain with consecutive sequence numbers. History and counters must
    /// agree with each other.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        self.validate_history()?;
        self.validate_stats()
    }

    fn validate_history(&self) -> Result<(), CheckpointError> {
        let history = &self.history;

        if !self.record_history && !history.is_empty() {
            return Err(inconsistent("history present while recording is disabled"));
        }

        if let Some(limit) = history.limit() {
            if limit == 0 {
                return Err(inconsistent("history limit must be at least 1"));
            }
            if history.len() > limit {
                return Err(inconsistent(format!(
                    "history holds {} records but its limit is {limit}",
                    history.len()
                )));
            }
        }

        let mut previous: Option<&TransitionRecord<TripState>> = None;
        for record in history.records() {
            if lookup(record.from, &record.action).map(|rule| rule.to) != Some(record.to) {
                return Err(inconsistent(format!(
                    "record {} moves {} to {} on '{}', which no rule allows",
                    record.sequence, record.from, record.to, record.action
                )));
            }

            if let Some(previous) = previous {
                if previous.to != record.from {
                    return Err(inconsistent(format!(
                        "record {} starts in {} but record {} ended in {}",
                        record.sequence, record.from, previous.sequence, previous.to
                    )));
                }
                if previous.sequence.checked_add(1) != Some(record.sequence) {
                    return Err(inconsistent(format!(
                        "sequence jumps from {} to {}",
                        previous.sequence, record.sequence
                    )));
                }
            }
            previous = Some(record);
        }

        if let Some(last) = history.last() {
            if last.to != self.current_state {
                return Err(inconsistent(format!(
                    "history ends in {} but current state is {}",
                    last.to, self.current_state
                )));
            }
            if last.sequence != self.stats.accepted {
                return Err(inconsistent(format!(
                    "last recorded sequence {} does not match {} accepted dispatches",
                    last.sequence, self.stats.accepted
                )));
            }
        }

        if let Some(first) = history.records().next() {
            if history.evicted() == 0 && first.from != self.initial_state {
                return Err(inconsistent(format!(
                    "history starts in {} but the initial state is {}",
                    first.from, self.initial_state
                )));
            }
        }

        let recorded = history.evicted().checked_add(history.len() as u64);
        if self.record_history && recorded != Some(self.stats.accepted) {
            return Err(inconsistent(format!(
                "{} retained and {} evicted records do not account for {} accepted dispatches",
                history.len(),
                history.evicted(),
                self.stats.accepted
            )));
        }

        Ok(())
    }

    fn validate_stats(&self) -> Result<(), CheckpointError> {
        let stats = &self.stats;

        if stats.accepted == 0 && self.current_state != self.initial_state {
            return Err(inconsistent(format!(
                "no accepted dispatches but the machine moved from {} to {}",
                self.initial_state, self.current_state
            )));
        }

        let ended = stats.completed_trips.saturating_add(stats.cancelled_trips);
        if ended > stats.accepted {
            return Err(inconsistent(format!(
                "{} completed and {} cancelled trips exceed {} accepted dispatches",
                stats.completed_trips, stats.cancelled_trips, stats.accepted
            )));
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self).map_err(|e| CheckpointError::Encode {
            format: CheckpointFormat::Json,
            reason: e.to_string(),
        })
    }

    pub fn from_json(text: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(text).map_err(|e| CheckpointError::Decode {
            format: CheckpointFormat::Json,
            reason: e.to_string(),
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode {
            format: CheckpointFormat::Bincode,
            reason: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode {
            format: CheckpointFormat::Bincode,
            reason: e.to_string(),
        })
    }
}

fn inconsistent(reason: impl Into<String>) -> CheckpointError {
    CheckpointError::Inconsistent(reason.into())
}

impl TripStateMachine {
    /// Capture the machine in a checkpoint.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            initial_state: self.initial,
            current_state: self.current,
            record_history: self.record_history,
            history: self.history.clone(),
            stats: self.stats,
        }
    }

    /// Rebuild a machine from a checkpoint.
    pub fn resume(checkpoint: Checkpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        debug!(
            checkpoint = %checkpoint.id,
            state = %checkpoint.current_state,
            "Resuming trip state machine"
        );

        Ok(Self {
            initial: checkpoint.initial_state,
            current: checkpoint.current_state,
            record_history: checkpoint.record_history,
            history: checkpoint.history,
            stats: checkpoint.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{lightweight_machine, TripMachineBuilder};

    fn tampered(checkpoint: &Checkpoint, edit: impl FnOnce(&mut serde_json::Value)) -> Checkpoint {
        let mut value = serde_json::to_value(checkpoint).unwrap();
        edit(&mut value);
        serde_json::from_value(value).unwrap()
    }

    fn assert_inconsistent(checkpoint: Checkpoint, reason: &str) {
        match TripStateMachine::resume(checkpoint) {
            Err(CheckpointError::Inconsistent(found)) => {
                assert!(found.contains(reason), "'{found}' does not mention '{reason}'")
            }
            other => panic!("Expected Inconsistent, got {other:?}"),
        }
    }

    fn three_step_machine() -> TripStateMachine {
        let mut machine = TripStateMachine::new();
        for label in ["select_car", "confirm_order", "car_arrived"] {
            machine.dispatch(label);
        }
        machine
    }

    fn mid_trip_machine() -> TripStateMachine {
        let mut machine = TripMachineBuilder::new().history_limit(3).build().unwrap();
        for label in ["select_car", "honk", "confirm_order", "car_arrived", "start_trip"] {
            machine.dispatch(label);
        }
        machine
    }

    #[test]
    fn json_round_trip_restores_machine() {
        let machine = mid_trip_machine();
        let json = machine.checkpoint().to_json().unwrap();

        let resumed = TripStateMachine::resume(Checkpoint::from_json(&json).unwrap()).unwrap();

        assert_eq!(resumed.current_state(), TripState::InTrip);
        assert_eq!(resumed.history(), machine.history());
        assert_eq!(resumed.stats(), machine.stats());
        assert_eq!(resumed.stats().rejected, 1);
    }

    #[test]
    fn resumed_machine_keeps_going() {
        let checkpoint = mid_trip_machine().checkpoint();
        let mut resumed = TripStateMachine::resume(checkpoint).unwrap();

        resumed.dispatch("complete_trip");

        assert_eq!(resumed.current_state(), TripState::TripCompleted);
        assert_eq!(resumed.history().last().map(|r| r.sequence), Some(5));
        assert_eq!(resumed.history().len(), 3);
        assert_eq!(resumed.stats().completed_trips, 1);
    }

    #[test]
    fn each_checkpoint_gets_a_fresh_id() {
        let machine = TripStateMachine::new();
        assert_ne!(machine.checkpoint().id, machine.checkpoint().id);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = TripStateMachine::new().checkpoint();
        checkpoint.version = CHECKPOINT_VERSION + 1;

        let err = TripStateMachine::resume(checkpoint).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion { found: 2, supported: 1 }
        ));
    }

    #[test]
    fn inconsistent_state_is_rejected() {
        let mut checkpoint = mid_trip_machine().checkpoint();
        checkpoint.current_state = TripState::Idle;

        let err = TripStateMachine::resume(checkpoint).unwrap_err();
        assert!(matches!(err, CheckpointError::Inconsistent(_)));
    }

    #[test]
    fn truncated_json_fails_to_decode() {
        let json = TripStateMachine::new().checkpoint().to_json().unwrap();
        let err = Checkpoint::from_json(&json[..json.len() / 2]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to decode checkpoint from JSON"));
    }

    #[test]
    fn corrupted_bytes_fail_to_decode() {
        let err = Checkpoint::from_bytes(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::Decode {
                format: CheckpointFormat::Bincode,
                ..
            }
        ));
    }

    #[test]
    fn illegal_record_is_rejected() {
        let mut machine = TripStateMachine::new();
        machine.dispatch("select_car");

        let forged = tampered(&machine.checkpoint(), |value| {
            value["history"]["records"][0]["to"] = "InTrip".into();
            value["current_state"] = "InTrip".into();
        });

        assert_inconsistent(forged, "which no rule allows");
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        let forged = tampered(&mid_trip_machine().checkpoint(), |value| {
            value["history"]["limit"] = 0.into();
        });

        assert_inconsistent(forged, "limit must be at least 1");
    }

    #[test]
    fn history_over_its_limit_is_rejected() {
        let forged = tampered(&mid_trip_machine().checkpoint(), |value| {
            value["history"]["limit"] = 2.into();
        });

        assert_inconsistent(forged, "holds 3 records but its limit is 2");
    }

    #[test]
    fn disconnected_records_are_rejected() {
        let forged = tampered(&three_step_machine().checkpoint(), |value| {
            let record = &mut value["history"]["records"][1];
            record["from"] = "Idle".into();
            record["to"] = "CarSelected".into();
            record["action"] = "select_car".into();
        });

        assert_inconsistent(forged, "record 2 starts in Idle but record 1 ended in CarSelected");
    }

    #[test]
    fn sequence_gap_is_rejected() {
        let forged = tampered(&three_step_machine().checkpoint(), |value| {
            value["history"]["records"][2]["sequence"] = 7.into();
            value["stats"]["accepted"] = 7.into();
        });

        assert_inconsistent(forged, "sequence jumps from 2 to 7");
    }

    #[test]
    fn history_from_another_start_is_rejected() {
        let mut checkpoint = three_step_machine().checkpoint();
        checkpoint.initial_state = TripState::CarSelected;

        assert_inconsistent(checkpoint, "initial state is CarSelected");
    }

    #[test]
    fn missing_records_are_rejected() {
        let forged = tampered(&three_step_machine().checkpoint(), |value| {
            value["history"]["evicted"] = 2.into();
        });

        assert_inconsistent(forged, "do not account for 3 accepted dispatches");
    }

    #[test]
    fn ended_trips_beyond_accepted_are_rejected() {
        let mut checkpoint = TripStateMachine::new().checkpoint();
        checkpoint.stats.cancelled_trips = 1;

        assert_inconsistent(checkpoint, "exceed 0 accepted dispatches");
    }

    #[test]
    fn unrecorded_move_is_rejected() {
        let mut checkpoint = lightweight_machine(TripState::Idle).checkpoint();
        checkpoint.current_state = TripState::InTrip;

        assert_inconsistent(checkpoint, "no accepted dispatches");
    }

    #[test]
    fn evicted_history_still_resumes() {
        let mut machine = mid_trip_machine();
        machine.dispatch("cancel");
        machine.dispatch("anything");

        let resumed = TripStateMachine::resume(machine.checkpoint()).unwrap();
        assert_eq!(resumed.history().evicted(), 3);
        assert_eq!(resumed.current_state(), TripState::Idle);
    }
}
