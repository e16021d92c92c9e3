//! Machine configuration loaded from JSON.
//!
//! Validation accumulates every problem instead of stopping at the first
//! one, so a host can report a broken config in a single pass.
//!
//! # Example
//!
//! ```rust
//! use trip_lifecycle::config::MachineConfig;
//!
//! let config = MachineConfig::from_json(r#"{ "history_limit": 16 }"#).unwrap();
//! let machine = config.into_machine().unwrap();
//!
//! assert_eq!(machine.current_state_name(), "Idle");
//! assert_eq!(machine.history().limit(), Some(16));
//! ```

use crate::core::{StateHistory, TripState};
use crate::fsm::TripStateMachine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem found while validating a [`MachineConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("initial_state '{name}' is not a trip state")]
    UnknownInitialState { name: String },

    #[error("history_limit must be at least 1")]
    ZeroHistoryLimit,

    #[error("history_limit is set but record_history is false")]
    LimitWithoutHistory,
}

/// Errors that can occur when loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "Invalid config: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Invalid(Vec<ConfigViolation>),
}

/// Settings for a single trip state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Canonical name of the initial state
    pub initial_state: String,
    /// Keep only this many transitions, unbounded when absent
    pub history_limit: Option<usize>,
    /// Whether accepted transitions are recorded at all
    pub record_history: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            initial_state: TripState::Idle.to_string(),
            history_limit: None,
            record_history: true,
        }
    }
}

impl MachineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Check every setting, accumulating ALL violations.
    ///
    /// On success the validated settings are already assembled into a
    /// machine, so nothing is parsed twice.
    pub fn validate(&self) -> Validation<TripStateMachine, NonEmptyVec<ConfigViolation>> {
        let record_history = self.record_history;
        self.initial().and(self.history()).map(|(initial, history)| {
            TripStateMachine::from_parts(initial, record_history, history)
        })
    }

    /// Validate the config and build a machine from it.
    pub fn into_machine(self) -> Result<TripStateMachine, ConfigError> {
        self.validate()
            .into_result()
            .map_err(|violations| ConfigError::Invalid(violations.into_vec()))
    }

    fn initial(&self) -> Validation<TripState, NonEmptyVec<ConfigViolation>> {
        match self.initial_state.parse::<TripState>() {
            Ok(state) => Validation::success(state),
            Err(_) => Validation::fail(ConfigViolation::UnknownInitialState {
                name: self.initial_state.clone(),
            }),
        }
    }

    fn history(&self) -> Validation<StateHistory<TripState>, NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        if self.history_limit == Some(0) {
            checks.push(Validation::fail(ConfigViolation::ZeroHistoryLimit));
        }

        if !self.record_history && self.history_limit.is_some() {
            checks.push(Validation::fail(ConfigViolation::LimitWithoutHistory));
        }

        let limit = self.history_limit;
        Validation::all_vec(checks).map(|_| match limit {
            Some(limit) => StateHistory::with_limit(limit),
            None => StateHistory::new(),
        })
    }
}
