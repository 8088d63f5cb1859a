//! Core error types for taskdeck-core.
//!
//! This module defines the error hierarchy using thiserror. `CoreError` is
//! what the roller returns: selection and gate errors, surfaced to the user
//! as notices. Config and board operations return their own `ConfigError`
//! and `ValidationError` directly; the CLI boxes them.

use std::path::PathBuf;
use thiserror::Error;

use crate::gate::{GateInput, GatePhase};

/// Core error type for taskdeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Selection errors (dice roller)
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Commit gate errors
    #[error("Commit gate error: {0}")]
    Gate(#[from] GateError),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by the dice selector.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Selection attempted with zero candidates.
    #[error("no candidates to select from")]
    EmptyList,
}

/// Errors raised by the commit gate state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// The input is not accepted in the current phase.
    #[error("cannot apply {input:?} while {from:?}")]
    InvalidTransition { from: GatePhase, input: GateInput },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
///
/// Input validation is limited to presence checks and id lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty or whitespace
    #[error("'{0}' is required")]
    MissingField(String),

    /// No record with the given id
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },
}

impl ValidationError {
    pub fn not_found(kind: &str, id: &str) -> Self {
        ValidationError::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_converts_into_core_error() {
        let err: CoreError = SelectionError::EmptyList.into();
        assert!(matches!(err, CoreError::Selection(SelectionError::EmptyList)));
        assert_eq!(err.to_string(), "Selection error: no candidates to select from");
    }

    #[test]
    fn gate_error_converts_into_core_error() {
        let err: CoreError = GateError::InvalidTransition {
            from: GatePhase::Idle,
            input: GateInput::Accept,
        }
        .into();
        assert!(matches!(err, CoreError::Gate(_)));
        assert!(err.to_string().starts_with("Commit gate error: cannot apply Accept"));
    }

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = ValidationError::not_found("task", "task-42");
        assert_eq!(err.to_string(), "task not found: task-42");
    }
}
