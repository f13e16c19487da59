//! Checkpoint error types.

use thiserror::Error;

/// A single reason a checkpoint cannot be applied to an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreViolation {
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Checkpoint has {checkpoint} states but the automaton has {live}")]
    StateCountMismatch { checkpoint: usize, live: usize },

    #[error("State at position {position} is '{live}' but the checkpoint expects '{checkpoint}'")]
    StateNameMismatch {
        position: usize,
        checkpoint: String,
        live: String,
    },

    #[error("Checkpoint current state '{state}' is not among its states")]
    UnknownCurrentState { state: String },

    #[error("History entry {index} references state '{state}' outside the checkpoint")]
    UnknownHistoryState { index: usize, state: String },
}

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint does not fit the automaton it is applied to
    #[error("Checkpoint validation failed: {}", render(.0))]
    ValidationFailed(Vec<RestoreViolation>),
}

fn render(violations: &[RestoreViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
