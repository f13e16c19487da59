//! Checkpoint and resume for automata.
//!
//! Guards, actions and hooks are closures and cannot be serialized, so a
//! checkpoint carries only data: registered states, current state, context
//! stack and history. Resuming means rebuilding the graph in code with the
//! same states registered in the same order and then calling
//! [`Automaton::restore`]. Rebuilt states have fresh identities; checkpointed
//! identities are mapped onto them by registration position.

use crate::core::{ContextStack, State, StateHistory, StateId, StateTransition};
use crate::engine::Automaton;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, RestoreViolation};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of an automaton's data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint<V> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Registered states in registration order
    pub states: Vec<State>,

    /// Current state, if one was set
    pub current: Option<State>,

    /// Context stack contents
    pub stack: ContextStack<V>,

    /// Fired transitions
    pub history: StateHistory,
}

type Checked = Validation<(), NonEmptyVec<RestoreViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> RestoreViolation) -> Checked {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

impl<V> Checkpoint<V> {
    /// Check that this checkpoint fits an automaton whose registered states are
    /// `live`, accumulating every violation.
    pub fn validate(&self, live: &[State]) -> Checked {
        let mut checks: Vec<Checked> = Vec::new();

        checks.push(check(self.version == CHECKPOINT_VERSION, || {
            RestoreViolation::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            }
        }));

        checks.push(check(self.states.len() == live.len(), || {
            RestoreViolation::StateCountMismatch {
                checkpoint: self.states.len(),
                live: live.len(),
            }
        }));

        for (position, (saved, current)) in self.states.iter().zip(live).enumerate() {
            checks.push(check(saved.name() == current.name(), || {
                RestoreViolation::StateNameMismatch {
                    position,
                    checkpoint: saved.name().to_string(),
                    live: current.name().to_string(),
                }
            }));
        }

        let known: HashSet<StateId> = self.states.iter().map(State::id).collect();

        if let Some(current) = &self.current {
            checks.push(check(known.contains(&current.id()), || {
                RestoreViolation::UnknownCurrentState {
                    state: current.name().to_string(),
                }
            }));
        }

        for (index, transition) in self.history.transitions().iter().enumerate() {
            for state in [&transition.from, &transition.to] {
                checks.push(check(known.contains(&state.id()), || {
                    RestoreViolation::UnknownHistoryState {
                        index,
                        state: state.name().to_string(),
                    }
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError>
    where
        V: Serialize,
    {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError>
    where
        V: DeserializeOwned,
    {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.supported()
    }

    /// Serialize to the compact bincode format.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError>
    where
        V: Serialize,
    {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError>
    where
        V: DeserializeOwned,
    {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.supported()
    }

    fn supported(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<I, V: Clone, O> Automaton<I, V, O> {
    /// Capture the automaton's data.
    pub fn checkpoint(&self) -> Checkpoint<V> {
        let checkpoint = Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            states: self.states().to_vec(),
            current: self.state().cloned(),
            stack: self.stack().clone(),
            history: self.history().clone(),
        };
        debug!(id = %checkpoint.id, states = checkpoint.states.len(), "checkpoint taken");
        checkpoint
    }

    /// Apply a checkpoint taken from an automaton with the same states.
    ///
    /// Nothing is changed unless every check passes.
    pub fn restore(&mut self, checkpoint: Checkpoint<V>) -> Result<(), CheckpointError> {
        if let Validation::Failure(violations) = checkpoint.validate(self.states()) {
            let violations: Vec<RestoreViolation> = violations.iter().cloned().collect();
            warn!(id = %checkpoint.id, violations = violations.len(), "checkpoint rejected");
            return Err(CheckpointError::ValidationFailed(violations));
        }

        let mapping: HashMap<StateId, State> = checkpoint
            .states
            .iter()
            .zip(self.states())
            .map(|(saved, live)| (saved.id(), live.clone()))
            .collect();
        let remap = |state: &State| mapping.get(&state.id()).cloned();

        let current = checkpoint.current.as_ref().and_then(remap);
        let history: StateHistory = checkpoint
            .history
            .transitions()
            .iter()
            .filter_map(|transition| {
                Some(StateTransition {
                    from: remap(&transition.from)?,
                    to: remap(&transition.to)?,
                    ..transition.clone()
                })
            })
            .collect();

        debug!(id = %checkpoint.id, "checkpoint restored");
        self.restore_parts(current, checkpoint.stack, history);
        Ok(())
    }
}
