//! Record of fired transitions.
//!
//! Every successful `consume` appends one [`StateTransition`]. Failed calls
//! and direct `set_state` assignments are not transitions and leave the
//! history untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One fired transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state the automaton was in
    pub from: State,
    /// The state the automaton moved to
    pub to: State,
    /// Ordinal of the transition that fired, among `from`'s transitions
    pub ordinal: usize,
    /// The consumed input symbol, rendered
    pub input: String,
    /// When the transition fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of fired transitions.
///
/// # Example
///
/// ```rust
/// use dialomata::core::{State, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let dumb = State::new("傻瓜");
/// let smart = State::new("聪明");
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: dumb.clone(),
///     to: dumb.clone(),
///     ordinal: 1,
///     input: "学习".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: dumb.clone(),
///     to: smart.clone(),
///     ordinal: 0,
///     input: "学习".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&dumb, &dumb, &smart]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// States traversed: the first source, then the target of each transition.
    pub fn get_path(&self) -> Vec<&State> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl FromIterator<StateTransition> for StateHistory {
    fn from_iter<T: IntoIterator<Item = StateTransition>>(iter: T) -> Self {
        Self {
            transitions: iter.into_iter().collect(),
        }
    }
}
