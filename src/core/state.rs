//! Identity-bearing automaton states.
//!
//! A [`State`] is a named node in the transition graph. Names are labels for
//! display and diagnostics only; two states built from the same name are
//! distinct nodes. Identity is carried by a [`StateId`] minted when the state
//! is constructed and shared by every clone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Opaque identity of a [`State`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(Uuid);

impl StateId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A node in the automaton's transition graph.
///
/// Equality and hashing use identity, never the name:
///
/// ```rust
/// use dialomata::core::State;
///
/// let a = State::new("waiting");
/// let b = State::new("waiting");
///
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// assert_eq!(a.name(), b.name());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    name: String,
}

impl State {
    /// Create a state with a fresh identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StateId::generate(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// The display name used in logs and failure diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State:{}", self.name)
    }
}
