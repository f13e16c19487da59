//! The automaton engine and its global command hook.
//!
//! The engine owns the transition table, the context and the history. All
//! work happens synchronously inside `consume`: there is no suspension point
//! and no internal locking, so sharing one automaton across threads needs a
//! caller-side mutex around each call.

mod error;
mod hook;
mod machine;

pub use error::{AutomatonError, Result};
pub use hook::{GlobalCommand, HookAbort, HookContext};
pub use machine::Automaton;
