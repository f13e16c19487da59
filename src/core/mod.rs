//! Core automaton types.
//!
//! This module holds the data the engine operates on:
//! - identity-bearing states
//! - guards and actions attached to transitions
//! - the transition table with its ordered multi-edges
//! - the context stack and the context view handed to guards and actions
//! - the history of fired transitions

mod action;
mod context;
mod guard;
mod history;
mod stack;
mod state;
mod table;

pub use action::Action;
pub use context::Context;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use stack::ContextStack;
pub use state::{State, StateId};
pub use table::{Endpoint, StateRegistry, Transition, TransitionTable};
