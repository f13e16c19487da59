//! Dialomata: a generalized pushdown automaton for dialog agents
//!
//! A dialog agent is modelled as a finite-state machine whose transitions
//! share an unbounded, fully inspectable context stack. Unlike a classical
//! pushdown automaton nothing is popped: the stack is an episodic log that
//! guards read and actions append to.
//!
//! # Core Concepts
//!
//! - **State**: identity-bearing node; equal names do not make equal states
//! - **Transition**: guarded edge with an action producing the step output
//! - **Context stack**: append-only memory shared by every guard and action
//! - **Global command hook**: state-independent pre-check that may abort input
//!
//! Matching is first-accepting-guard in registration order, with parallel
//! edges grouped by the neighbor they lead to.
//!
//! # Example
//!
//! ```rust
//! use dialomata::{Automaton, State};
//!
//! let mut machine: Automaton<&str, i32, String> = Automaton::new();
//! let dumb = machine.register_state(State::new("傻瓜"));
//! let smart = machine.register_state(State::new("聪明"));
//!
//! machine
//!     .register_transition(
//!         &dumb,
//!         &dumb,
//!         |input, ctx| *input == "学习" && ctx.stack().iter().sum::<i32>() < 2,
//!         |input, ctx| {
//!             ctx.append(1);
//!             format!("{input} makes me smart but I'm not smart yet")
//!         },
//!     )
//!     .unwrap();
//! machine
//!     .register_transition(
//!         &dumb,
//!         &smart,
//!         |input, _| *input == "学习",
//!         |input, ctx| {
//!             ctx.append(1);
//!             format!("{input} made me smart")
//!         },
//!     )
//!     .unwrap();
//!
//! machine.set_state(&dumb).unwrap();
//! machine.consume("学习").unwrap();
//! machine.consume("学习").unwrap();
//! assert_eq!(machine.consume("学习").unwrap(), "学习 made me smart");
//! assert_eq!(machine.state(), Some(&smart));
//! assert_eq!(machine.stack().as_slice(), &[1, 1, 1]);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, TransitionBuilder};
pub use crate::checkpoint::{Checkpoint, CheckpointError};
pub use crate::core::{Context, ContextStack, Guard, State, StateHistory, StateTransition};
pub use crate::engine::{Automaton, AutomatonError, HookAbort, HookContext, Result};
