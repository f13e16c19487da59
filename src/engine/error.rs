//! Failures surfaced by the automaton.

use crate::builder::BuildError;
use crate::core::Endpoint;
use crate::engine::hook::HookAbort;
use thiserror::Error;

/// Errors returned by registration, `set_state` and `consume`.
///
/// Every failure is reported to the immediate caller; nothing is retried.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// A transition endpoint is not a state registered in this automaton.
    #[error("transition {role} '{state}' is not a state registered in this automaton")]
    InvalidEndpoint { role: Endpoint, state: String },

    /// `set_state` was given a state this automaton never registered.
    #[error("cannot enter state '{state}': not registered in this automaton")]
    UnknownState { state: String },

    #[error("automaton has no current state; call set_state before consuming input")]
    NoCurrentState,

    /// No outgoing transition of the current state accepted the input.
    ///
    /// Neighbors include every target reachable from the current state,
    /// whether or not its guards could have accepted.
    #[error(
        "no valid transition using input {input}\ngiven current state {state}\nand neighbors: {}\nwith stack {}",
        .neighbors.join(", "),
        .stack.join(", ")
    )]
    NoValidTransition {
        input: String,
        state: String,
        neighbors: Vec<String>,
        stack: Vec<String>,
    },

    /// The global command hook refused the input.
    #[error("{0}")]
    HookAborted(#[from] HookAbort),

    #[error(transparent)]
    Build(#[from] BuildError),
}

pub type Result<T, E = AutomatonError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_valid_transition_renders_in_diagnostic_order() {
        let error = AutomatonError::NoValidTransition {
            input: "carrots".to_string(),
            state: "salvation".to_string(),
            neighbors: vec!["perdition".to_string()],
            stack: vec!["carrots".to_string(), "exercise".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "no valid transition using input carrots\n\
             given current state salvation\n\
             and neighbors: perdition\n\
             with stack carrots, exercise"
        );
    }

    #[test]
    fn empty_neighbors_and_stack_render_blank() {
        let error = AutomatonError::NoValidTransition {
            input: "TV".to_string(),
            state: "perdition".to_string(),
            neighbors: vec![],
            stack: vec![],
        };

        assert_eq!(
            error.to_string(),
            "no valid transition using input TV\ngiven current state perdition\nand neighbors: \nwith stack "
        );
    }

    #[test]
    fn hook_abort_message_is_verbatim() {
        let error = AutomatonError::from(HookAbort::new("Too much 学习 makes me tired"));
        assert_eq!(error.to_string(), "Too much 学习 makes me tired");
    }

    #[test]
    fn invalid_endpoint_names_role() {
        let error = AutomatonError::InvalidEndpoint {
            role: Endpoint::Target,
            state: "stray".to_string(),
        };
        assert!(error.to_string().contains("target 'stray'"));
    }
}
