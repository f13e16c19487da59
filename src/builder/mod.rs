//! Builder API for transitions.
//!
//! Besides the fluent [`TransitionBuilder`], this module offers shorthands for
//! the two most common shapes: unconditional transitions and transitions that
//! fire on a fixed set of symbols.

pub mod error;
pub mod transition;

pub use error::BuildError;
pub use transition::TransitionBuilder;

use crate::core::{Guard, State};

/// Builder for an unconditional, silent transition.
///
/// # Example
///
/// ```
/// use dialomata::builder::simple_transition;
/// use dialomata::{Automaton, State};
///
/// let mut machine: Automaton<&str, i32, String> = Automaton::new();
/// let start = machine.register_state(State::new("start"));
/// let end = machine.register_state(State::new("end"));
///
/// machine.add_transition(simple_transition(&start, &end)).unwrap();
/// machine.set_state(&start).unwrap();
///
/// assert_eq!(machine.consume("anything").unwrap(), "");
/// assert_eq!(machine.state(), Some(&end));
/// ```
pub fn simple_transition<I, V, O>(from: &State, to: &State) -> TransitionBuilder<I, V, O>
where
    I: 'static,
    V: 'static,
    O: 'static,
{
    TransitionBuilder::new().from(from).to(to)
}

/// Builder for a transition that fires on any of `symbols`.
///
/// # Example
///
/// ```
/// use dialomata::builder::on_symbols;
/// use dialomata::{Automaton, State};
///
/// let mut machine: Automaton<&str, i32, String> = Automaton::new();
/// let tired = machine.register_state(State::new("tired"));
/// let rested = machine.register_state(State::new("rested"));
///
/// machine
///     .add_transition(
///         on_symbols(&tired, &rested, ["睡觉", "休息"])
///             .returns("Ah, I feel refreshed".to_string()),
///     )
///     .unwrap();
/// machine.set_state(&tired).unwrap();
///
/// assert_eq!(machine.consume("休息").unwrap(), "Ah, I feel refreshed");
/// ```
pub fn on_symbols<I, V, O>(
    from: &State,
    to: &State,
    symbols: impl IntoIterator<Item = I>,
) -> TransitionBuilder<I, V, O>
where
    I: PartialEq + Send + Sync + 'static,
    V: 'static,
    O: 'static,
{
    TransitionBuilder::new()
        .from(from)
        .to(to)
        .guard(Guard::any_of(symbols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;

    #[test]
    fn simple_transition_builds() {
        let a = State::new("A");
        let b = State::new("B");
        let transition = simple_transition::<&str, i32, String>(&a, &b)
            .build()
            .unwrap();

        assert_eq!(transition.source(), &a);
        assert_eq!(transition.target(), &b);
        assert!(transition.accepts(&"x", &Context::default()));
    }

    #[test]
    fn on_symbols_respects_symbol_set() {
        let a = State::new("A");
        let transition = on_symbols::<&str, i32, String>(&a, &a, ["学习", "练习"])
            .build()
            .unwrap();
        let ctx = Context::default();

        assert!(transition.accepts(&"练习", &ctx));
        assert!(!transition.accepts(&"电视", &ctx));
    }
}
