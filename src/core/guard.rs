//! Guard predicates deciding whether a transition may fire.

use super::context::Context;
use std::fmt;

type Predicate<I, V> = Box<dyn Fn(&I, &Context<V>) -> bool + Send + Sync>;

/// Predicate over an input symbol and the automaton's live context.
///
/// Guards are evaluated lazily in transition order and the search stops at the
/// first one that accepts, so a guard may observe stack values appended by an
/// earlier step but never by a sibling transition in the same step.
///
/// # Example
///
/// ```rust
/// use dialomata::core::{Context, Guard};
///
/// let studied_twice = Guard::new(|input: &&str, ctx: &Context<i32>| {
///     *input == "学习" && ctx.stack().ends_with(&[1, 1])
/// });
///
/// let mut ctx = Context::default();
/// assert!(!studied_twice.check(&"学习", &ctx));
///
/// ctx.append(1).append(1);
/// assert!(studied_twice.check(&"学习", &ctx));
/// assert!(!studied_twice.check(&"电视", &ctx));
/// ```
pub struct Guard<I, V> {
    predicate: Predicate<I, V>,
}

impl<I, V> Guard<I, V> {
    /// Create a guard from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&I, &Context<V>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against an input and the current context.
    pub fn check(&self, input: &I, context: &Context<V>) -> bool {
        (self.predicate)(input, context)
    }
}

impl<I: 'static, V: 'static> Guard<I, V> {
    /// A guard that accepts every input.
    pub fn always() -> Self {
        Guard::new(|_, _| true)
    }

    /// A guard that accepts exactly one symbol.
    pub fn on(symbol: I) -> Self
    where
        I: PartialEq + Send + Sync,
    {
        Guard::new(move |input, _| *input == symbol)
    }

    /// A guard that accepts any of `symbols`.
    pub fn any_of(symbols: impl IntoIterator<Item = I>) -> Self
    where
        I: PartialEq + Send + Sync,
    {
        let symbols: Vec<I> = symbols.into_iter().collect();
        Guard::new(move |input, _| symbols.contains(input))
    }
}

impl<I, V> fmt::Debug for Guard<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
