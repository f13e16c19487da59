//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Context, Guard, State, Transition};

/// Builder for constructing transitions with a fluent API.
///
/// Guard and action are optional: an unset guard accepts every input and an
/// unset action outputs `O::default()`, which gives unconditional silent
/// transitions.
pub struct TransitionBuilder<I, V, O> {
    from: Option<State>,
    to: Option<State>,
    guard: Option<Guard<I, V>>,
    action: Option<Action<I, V, O>>,
}

impl<I: 'static, V: 'static, O: 'static> TransitionBuilder<I, V, O> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: &State) -> Self {
        self.from = Some(state.clone());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: &State) -> Self {
        self.to = Some(state.clone());
        self
    }

    /// Use a prepared guard.
    pub fn guard(mut self, guard: Guard<I, V>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&I, &Context<V>) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action run when the transition fires.
    pub fn action<F>(mut self, body: F) -> Self
    where
        F: Fn(&I, &mut Context<V>) -> O + Send + Sync + 'static,
    {
        self.action = Some(Action::new(body));
        self
    }

    /// Output a fixed value without touching the stack.
    pub fn returns(mut self, output: O) -> Self
    where
        O: Clone + Send + Sync,
    {
        self.action = Some(Action::returning(output));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<I, V, O>, BuildError>
    where
        O: Default,
    {
        let from = self.from.ok_or(BuildError::MissingSource)?;
        let to = self.to.ok_or(BuildError::MissingTarget)?;

        Ok(Transition::new(
            from,
            to,
            self.guard.unwrap_or_else(Guard::always),
            self.action.unwrap_or_else(Action::silent),
        ))
    }
}

impl<I: 'static, V: 'static, O: 'static> Default for TransitionBuilder<I, V, O> {
    fn default() -> Self {
        Self::new()
    }
}
