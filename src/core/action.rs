//! Actions producing a transition's observable output.

use super::context::Context;
use std::fmt;

type Body<I, V, O> = Box<dyn Fn(&I, &mut Context<V>) -> O + Send + Sync>;

/// Function run when a transition fires.
///
/// The returned value is the output of the `consume` call. Appending to the
/// context stack from inside an action is how cross-step memory is threaded
/// through the automaton.
pub struct Action<I, V, O> {
    body: Body<I, V, O>,
}

impl<I, V, O> Action<I, V, O> {
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&I, &mut Context<V>) -> O + Send + Sync + 'static,
    {
        Action {
            body: Box::new(body),
        }
    }

    pub fn run(&self, input: &I, context: &mut Context<V>) -> O {
        (self.body)(input, context)
    }
}

impl<I: 'static, V: 'static, O: 'static> Action<I, V, O> {
    /// An action that leaves the stack alone and outputs `O::default()`.
    pub fn silent() -> Self
    where
        O: Default,
    {
        Action::new(|_, _| O::default())
    }

    /// An action that always outputs a clone of `output`.
    pub fn returning(output: O) -> Self
    where
        O: Clone + Send + Sync,
    {
        Action::new(move |_, _| output.clone())
    }
}

impl<I, V, O> fmt::Debug for Action<I, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
