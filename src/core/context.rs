//! The live view of the automaton handed to guards and actions.

use super::stack::ContextStack;
use super::state::State;

/// Current state and context stack of one automaton.
///
/// Guards receive `&Context` and actions `&mut Context`. While an action runs,
/// [`Context::state`] is still the transition's source; the engine moves to the
/// target only after the action returns.
#[derive(Clone, Debug)]
pub struct Context<V> {
    state: Option<State>,
    stack: ContextStack<V>,
}

impl<V> Default for Context<V> {
    fn default() -> Self {
        Self {
            state: None,
            stack: ContextStack::new(),
        }
    }
}

impl<V> Context<V> {
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    /// Whether the automaton currently sits in `state` (compared by identity).
    pub fn is_in(&self, state: &State) -> bool {
        self.state.as_ref() == Some(state)
    }

    pub fn stack(&self) -> &ContextStack<V> {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut ContextStack<V> {
        &mut self.stack
    }

    /// Append to the context stack. Always succeeds.
    pub fn append(&mut self, value: V) -> &mut Self {
        self.stack.append(value);
        self
    }

    pub(crate) fn set_state(&mut self, state: State) {
        self.state = Some(state);
    }

    pub(crate) fn take_stack(&mut self) -> ContextStack<V> {
        std::mem::take(&mut self.stack)
    }

    pub(crate) fn replace(&mut self, state: Option<State>, stack: ContextStack<V>) {
        self.state = state;
        self.stack = stack;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_state() {
        let context: Context<i32> = Context::default();
        assert!(context.state().is_none());
        assert!(context.stack().is_empty());
    }

    #[test]
    fn is_in_compares_identity() {
        let here = State::new("here");
        let lookalike = State::new("here");

        let mut context: Context<i32> = Context::default();
        context.set_state(here.clone());

        assert!(context.is_in(&here));
        assert!(!context.is_in(&lookalike));
    }

    #[test]
    fn append_writes_through_to_stack() {
        let mut context = Context::default();
        context.append(1).append(1);

        assert_eq!(context.stack().as_slice(), &[1, 1]);
    }
}
