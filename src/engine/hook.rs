//! Global command hook run before transition matching.
//!
//! The hook sees every input regardless of the current state. It is the place
//! for cross-cutting rules such as refusing an input repeated too often.

use crate::core::{Context, ContextStack, State, StateRegistry};
use crate::engine::error::AutomatonError;
use thiserror::Error;

/// Signal raised by a hook to abort the current `consume` call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookAbort {
    message: String,
}

impl HookAbort {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AutomatonError> for HookAbort {
    fn from(error: AutomatonError) -> Self {
        Self::new(error.to_string())
    }
}

/// Boxed hook stored on the automaton.
pub type GlobalCommand<I, V> =
    Box<dyn Fn(&I, &mut HookContext<'_, V>) -> Result<(), HookAbort> + Send + Sync>;

/// Read/write access to the automaton handed to the hook.
pub struct HookContext<'a, V> {
    registry: &'a StateRegistry,
    context: &'a mut Context<V>,
}

impl<'a, V> HookContext<'a, V> {
    pub(crate) fn new(registry: &'a StateRegistry, context: &'a mut Context<V>) -> Self {
        Self { registry, context }
    }

    pub fn state(&self) -> Option<&State> {
        self.context.state()
    }

    pub fn stack(&self) -> &ContextStack<V> {
        self.context.stack()
    }

    pub fn append(&mut self, value: V) -> &mut Self {
        self.context.append(value);
        self
    }

    /// Move the automaton before matching. Validated like `Automaton::set_state`.
    pub fn set_state(&mut self, state: &State) -> Result<(), AutomatonError> {
        let registered = self
            .registry
            .get(state.id())
            .ok_or_else(|| AutomatonError::UnknownState {
                state: state.name().to_string(),
            })?;
        self.context.set_state(registered.clone());
        Ok(())
    }
}
