//! The automaton engine.

use crate::builder::TransitionBuilder;
use crate::core::{
    Action, Context, ContextStack, Endpoint, Guard, State, StateHistory, StateTransition,
    Transition, TransitionTable,
};
use crate::engine::error::{AutomatonError, Result};
use crate::engine::hook::{GlobalCommand, HookAbort, HookContext};
use chrono::Utc;
use std::fmt::{self, Display};
use tracing::{debug, trace, warn};

/// A generalized pushdown automaton.
///
/// States and guarded transitions form a caller-defined multigraph. Every
/// guard and action sees the same [`Context`]: the current state and an
/// append-only stack of `V` values. Feeding an input symbol of type `I` fires
/// the first accepting transition and yields its output of type `O`.
///
/// [`consume`](Automaton::consume) needs `I: Display` and `V: Display`, since
/// a failed step renders the input and the stack into its error. Wrap opaque
/// symbols or stack values in a newtype with a `Display` impl.
///
/// ```compile_fail
/// use dialomata::{Automaton, State};
///
/// struct Opaque;
///
/// let mut machine: Automaton<&str, Opaque, ()> = Automaton::new();
/// let idle = machine.register_state(State::new("idle"));
/// machine.set_state(&idle).unwrap();
/// machine.consume("ping").ok();
/// ```
///
/// # Example
///
/// ```rust
/// use dialomata::{Automaton, AutomatonError, State};
///
/// let mut machine: Automaton<&str, String, String> = Automaton::new();
/// let salvation = machine.register_state(State::new("salvation"));
/// let perdition = machine.register_state(State::new("perdition"));
///
/// machine
///     .register_transition(
///         &salvation,
///         &perdition,
///         |input, _| *input == "TV",
///         |input, _| format!("{input} makes your brain rot. you are going to hell."),
///     )
///     .unwrap();
///
/// machine.set_state(&salvation).unwrap();
/// assert_eq!(
///     machine.consume("TV").unwrap(),
///     "TV makes your brain rot. you are going to hell."
/// );
/// assert_eq!(machine.state(), Some(&perdition));
///
/// // perdition has no way out yet
/// let err = machine.consume("TV").unwrap_err();
/// assert!(matches!(err, AutomatonError::NoValidTransition { .. }));
/// ```
pub struct Automaton<I, V, O> {
    table: TransitionTable<I, V, O>,
    context: Context<V>,
    hook: Option<GlobalCommand<I, V>>,
    history: StateHistory,
}

impl<I, V, O> Default for Automaton<I, V, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, V, O> Automaton<I, V, O> {
    /// Create an empty automaton: no states, empty stack, no current state.
    pub fn new() -> Self {
        Self {
            table: TransitionTable::new(),
            context: Context::default(),
            hook: None,
            history: StateHistory::new(),
        }
    }

    /// Create an empty automaton with a global command hook installed.
    pub fn with_hook<F>(hook: F) -> Self
    where
        F: Fn(&I, &mut HookContext<'_, V>) -> std::result::Result<(), HookAbort>
            + Send
            + Sync
            + 'static,
    {
        let mut automaton = Self::new();
        automaton.set_hook(hook);
        automaton
    }

    /// Replace the global command hook.
    pub fn set_hook<F>(&mut self, hook: F)
    where
        F: Fn(&I, &mut HookContext<'_, V>) -> std::result::Result<(), HookAbort>
            + Send
            + Sync
            + 'static,
    {
        self.hook = Some(Box::new(hook));
    }

    /// Restore the default no-op hook.
    pub fn clear_hook(&mut self) {
        self.hook = None;
    }

    /// Register a state and hand back an identity-equal handle.
    ///
    /// Registering the same identity twice leaves the graph unchanged.
    /// Only [`State`] values are accepted:
    ///
    /// ```compile_fail
    /// use dialomata::Automaton;
    ///
    /// let mut machine: Automaton<&str, String, String> = Automaton::new();
    /// machine.register_state("perdition");
    /// ```
    pub fn register_state(&mut self, state: State) -> State {
        let handle = state.clone();
        if self.table.insert_state(state) {
            debug!(state = %handle.name(), id = %handle.id(), "registered state");
        } else {
            trace!(state = %handle.name(), "state already registered");
        }
        handle
    }

    /// Register a guarded transition and return its ordinal.
    ///
    /// Both endpoints must already be registered here.
    pub fn register_transition<G, A>(
        &mut self,
        source: &State,
        target: &State,
        guard: G,
        action: A,
    ) -> Result<usize>
    where
        G: Fn(&I, &Context<V>) -> bool + Send + Sync + 'static,
        A: Fn(&I, &mut Context<V>) -> O + Send + Sync + 'static,
    {
        self.insert(Transition::new(
            source.clone(),
            target.clone(),
            Guard::new(guard),
            Action::new(action),
        ))
    }

    /// Register a transition that is already built.
    pub fn insert(&mut self, transition: Transition<I, V, O>) -> Result<usize> {
        let (source, target) = (transition.source().clone(), transition.target().clone());
        match self.table.insert_transition(transition) {
            Ok(ordinal) => {
                debug!(
                    from = %source.name(),
                    to = %target.name(),
                    ordinal,
                    "registered transition"
                );
                Ok(ordinal)
            }
            Err(role) => {
                let offending = match role {
                    Endpoint::Source => source,
                    Endpoint::Target => target,
                };
                Err(AutomatonError::InvalidEndpoint {
                    role,
                    state: offending.name().to_string(),
                })
            }
        }
    }

    /// Enter `state` directly. Fails if the state was never registered.
    pub fn set_state(&mut self, state: &State) -> Result<()> {
        let registered = self
            .table
            .registry()
            .get(state.id())
            .ok_or_else(|| AutomatonError::UnknownState {
                state: state.name().to_string(),
            })?;
        debug!(state = %registered.name(), "state set");
        self.context.set_state(registered.clone());
        Ok(())
    }

    pub fn state(&self) -> Option<&State> {
        self.context.state()
    }

    pub fn stack(&self) -> &ContextStack<V> {
        self.context.stack()
    }

    pub fn context(&self) -> &Context<V> {
        &self.context
    }

    /// Swap in an empty stack and return the old one.
    pub fn take_stack(&mut self) -> ContextStack<V> {
        self.context.take_stack()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn table(&self) -> &TransitionTable<I, V, O> {
        &self.table
    }

    pub fn states(&self) -> &[State] {
        self.table.states()
    }

    /// Outgoing transitions of `state` by ordinal.
    pub fn transitions_from(&self, state: &State) -> Vec<&Transition<I, V, O>> {
        self.table.transitions_from(state)
    }

    pub fn neighbors(&self, state: &State) -> Vec<&State> {
        self.table.neighbors(state).collect()
    }

    pub(crate) fn restore_parts(
        &mut self,
        state: Option<State>,
        stack: ContextStack<V>,
        history: StateHistory,
    ) {
        self.context.replace(state, stack);
        self.history = history;
    }

    fn run_hook(&mut self, input: &I) -> std::result::Result<(), HookAbort> {
        match &self.hook {
            Some(hook) => {
                let mut scope = HookContext::new(self.table.registry(), &mut self.context);
                hook(input, &mut scope)
            }
            None => Ok(()),
        }
    }
}

impl<I: 'static, V: 'static, O: Default + 'static> Automaton<I, V, O> {
    /// Build a transition from a builder and register it.
    pub fn add_transition(&mut self, builder: TransitionBuilder<I, V, O>) -> Result<usize> {
        let transition = builder.build()?;
        self.insert(transition)
    }
}

impl<I: Display, V: Display, O> Automaton<I, V, O> {
    /// Consume one input symbol.
    ///
    /// Runs the global command hook, then tries the current state's outgoing
    /// transitions neighbor group by neighbor group, parallel edges in
    /// registration order. The first accepting guard's action runs and its
    /// output is returned after the automaton moves to that transition's
    /// target. On failure the current state is unchanged; stack writes the
    /// hook made are kept.
    pub fn consume(&mut self, input: I) -> Result<O> {
        if self.context.state().is_none() {
            return Err(AutomatonError::NoCurrentState);
        }

        if let Err(abort) = self.run_hook(&input) {
            warn!(input = %input, reason = %abort, "global command aborted input");
            return Err(abort.into());
        }

        // The hook may have moved the automaton.
        let current = self
            .context
            .state()
            .cloned()
            .ok_or(AutomatonError::NoCurrentState)?;

        let context = &self.context;
        let selected = self.table.candidates(&current).find(|transition| {
            let accepted = transition.accepts(&input, context);
            trace!(
                from = %current.name(),
                to = %transition.target().name(),
                ordinal = transition.ordinal(),
                accepted,
                "evaluated guard"
            );
            accepted
        });

        let Some(transition) = selected else {
            let neighbors: Vec<String> = self
                .table
                .neighbors(&current)
                .map(|state| state.name().to_string())
                .collect();
            debug!(input = %input, state = %current.name(), "no valid transition");
            return Err(AutomatonError::NoValidTransition {
                input: input.to_string(),
                state: current.name().to_string(),
                neighbors,
                stack: self.context.stack().render(),
            });
        };

        let output = transition.fire(&input, &mut self.context);
        let target = transition.target().clone();
        debug!(
            from = %current.name(),
            to = %target.name(),
            ordinal = transition.ordinal(),
            "transition fired"
        );

        self.history.record(StateTransition {
            from: current,
            to: target.clone(),
            ordinal: transition.ordinal(),
            input: input.to_string(),
            timestamp: Utc::now(),
        });
        self.context.set_state(target);

        Ok(output)
    }
}

impl<I, V: fmt::Debug, O> fmt::Debug for Automaton<I, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("states", &self.table.states().len())
            .field("transitions", &self.table.transition_count())
            .field("state", &self.context.state().map(State::name))
            .field("stack", self.context.stack())
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
