//! Transition table: registered states and their ordered outgoing edges.
//!
//! Outgoing edges of a state are stored in neighbor groups. A group is created
//! the first time an edge from the source to that target is registered, and
//! later parallel edges to the same target join it. The search order used by
//! the engine walks groups in creation order and edges within a group in
//! registration order.

use super::action::Action;
use super::context::Context;
use super::guard::Guard;
use super::state::{State, StateId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which end of a transition failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// A directed edge carrying a guard and an action.
pub struct Transition<I, V, O> {
    source: State,
    target: State,
    guard: Guard<I, V>,
    action: Action<I, V, O>,
    ordinal: usize,
}

impl<I, V, O> Transition<I, V, O> {
    /// Create an unregistered transition. Its ordinal is assigned on insertion.
    pub fn new(source: State, target: State, guard: Guard<I, V>, action: Action<I, V, O>) -> Self {
        Self {
            source,
            target,
            guard,
            action,
            ordinal: 0,
        }
    }

    pub fn source(&self) -> &State {
        &self.source
    }

    pub fn target(&self) -> &State {
        &self.target
    }

    /// Position among the source state's transitions, in registration order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn accepts(&self, input: &I, context: &Context<V>) -> bool {
        self.guard.check(input, context)
    }

    pub fn fire(&self, input: &I, context: &mut Context<V>) -> O {
        self.action.run(input, context)
    }
}

impl<I, V, O> fmt::Debug for Transition<I, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source.name())
            .field("target", &self.target.name())
            .field("ordinal", &self.ordinal)
            .finish()
    }
}

struct NeighborGroup<I, V, O> {
    target: State,
    edges: Vec<Transition<I, V, O>>,
}

struct Adjacency<I, V, O> {
    groups: Vec<NeighborGroup<I, V, O>>,
    count: usize,
}

impl<I, V, O> Default for Adjacency<I, V, O> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            count: 0,
        }
    }
}

/// Registered states in registration order, indexed by identity.
#[derive(Debug, Default)]
pub struct StateRegistry {
    states: Vec<State>,
    positions: HashMap<StateId, usize>,
}

impl StateRegistry {
    /// Insert a state, returning `false` if its identity was already present.
    fn insert(&mut self, state: State) -> bool {
        if self.positions.contains_key(&state.id()) {
            return false;
        }
        self.positions.insert(state.id(), self.states.len());
        self.states.push(state);
        true
    }

    pub fn contains(&self, state: &State) -> bool {
        self.positions.contains_key(&state.id())
    }

    pub fn get(&self, id: StateId) -> Option<&State> {
        self.positions.get(&id).map(|&index| &self.states[index])
    }

    /// Registration position of a state.
    pub fn position(&self, state: &State) -> Option<usize> {
        self.positions.get(&state.id()).copied()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Multi-edge directed graph of states and guarded transitions.
pub struct TransitionTable<I, V, O> {
    registry: StateRegistry,
    outgoing: HashMap<StateId, Adjacency<I, V, O>>,
}

impl<I, V, O> Default for TransitionTable<I, V, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, V, O> TransitionTable<I, V, O> {
    pub fn new() -> Self {
        Self {
            registry: StateRegistry::default(),
            outgoing: HashMap::new(),
        }
    }

    /// Add a state node. Re-adding an identity already present is a no-op and
    /// returns `false`.
    pub fn insert_state(&mut self, state: State) -> bool {
        self.registry.insert(state)
    }

    /// Append a transition after its source's existing transitions.
    ///
    /// Both endpoints must already be registered; the source is checked first.
    /// Returns the assigned ordinal.
    pub fn insert_transition(
        &mut self,
        mut transition: Transition<I, V, O>,
    ) -> Result<usize, Endpoint> {
        if !self.registry.contains(&transition.source) {
            return Err(Endpoint::Source);
        }
        if !self.registry.contains(&transition.target) {
            return Err(Endpoint::Target);
        }

        let adjacency = self.outgoing.entry(transition.source.id()).or_default();
        let ordinal = adjacency.count;
        transition.ordinal = ordinal;
        adjacency.count += 1;

        match adjacency
            .groups
            .iter_mut()
            .find(|group| group.target == transition.target)
        {
            Some(group) => group.edges.push(transition),
            None => adjacency.groups.push(NeighborGroup {
                target: transition.target.clone(),
                edges: vec![transition],
            }),
        }

        Ok(ordinal)
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn contains(&self, state: &State) -> bool {
        self.registry.contains(state)
    }

    pub fn states(&self) -> &[State] {
        self.registry.states()
    }

    /// Outgoing transitions of `state` in matching order: neighbor groups in
    /// the order they were established, parallel edges in registration order.
    pub fn candidates(&self, state: &State) -> impl Iterator<Item = &Transition<I, V, O>> {
        self.outgoing
            .get(&state.id())
            .into_iter()
            .flat_map(|adjacency| adjacency.groups.iter())
            .flat_map(|group| group.edges.iter())
    }

    /// Outgoing transitions of `state` sorted by ordinal.
    pub fn transitions_from(&self, state: &State) -> Vec<&Transition<I, V, O>> {
        let mut transitions: Vec<_> = self.candidates(state).collect();
        transitions.sort_by_key(|transition| transition.ordinal);
        transitions
    }

    /// Distinct targets reachable from `state`, in the order first connected.
    pub fn neighbors(&self, state: &State) -> impl Iterator<Item = &State> {
        self.outgoing
            .get(&state.id())
            .into_iter()
            .flat_map(|adjacency| adjacency.groups.iter())
            .map(|group| &group.target)
    }

    pub fn outgoing_count(&self, state: &State) -> usize {
        self.outgoing
            .get(&state.id())
            .map_or(0, |adjacency| adjacency.count)
    }

    pub fn transition_count(&self) -> usize {
        self.outgoing.values().map(|adjacency| adjacency.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Table = TransitionTable<&'static str, i32, String>;

    fn edge(source: &State, target: &State) -> Transition<&'static str, i32, String> {
        Transition::new(
            source.clone(),
            target.clone(),
            Guard::always(),
            Action::silent(),
        )
    }

    #[test]
    fn reinserting_state_is_idempotent() {
        let mut table = Table::new();
        let state = State::new("A");

        assert!(table.insert_state(state.clone()));
        assert!(!table.insert_state(state.clone()));
        assert_eq!(table.states().len(), 1);
    }

    #[test]
    fn same_name_states_are_separate_nodes() {
        let mut table = Table::new();
        table.insert_state(State::new("A"));
        table.insert_state(State::new("A"));

        assert_eq!(table.states().len(), 2);
    }

    #[test]
    fn ordinals_follow_registration_per_source() {
        let mut table = Table::new();
        let a = State::new("A");
        let b = State::new("B");
        table.insert_state(a.clone());
        table.insert_state(b.clone());

        assert_eq!(table.insert_transition(edge(&a, &b)), Ok(0));
        assert_eq!(table.insert_transition(edge(&b, &a)), Ok(0));
        assert_eq!(table.insert_transition(edge(&a, &a)), Ok(1));
        assert_eq!(table.insert_transition(edge(&a, &b)), Ok(2));

        assert_eq!(table.outgoing_count(&a), 3);
        assert_eq!(table.outgoing_count(&b), 1);
        assert_eq!(table.transition_count(), 4);
    }

    #[test]
    fn unregistered_endpoints_are_rejected_without_mutation() {
        let mut table = Table::new();
        let a = State::new("A");
        let stray = State::new("stray");
        table.insert_state(a.clone());

        assert_eq!(
            table.insert_transition(edge(&stray, &a)),
            Err(Endpoint::Source)
        );
        assert_eq!(
            table.insert_transition(edge(&a, &stray)),
            Err(Endpoint::Target)
        );
        assert_eq!(
            table.insert_transition(edge(&stray, &stray)),
            Err(Endpoint::Source)
        );
        assert_eq!(table.outgoing_count(&a), 0);
        assert_eq!(table.transition_count(), 0);
    }

    #[test]
    fn candidates_are_grouped_by_first_established_neighbor() {
        let mut table = Table::new();
        let a = State::new("A");
        let b = State::new("B");
        let c = State::new("C");
        for state in [&a, &b, &c] {
            table.insert_state(state.clone());
        }

        table.insert_transition(edge(&a, &b)).unwrap(); // 0
        table.insert_transition(edge(&a, &c)).unwrap(); // 1
        table.insert_transition(edge(&a, &b)).unwrap(); // 2

        let order: Vec<usize> = table.candidates(&a).map(Transition::ordinal).collect();
        assert_eq!(order, vec![0, 2, 1]);

        let by_ordinal: Vec<usize> = table
            .transitions_from(&a)
            .into_iter()
            .map(Transition::ordinal)
            .collect();
        assert_eq!(by_ordinal, vec![0, 1, 2]);

        let neighbors: Vec<&str> = table.neighbors(&a).map(State::name).collect();
        assert_eq!(neighbors, vec!["B", "C"]);
    }

    #[test]
    fn state_without_edges_has_no_candidates() {
        let mut table = Table::new();
        let lonely = State::new("lonely");
        table.insert_state(lonely.clone());

        assert_eq!(table.candidates(&lonely).count(), 0);
        assert_eq!(table.neighbors(&lonely).count(), 0);
    }
}
