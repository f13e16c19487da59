//! Property-based tests for the automaton engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated graphs and inputs.

use dialomata::core::Endpoint;
use dialomata::{Automaton, AutomatonError, State};
use proptest::prelude::*;

type Machine = Automaton<&'static str, i32, String>;

const STATE_COUNT: usize = 4;

fn machine_with_states(count: usize) -> (Machine, Vec<State>) {
    let mut machine = Machine::new();
    let states = (0..count)
        .map(|i| machine.register_state(State::new(format!("S{i}"))))
        .collect();
    (machine, states)
}

/// Index of the edge the engine should pick: neighbor groups in the order
/// first connected, edges within a group in registration order.
fn expected_choice(targets: &[usize], accepts: &[bool]) -> Option<usize> {
    let mut group_order: Vec<usize> = Vec::new();
    for &target in targets {
        if !group_order.contains(&target) {
            group_order.push(target);
        }
    }
    group_order.into_iter().find_map(|group| {
        (0..targets.len()).find(|&edge| targets[edge] == group && accepts[edge])
    })
}

prop_compose! {
    fn edges()(len in 1..12usize)
        (targets in prop::collection::vec(0..STATE_COUNT, len),
         accepts in prop::collection::vec(any::<bool>(), len))
        -> (Vec<usize>, Vec<bool>) {
        (targets, accepts)
    }
}

proptest! {
    #[test]
    fn ordinals_are_dense_per_source(
        pairs in prop::collection::vec((0..STATE_COUNT, 0..STATE_COUNT), 0..30)
    ) {
        let (mut machine, states) = machine_with_states(STATE_COUNT);
        let mut counts = [0usize; STATE_COUNT];

        for (source, target) in pairs {
            let before = machine.transitions_from(&states[source]).len();
            prop_assert_eq!(before, counts[source]);

            let ordinal = machine
                .register_transition(&states[source], &states[target], |_, _| true, |_, _| String::new())
                .unwrap();

            prop_assert_eq!(ordinal, counts[source]);
            counts[source] += 1;
            prop_assert_eq!(machine.transitions_from(&states[source]).len(), counts[source]);
        }

        for (index, state) in states.iter().enumerate() {
            let ordinals: Vec<usize> = machine
                .transitions_from(state)
                .iter()
                .map(|t| t.ordinal())
                .collect();
            prop_assert_eq!(ordinals, (0..counts[index]).collect::<Vec<_>>());
        }
    }

    #[test]
    fn unregistered_endpoints_never_mutate(source in 0..STATE_COUNT, stray_is_source in any::<bool>()) {
        let (mut machine, states) = machine_with_states(STATE_COUNT);
        let stray = State::new(format!("S{source}"));
        let before: Vec<usize> = states.iter().map(|s| machine.transitions_from(s).len()).collect();

        let result = if stray_is_source {
            machine.register_transition(&stray, &states[source], |_, _| true, |_, _| String::new())
        } else {
            machine.register_transition(&states[source], &stray, |_, _| true, |_, _| String::new())
        };

        let expected_role = if stray_is_source { Endpoint::Source } else { Endpoint::Target };
        let rejected = matches!(
            result,
            Err(AutomatonError::InvalidEndpoint { role, .. }) if role == expected_role
        );
        prop_assert!(rejected);

        let after: Vec<usize> = states.iter().map(|s| machine.transitions_from(s).len()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(machine.states().len(), STATE_COUNT);
    }

    #[test]
    fn reregistering_states_never_grows_graph(repeats in 1..5usize) {
        let (mut machine, states) = machine_with_states(STATE_COUNT);
        for _ in 0..repeats {
            for state in &states {
                let handle = machine.register_state(state.clone());
                prop_assert_eq!(&handle, state);
            }
        }
        prop_assert_eq!(machine.states().len(), STATE_COUNT);
    }

    #[test]
    fn selection_is_first_match_in_neighbor_groups((targets, accepts) in edges(), rounds in 1..4usize) {
        let (mut machine, states) = machine_with_states(STATE_COUNT);
        let source = &states[0];

        for (index, (&target, &accept)) in targets.iter().zip(&accepts).enumerate() {
            machine
                .register_transition(
                    source,
                    &states[target],
                    move |_, _| accept,
                    move |_, _| index.to_string(),
                )
                .unwrap();
        }

        let expected = expected_choice(&targets, &accepts);
        for _ in 0..rounds {
            machine.set_state(source).unwrap();
            match (machine.consume("x"), expected) {
                (Ok(output), Some(edge)) => {
                    prop_assert_eq!(output, edge.to_string());
                    prop_assert_eq!(machine.state(), Some(&states[targets[edge]]));
                }
                (Err(AutomatonError::NoValidTransition { .. }), None) => {
                    prop_assert_eq!(machine.state(), Some(source));
                }
                (outcome, expected) => {
                    prop_assert!(false, "got {:?}, expected edge {:?}", outcome, expected);
                }
            }
        }
    }

    #[test]
    fn stack_accumulates_one_entry_per_step(steps in 1..20usize) {
        let (mut machine, states) = machine_with_states(1);
        machine
            .register_transition(&states[0], &states[0], |_, _| true, |_, ctx| {
                ctx.append(1);
                "again".to_string()
            })
            .unwrap();
        machine.set_state(&states[0]).unwrap();

        for _ in 0..steps {
            prop_assert_eq!(machine.consume("x").unwrap(), "again");
        }
        let expected = vec![1; steps];
        prop_assert_eq!(machine.stack().as_slice(), expected.as_slice());
        prop_assert_eq!(machine.history().len(), steps);
    }

    #[test]
    fn rejected_input_leaves_state_and_stack(rejections in 1..6usize) {
        let (mut machine, states) = machine_with_states(2);
        machine
            .register_transition(&states[0], &states[1], |input, _| *input == "x", |_, ctx| {
                ctx.append(1);
                "moved".to_string()
            })
            .unwrap();
        machine.set_state(&states[0]).unwrap();

        for _ in 0..rejections {
            let failed = matches!(machine.consume("y"), Err(AutomatonError::NoValidTransition { .. }));
            prop_assert!(failed);
            prop_assert_eq!(machine.state(), Some(&states[0]));
            prop_assert!(machine.stack().is_empty());
        }

        prop_assert_eq!(machine.consume("x").unwrap(), "moved");
        prop_assert_eq!(machine.state(), Some(&states[1]));
    }
}
