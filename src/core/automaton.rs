//! The automaton model read by the simulators.

use super::state::{State, StateId};
use super::transition::Transition;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Read-only view of a finite automaton.
///
/// This is everything a simulator reads; implement it to simulate an
/// automaton held in another representation. The order of
/// `transitions_from` only affects the order of configurations in a
/// frontier, never acceptance.
pub trait FiniteAutomaton {
    /// Number of states. Ids are `0..state_count()`.
    fn state_count(&self) -> usize;

    /// The distinguished initial state.
    fn initial_state(&self) -> StateId;

    /// Whether `state` is final.
    fn is_final(&self, state: StateId) -> bool;

    /// Transitions leaving `state`, in declaration order.
    fn transitions_from(&self, state: StateId) -> &[Transition];

    /// Display name of `state`.
    fn state_name(&self, state: StateId) -> Cow<'_, str> {
        Cow::Owned(state.to_string())
    }
}

/// A finite automaton with transitions indexed by source state.
///
/// Built through [`AutomatonBuilder`](crate::builder::AutomatonBuilder),
/// the [`automaton!`](crate::automaton) macro, or an
/// [`AutomatonDefinition`](crate::builder::AutomatonDefinition); all of
/// them validate that the initial state, final states and every
/// transition endpoint belong to the automaton.
#[derive(Clone, Debug)]
pub struct Automaton {
    states: Vec<State>,
    initial: StateId,
    finals: BTreeSet<StateId>,
    outgoing: Vec<Vec<Transition>>,
}

impl Automaton {
    /// Assemble an automaton from validated parts.
    pub(crate) fn from_parts(
        states: Vec<State>,
        initial: StateId,
        finals: BTreeSet<StateId>,
        transitions: Vec<Transition>,
    ) -> Self {
        let mut outgoing = vec![Vec::new(); states.len()];
        for transition in transitions {
            outgoing[transition.from_state().index()].push(transition);
        }
        Self {
            states,
            initial,
            finals,
            outgoing,
        }
    }

    /// All states in id order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Look up a state by id.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// Find a state's id by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .find(|state| state.name() == name)
            .map(State::id)
    }

    /// Final states in id order.
    pub fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.finals.iter().copied()
    }

    /// Every transition, grouped by source state.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.outgoing.iter().flatten()
    }

    /// Total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }
}

impl FiniteAutomaton for Automaton {
    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn initial_state(&self) -> StateId {
        self.initial
    }

    fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    fn transitions_from(&self, state: StateId) -> &[Transition] {
        self.outgoing
            .get(state.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn state_name(&self, state: StateId) -> Cow<'_, str> {
        match self.state(state) {
            Some(state) => Cow::Borrowed(state.name()),
            None => Cow::Owned(state.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Automaton {
        let states = vec![
            State::new(StateId::new(0), "start"),
            State::new(StateId::new(1), "middle"),
            State::new(StateId::new(2), "end"),
        ];
        let transitions = vec![
            Transition::new(StateId::new(0), StateId::new(1), "a"),
            Transition::new(StateId::new(1), StateId::new(2), "b"),
            Transition::lambda(StateId::new(0), StateId::new(2)),
        ];
        Automaton::from_parts(
            states,
            StateId::new(0),
            BTreeSet::from([StateId::new(2)]),
            transitions,
        )
    }

    #[test]
    fn transitions_are_indexed_by_source() {
        let automaton = sample();
        let from_start = automaton.transitions_from(StateId::new(0));
        assert_eq!(from_start.len(), 2);
        assert_eq!(from_start[0].label(), "a");
        assert!(from_start[1].is_lambda());
        assert!(automaton.transitions_from(StateId::new(2)).is_empty());
    }

    #[test]
    fn unknown_state_has_no_transitions() {
        let automaton = sample();
        assert!(automaton.transitions_from(StateId::new(99)).is_empty());
        assert!(!automaton.is_final(StateId::new(99)));
    }

    #[test]
    fn accessors_report_model() {
        let automaton = sample();
        assert_eq!(automaton.state_count(), 3);
        assert_eq!(automaton.initial_state(), StateId::new(0));
        assert!(automaton.is_final(StateId::new(2)));
        assert!(!automaton.is_final(StateId::new(1)));
        assert_eq!(automaton.transition_count(), 3);
        assert_eq!(automaton.transitions().count(), 3);
        assert_eq!(
            automaton.final_states().collect::<Vec<_>>(),
            vec![StateId::new(2)]
        );
    }

    #[test]
    fn state_lookup_by_name_and_id() {
        let automaton = sample();
        assert_eq!(automaton.state_id("middle"), Some(StateId::new(1)));
        assert_eq!(automaton.state_id("missing"), None);
        assert_eq!(automaton.state_name(StateId::new(2)), "end");
        assert_eq!(automaton.state_name(StateId::new(7)), "q7");
    }
}
