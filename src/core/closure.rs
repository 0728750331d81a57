//! Lambda-closure computation.

use super::automaton::FiniteAutomaton;
use super::state::StateId;
use fixedbitset::FixedBitSet;
use std::collections::VecDeque;

/// States reachable from `state` through zero or more lambda transitions.
///
/// The closure is reflexive: `state` is always the first member. The
/// remaining members follow in breadth-first discovery order. Only
/// transitions whose label is the empty string count; list labels never
/// do. Runs in O(states + transitions) and terminates on lambda cycles.
///
/// # Example
///
/// ```rust
/// use fsasim::automaton;
/// use fsasim::core::{lambda_closure, FiniteAutomaton};
///
/// let nfa = automaton! {
///     states: [q0, q1, q2],
///     initial: q0,
///     final: [q2],
///     transitions: [q0 -> q1 : "", q1 -> q0 : "", q1 -> q2 : "x"],
/// }
/// .unwrap();
///
/// let closure = lambda_closure(&nfa, nfa.initial_state());
/// assert_eq!(closure.len(), 2);
/// ```
pub fn lambda_closure<A>(automaton: &A, state: StateId) -> Vec<StateId>
where
    A: FiniteAutomaton + ?Sized,
{
    let mut visited = FixedBitSet::with_capacity(automaton.state_count());
    let mut closure = Vec::new();
    let mut queue = VecDeque::from([state]);
    mark(&mut visited, state);

    while let Some(current) = queue.pop_front() {
        closure.push(current);
        for transition in automaton.transitions_from(current) {
            let next = transition.to_state();
            if transition.is_lambda() && !visited.contains(next.index()) {
                mark(&mut visited, next);
                queue.push_back(next);
            }
        }
    }

    closure
}

/// Lambda closures of every state, indexed by state id.
pub fn lambda_closures<A>(automaton: &A) -> Vec<Vec<StateId>>
where
    A: FiniteAutomaton + ?Sized,
{
    (0..automaton.state_count())
        .map(|index| lambda_closure(automaton, StateId::new(index as u32)))
        .collect()
}

fn mark(visited: &mut FixedBitSet, state: StateId) {
    let idx = state.index();
    if idx >= visited.len() {
        visited.grow(idx + 1);
    }
    visited.insert(idx);
}
