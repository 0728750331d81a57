//! Static checks over an automaton's transition structure.
//!
//! A state is nondeterministic when some input prefix can be consumed from it
//! in more than one way: it has an outgoing lambda transition, or one token
//! it can consume is a prefix of another. Equal tokens on two different
//! transitions count; the same token listed twice in one label does not,
//! since a label reports each token once.

use crate::core::{Element, FiniteAutomaton, Label, StateId};
use log::debug;

/// States from which the next step is not uniquely determined by the input.
///
/// # Example
///
/// ```rust
/// use fsasim::analysis::nondeterministic_states;
/// use fsasim::automaton;
///
/// let nfa = automaton! {
///     states: [q0, q1, q2],
///     initial: q0,
///     final: [q2],
///     transitions: [q0 -> q1 : "a", q0 -> q2 : "[a..c]", q1 -> q2 : "b"],
/// }
/// .unwrap();
///
/// assert_eq!(nondeterministic_states(&nfa), vec![nfa.state_id("q0").unwrap()]);
/// ```
pub fn nondeterministic_states<A>(automaton: &A) -> Vec<StateId>
where
    A: FiniteAutomaton + ?Sized,
{
    let states: Vec<StateId> = (0..automaton.state_count())
        .map(|index| StateId::new(index as u32))
        .filter(|&state| is_nondeterministic(automaton, state))
        .collect();
    debug!(
        "{} of {} states are nondeterministic",
        states.len(),
        automaton.state_count()
    );
    states
}

/// True when no state is nondeterministic.
pub fn is_deterministic<A>(automaton: &A) -> bool
where
    A: FiniteAutomaton + ?Sized,
{
    nondeterministic_states(automaton).is_empty()
}

fn is_nondeterministic<A>(automaton: &A, state: StateId) -> bool
where
    A: FiniteAutomaton + ?Sized,
{
    let transitions = automaton.transitions_from(state);
    if transitions.iter().any(|t| t.is_lambda()) {
        return true;
    }

    let labels: Vec<Vec<Element>> = transitions
        .iter()
        .map(|t| elements(t.parsed_label()))
        .collect();

    let within = labels
        .iter()
        .any(|elements| pairs(elements).any(|(a, b)| distinct_tokens_overlap(a, b)));
    let across = labels.iter().enumerate().any(|(i, left)| {
        labels[i + 1..]
            .iter()
            .any(|right| left.iter().any(|a| right.iter().any(|b| tokens_overlap(a, b))))
    });
    within || across
}

// A literal label is treated as a single literal element; empty ranges
// accept nothing and are dropped.
fn elements(label: &Label) -> Vec<Element> {
    match label {
        Label::Literal(token) => vec![Element::Literal(token.clone())],
        Label::List(elements) => elements
            .iter()
            .filter(|e| !matches!(e, Element::Range { first, last } if first > last))
            .cloned()
            .collect(),
    }
}

fn pairs(elements: &[Element]) -> impl Iterator<Item = (&Element, &Element)> {
    elements
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| elements[i + 1..].iter().map(move |b| (a, b)))
}

fn in_range(c: char, first: char, last: char) -> bool {
    (first..=last).contains(&c)
}

/// Some token of `a` is a prefix of some token of `b`, or the reverse.
fn tokens_overlap(a: &Element, b: &Element) -> bool {
    match (a, b) {
        (Element::Literal(x), Element::Literal(y)) => {
            x.starts_with(y.as_str()) || y.starts_with(x.as_str())
        }
        (Element::Literal(x), Element::Range { first, last })
        | (Element::Range { first, last }, Element::Literal(x)) => match x.chars().next() {
            Some(c) => in_range(c, *first, *last),
            None => true,
        },
        (
            Element::Range { first: f1, last: l1 },
            Element::Range { first: f2, last: l2 },
        ) => f1.max(f2) <= l1.min(l2),
    }
}

/// Like [`tokens_overlap`], ignoring pairs of identical tokens.
fn distinct_tokens_overlap(a: &Element, b: &Element) -> bool {
    match (a, b) {
        (Element::Literal(x), Element::Literal(y)) => x != y && tokens_overlap(a, b),
        (Element::Literal(x), Element::Range { first, last })
        | (Element::Range { first, last }, Element::Literal(x)) => {
            let mut chars = x.chars();
            match (chars.next(), chars.next()) {
                // A one-character literal inside the range is one of its tokens.
                (Some(_), None) => false,
                (Some(c), Some(_)) => in_range(c, *first, *last),
                (None, _) => true,
            }
        }
        // Single-character tokens are only prefixes of themselves.
        (Element::Range { .. }, Element::Range { .. }) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton;

    #[test]
    fn disjoint_literals_are_deterministic() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "a", q0 -> q2 : "b", q1 -> q2 : "[c..e]"],
        }
        .unwrap();
        assert!(is_deterministic(&nfa));
    }

    #[test]
    fn lambda_transition_is_nondeterministic() {
        let nfa = automaton! {
            states: [q0, q1],
            initial: q0,
            final: [q1],
            transitions: [q0 -> q1 : ""],
        }
        .unwrap();
        assert_eq!(nondeterministic_states(&nfa), vec![StateId::new(0)]);
    }

    #[test]
    fn equal_labels_on_two_transitions_are_nondeterministic() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "a", q0 -> q2 : "a"],
        }
        .unwrap();
        assert!(!is_deterministic(&nfa));
    }

    #[test]
    fn prefix_literals_are_nondeterministic() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "ab", q0 -> q2 : "abc"],
        }
        .unwrap();
        assert_eq!(nondeterministic_states(&nfa), vec![StateId::new(0)]);
    }

    #[test]
    fn overlapping_ranges_are_nondeterministic() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "[a..m]", q0 -> q2 : "[k..z]"],
        }
        .unwrap();
        assert!(!is_deterministic(&nfa));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "[a..m]", q0 -> q2 : "[n..z]"],
        }
        .unwrap();
        assert!(is_deterministic(&nfa));
    }

    #[test]
    fn prefix_tokens_within_one_label_are_nondeterministic() {
        let nfa = automaton! {
            states: [q0, q1],
            initial: q0,
            final: [q1],
            transitions: [q0 -> q1 : "[a,ab]"],
        }
        .unwrap();
        assert!(!is_deterministic(&nfa));
    }

    #[test]
    fn repeated_tokens_within_one_label_are_deterministic() {
        let nfa = automaton! {
            states: [q0, q1],
            initial: q0,
            final: [q1],
            transitions: [q0 -> q1 : "[a,a,b]", q1 -> q0 : "[a..c,b]"],
        }
        .unwrap();
        assert!(is_deterministic(&nfa));
    }

    #[test]
    fn empty_range_accepts_nothing() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "[z..a]", q0 -> q2 : "m"],
        }
        .unwrap();
        assert!(is_deterministic(&nfa));
    }

    #[test]
    fn malformed_range_is_matched_literally() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "[ab..c]", q0 -> q2 : "b"],
        }
        .unwrap();
        assert!(is_deterministic(&nfa));
    }

    #[test]
    fn only_offending_states_are_reported() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "a", q1 -> q2 : "b", q1 -> q2 : "[b,c]", q2 -> q0 : ""],
        }
        .unwrap();
        assert_eq!(
            nondeterministic_states(&nfa),
            vec![StateId::new(1), StateId::new(2)]
        );
    }
}
