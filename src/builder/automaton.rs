//! Builder for constructing automata.

use crate::builder::error::{BuildError, ModelError};
use crate::core::{Automaton, State, StateId, Transition};
use log::debug;
use std::collections::{BTreeSet, HashMap};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ModelError>>;

struct PendingTransition {
    from: String,
    to: String,
    label: String,
}

/// Builder for constructing automata with a fluent API.
///
/// States are referred to by name. `build` checks every invariant and
/// reports all violations at once.
///
/// # Example
///
/// ```rust
/// use fsasim::builder::AutomatonBuilder;
/// use fsasim::core::FiniteAutomaton;
///
/// let nfa = AutomatonBuilder::new()
///     .states(["q0", "q1"])
///     .initial("q0")
///     .final_state("q1")
///     .transition("q0", "q1", "[a..z]")
///     .build()
///     .unwrap();
///
/// assert_eq!(nfa.state_count(), 2);
/// ```
#[derive(Default)]
pub struct AutomatonBuilder {
    states: Vec<String>,
    initial: Option<String>,
    finals: Vec<String>,
    transitions: Vec<PendingTransition>,
}

impl AutomatonBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Ids follow declaration order.
    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.push(name.into());
        self
    }

    /// Declare several states at once.
    pub fn states<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Mark a state final.
    pub fn final_state(mut self, name: impl Into<String>) -> Self {
        self.finals.push(name.into());
        self
    }

    /// Mark several states final.
    pub fn final_states<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.finals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a transition. An empty label is a lambda transition.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.transitions.push(PendingTransition {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        });
        self
    }

    /// Build the automaton.
    ///
    /// Returns `InvalidModel` carrying every violation found, not just the
    /// first.
    pub fn build(self) -> Result<Automaton, BuildError> {
        let initial = self.initial.as_deref().ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut ids: HashMap<&str, StateId> = HashMap::new();
        let mut checks: Vec<Check> = Vec::new();
        for name in &self.states {
            let check = if ids.contains_key(name.as_str()) {
                Validation::fail(ModelError::DuplicateState { name: name.clone() })
            } else {
                ids.insert(name, StateId::new(ids.len() as u32));
                Validation::success(())
            };
            checks.push(check);
        }

        checks.push(known(&ids, initial, || ModelError::UnknownInitialState {
            name: initial.to_string(),
        }));
        for name in &self.finals {
            checks.push(known(&ids, name, || ModelError::UnknownFinalState {
                name: name.clone(),
            }));
        }
        for pending in &self.transitions {
            for endpoint in [&pending.from, &pending.to] {
                checks.push(known(&ids, endpoint, || {
                    ModelError::UnknownTransitionEndpoint {
                        from: pending.from.clone(),
                        to: pending.to.clone(),
                        label: pending.label.clone(),
                        state: endpoint.clone(),
                    }
                }));
            }
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks).map(|_| ()) {
            return Err(BuildError::InvalidModel {
                violations: errors.iter().cloned().collect(),
            });
        }

        let lookup = |name: &str| ids.get(name).copied().unwrap_or_default();
        let mut states: Vec<State> = ids
            .iter()
            .map(|(name, id)| State::new(*id, *name))
            .collect();
        states.sort_by_key(State::id);
        let finals: BTreeSet<StateId> = self.finals.iter().map(|name| lookup(name)).collect();
        let transitions: Vec<Transition> = self
            .transitions
            .into_iter()
            .map(|pending| {
                Transition::new(lookup(&pending.from), lookup(&pending.to), pending.label)
            })
            .collect();

        debug!(
            "Built automaton with {} states, {} final, {} transitions",
            states.len(),
            finals.len(),
            transitions.len()
        );

        Ok(Automaton::from_parts(
            states,
            lookup(initial),
            finals,
            transitions,
        ))
    }
}

fn known<F>(ids: &HashMap<&str, StateId>, name: &str, violation: F) -> Check
where
    F: FnOnce() -> ModelError,
{
    if ids.contains_key(name) {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}
