//! Plain-data automaton definitions.
//!
//! An [`AutomatonDefinition`] is the form in which an external model
//! (an editor, a file loader) hands an automaton to the engine. It carries
//! names and label text only; [`AutomatonDefinition::build`] validates it.

use crate::builder::automaton::AutomatonBuilder;
use crate::builder::error::BuildError;
use crate::core::{Automaton, FiniteAutomaton, StateId};
use serde::{Deserialize, Serialize};

/// A transition by endpoint names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition {
    pub from: String,
    pub to: String,
    /// Label text; omitted means lambda.
    #[serde(default)]
    pub label: String,
}

/// Serializable description of an automaton.
///
/// # Example
///
/// ```rust
/// use fsasim::core::Automaton;
///
/// let nfa = Automaton::from_json(r#"{
///     "states": ["q0", "q1"],
///     "initial": "q0",
///     "finals": ["q1"],
///     "transitions": [{ "from": "q0", "to": "q1", "label": "[0..9]" }]
/// }"#)
/// .unwrap();
///
/// assert_eq!(nfa.transition_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDefinition {
    pub states: Vec<String>,
    pub initial: String,
    #[serde(default)]
    pub finals: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<TransitionDefinition>,
}

impl AutomatonDefinition {
    /// Validate and build the automaton.
    pub fn build(&self) -> Result<Automaton, BuildError> {
        let builder = AutomatonBuilder::new()
            .states(self.states.iter().cloned())
            .initial(self.initial.clone())
            .final_states(self.finals.iter().cloned());
        self.transitions
            .iter()
            .fold(builder, |builder, t| {
                builder.transition(t.from.clone(), t.to.clone(), t.label.clone())
            })
            .build()
    }
}

impl Automaton {
    /// Parse and build an automaton from a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let definition: AutomatonDefinition = serde_json::from_str(json)?;
        definition.build()
    }

    /// The plain-data form of this automaton.
    pub fn to_definition(&self) -> AutomatonDefinition {
        let name = |id: StateId| self.state_name(id).into_owned();
        AutomatonDefinition {
            states: self.states().iter().map(|s| s.name().to_string()).collect(),
            initial: name(self.initial_state()),
            finals: self.final_states().map(name).collect(),
            transitions: self
                .transitions()
                .map(|t| TransitionDefinition {
                    from: name(t.from_state()),
                    to: name(t.to_state()),
                    label: t.label().to_string(),
                })
                .collect(),
        }
    }
}
