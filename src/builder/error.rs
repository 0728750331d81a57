//! Build errors for automaton construction.

use thiserror::Error;

/// A single violation of the automaton model invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("Initial state '{name}' is not a declared state")]
    UnknownInitialState { name: String },

    #[error("Final state '{name}' is not a declared state")]
    UnknownFinalState { name: String },

    #[error("Transition {from} -> {to} ({label:?}) references undeclared state '{state}'")]
    UnknownTransitionEndpoint {
        from: String,
        to: String,
        label: String,
        state: String,
    },
}

/// Errors that can occur when building an automaton.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Automaton model has {} violation(s)", .violations.len())]
    InvalidModel { violations: Vec<ModelError> },

    #[error("Automaton definition is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
