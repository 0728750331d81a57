//! Builder API for ergonomic automaton construction.
//!
//! This module provides a fluent builder, a plain-data definition form and
//! the `automaton!` macro. All three validate the model invariants before
//! an [`Automaton`](crate::core::Automaton) exists.

pub mod automaton;
pub mod definition;
pub mod error;
pub mod macros;

pub use automaton::AutomatonBuilder;
pub use definition::{AutomatonDefinition, TransitionDefinition};
pub use error::{BuildError, ModelError};
