//! Core automaton model.
//!
//! This module contains the read-only model every simulation runs over:
//! - States and their dense ids
//! - Transitions and the label mini-language they carry
//! - The `FiniteAutomaton` accessor trait and the `Automaton` type
//! - Lambda-closure computation
//!
//! Nothing in this module is mutated during a simulation run.

mod automaton;
mod closure;
mod label;
mod state;
mod transition;

pub use automaton::{Automaton, FiniteAutomaton};
pub use closure::{lambda_closure, lambda_closures};
pub use label::{Element, Label, Match};
pub use state::{State, StateId};
pub use transition::Transition;
