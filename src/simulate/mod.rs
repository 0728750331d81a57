//! Nondeterministic simulation over an automaton.
//!
//! # Key Concepts
//!
//! - **Configuration**: a state plus the unconsumed input, linked to the
//!   configuration it was derived from
//! - **Frontier**: every configuration live at one round
//! - **Policy**: step by state (`Identity`) or step with closure
//!   (`LambdaClosure`); the only difference between the two simulators
//! - **Run**: the round-by-round driver a visualization steps through

mod configuration;
mod policy;
mod run;
mod simulator;

pub use configuration::{Ancestors, Configuration};
pub use policy::ClosurePolicy;
pub use run::{HaltReason, Round, Run, RunOutcome, Verdict};
pub use simulator::Simulator;
