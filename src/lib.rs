//! fsasim: a nondeterministic finite automaton simulator
//!
//! fsasim runs an NFA over an input string by breadth-first search over
//! configurations. The automaton model is read-only; every configuration is
//! immutable and remembers the configuration it came from, so a run can be
//! replayed round by round and any accepting derivation displayed.
//!
//! # Core Concepts
//!
//! - **Automaton**: states, labeled transitions, one initial state and a set
//!   of final states, validated when built
//! - **Labels**: literal strings, the empty lambda label, and bracketed lists
//!   such as `[a,b]` or `[0..9]`
//! - **Simulator**: steps by state, or steps with lambda closure
//! - **Run**: the round-by-round frontier a visualization steps through
//! - **Trace**: a serializable record of a whole run
//!
//! # Example
//!
//! ```rust
//! use fsasim::{automaton, Simulator, Verdict};
//!
//! let nfa = automaton! {
//!     states: [start, digits, done],
//!     initial: start,
//!     final: [done],
//!     transitions: [
//!         start -> digits : "",
//!         digits -> digits : "[0..9]",
//!         digits -> done : "!",
//!     ],
//! }
//! .unwrap();
//!
//! let simulator = Simulator::step_with_closure(&nfa);
//! assert!(simulator.simulate_input("42!"));
//!
//! let outcome = simulator.start("4x").finish();
//! assert_eq!(outcome.verdict, Verdict::Rejected);
//! ```

pub mod analysis;
pub mod builder;
pub mod config;
pub mod core;
pub mod simulate;
pub mod trace;

// Re-export commonly used types
pub use builder::{AutomatonBuilder, AutomatonDefinition, BuildError, ModelError};
pub use config::{ConfigError, SimulationConfig};
pub use crate::core::{Automaton, FiniteAutomaton, Label, State, StateId, Transition};
pub use simulate::{ClosurePolicy, Configuration, Run, RunOutcome, Simulator, Verdict};
pub use trace::{Trace, TraceError};
