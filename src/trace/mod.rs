//! Recorded simulation traces for stepwise playback.
//!
//! A [`Trace`] captures every frontier of one run in plain data, so a
//! visualization can replay the search without holding the automaton or
//! the live configurations.

use crate::config::SimulationConfig;
use crate::core::{FiniteAutomaton, StateId};
use crate::simulate::{Configuration, Round, Simulator, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::TraceError;

/// Version identifier for trace format
pub const TRACE_VERSION: u32 = 1;

/// One configuration as shown to a viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    pub state: StateId,
    pub state_name: String,
    pub consumed: String,
    pub remaining: String,
    /// Consumed all input in a final state.
    pub accepting: bool,
    /// States from the root configuration to this one.
    pub path: Vec<StateId>,
}

/// One frontier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub index: usize,
    pub accepting: bool,
    pub configurations: Vec<ConfigurationSnapshot>,
}

/// Serializable record of a whole run.
///
/// # Example
///
/// ```rust
/// use fsasim::automaton;
/// use fsasim::simulate::Simulator;
/// use fsasim::trace::Trace;
///
/// let nfa = automaton! {
///     states: [q0, q1],
///     initial: q0,
///     final: [q1],
///     transitions: [q0 -> q1 : "[0..9]"],
/// }
/// .unwrap();
///
/// let trace = Trace::record(&Simulator::step_by_state(&nfa), "7");
/// assert!(trace.is_accepted());
/// assert_eq!(trace.rounds.len(), 2);
///
/// let json = trace.to_json().unwrap();
/// let restored = Trace::from_json(&json).unwrap();
/// assert_eq!(restored.id, trace.id);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trace {
    /// Trace format version
    pub version: u32,

    /// Unique trace identifier
    pub id: Uuid,

    /// When recording started
    pub started_at: DateTime<Utc>,

    /// When recording finished
    pub finished_at: DateTime<Utc>,

    /// The simulated input
    pub input: String,

    /// Settings the run used
    pub config: SimulationConfig,

    /// Every frontier, starting with the initial one
    pub rounds: Vec<RoundSnapshot>,

    pub verdict: Verdict,
}

impl Trace {
    /// Run `simulator` on `input`, recording every frontier.
    pub fn record<A>(simulator: &Simulator<'_, A>, input: &str) -> Self
    where
        A: FiniteAutomaton + ?Sized,
    {
        let started_at = Utc::now();
        let automaton = simulator.automaton();
        let mut run = simulator.start(input);
        let rounds: Vec<RoundSnapshot> = run
            .by_ref()
            .map(|round| snapshot_round(simulator, automaton, &round))
            .collect();
        let verdict = run.verdict().unwrap_or(Verdict::Rejected);

        Self {
            version: TRACE_VERSION,
            id: Uuid::new_v4(),
            started_at,
            finished_at: Utc::now(),
            input: input.to_string(),
            config: simulator.config().clone(),
            rounds,
            verdict,
        }
    }

    /// Whether the recorded run accepted.
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    /// The last recorded frontier.
    pub fn final_round(&self) -> Option<&RoundSnapshot> {
        self.rounds.last()
    }

    /// Derivation paths of every accepting configuration in the final round.
    pub fn accepting_paths(&self) -> Vec<&[StateId]> {
        self.final_round()
            .map(|round| {
                round
                    .configurations
                    .iter()
                    .filter(|c| c.accepting)
                    .map(|c| c.path.as_slice())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, TraceError> {
        serde_json::to_string(self).map_err(|e| TraceError::SerializationFailed(e.to_string()))
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, TraceError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TraceError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let trace: Trace = serde_json::from_str(json)
            .map_err(|e| TraceError::DeserializationFailed(e.to_string()))?;
        if trace.version != TRACE_VERSION {
            return Err(TraceError::UnsupportedVersion {
                found: trace.version,
                supported: TRACE_VERSION,
            });
        }
        Ok(trace)
    }
}

fn snapshot_round<A>(simulator: &Simulator<'_, A>, automaton: &A, round: &Round) -> RoundSnapshot
where
    A: FiniteAutomaton + ?Sized,
{
    RoundSnapshot {
        index: round.index,
        accepting: round.accepting,
        configurations: round
            .frontier
            .iter()
            .map(|config| snapshot_configuration(simulator, automaton, config))
            .collect(),
    }
}

fn snapshot_configuration<A>(
    simulator: &Simulator<'_, A>,
    automaton: &A,
    config: &Configuration,
) -> ConfigurationSnapshot
where
    A: FiniteAutomaton + ?Sized,
{
    let state = config.current_state();
    ConfigurationSnapshot {
        state,
        state_name: automaton.state_name(state).into_owned(),
        consumed: config.consumed_input().to_string(),
        remaining: config.remaining_input().to_string(),
        accepting: simulator.is_accepting(config),
        path: config.state_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton;
    use crate::core::Automaton;

    fn lambda_then_x() -> Automaton {
        automaton! {
            states: [start, hop, done],
            initial: start,
            final: [done],
            transitions: [start -> hop : "", hop -> done : "x"],
        }
        .unwrap()
    }

    #[test]
    fn trace_records_every_round() {
        let nfa = lambda_then_x();
        let trace = Trace::record(&Simulator::step_by_state(&nfa), "x");

        assert_eq!(trace.version, TRACE_VERSION);
        assert_eq!(trace.input, "x");
        assert!(trace.is_accepted());
        assert_eq!(trace.rounds.len(), 3);
        assert!(trace.finished_at >= trace.started_at);

        let names: Vec<Vec<&str>> = trace
            .rounds
            .iter()
            .map(|r| r.configurations.iter().map(|c| c.state_name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["start"], vec!["hop"], vec!["done"]]);
    }

    #[test]
    fn closure_trace_is_shorter() {
        let nfa = lambda_then_x();
        let trace = Trace::record(&Simulator::step_with_closure(&nfa), "x");
        assert!(trace.is_accepted());
        assert_eq!(trace.rounds.len(), 2);
        assert_eq!(trace.rounds[0].configurations.len(), 2);
    }

    #[test]
    fn accepting_paths_start_at_initial_state() {
        let nfa = lambda_then_x();
        let trace = Trace::record(&Simulator::step_by_state(&nfa), "x");
        let paths = trace.accepting_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(
            paths[0],
            &[StateId::new(0), StateId::new(1), StateId::new(2)]
        );
    }

    #[test]
    fn rejected_trace_has_no_accepting_paths() {
        let nfa = lambda_then_x();
        let trace = Trace::record(&Simulator::step_by_state(&nfa), "y");
        assert!(!trace.is_accepted());
        assert_eq!(trace.verdict, Verdict::Rejected);
        assert!(trace.accepting_paths().is_empty());
    }

    #[test]
    fn snapshots_split_consumed_and_remaining() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "ab", q1 -> q2 : "c"],
        }
        .unwrap();
        let trace = Trace::record(&Simulator::step_by_state(&nfa), "abc");
        let middle = &trace.rounds[1].configurations[0];
        assert_eq!(middle.consumed, "ab");
        assert_eq!(middle.remaining, "c");
        assert!(!middle.accepting);
    }

    #[test]
    fn trace_roundtrips_through_json() {
        let nfa = lambda_then_x();
        let trace = Trace::record(&Simulator::step_with_closure(&nfa), "x");
        let json = trace.to_json_pretty().unwrap();
        let restored = Trace::from_json(&json).unwrap();

        assert_eq!(restored.id, trace.id);
        assert_eq!(restored.rounds, trace.rounds);
        assert_eq!(restored.verdict, trace.verdict);
        assert_eq!(restored.config, trace.config);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let nfa = lambda_then_x();
        let mut trace = Trace::record(&Simulator::step_by_state(&nfa), "x");
        trace.version = TRACE_VERSION + 1;
        let json = trace.to_json().unwrap();

        match Trace::from_json(&json) {
            Err(TraceError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, TRACE_VERSION + 1);
                assert_eq!(supported, TRACE_VERSION);
            }
            other => panic!("Expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        assert!(matches!(
            Trace::from_json("[]"),
            Err(TraceError::DeserializationFailed(_))
        ));
    }
}
