//! Stepwise run driver.
//!
//! A [`Run`] holds the frontier of one simulation and advances it one round
//! at a time, so a caller can render every intermediate frontier or stop
//! between rounds.

use crate::core::{FiniteAutomaton, StateId};
use crate::simulate::configuration::Configuration;
use crate::simulate::simulator::Simulator;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Why a run stopped before reaching a verdict on the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HaltReason {
    /// The configured round budget was used up.
    RoundLimit { limit: usize },

    /// The frontier grew beyond the configured size.
    FrontierLimit { limit: usize, size: usize },
}

/// Final state of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Some configuration consumed all input in a final state.
    Accepted,

    /// The frontier emptied without acceptance.
    Rejected,

    /// A budget stopped the run first.
    Halted { reason: HaltReason },
}

/// Snapshot of one round, as yielded by iterating a [`Run`].
#[derive(Clone, Debug)]
pub struct Round {
    /// Zero for the initial frontier.
    pub index: usize,
    pub frontier: Vec<Arc<Configuration>>,
    /// Whether any member of `frontier` is accepting.
    pub accepting: bool,
}

/// Result of driving a run to completion.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub verdict: Verdict,
    /// Rounds performed after the initial frontier.
    pub rounds: usize,
    /// The first accepting configuration, if any.
    pub accepting: Option<Arc<Configuration>>,
    /// Re-derivations of an already seen `(state, consumed)` pair that were
    /// discarded.
    pub pruned: usize,
}

impl RunOutcome {
    /// True iff the verdict is `Accepted`.
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// One simulation in progress.
///
/// # Example
///
/// ```rust
/// use fsasim::automaton;
/// use fsasim::simulate::{Simulator, Verdict};
///
/// let nfa = automaton! {
///     states: [q0, q1],
///     initial: q0,
///     final: [q1],
///     transitions: [q0 -> q0 : "[a,b]", q0 -> q1 : "b"],
/// }
/// .unwrap();
///
/// let simulator = Simulator::step_by_state(&nfa);
/// let mut run = simulator.start("ab");
/// assert_eq!(run.frontier().len(), 1);
///
/// run.advance();
/// assert_eq!(run.round(), 1);
///
/// let outcome = run.finish();
/// assert_eq!(outcome.verdict, Verdict::Accepted);
/// ```
pub struct Run<'s, A: FiniteAutomaton + ?Sized> {
    simulator: &'s Simulator<'s, A>,
    frontier: Vec<Arc<Configuration>>,
    seen: HashSet<(StateId, usize)>,
    pruned: usize,
    round: usize,
    yielded: bool,
}

impl<'s, A: FiniteAutomaton + ?Sized> Run<'s, A> {
    pub(crate) fn new(simulator: &'s Simulator<'s, A>, input: &str) -> Self {
        let mut run = Self {
            simulator,
            frontier: Vec::new(),
            seen: HashSet::new(),
            pruned: 0,
            round: 0,
            yielded: false,
        };
        let initial = simulator.initial_configurations(input);
        run.frontier = run.admit(initial);
        debug!(
            "Starting {} run on {:?} with {} initial configurations",
            simulator.policy(),
            input,
            run.frontier.len()
        );
        run
    }

    /// The simulator driving this run.
    pub fn simulator(&self) -> &'s Simulator<'s, A> {
        self.simulator
    }

    /// Rounds performed so far.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Re-derivations discarded by deduplication so far.
    pub fn pruned(&self) -> usize {
        self.pruned
    }

    /// The current frontier, in discovery order.
    pub fn frontier(&self) -> &[Arc<Configuration>] {
        &self.frontier
    }

    /// Accepting members of the current frontier.
    pub fn accepting(&self) -> impl Iterator<Item = &Arc<Configuration>> + '_ {
        self.frontier
            .iter()
            .filter(|config| self.simulator.is_accepting(config))
    }

    /// Whether the current frontier holds an accepting configuration.
    pub fn is_accepted(&self) -> bool {
        self.accepting().next().is_some()
    }

    /// The verdict, once the run can make no further progress.
    pub fn verdict(&self) -> Option<Verdict> {
        if self.is_accepted() {
            Some(Verdict::Accepted)
        } else if self.frontier.is_empty() {
            Some(Verdict::Rejected)
        } else {
            self.halt_reason().map(|reason| Verdict::Halted { reason })
        }
    }

    /// Whether a verdict has been reached.
    pub fn is_finished(&self) -> bool {
        self.verdict().is_some()
    }

    fn halt_reason(&self) -> Option<HaltReason> {
        let config = self.simulator.config();
        if let Some(limit) = config.max_rounds {
            if self.round >= limit {
                return Some(HaltReason::RoundLimit { limit });
            }
        }
        if let Some(limit) = config.max_frontier {
            if self.frontier.len() > limit {
                return Some(HaltReason::FrontierLimit {
                    limit,
                    size: self.frontier.len(),
                });
            }
        }
        None
    }

    /// Step every frontier member once and replace the frontier with the
    /// results.
    ///
    /// Returns `false`, doing nothing, once the run has a verdict.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let frontier = std::mem::take(&mut self.frontier);
        let mut next = Vec::new();
        for config in &frontier {
            if self.simulator.config().deduplicate {
                // Seen pairs are dropped before a configuration is built.
                let consumed = config.consumed_len();
                for (state, len) in self.simulator.step_targets(config) {
                    if self.seen.insert((state, consumed + len)) {
                        next.push(config.derive(state, len));
                    } else {
                        self.pruned += 1;
                    }
                }
            } else {
                next.extend(self.simulator.step_configuration(config));
            }
        }
        self.frontier = next;
        self.round += 1;

        debug!(
            "Round {}: {} configurations from {}",
            self.round,
            self.frontier.len(),
            frontier.len()
        );
        true
    }

    /// Drive the run until it has a verdict.
    ///
    /// Without deduplication or a budget, an automaton with a reachable
    /// lambda cycle never finishes.
    pub fn finish(mut self) -> RunOutcome {
        while self.advance() {}
        let verdict = self.verdict().unwrap_or(Verdict::Rejected);
        debug!("Run finished after {} rounds: {:?}", self.round, verdict);
        RunOutcome {
            accepting: self.accepting().next().cloned(),
            verdict,
            rounds: self.round,
            pruned: self.pruned,
        }
    }

    /// Current round as a snapshot.
    pub fn snapshot(&self) -> Round {
        Round {
            index: self.round,
            frontier: self.frontier.clone(),
            accepting: self.is_accepted(),
        }
    }

    fn admit(&mut self, configs: Vec<Arc<Configuration>>) -> Vec<Arc<Configuration>> {
        if !self.simulator.config().deduplicate {
            return configs;
        }
        let before = configs.len();
        let admitted: Vec<Arc<Configuration>> = configs
            .into_iter()
            .filter(|config| self.seen.insert(config.key()))
            .collect();
        self.pruned += before - admitted.len();
        admitted
    }
}

/// Yields the initial frontier, then the frontier after each round, ending
/// after the round that reaches a verdict.
impl<A: FiniteAutomaton + ?Sized> Iterator for Run<'_, A> {
    type Item = Round;

    fn next(&mut self) -> Option<Round> {
        if self.yielded && !self.advance() {
            return None;
        }
        self.yielded = true;
        Some(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton;
    use crate::builder::AutomatonBuilder;
    use crate::config::SimulationConfig;
    use crate::core::Automaton;
    use crate::simulate::ClosurePolicy;

    fn lambda_loop() -> Automaton {
        automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "", q1 -> q0 : "", q1 -> q2 : "x"],
        }
        .unwrap()
    }

    #[test]
    fn run_reports_acceptance_before_stepping() {
        let nfa = automaton! {
            states: [q0],
            initial: q0,
            final: [q0],
            transitions: [q0 -> q0 : "a"],
        }
        .unwrap();
        let simulator = Simulator::step_by_state(&nfa);

        let run = simulator.start("");
        assert_eq!(run.verdict(), Some(Verdict::Accepted));
        let outcome = run.finish();
        assert!(outcome.is_accepted());
        assert_eq!(outcome.rounds, 0);
        assert!(outcome.accepting.is_some());
    }

    #[test]
    fn empty_frontier_rejects() {
        let nfa = lambda_loop();
        let simulator = Simulator::step_with_closure(&nfa);
        let outcome = simulator.start("y").finish();
        assert_eq!(outcome.verdict, Verdict::Rejected);
        assert!(outcome.accepting.is_none());
    }

    #[test]
    fn advance_stops_after_verdict() {
        let nfa = lambda_loop();
        let simulator = Simulator::step_by_state(&nfa);
        let mut run = simulator.start("x");
        while run.advance() {}
        let rounds = run.round();
        assert!(!run.advance());
        assert_eq!(run.round(), rounds);
        assert_eq!(run.verdict(), Some(Verdict::Accepted));
    }

    #[test]
    fn deduplication_terminates_lambda_cycles() {
        let nfa = lambda_loop();
        let simulator = Simulator::step_by_state(&nfa);
        let outcome = simulator.start("xx").finish();
        assert_eq!(outcome.verdict, Verdict::Rejected);
    }

    #[test]
    fn round_limit_halts_undeduplicated_cycles() {
        let nfa = lambda_loop();
        let config = SimulationConfig::builder()
            .policy(ClosurePolicy::Identity)
            .deduplicate(false)
            .max_rounds(25)
            .build();
        let simulator = Simulator::new(&nfa, config);

        let outcome = simulator.start("xx").finish();
        assert_eq!(
            outcome.verdict,
            Verdict::Halted {
                reason: HaltReason::RoundLimit { limit: 25 }
            }
        );
        assert_eq!(outcome.rounds, 25);
        assert!(!simulator.simulate_input("xx"));
    }

    #[test]
    fn frontier_limit_halts_growth() {
        let nfa = automaton! {
            states: [q0, q1],
            initial: q0,
            final: [q1],
            transitions: [q0 -> q0 : "", q0 -> q0 : "", q0 -> q1 : "z"],
        }
        .unwrap();
        let config = SimulationConfig::builder()
            .policy(ClosurePolicy::Identity)
            .deduplicate(false)
            .max_frontier(8)
            .build();
        let simulator = Simulator::new(&nfa, config);

        match simulator.start("a").finish().verdict {
            Verdict::Halted {
                reason: HaltReason::FrontierLimit { limit, size },
            } => {
                assert_eq!(limit, 8);
                assert!(size > 8);
            }
            other => panic!("Expected frontier halt, got {other:?}"),
        }
    }

    #[test]
    fn iterator_yields_every_frontier() {
        let nfa = lambda_loop();
        let simulator = Simulator::step_by_state(&nfa);
        let rounds: Vec<Round> = simulator.start("x").collect();

        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0].index, 0);
        assert!(!rounds[0].accepting);
        assert_eq!(rounds[2].index, 2);
        assert!(rounds[2].accepting);
        assert_eq!(
            rounds[1]
                .frontier
                .iter()
                .map(|c| c.current_state())
                .collect::<Vec<_>>(),
            vec![nfa.state_id("q1").unwrap()]
        );
    }

    #[test]
    fn iterator_ends_with_empty_frontier_on_rejection() {
        let nfa = lambda_loop();
        let simulator = Simulator::step_with_closure(&nfa);
        let rounds: Vec<Round> = simulator.start("y").collect();

        let last = rounds.last().unwrap();
        assert!(last.frontier.is_empty());
        assert!(!last.accepting);
    }

    fn lambda_chain(len: usize) -> Automaton {
        let names: Vec<String> = (0..len).map(|i| format!("q{i}")).collect();
        names
            .windows(2)
            .fold(
                AutomatonBuilder::new()
                    .states(names.iter().cloned())
                    .initial(names[0].clone()),
                |builder, pair| builder.transition(pair[0].clone(), pair[1].clone(), ""),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn long_lambda_chain_prunes_before_building() {
        let len = 3000;
        let nfa = lambda_chain(len);
        let simulator = Simulator::step_with_closure(&nfa);

        let mut run = simulator.start("z");
        assert_eq!(run.frontier().len(), len);
        assert!(run.advance());
        // Every closure member reached in round one was already in the
        // initial frontier.
        assert!(run.frontier().is_empty());
        assert_eq!(run.pruned(), len * (len - 1) / 2);

        let outcome = simulator.start("z").finish();
        assert_eq!(outcome.verdict, Verdict::Rejected);
        assert_eq!(outcome.rounds, 1);
    }

    #[test]
    fn long_lambda_chain_steps_one_state_per_round() {
        let len = 500;
        let nfa = lambda_chain(len);
        let simulator = Simulator::step_by_state(&nfa);

        let rounds: Vec<Round> = simulator.start("z").collect();
        assert!(rounds.iter().all(|round| round.frontier.len() <= 1));
        assert_eq!(rounds.len(), len + 1);
        assert_eq!(simulator.start("z").finish().pruned, 0);
    }

    #[test]
    fn identical_configurations_survive_without_deduplication() {
        let nfa = automaton! {
            states: [q0, q1, q2],
            initial: q0,
            final: [q2],
            transitions: [q0 -> q1 : "a", q0 -> q1 : "a", q1 -> q2 : "b"],
        }
        .unwrap();
        let keys = |run: &Run<'_, Automaton>| -> Vec<(StateId, usize)> {
            run.frontier().iter().map(|c| c.key()).collect()
        };

        let raw = Simulator::new(
            &nfa,
            SimulationConfig::builder()
                .policy(ClosurePolicy::Identity)
                .deduplicate(false)
                .build(),
        );
        let mut run = raw.start("ab");
        run.advance();
        assert_eq!(keys(&run), vec![(StateId::new(1), 1), (StateId::new(1), 1)]);
        assert_eq!(run.pruned(), 0);
        let outcome = run.finish();
        assert!(outcome.is_accepted());

        let deduplicated = Simulator::step_by_state(&nfa);
        let mut run = deduplicated.start("ab");
        run.advance();
        assert_eq!(keys(&run), vec![(StateId::new(1), 1)]);
        assert_eq!(run.pruned(), 1);
    }

    #[test]
    fn verdicts_serialize_with_tags() {
        let halted = Verdict::Halted {
            reason: HaltReason::RoundLimit { limit: 3 },
        };
        let json = serde_json::to_string(&halted).unwrap();
        assert_eq!(
            json,
            r#"{"verdict":"halted","reason":{"kind":"round_limit","limit":3}}"#
        );
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, halted);
    }
}
