//! The NFA simulator shared by both stepping variants.

use crate::config::SimulationConfig;
use crate::core::{lambda_closures, FiniteAutomaton, StateId};
use crate::simulate::configuration::Configuration;
use crate::simulate::policy::ClosurePolicy;
use crate::simulate::run::Run;
use std::borrow::Cow;
use std::sync::Arc;

/// Simulates a finite automaton on input strings.
///
/// One algorithm serves both variants; the [`ClosurePolicy`] in the
/// configuration decides whether initial and literal steps expand lambda
/// closures. The automaton is only read.
///
/// # Example
///
/// ```rust
/// use fsasim::automaton;
/// use fsasim::simulate::Simulator;
///
/// let nfa = automaton! {
///     states: [q0, q1, q2],
///     initial: q0,
///     final: [q2],
///     transitions: [q0 -> q1 : "", q1 -> q2 : "x"],
/// }
/// .unwrap();
///
/// assert!(Simulator::step_by_state(&nfa).simulate_input("x"));
/// assert!(Simulator::step_with_closure(&nfa).simulate_input("x"));
/// assert!(!Simulator::step_with_closure(&nfa).simulate_input("xx"));
/// ```
pub struct Simulator<'a, A: FiniteAutomaton + ?Sized> {
    automaton: &'a A,
    config: SimulationConfig,
    // Expansion of every state under the policy, indexed by state id.
    closures: Vec<Vec<StateId>>,
}

impl<'a, A: FiniteAutomaton + ?Sized> Simulator<'a, A> {
    /// Create a simulator with the given configuration.
    pub fn new(automaton: &'a A, config: SimulationConfig) -> Self {
        let closures = if config.policy.takes_closure() {
            lambda_closures(automaton)
        } else {
            (0..automaton.state_count())
                .map(|index| vec![StateId::new(index as u32)])
                .collect()
        };
        Self {
            automaton,
            config,
            closures,
        }
    }

    /// Step-by-state simulator with default limits.
    pub fn step_by_state(automaton: &'a A) -> Self {
        Self::new(
            automaton,
            SimulationConfig::with_policy(ClosurePolicy::Identity),
        )
    }

    /// Step-with-closure simulator with default limits.
    pub fn step_with_closure(automaton: &'a A) -> Self {
        Self::new(
            automaton,
            SimulationConfig::with_policy(ClosurePolicy::LambdaClosure),
        )
    }

    /// The simulated automaton.
    pub fn automaton(&self) -> &'a A {
        self.automaton
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The active closure policy.
    pub fn policy(&self) -> ClosurePolicy {
        self.config.policy
    }

    /// States a step onto `state` lands on under the active policy.
    pub fn expand(&self, state: StateId) -> Cow<'_, [StateId]> {
        match self.closures.get(state.index()) {
            Some(members) => Cow::Borrowed(members.as_slice()),
            None => Cow::Owned(vec![state]),
        }
    }

    /// Configurations a run on `input` starts from.
    pub fn initial_configurations(&self, input: &str) -> Vec<Arc<Configuration>> {
        let input: Arc<str> = Arc::from(input);
        self.expand(self.automaton.initial_state())
            .iter()
            .map(|&state| Configuration::initial(state, Arc::clone(&input)))
            .collect()
    }

    /// Every `(state, bytes consumed)` pair one transition takes `config` to.
    ///
    /// Literal labels (including lambda) land on the expansion of the
    /// target; list labels land on the target alone. No configuration is
    /// built, so a caller can discard pairs it has already seen first.
    pub fn step_targets(&self, config: &Configuration) -> Vec<(StateId, usize)> {
        let mut targets = Vec::new();
        let remaining = config.remaining_input();
        for transition in self.automaton.transitions_from(config.current_state()) {
            let label = transition.parsed_label();
            for matched in label.matches(remaining) {
                let len = matched.token.len();
                if label.is_list() {
                    targets.push((transition.to_state(), len));
                } else {
                    targets.extend(
                        self.expand(transition.to_state())
                            .iter()
                            .map(|&state| (state, len)),
                    );
                }
            }
        }
        targets
    }

    /// Every configuration reachable from `config` by taking one transition.
    pub fn step_configuration(&self, config: &Arc<Configuration>) -> Vec<Arc<Configuration>> {
        self.step_targets(config)
            .into_iter()
            .map(|(state, len)| config.derive(state, len))
            .collect()
    }

    /// Whether `config` has consumed all input in a final state.
    pub fn is_accepting(&self, config: &Configuration) -> bool {
        config.is_exhausted() && self.automaton.is_final(config.current_state())
    }

    /// Begin a stepwise run on `input`.
    pub fn start(&self, input: &str) -> Run<'_, A> {
        Run::new(self, input)
    }

    /// Run to completion and report acceptance.
    ///
    /// A run halted by a configured budget reports `false`.
    pub fn simulate_input(&self, input: &str) -> bool {
        self.start(input).finish().is_accepted()
    }
}
