//! Simulation configuration.
//!
//! A [`SimulationConfig`] selects the closure policy and bounds a run.
//! Configurations are plain serde values, so a caller can keep them in a
//! JSON settings file and load them with [`SimulationConfig::from_json`].

use crate::simulate::ClosurePolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Simulation config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be greater than zero")]
    ZeroLimit { field: &'static str },
}

/// Settings for one simulator.
///
/// # Example
///
/// ```rust
/// use fsasim::config::SimulationConfig;
/// use fsasim::simulate::ClosurePolicy;
///
/// let config = SimulationConfig::builder()
///     .policy(ClosurePolicy::Identity)
///     .max_rounds(100)
///     .build();
///
/// assert!(config.deduplicate);
/// assert_eq!(config.max_rounds, Some(100));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Whether literal steps expand into lambda closures.
    pub policy: ClosurePolicy,

    /// Discard configurations whose `(state, remaining input)` pair was
    /// already derived earlier in the run.
    pub deduplicate: bool,

    /// Halt after this many rounds.
    pub max_rounds: Option<usize>,

    /// Halt when a frontier grows beyond this many configurations.
    pub max_frontier: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: ClosurePolicy::default(),
            deduplicate: true,
            max_rounds: None,
            max_frontier: None,
        }
    }
}

impl SimulationConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    /// Defaults with the given policy.
    pub fn with_policy(policy: ClosurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that limits are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == Some(0) {
            return Err(ConfigError::ZeroLimit {
                field: "max_rounds",
            });
        }
        if self.max_frontier == Some(0) {
            return Err(ConfigError::ZeroLimit {
                field: "max_frontier",
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }

    /// Set the closure policy.
    pub fn policy(mut self, policy: ClosurePolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Enable or disable run-wide deduplication.
    pub fn deduplicate(mut self, enabled: bool) -> Self {
        self.config.deduplicate = enabled;
        self
    }

    /// Set the round budget.
    pub fn max_rounds(mut self, n: usize) -> Self {
        self.config.max_rounds = Some(n);
        self
    }

    /// Set the frontier size budget.
    pub fn max_frontier(mut self, n: usize) -> Self {
        self.config.max_frontier = Some(n);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SimulationConfig {
        self.config
    }
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
