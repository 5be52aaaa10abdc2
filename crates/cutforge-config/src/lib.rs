//! Configuration system for cutforge.
//!
//! Load k-cut solver parameters from TOML or YAML without code changes.
//! Validation is a separate step the caller runs before solving; the solver
//! itself trusts whatever it is handed.
//!
//! # Examples
//!
//! ```
//! use cutforge_config::KCutConfig;
//! use std::time::Duration;
//!
//! let config = KCutConfig::from_toml_str(r#"
//!     k = 3
//!     iterations = 16
//!     vns_max_neighborhood_order = 4
//!     min_community_sizes = [1, 1, 0]
//!     random_seed = 42
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.k, 3);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! config.validate().unwrap();
//! ```

use std::path::Path;
use std::time::Duration;

use cutforge_core::{CutForgeError, ObjectiveKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for CutForgeError {
    fn from(err: ConfigError) -> Self {
        CutForgeError::Config(err.to_string())
    }
}

/// Parameters of an approximate maximum k-cut run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct KCutConfig {
    /// Number of communities.
    pub k: u32,

    /// Number of GRASP trials.
    pub iterations: usize,

    /// Maximum perturbation order of the variable neighborhood search.
    /// Zero disables VNS in favour of a single local search per trial.
    pub vns_max_neighborhood_order: usize,

    /// Lower bound on the size of each community. Empty means no bounds.
    pub min_community_sizes: Vec<u64>,

    /// Minimize the cut weight instead of maximizing it.
    pub minimize: bool,

    /// Number of worker threads for the parallel phases.
    pub concurrency: usize,

    /// Random seed for reproducible results.
    pub random_seed: Option<u64>,

    /// Lower bound on the per-partition batch size.
    pub min_batch_size: usize,

    /// Attempts to find a movable node before a perturbation gives up.
    pub max_perturbation_retries: usize,

    /// Wall-clock limit, OR-ed with any caller-supplied termination.
    pub termination: Option<TerminationConfig>,
}

impl Default for KCutConfig {
    fn default() -> Self {
        Self {
            k: 2,
            iterations: 8,
            vns_max_neighborhood_order: 0,
            min_community_sizes: Vec::new(),
            minimize: false,
            concurrency: 4,
            random_seed: None,
            min_batch_size: 10_000,
            max_perturbation_retries: 100,
            termination: None,
        }
    }
}

impl KCutConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_vns_max_neighborhood_order(mut self, order: usize) -> Self {
        self.vns_max_neighborhood_order = order;
        self
    }

    pub fn with_min_community_sizes(mut self, sizes: impl Into<Vec<u64>>) -> Self {
        self.min_community_sizes = sizes.into();
        self
    }

    pub fn with_minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_min_batch_size(mut self, min_batch_size: usize) -> Self {
        self.min_batch_size = min_batch_size;
        self
    }

    pub fn with_max_perturbation_retries(mut self, retries: usize) -> Self {
        self.max_perturbation_retries = retries;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Direction of the optimization.
    pub fn objective_kind(&self) -> ObjectiveKind {
        ObjectiveKind::from_minimize(self.minimize)
    }

    /// Minimum size per community, with an empty list resolved to zeros.
    pub fn min_community_sizes(&self) -> Vec<u64> {
        if self.min_community_sizes.is_empty() {
            vec![0; self.k as usize]
        } else {
            self.min_community_sizes.clone()
        }
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Checks the parameters that do not depend on the input graph.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k < 1 {
            return Err(invalid("k must be at least 1"));
        }
        if self.iterations < 1 {
            return Err(invalid("iterations must be at least 1"));
        }
        if self.concurrency < 1 {
            return Err(invalid("concurrency must be at least 1"));
        }
        if self.min_batch_size < 1 {
            return Err(invalid("min_batch_size must be at least 1"));
        }
        if self.max_perturbation_retries < 1 {
            return Err(invalid("max_perturbation_retries must be at least 1"));
        }
        if !self.min_community_sizes.is_empty() && self.min_community_sizes.len() != self.k as usize
        {
            return Err(ConfigError::Invalid(format!(
                "min_community_sizes has {} entries, expected k = {}",
                self.min_community_sizes.len(),
                self.k
            )));
        }
        Ok(())
    }

    /// Runs [`validate`](Self::validate) and additionally checks that the
    /// community minimums fit into a graph of `node_count` nodes.
    pub fn validate_for_node_count(&self, node_count: usize) -> Result<(), ConfigError> {
        self.validate()?;
        let required: u64 = self.min_community_sizes.iter().sum();
        if required > node_count as u64 {
            return Err(ConfigError::Invalid(format!(
                "min_community_sizes sum to {required}, but the graph has only {node_count} nodes"
            )));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}
