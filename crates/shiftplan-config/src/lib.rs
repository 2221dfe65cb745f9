//! Configuration system for shiftplan.
//!
//! Load solver configuration from TOML or YAML files to control shift
//! length bounds, the search strategy and termination without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use shiftplan_config::{SearchStrategy, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [shift]
//!     min_hours = 4
//!     max_hours = 10
//!
//!     [termination]
//!     seconds_spent_limit = 15
//!
//!     [search]
//!     strategy = "branch_and_bound"
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(15));
//! assert_eq!(config.search.strategy, SearchStrategy::BranchAndBound);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use shiftplan_config::SolverConfig;
//!
//! let config = SolverConfig::load("shiftplan.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shiftplan_core::MaxHoursPolicy;
use thiserror::Error;

/// Time limit used when no termination is configured.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 15;

/// Default ceiling on the estimated exhaustive search space.
pub const DEFAULT_EXHAUSTIVE_SEARCH_LIMIT: u64 = 100_000;

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

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Shift length bounds.
    #[serde(default)]
    pub shift: ShiftConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Search configuration.
    #[serde(default)]
    pub search: SearchConfig,
}

impl SolverConfig {
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
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shift.validate()?;
        if let Some(termination) = &self.termination {
            termination.validate()?;
        }
        if self.search.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid("thread_count must be at least 1".into()));
        }
        Ok(())
    }

    /// Sets the shift length bounds.
    pub fn with_shift_hours(mut self, min_hours: usize, max_hours: usize) -> Self {
        self.shift.min_hours = min_hours;
        self.shift.max_hours = max_hours;
        self
    }

    /// Sets the termination time limit in seconds.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: None,
            millis_spent_limit: Some(limit.as_millis() as u64),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.search.strategy = strategy;
        self
    }

    /// Sets the number of branch-and-bound worker threads.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.search.thread_count = thread_count;
        self
    }

    /// Returns the time limit, falling back to [`DEFAULT_TIME_LIMIT_SECS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftplan_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     millis_spent_limit = 250
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Duration::from_millis(250));
    /// assert_eq!(SolverConfig::default().time_limit(), Duration::from_secs(15));
    /// ```
    pub fn time_limit(&self) -> Duration {
        self.termination
            .as_ref()
            .and_then(TerminationConfig::time_limit)
            .unwrap_or(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS))
    }

    /// Returns the node count limit, if configured.
    pub fn node_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }
}

/// Shift length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ShiftConfig {
    /// Minimum shift length in timeslots.
    #[serde(default = "default_min_hours")]
    pub min_hours: usize,

    /// Maximum shift length in timeslots.
    #[serde(default = "default_max_hours")]
    pub max_hours: usize,

    /// What to do when `max_hours` exceeds the planning horizon.
    #[serde(default)]
    pub max_hours_policy: MaxHoursPolicyConfig,
}

fn default_min_hours() -> usize {
    4
}

fn default_max_hours() -> usize {
    10
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            min_hours: default_min_hours(),
            max_hours: default_max_hours(),
            max_hours_policy: MaxHoursPolicyConfig::default(),
        }
    }
}

impl ShiftConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_hours == 0 {
            return Err(ConfigError::Invalid("min_hours must be positive".into()));
        }
        if self.min_hours > self.max_hours {
            return Err(ConfigError::Invalid(format!(
                "min_hours ({}) exceeds max_hours ({})",
                self.min_hours, self.max_hours
            )));
        }
        Ok(())
    }
}

/// Serialized form of [`MaxHoursPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxHoursPolicyConfig {
    /// Cap `max_hours` at the horizon.
    #[default]
    Clamp,

    /// Reject `max_hours` beyond the horizon.
    Reject,
}

impl From<MaxHoursPolicyConfig> for MaxHoursPolicy {
    fn from(policy: MaxHoursPolicyConfig) -> Self {
        match policy {
            MaxHoursPolicyConfig::Clamp => MaxHoursPolicy::Clamp,
            MaxHoursPolicyConfig::Reject => MaxHoursPolicy::Reject,
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving (added to the seconds limit).
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search nodes to explore.
    pub node_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count_limit == Some(0) {
            return Err(ConfigError::Invalid("node_count_limit must be positive".into()));
        }
        Ok(())
    }
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Which strategy solves the covering problem.
    #[serde(default)]
    pub strategy: SearchStrategy,

    /// Largest estimated search space `auto` hands to the exhaustive strategy.
    #[serde(default = "default_exhaustive_search_limit")]
    pub exhaustive_search_limit: u64,

    /// Number of branch-and-bound worker threads.
    #[serde(default)]
    pub thread_count: ThreadCount,
}

fn default_exhaustive_search_limit() -> u64 {
    DEFAULT_EXHAUSTIVE_SEARCH_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            exhaustive_search_limit: DEFAULT_EXHAUSTIVE_SEARCH_LIMIT,
            thread_count: ThreadCount::default(),
        }
    }
}

/// Search strategy selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Exhaustive search for small instances, branch and bound otherwise.
    #[default]
    Auto,

    /// Enumerate pattern multisets of increasing size.
    Exhaustive,

    /// Branch and bound over per-pattern driver counts.
    BranchAndBound,
}

/// Worker thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// One worker per available core.
    #[default]
    Auto,

    /// Single worker.
    None,

    /// Specific number of workers.
    Count(usize),
}

impl ThreadCount {
    /// Resolves the number of workers given the available parallelism.
    pub fn resolve(&self, available: usize) -> usize {
        match self {
            ThreadCount::Auto => available.max(1),
            ThreadCount::None => 1,
            ThreadCount::Count(n) => (*n).max(1),
        }
    }
}

#[cfg(test)]
mod tests;
