//! Configuration loading and typed config structures for the retrofit simulation.
//!
//! The canonical configuration lives in `retrofit-config.yaml` at the
//! project root. Every section is optional; anything left out takes the
//! calibrated default. The household section is handed to each household
//! operation explicitly, so the agent logic never reaches for a default
//! of its own.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use retrofit_agents::{HouseholdConfig, HouseholdError, InsulationCostTables};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The household section holds an out-of-domain value.
    #[error("invalid household config: {source}")]
    Household {
        /// The underlying validation error.
        #[from]
        source: HouseholdError,
    },

    /// A simulation setting is out of range.
    #[error("invalid simulation config: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `retrofit-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Run-level settings (seed, timing, population size, renovation rate).
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Household wealth, budget, and decision parameters.
    #[serde(default)]
    pub household: HouseholdConfig,

    /// Insulation cost ranges by measure and segment.
    #[serde(default)]
    pub insulation_costs: InsulationCostTables,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Input and output file locations.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, and a
    /// validation error for out-of-range values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, and a
    /// validation error for out-of-range values.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Household`] or [`ConfigError::Invalid`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.household.validate()?;
        self.simulation.validate()
    }
}

/// Run-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationSettings {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Simulated minutes per step (default: one day).
    #[serde(default = "default_step_interval_minutes")]
    pub step_interval_minutes: u32,

    /// Number of steps to run.
    #[serde(default = "default_num_steps")]
    pub num_steps: u64,

    /// Number of households to sample from the distribution.
    #[serde(default = "default_num_households")]
    pub num_households: usize,

    /// Probability that a household renovates within one year.
    #[serde(default = "default_annual_renovation_rate")]
    pub annual_renovation_rate: f64,

    /// Simulated start time; midnight UTC today when absent.
    #[serde(default)]
    pub start_datetime: Option<DateTime<Utc>>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            step_interval_minutes: default_step_interval_minutes(),
            num_steps: default_num_steps(),
            num_households: default_num_households(),
            annual_renovation_rate: default_annual_renovation_rate(),
            start_datetime: None,
        }
    }
}

impl SimulationSettings {
    /// Simulated time covered by one step.
    pub fn step_interval(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.step_interval_minutes))
    }

    /// The configured start, or midnight UTC of the current day.
    pub fn start_datetime(&self) -> DateTime<Utc> {
        self.start_datetime
            .unwrap_or_else(|| Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc())
    }

    /// Check timing and rate settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero step interval or a rate
    /// outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_interval_minutes == 0 {
            return Err(ConfigError::Invalid {
                reason: "step_interval_minutes must be at least 1".to_owned(),
            });
        }
        if !(0.0..=1.0).contains(&self.annual_renovation_rate) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "annual_renovation_rate must be within [0, 1], got {}",
                    self.annual_renovation_rate
                ),
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Input and output file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Where the per-step history is written as JSON lines.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Housing-stock distribution the population is sampled from.
    #[serde(default = "default_distribution_path")]
    pub distribution_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            distribution_path: default_distribution_path(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_step_interval_minutes() -> u32 {
    1440
}

const fn default_num_steps() -> u64 {
    365
}

const fn default_num_households() -> usize {
    500
}

const fn default_annual_renovation_rate() -> f64 {
    0.05
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_history_path() -> PathBuf {
    PathBuf::from("history.jsonl")
}

fn default_distribution_path() -> PathBuf {
    PathBuf::from("household-distribution.csv")
}
