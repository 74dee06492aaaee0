//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup, the run itself,
//! and history output, so `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: retrofit_core::ConfigError,
    },

    /// Simulation clock initialization failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: retrofit_core::ClockError,
    },

    /// The housing-stock distribution could not be parsed.
    #[error("failed to parse household distribution {path}: {source}")]
    Distribution {
        /// The distribution file.
        path: PathBuf,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// Building the household population failed.
    #[error("population error: {source}")]
    Population {
        /// The underlying population error.
        #[from]
        source: retrofit_agents::PopulationError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: retrofit_core::RunnerError,
    },

    /// Reading input or writing history failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
