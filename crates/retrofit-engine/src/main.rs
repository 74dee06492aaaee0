//! Engine binary for the household retrofit simulation.
//!
//! Wires configuration, the housing-stock distribution, the household
//! population, and the run loop together, and streams the step history to
//! a JSON-lines file.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `retrofit-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Load the household distribution
//! 4. Sample the household population
//! 5. Build the model and run it for the configured number of steps
//! 6. Flush the history file and log the result

mod distribution;
mod error;
mod history;

use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use retrofit_core::{RenovationModel, SimulationConfig, runner};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::history::HistoryWriter;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "retrofit-config.yaml";

fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, config_found) = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("retrofit-engine starting");
    if !config_found {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    let settings = &config.simulation;
    info!(
        seed = settings.seed,
        num_steps = settings.num_steps,
        num_households = settings.num_households,
        step_interval_minutes = settings.step_interval_minutes,
        annual_renovation_rate = settings.annual_renovation_rate,
        "Configuration loaded"
    );

    // 3. Load the household distribution.
    let distribution_path = &config.output.distribution_path;
    let records = distribution::load_distribution(distribution_path)
        .with_context(|| format!("loading {}", distribution_path.display()))?;

    // 4. Sample the population.
    let mut rng = SmallRng::seed_from_u64(settings.seed);
    let households = retrofit_agents::create_households(
        &records,
        settings.num_households,
        &config.household,
        &mut rng,
    )
    .map_err(EngineError::from)?;

    // 5. Build the model and run it.
    let mut model = RenovationModel::from_config(&config, households).map_err(EngineError::from)?;
    let history_path = &config.output.history_path;
    let mut writer = HistoryWriter::create(history_path)?;

    let result =
        runner::run_simulation(&mut model, settings.num_steps, &mut writer).map_err(EngineError::from)?;

    // 6. Flush history and log results.
    let (_, lines) = writer
        .finish()
        .with_context(|| format!("writing {}", history_path.display()))?;
    runner::log_simulation_end(&result, &model);

    info!(
        history_path = %history_path.display(),
        history_lines = lines,
        total_steps = result.total_steps,
        "retrofit-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration, falling back to defaults when the
/// file does not exist. The flag reports whether the file was found.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}
