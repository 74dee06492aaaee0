//! Simulation loop runner.
//!
//! [`run_simulation`] drives [`run_tick`] for a fixed number of steps and
//! hands each step's summary to a [`TickCallback`]. The engine uses the
//! callback to stream history to disk; tests use [`HistoryCollector`] to
//! keep it in memory.
//!
//! [`run_tick`]: crate::tick::run_tick

use tracing::{info, warn};

use crate::model::RenovationModel;
use crate::tick::{self, StepHistory, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The last step summary, if any step completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of steps executed.
    pub total_steps: u64,
    /// Renovation decisions summed over every step.
    pub total_renovations: u64,
}

/// Callback invoked after each step completes.
pub trait TickCallback {
    /// Called after a step completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, model: &RenovationModel);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _model: &RenovationModel) {}
}

/// Keeps every step's history in memory.
#[derive(Debug, Default)]
pub struct HistoryCollector {
    /// Collected history, one entry per step.
    pub history: Vec<StepHistory>,
}

impl TickCallback for HistoryCollector {
    fn on_tick(&mut self, summary: &TickSummary, _model: &RenovationModel) {
        self.history.push(summary.history.clone());
    }
}

/// Run the model for `num_steps` steps.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails; steps already completed have
/// been passed to the callback.
pub fn run_simulation(
    model: &mut RenovationModel,
    num_steps: u64,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut final_summary: Option<TickSummary> = None;
    let mut total_steps: u64 = 0;
    let mut total_renovations: u64 = 0;

    info!(
        num_steps,
        households = model.household_count(),
        start = %model.clock().start_datetime(),
        "Simulation starting"
    );

    for _ in 0..num_steps {
        let summary = tick::run_tick(model)?;
        total_steps = total_steps.saturating_add(1);
        total_renovations =
            total_renovations.saturating_add(u64::try_from(summary.renovating).unwrap_or(u64::MAX));

        callback.on_tick(&summary, model);
        final_summary = Some(summary);
    }

    Ok(SimulationResult {
        final_summary,
        total_steps,
        total_renovations,
    })
}

/// Log the outcome of a finished run.
pub fn log_simulation_end(result: &SimulationResult, model: &RenovationModel) {
    info!(
        total_steps = result.total_steps,
        total_renovations = result.total_renovations,
        final_datetime = %model.clock().current_datetime(),
        "Simulation ended"
    );

    if let Some(initial) = model.initial_heating_system_counts() {
        let current = model.heating_system_counts();
        for (system, count) in initial {
            info!(
                heating_system = ?system,
                initial = count,
                current = current.get(system).copied().unwrap_or(0),
                "Heating system count"
            );
        }
    } else {
        warn!("Simulation ended with no steps executed");
    }
}
