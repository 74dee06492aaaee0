//! Simulation clock, renovation model, step cycle, and run loop.
//!
//! This crate wires household agents from `retrofit-agents` into a
//! runnable simulation. It owns the calendar, the population with its
//! per-household random streams, and the loop that steps every household
//! once per interval and collects history.
//!
//! # Modules
//!
//! - [`clock`] -- Simulated calendar time ([`SimulationClock`])
//! - [`config`] -- Configuration loading from `retrofit-config.yaml`
//! - [`model`] -- The model and its household population ([`RenovationModel`])
//! - [`runner`] -- Bounded run loop with per-step callbacks
//! - [`tick`] -- One step: advance, decide, collect

pub mod clock;
pub mod config;
pub mod model;
pub mod runner;
pub mod tick;

pub use clock::{ClockError, SimulationClock};
pub use config::{ConfigError, SimulationConfig};
pub use model::{ModelParameters, RenovationModel};
pub use runner::{
    HistoryCollector, NoOpCallback, RunnerError, SimulationResult, TickCallback, run_simulation,
};
pub use tick::{HouseholdRow, ModelRow, StepHistory, TickError, TickSummary, run_tick};
