//! Household state, wealth, renovation decisions, and insulation quoting.
//!
//! This crate contains the per-agent logic of the retrofit simulation --
//! everything that operates on a single household without touching I/O or
//! the run loop. It sits between `retrofit-types` (the shared vocabulary)
//! and `retrofit-core` (clock, model, and orchestration).
//!
//! # Modules
//!
//! - [`config`] -- Tunable household parameters ([`HouseholdConfig`])
//! - [`costs`] -- Empirical insulation cost ranges ([`InsulationCostTables`])
//! - [`error`] -- Error types for household operations ([`HouseholdError`])
//! - [`household`] -- Household state and the per-step entry point ([`Household`])
//! - [`insulation`] -- Upgradable elements, quoting, choice, and installation
//! - [`population`] -- Household creation from a housing-stock distribution
//! - [`renovation`] -- Renovation probability and scope decisions
//! - [`segment`] -- Insulation segmentation rules
//! - [`wealth`] -- Wealth percentile and heating renovation budget
//! - [`weibull`] -- Weibull percentile/value transforms

pub mod config;
pub mod costs;
pub mod error;
pub mod household;
pub mod insulation;
pub mod population;
pub mod renovation;
pub mod segment;
pub mod wealth;
pub mod weibull;

// Re-export primary types at crate root for convenience.
pub use config::HouseholdConfig;
pub use costs::{CostRange, CostTable, InsulationCostTables};
pub use error::HouseholdError;
pub use household::{Household, HouseholdParams, RenovationState};
pub use insulation::choose_insulation_elements;
pub use population::{HouseholdRecord, PopulationError, create_households, read_household_records};
pub use renovation::{ModelContext, RenovationScope, renovation_probability};
pub use segment::classify;
pub use weibull::{WEIBULL_EPSILON, WeibullParams, percentile_from_value, value_from_percentile};
