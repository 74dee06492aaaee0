//! Step cycle: advance the clock, then step every household once.
//!
//! Each step runs in this order:
//!
//! 1. **Snapshot** -- before the very first step, record the initial
//!    heating-system counts.
//! 2. **Advance** -- move the clock forward one interval.
//! 3. **Decide** -- step each household in population order with its own
//!    random stream.
//! 4. **Collect** -- tally the renovation outcomes and build the history
//!    record for the step.
//!
//! A household error aborts the step and names the household.

use chrono::{DateTime, Utc};
use retrofit_agents::HouseholdError;
use retrofit_types::{HeatingSystem, HouseholdId};
use serde::Serialize;
use tracing::{debug, info};

use crate::clock::ClockError;
use crate::model::RenovationModel;

/// Errors that can occur during step execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A household step failed.
    #[error("household error for {household_id}: {source}")]
    Household {
        /// The household that caused the error.
        household_id: HouseholdId,
        /// The underlying household error.
        source: HouseholdError,
    },
}

/// Per-household record collected each step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseholdRow {
    /// Household identifier, present on the first step only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household_id: Option<HouseholdId>,
    /// Installed heating system.
    pub heating_system: HeatingSystem,
}

/// Model-level record collected each step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRow {
    /// Simulated time after the step.
    pub current_datetime: DateTime<Utc>,
}

/// Everything collected for one step, serialized as one history line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepHistory {
    /// One row per household, in population order.
    pub households: Vec<HouseholdRow>,
    /// The model row.
    pub model: ModelRow,
}

/// Summary of a single step's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The step number that was executed (1-indexed).
    pub step: u64,
    /// Simulated time after the step.
    pub current_datetime: DateTime<Utc>,
    /// Number of households stepped.
    pub households: usize,
    /// Households that decided to renovate.
    pub renovating: usize,
    /// Renovating households with the heating system in scope.
    pub heating_system_scope: usize,
    /// Renovating households with insulation in scope.
    pub insulation_scope: usize,
    /// Insulation elements quoted across all households.
    pub quoted_elements: usize,
    /// Sum of all insulation quotes in whole pounds.
    pub total_quoted_cost: u64,
    /// The history record for this step.
    pub history: StepHistory,
}

/// Execute one step of the simulation.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if the clock cannot advance, and
/// [`TickError::Household`] for the first household whose step fails.
pub fn run_tick(model: &mut RenovationModel) -> Result<TickSummary, TickError> {
    // --- Snapshot ---
    if model.clock.is_at_start() && model.initial_heating_system_counts.is_none() {
        model.initial_heating_system_counts = Some(model.heating_system_counts());
    }

    // --- Advance ---
    let step = model.clock.advance()?;
    let current_datetime = model.clock.current_datetime();
    let first_step = model.clock.is_first_step();
    debug!(step, %current_datetime, "Step started");

    // --- Decide and collect ---
    let parameters = model.parameters();
    let config = &model.household_config;
    let cost_tables = &model.cost_tables;

    let mut renovating: usize = 0;
    let mut heating_system_scope: usize = 0;
    let mut insulation_scope: usize = 0;
    let mut quoted_elements: usize = 0;
    let mut total_quoted_cost: u64 = 0;
    let mut rows = Vec::with_capacity(model.agents.len());

    for agent in &mut model.agents {
        let household_id = agent.household.id();
        let state = agent
            .household
            .step(&parameters, config, cost_tables, &mut agent.rng)
            .map_err(|source| TickError::Household {
                household_id,
                source,
            })?;

        if state.is_renovating {
            renovating = renovating.saturating_add(1);
        }
        if state.scope.heating_system {
            heating_system_scope = heating_system_scope.saturating_add(1);
        }
        if state.scope.insulation {
            insulation_scope = insulation_scope.saturating_add(1);
        }
        quoted_elements = quoted_elements.saturating_add(state.insulation_quotes.len());
        for cost in state.insulation_quotes.values() {
            total_quoted_cost = total_quoted_cost.saturating_add(u64::from(*cost));
        }

        rows.push(HouseholdRow {
            household_id: first_step.then_some(household_id),
            heating_system: agent.household.heating_system(),
        });
    }

    info!(
        step,
        %current_datetime,
        renovating,
        heating_system_scope,
        insulation_scope,
        total_quoted_cost,
        "Step completed"
    );

    Ok(TickSummary {
        step,
        current_datetime,
        households: rows.len(),
        renovating,
        heating_system_scope,
        insulation_scope,
        quoted_elements,
        total_quoted_cost,
        history: StepHistory {
            households: rows,
            model: ModelRow { current_datetime },
        },
    })
}
