//! The renovation model: clock, parameters, and the household population.
//!
//! Every household carries its own [`SmallRng`], seeded from the world seed
//! mixed with the household's position in the population. A household's
//! draws therefore depend only on the seed and its own history, never on
//! how many draws its neighbours made.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use retrofit_agents::{Household, HouseholdConfig, InsulationCostTables, ModelContext};
use retrofit_types::HeatingSystem;

use crate::clock::{ClockError, SimulationClock};
use crate::config::SimulationConfig;

/// Per-step parameters households read from the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    /// Simulated time covered by one step.
    pub step_interval: TimeDelta,
    /// Probability that a household renovates within one year.
    pub annual_renovation_rate: f64,
}

impl ModelContext for ModelParameters {
    fn step_interval(&self) -> TimeDelta {
        self.step_interval
    }

    fn annual_renovation_rate(&self) -> f64 {
        self.annual_renovation_rate
    }
}

/// A household together with its private random stream.
#[derive(Debug, Clone)]
pub(crate) struct HouseholdAgent {
    pub(crate) household: Household,
    pub(crate) rng: SmallRng,
}

/// The simulation model.
#[derive(Debug, Clone)]
pub struct RenovationModel {
    pub(crate) clock: SimulationClock,
    pub(crate) annual_renovation_rate: f64,
    pub(crate) household_config: HouseholdConfig,
    pub(crate) cost_tables: InsulationCostTables,
    pub(crate) agents: Vec<HouseholdAgent>,
    pub(crate) initial_heating_system_counts: Option<BTreeMap<HeatingSystem, usize>>,
}

impl RenovationModel {
    /// Assemble a model from its parts.
    pub fn new(
        clock: SimulationClock,
        annual_renovation_rate: f64,
        household_config: HouseholdConfig,
        cost_tables: InsulationCostTables,
        households: Vec<Household>,
        seed: u64,
    ) -> Self {
        let agents = households
            .into_iter()
            .zip(0_u64..)
            .map(|(household, index)| HouseholdAgent {
                household,
                rng: SmallRng::seed_from_u64(household_seed(seed, index)),
            })
            .collect();

        Self {
            clock,
            annual_renovation_rate,
            household_config,
            cost_tables,
            agents,
            initial_heating_system_counts: None,
        }
    }

    /// Assemble a model from configuration and an existing population.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError`] if the configured step interval is not
    /// positive.
    pub fn from_config(
        config: &SimulationConfig,
        households: Vec<Household>,
    ) -> Result<Self, ClockError> {
        let settings = &config.simulation;
        let clock = SimulationClock::new(settings.start_datetime(), settings.step_interval())?;
        Ok(Self::new(
            clock,
            settings.annual_renovation_rate,
            config.household.clone(),
            config.insulation_costs.clone(),
            households,
            settings.seed,
        ))
    }

    /// The parameters households consult while stepping.
    pub const fn parameters(&self) -> ModelParameters {
        ModelParameters {
            step_interval: self.clock.step_interval(),
            annual_renovation_rate: self.annual_renovation_rate,
        }
    }

    /// The simulation clock.
    pub const fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Household configuration shared by every household.
    pub const fn household_config(&self) -> &HouseholdConfig {
        &self.household_config
    }

    /// Insulation cost tables shared by every household.
    pub const fn cost_tables(&self) -> &InsulationCostTables {
        &self.cost_tables
    }

    /// Households in population order.
    pub fn households(&self) -> impl Iterator<Item = &Household> {
        self.agents.iter().map(|agent| &agent.household)
    }

    /// Number of households.
    pub fn household_count(&self) -> usize {
        self.agents.len()
    }

    /// Households per installed heating system.
    pub fn heating_system_counts(&self) -> BTreeMap<HeatingSystem, usize> {
        let mut counts = BTreeMap::new();
        for household in self.households() {
            let count = counts.entry(household.heating_system()).or_insert(0_usize);
            *count = count.saturating_add(1);
        }
        counts
    }

    /// Heating-system counts recorded before the first step, if it has run.
    pub const fn initial_heating_system_counts(&self) -> Option<&BTreeMap<HeatingSystem, usize>> {
        self.initial_heating_system_counts.as_ref()
    }
}

impl ModelContext for RenovationModel {
    fn step_interval(&self) -> TimeDelta {
        self.clock.step_interval()
    }

    fn annual_renovation_rate(&self) -> f64 {
        self.annual_renovation_rate
    }
}

/// Derive a household's seed from the world seed and its index.
///
/// Same inputs always give the same seed; neighbouring indices give
/// unrelated seeds.
pub const fn household_seed(world_seed: u64, index: u64) -> u64 {
    let mut state = world_seed.wrapping_add(index.wrapping_mul(0x517c_c1b7_2722_0a95));

    // xorshift needs a non-zero state.
    if state == 0 {
        state = 0xdead_beef_cafe_babe;
    }

    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;

    state
}
