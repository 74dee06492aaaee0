//! Renovation decision state machine.
//!
//! Each step a household first rolls whether it renovates at all, with the
//! annual renovation rate scaled to the step length. A renovating household
//! then draws its scope: heating system and insulation are independent
//! Bernoulli trials, so either, both, or neither may be in scope.

use chrono::TimeDelta;
use rand::Rng;
use serde::Serialize;

use crate::config::{HouseholdConfig, check_probability};
use crate::error::HouseholdError;
use crate::household::Household;

/// Read-only model parameters a household consults while stepping.
pub trait ModelContext {
    /// Simulated time covered by one step.
    fn step_interval(&self) -> TimeDelta;

    /// Probability that a household renovates within one year.
    fn annual_renovation_rate(&self) -> f64;
}

/// Which measures a renovating household has put in scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenovationScope {
    /// Heating-system replacement.
    pub heating_system: bool,
    /// Insulation upgrades.
    pub insulation: bool,
}

impl RenovationScope {
    /// Nothing in scope.
    pub const NONE: Self = Self {
        heating_system: false,
        insulation: false,
    };
}

/// Per-step renovation probability for an annual rate and step length.
///
/// Steps long enough to push `rate * interval / year` past 1 saturate at
/// 1, so every household renovates.
///
/// # Errors
///
/// Returns [`HouseholdError::InvalidProbability`] for a rate outside
/// `[0, 1]` and [`HouseholdError::NonPositiveStepInterval`] for a zero or
/// negative interval.
pub fn renovation_probability(
    annual_renovation_rate: f64,
    step_interval: TimeDelta,
) -> Result<f64, HouseholdError> {
    check_probability("annual_renovation_rate", annual_renovation_rate)?;
    let milliseconds = step_interval.num_milliseconds();
    if milliseconds <= 0 {
        return Err(HouseholdError::NonPositiveStepInterval { milliseconds });
    }

    #[allow(clippy::cast_precision_loss)]
    let fraction_of_year =
        milliseconds as f64 / TimeDelta::days(365).num_milliseconds() as f64;
    Ok((annual_renovation_rate * fraction_of_year).min(1.0))
}

impl Household {
    /// Roll whether the household renovates this step.
    ///
    /// Sets and returns `is_renovating`. The roll has no memory of earlier
    /// steps.
    ///
    /// # Errors
    ///
    /// See [`renovation_probability`].
    pub fn evaluate_renovation<M: ModelContext + ?Sized>(
        &mut self,
        model: &M,
        rng: &mut impl Rng,
    ) -> Result<bool, HouseholdError> {
        let probability =
            renovation_probability(model.annual_renovation_rate(), model.step_interval())?;
        let is_renovating = rng.random::<f64>() < probability;
        self.renovation.is_renovating = is_renovating;
        Ok(is_renovating)
    }

    /// Draw which measures are in scope for this step's renovation.
    ///
    /// A household that is not renovating gets [`RenovationScope::NONE`]
    /// and consumes no randomness.
    pub fn decide_renovation_scope(
        &mut self,
        config: &HouseholdConfig,
        rng: &mut impl Rng,
    ) -> RenovationScope {
        if !self.renovation.is_renovating {
            self.renovation.scope = RenovationScope::NONE;
            return RenovationScope::NONE;
        }

        let scope = RenovationScope {
            heating_system: rng.random::<f64>() < config.heating_system_renovation_probability,
            insulation: rng.random::<f64>() < config.insulation_renovation_probability,
        };
        self.renovation.scope = scope;
        scope
    }
}
