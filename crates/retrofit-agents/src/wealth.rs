//! Wealth percentile and heating renovation budget.
//!
//! A household's wealth is proxied by where its property value sits in the
//! national property-value distribution. That percentile is then read off
//! an independent renovation-budget distribution, and only the heating
//! share of the result is available for heating and insulation work.

use crate::config::HouseholdConfig;
use crate::error::HouseholdError;
use crate::household::Household;

impl Household {
    /// Percentile of the property value in the national distribution.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::NonPositivePropertyValue`] for a zero
    /// property value, or a Weibull error for a bad calibration.
    pub fn wealth_percentile(&self, config: &HouseholdConfig) -> Result<f64, HouseholdError> {
        let value = self.property_value();
        if value == 0 {
            return Err(HouseholdError::NonPositivePropertyValue { value });
        }
        #[allow(clippy::cast_precision_loss)]
        let value = value as f64;
        config.property_value_weibull.percentile(value)
    }

    /// Budget in pounds available for heating and insulation renovation.
    ///
    /// # Errors
    ///
    /// Propagates [`Household::wealth_percentile`] errors and rejects a
    /// heating budget share outside `[0, 1]`.
    pub fn renovation_budget(&self, config: &HouseholdConfig) -> Result<f64, HouseholdError> {
        crate::config::check_probability("heating_budget_share", config.heating_budget_share)?;
        let percentile = self.wealth_percentile(config)?;
        let total = config.renovation_budget_weibull.value(percentile)?;
        Ok(total * config.heating_budget_share)
    }
}
