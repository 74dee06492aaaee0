//! Configuration constants and defaults for household decision-making.
//!
//! The [`HouseholdConfig`] struct bundles every tunable of the per-agent
//! decision contract: the national Weibull calibrations, the heating share
//! of a renovation budget, the heating-system lifetime, and the scope
//! probabilities. The engine builds it from `retrofit-config.yaml` and
//! passes it explicitly into every household operation; the household
//! logic itself never falls back to a default.

use serde::Deserialize;

use crate::error::HouseholdError;
use crate::weibull::WeibullParams;

/// Shape of the GB property-value distribution.
pub const GB_PROPERTY_VALUE_WEIBULL_ALPHA: f64 = 1.61;

/// Scale of the GB property-value distribution (GBP).
pub const GB_PROPERTY_VALUE_WEIBULL_BETA: f64 = 280_000.0;

/// Shape of the GB renovation-budget distribution.
pub const GB_RENOVATION_BUDGET_WEIBULL_ALPHA: f64 = 0.55;

/// Scale of the GB renovation-budget distribution (GBP).
pub const GB_RENOVATION_BUDGET_WEIBULL_BETA: f64 = 21_994.0;

/// Configuration for household wealth, budget, and renovation decisions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HouseholdConfig {
    /// Weibull calibration of national property values.
    #[serde(default = "default_property_value_weibull")]
    pub property_value_weibull: WeibullParams,

    /// Weibull calibration of total renovation budgets.
    #[serde(default = "default_renovation_budget_weibull")]
    pub renovation_budget_weibull: WeibullParams,

    /// Share of the total renovation budget set aside for heating and
    /// energy-efficiency work (default: 0.1).
    #[serde(default = "default_heating_budget_share")]
    pub heating_budget_share: f64,

    /// Expected lifetime of a heating system in years (default: 15).
    ///
    /// A new household's system age is drawn uniformly from
    /// `0..=heating_system_lifetime_years`.
    #[serde(default = "default_heating_system_lifetime_years")]
    pub heating_system_lifetime_years: u32,

    /// Probability that a renovating household replaces its heating
    /// system (default: 0.18).
    #[serde(default = "default_heating_system_renovation_probability")]
    pub heating_system_renovation_probability: f64,

    /// Probability that a renovating household insulates (default: 0.33).
    #[serde(default = "default_insulation_renovation_probability")]
    pub insulation_renovation_probability: f64,

    /// Highest energy-efficiency grade an element can hold (default: 5).
    #[serde(default = "default_max_energy_efficiency_grade")]
    pub max_energy_efficiency_grade: u8,

    /// Probability a household is aware of heat pumps when housing-stock
    /// data does not say (default: 0.4).
    #[serde(default = "default_heat_pump_awareness")]
    pub heat_pump_awareness: f64,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            property_value_weibull: default_property_value_weibull(),
            renovation_budget_weibull: default_renovation_budget_weibull(),
            heating_budget_share: default_heating_budget_share(),
            heating_system_lifetime_years: default_heating_system_lifetime_years(),
            heating_system_renovation_probability: default_heating_system_renovation_probability(),
            insulation_renovation_probability: default_insulation_renovation_probability(),
            max_energy_efficiency_grade: default_max_energy_efficiency_grade(),
            heat_pump_awareness: default_heat_pump_awareness(),
        }
    }
}

impl HouseholdConfig {
    /// Check every parameter lies in its domain.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::InvalidWeibullParameter`] for a bad
    /// calibration and [`HouseholdError::InvalidProbability`] for a share or
    /// probability outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), HouseholdError> {
        self.property_value_weibull.validate()?;
        self.renovation_budget_weibull.validate()?;
        check_probability("heating_budget_share", self.heating_budget_share)?;
        check_probability(
            "heating_system_renovation_probability",
            self.heating_system_renovation_probability,
        )?;
        check_probability(
            "insulation_renovation_probability",
            self.insulation_renovation_probability,
        )?;
        check_probability("heat_pump_awareness", self.heat_pump_awareness)
    }
}

/// Reject anything outside `[0, 1]`, including `NaN`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), HouseholdError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(HouseholdError::InvalidProbability { name, value })
    }
}

const fn default_property_value_weibull() -> WeibullParams {
    WeibullParams {
        alpha: GB_PROPERTY_VALUE_WEIBULL_ALPHA,
        beta: GB_PROPERTY_VALUE_WEIBULL_BETA,
    }
}

const fn default_renovation_budget_weibull() -> WeibullParams {
    WeibullParams {
        alpha: GB_RENOVATION_BUDGET_WEIBULL_ALPHA,
        beta: GB_RENOVATION_BUDGET_WEIBULL_BETA,
    }
}

const fn default_heating_budget_share() -> f64 {
    0.1
}

const fn default_heating_system_lifetime_years() -> u32 {
    15
}

const fn default_heating_system_renovation_probability() -> f64 {
    0.18
}

const fn default_insulation_renovation_probability() -> f64 {
    0.33
}

const fn default_max_energy_efficiency_grade() -> u8 {
    5
}

const fn default_heat_pump_awareness() -> f64 {
    0.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HouseholdConfig::default();
        assert_eq!(cfg.heating_system_lifetime_years, 15);
        assert_eq!(cfg.max_energy_efficiency_grade, 5);
        assert!((cfg.heating_budget_share - 0.1).abs() < f64::EPSILON);
        assert!((cfg.heating_system_renovation_probability - 0.18).abs() < f64::EPSILON);
        assert!((cfg.insulation_renovation_probability - 0.33).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_probability_above_one() {
        let cfg = HouseholdConfig {
            insulation_renovation_probability: 1.2,
            ..HouseholdConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(HouseholdError::InvalidProbability {
                name: "insulation_renovation_probability",
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_calibration() {
        let cfg = HouseholdConfig {
            renovation_budget_weibull: WeibullParams {
                alpha: 0.55,
                beta: 0.0,
            },
            ..HouseholdConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(HouseholdError::InvalidWeibullParameter { name: "beta", .. })
        ));
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let yaml = "heating_budget_share: 0.2\nproperty_value_weibull:\n  alpha: 2.0\n  beta: 300000.0\n";
        let cfg: Result<HouseholdConfig, _> = serde_yml::from_str(yaml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok().unwrap_or_default();
        assert!((cfg.heating_budget_share - 0.2).abs() < f64::EPSILON);
        assert!((cfg.property_value_weibull.alpha - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.heating_system_lifetime_years, 15);
    }
}
