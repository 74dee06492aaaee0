//! Household creation from a housing-stock distribution.
//!
//! The distribution is a CSV file with one [`HouseholdRecord`] per row and
//! a header naming the columns. A population of any size is built by
//! sampling rows with replacement, so one row may seed many households.
//!
//! Flags accept `true`/`false` in any case as well as `1`/`0`, and grades
//! accept a trailing `.0`, so files written by pandas load unchanged. An
//! empty `roof_energy_efficiency` means the property has no roof of its
//! own; an empty or missing `is_heat_pump_aware` is drawn at creation.

use std::io::Read;

use rand::Rng;
use retrofit_types::{
    BuiltForm, ConstructionYearBand, Epc, HeatingSystem, OccupantType, PropertyType,
};
use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::config::HouseholdConfig;
use crate::error::HouseholdError;
use crate::household::{Household, HouseholdParams};

/// Errors raised while building a population.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    /// Households were requested from an empty distribution.
    #[error("cannot sample {requested} households from an empty distribution")]
    EmptyDistribution {
        /// Number of households requested.
        requested: usize,
    },

    /// A sampled record could not be turned into a household.
    #[error("record {index} is invalid: {source}")]
    InvalidRecord {
        /// Position of the record in the distribution.
        index: usize,
        /// The underlying household error.
        source: HouseholdError,
    },

    /// The household configuration failed validation.
    #[error("invalid household configuration: {0}")]
    Config(HouseholdError),
}

/// One row of a housing-stock distribution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HouseholdRecord {
    /// Opaque location label.
    pub location: String,
    /// Property value in whole pounds.
    pub property_value: u64,
    /// Floor area in square metres.
    pub floor_area_sqm: f64,
    /// Whether the property has no mains gas connection.
    #[serde(deserialize_with = "flag")]
    pub off_gas_grid: bool,
    /// Construction year band, e.g. `1945-1964`.
    pub construction_year_band: ConstructionYearBand,
    /// Property type.
    pub property_type: PropertyType,
    /// Built form.
    pub built_form: BuiltForm,
    /// Installed heating system.
    pub heating_system: HeatingSystem,
    /// EPC rating.
    pub epc: Epc,
    /// Tenure of the occupying household.
    pub occupant_type: OccupantType,
    /// Solid-wall construction.
    #[serde(deserialize_with = "flag")]
    pub is_solid_wall: bool,
    /// Walls energy-efficiency grade.
    #[serde(deserialize_with = "grade")]
    pub walls_energy_efficiency: u8,
    /// Windows energy-efficiency grade.
    #[serde(deserialize_with = "grade")]
    pub windows_energy_efficiency: u8,
    /// Roof energy-efficiency grade, absent when there is no roof.
    #[serde(default, deserialize_with = "optional_grade")]
    pub roof_energy_efficiency: Option<u8>,
    /// Whether the archetype is suitable for a heat pump.
    #[serde(deserialize_with = "flag")]
    pub is_heat_pump_suitable_archetype: bool,
    /// Heat-pump awareness, drawn at creation when absent.
    #[serde(default, deserialize_with = "optional_flag")]
    pub is_heat_pump_aware: Option<bool>,
}

/// Read distribution rows from CSV with a header row.
///
/// Surrounding whitespace in headers and fields is ignored.
///
/// # Errors
///
/// Returns the [`csv::Error`] for the first row that cannot be read or
/// does not deserialize into a [`HouseholdRecord`].
pub fn read_household_records(reader: impl Read) -> Result<Vec<HouseholdRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

fn parse_grade(raw: &str) -> Option<u8> {
    raw.strip_suffix(".0").unwrap_or(raw).parse().ok()
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| D::Error::invalid_value(Unexpected::Str(&raw), &"true or false"))
}

fn optional_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(None);
    }
    parse_flag(&raw)
        .map(Some)
        .ok_or_else(|| D::Error::invalid_value(Unexpected::Str(&raw), &"true, false, or empty"))
}

fn grade<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_grade(&raw).ok_or_else(|| D::Error::invalid_value(Unexpected::Str(&raw), &"a grade 0-255"))
}

fn optional_grade<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(None);
    }
    parse_grade(&raw)
        .map(Some)
        .ok_or_else(|| D::Error::invalid_value(Unexpected::Str(&raw), &"a grade or empty"))
}

impl HouseholdRecord {
    /// Build the household parameters for this record.
    ///
    /// A missing awareness flag is drawn as Bernoulli(`heat_pump_awareness`).
    pub fn to_params(&self, heat_pump_awareness: f64, rng: &mut impl Rng) -> HouseholdParams {
        let is_heat_pump_aware = self
            .is_heat_pump_aware
            .unwrap_or_else(|| rng.random::<f64>() < heat_pump_awareness);

        HouseholdParams {
            location: self.location.clone(),
            property_value: self.property_value,
            floor_area_sqm: self.floor_area_sqm,
            off_gas_grid: self.off_gas_grid,
            construction_year_band: self.construction_year_band,
            property_type: self.property_type,
            built_form: self.built_form,
            heating_system: self.heating_system,
            epc: self.epc,
            occupant_type: self.occupant_type,
            is_solid_wall: self.is_solid_wall,
            walls_energy_efficiency: self.walls_energy_efficiency,
            windows_energy_efficiency: self.windows_energy_efficiency,
            roof_energy_efficiency: self.roof_energy_efficiency,
            is_heat_pump_suitable_archetype: self.is_heat_pump_suitable_archetype,
            is_heat_pump_aware,
        }
    }
}

/// Build `count` households by sampling `records` with replacement.
///
/// # Errors
///
/// Returns [`PopulationError::EmptyDistribution`] when `records` is empty
/// and `count > 0`, [`PopulationError::Config`] for an invalid config, and
/// [`PopulationError::InvalidRecord`] for a row that fails validation.
pub fn create_households(
    records: &[HouseholdRecord],
    count: usize,
    config: &HouseholdConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Household>, PopulationError> {
    config.validate().map_err(PopulationError::Config)?;
    if count == 0 {
        return Ok(Vec::new());
    }
    if records.is_empty() {
        return Err(PopulationError::EmptyDistribution { requested: count });
    }

    let mut households = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.random_range(0..records.len());
        let Some(record) = records.get(index) else {
            return Err(PopulationError::EmptyDistribution { requested: count });
        };
        let params = record.to_params(config.heat_pump_awareness, rng);
        let household = Household::new(params, config, rng)
            .map_err(|source| PopulationError::InvalidRecord { index, source })?;
        households.push(household);
    }

    info!(
        households = households.len(),
        distinct_records = records.len(),
        "Created household population"
    );

    Ok(households)
}
