//! Insulation segmentation: the cost-table key for a household.
//!
//! Rules are evaluated in order, property type first:
//!
//! | property type | built form | small below (sqm) |
//! |---|---|---|
//! | flat | any | 54 |
//! | house | mid-terrace | 76 |
//! | house | semi-detached, end-terrace | 80 |
//! | house | detached | 117 |
//! | bungalow | any | single segment |
//!
//! A floor area exactly at a threshold is "large".

use retrofit_types::{BuiltForm, InsulationSegment, PropertyType};

use crate::error::HouseholdError;
use crate::household::Household;

/// Flats below this floor area are small.
pub const FLAT_THRESHOLD_SQM: f64 = 54.0;

/// Mid-terrace houses below this floor area are small.
pub const MID_TERRACE_THRESHOLD_SQM: f64 = 76.0;

/// Semi-detached and end-terrace houses below this floor area are small.
pub const SEMI_END_TERRACE_THRESHOLD_SQM: f64 = 80.0;

/// Detached houses below this floor area are small.
pub const DETACHED_THRESHOLD_SQM: f64 = 117.0;

/// Classify a property into its insulation segment.
///
/// # Errors
///
/// Returns [`HouseholdError::UnclassifiedProperty`] when the floor area is
/// not a positive finite number, since no size rule can place it.
pub const fn classify(
    property_type: PropertyType,
    built_form: BuiltForm,
    floor_area_sqm: f64,
) -> Result<InsulationSegment, HouseholdError> {
    if !floor_area_sqm.is_finite() || floor_area_sqm <= 0.0 {
        return Err(HouseholdError::UnclassifiedProperty {
            property_type,
            built_form,
            floor_area_sqm,
        });
    }

    let segment = match (property_type, built_form) {
        (PropertyType::Flat, _) => by_size(
            floor_area_sqm,
            FLAT_THRESHOLD_SQM,
            InsulationSegment::SmallFlat,
            InsulationSegment::LargeFlat,
        ),
        (PropertyType::House, BuiltForm::MidTerrace) => by_size(
            floor_area_sqm,
            MID_TERRACE_THRESHOLD_SQM,
            InsulationSegment::SmallMidTerraceHouse,
            InsulationSegment::LargeMidTerraceHouse,
        ),
        (PropertyType::House, BuiltForm::SemiDetached | BuiltForm::EndTerrace) => by_size(
            floor_area_sqm,
            SEMI_END_TERRACE_THRESHOLD_SQM,
            InsulationSegment::SmallSemiEndTerraceHouse,
            InsulationSegment::LargeSemiEndTerraceHouse,
        ),
        (PropertyType::House, BuiltForm::Detached) => by_size(
            floor_area_sqm,
            DETACHED_THRESHOLD_SQM,
            InsulationSegment::SmallDetachedHouse,
            InsulationSegment::LargeDetachedHouse,
        ),
        (PropertyType::Bungalow, _) => InsulationSegment::Bungalow,
    };

    Ok(segment)
}

const fn by_size(
    floor_area_sqm: f64,
    threshold_sqm: f64,
    small: InsulationSegment,
    large: InsulationSegment,
) -> InsulationSegment {
    if floor_area_sqm < threshold_sqm { small } else { large }
}

impl Household {
    /// The household's insulation segment.
    ///
    /// # Errors
    ///
    /// See [`classify`].
    pub fn insulation_segment(&self) -> Result<InsulationSegment, HouseholdError> {
        classify(self.property_type(), self.built_form(), self.floor_area_sqm())
    }
}
