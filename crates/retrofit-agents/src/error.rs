//! Error types for the retrofit-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking
//! or substituting a default. A household step that hits one of these
//! errors reports it to the caller; nothing is masked as a zero cost or a
//! missing segment.

use retrofit_types::{BuiltForm, Element, InsulationMeasure, InsulationSegment, PropertyType};

/// Errors that can occur during household operations.
#[derive(Debug, thiserror::Error)]
pub enum HouseholdError {
    /// A Weibull shape or scale parameter was not a positive finite number.
    #[error("invalid Weibull parameter {name}: {value} (must be positive and finite)")]
    InvalidWeibullParameter {
        /// Which parameter was rejected (`alpha` or `beta`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A value passed to the forward Weibull transform was negative or not finite.
    #[error("invalid Weibull input value: {value} (must be non-negative and finite)")]
    InvalidWeibullValue {
        /// The rejected value.
        value: f64,
    },

    /// A percentile passed to the inverse Weibull transform was outside `[0, 1]`.
    #[error("percentile out of range: {percentile} (must be within [0, 1])")]
    PercentileOutOfRange {
        /// The rejected percentile.
        percentile: f64,
    },

    /// The household's property value is zero, so it has no wealth percentile.
    #[error("property value must be positive, got {value}")]
    NonPositivePropertyValue {
        /// The rejected property value.
        value: u64,
    },

    /// The property matched none of the insulation segmentation rules.
    #[error("no insulation segment for {property_type:?} / {built_form:?} with floor area {floor_area_sqm} sqm")]
    UnclassifiedProperty {
        /// Property type of the household.
        property_type: PropertyType,
        /// Built form of the household.
        built_form: BuiltForm,
        /// Floor area of the household in square metres.
        floor_area_sqm: f64,
    },

    /// A cost table has no entry for the requested segment.
    #[error("no {measure:?} cost range configured for segment {segment:?}")]
    MissingCostEntry {
        /// The measure whose table was consulted.
        measure: InsulationMeasure,
        /// The segment that was not found.
        segment: InsulationSegment,
    },

    /// A cost range has its lower bound above its upper bound.
    #[error("invalid cost range [{low}, {high}]: low exceeds high")]
    InvalidCostRange {
        /// Lower bound.
        low: u32,
        /// Upper bound.
        high: u32,
    },

    /// An envelope grade exceeds the maximum energy-efficiency grade.
    #[error("{element:?} energy efficiency grade {grade} exceeds maximum {max}")]
    InvalidGrade {
        /// The element carrying the grade.
        element: Element,
        /// The rejected grade.
        grade: u8,
        /// The configured maximum grade.
        max: u8,
    },

    /// A probability or rate was outside `[0, 1]` or not finite.
    #[error("invalid probability {name}: {value} (must be within [0, 1])")]
    InvalidProbability {
        /// Which probability was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The model's step interval is zero or negative.
    #[error("step interval must be positive, got {milliseconds}ms")]
    NonPositiveStepInterval {
        /// The rejected interval in milliseconds.
        milliseconds: i64,
    },
}
