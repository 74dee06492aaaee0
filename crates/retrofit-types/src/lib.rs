//! Shared type definitions for the household retrofit simulation.
//!
//! This crate is the single source of truth for the closed vocabularies
//! used across the workspace: property classification, heating systems and
//! fuels, envelope elements, insulation measures, and cost segments.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (property, heating, envelope, segments)
//! - [`structs`] -- Shared value structs ([`ConstructionYearBand`])

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BOILERS, BuiltForm, Element, Epc, HEAT_PUMPS, HeatingFuel, HeatingSystem, InsulationMeasure,
    InsulationSegment, OccupantType, PropertyType,
};
pub use ids::HouseholdId;
pub use structs::{ConstructionYearBand, YearBandError};
