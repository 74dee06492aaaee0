//! Empirical insulation cost ranges keyed by segment and measure.
//!
//! Default ranges come from the BEIS report "What does it cost to retrofit
//! homes?". Every range is a closed interval of whole pounds; a quote is a
//! uniform draw from it. A segment missing from a table is a configuration
//! error, never a zero-cost quote.

use std::collections::BTreeMap;

use rand::Rng;
use retrofit_types::{InsulationMeasure, InsulationSegment};
use serde::Deserialize;

use crate::error::HouseholdError;

/// Closed interval `[low, high]` of whole-pound costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "[u32; 2]")]
pub struct CostRange {
    low: u32,
    high: u32,
}

impl CostRange {
    /// Create a range from its inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::InvalidCostRange`] if `low > high`.
    pub const fn new(low: u32, high: u32) -> Result<Self, HouseholdError> {
        if low > high {
            return Err(HouseholdError::InvalidCostRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Inclusive lower bound.
    pub const fn low(self) -> u32 {
        self.low
    }

    /// Inclusive upper bound.
    pub const fn high(self) -> u32 {
        self.high
    }

    /// Draw a cost uniformly from the range, both bounds included.
    pub fn sample(self, rng: &mut impl Rng) -> u32 {
        rng.random_range(self.low..=self.high)
    }
}

impl TryFrom<[u32; 2]> for CostRange {
    type Error = HouseholdError;

    fn try_from([low, high]: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

/// Cost ranges for one measure, keyed by segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CostTable(BTreeMap<InsulationSegment, CostRange>);

impl CostTable {
    /// Create a table from `(segment, range)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (InsulationSegment, CostRange)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Range for `segment`, if configured.
    pub fn get(&self, segment: InsulationSegment) -> Option<CostRange> {
        self.0.get(&segment).copied()
    }

    /// Number of configured segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The four cost tables used to price insulation quotes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InsulationCostTables {
    /// Cavity-wall fill.
    #[serde(default = "default_cavity_wall")]
    pub cavity_wall: CostTable,

    /// Internal-wall insulation.
    #[serde(default = "default_internal_wall")]
    pub internal_wall: CostTable,

    /// uPVC double glazing.
    #[serde(default = "default_double_glazing")]
    pub double_glazing: CostTable,

    /// Loft insulation between joists.
    #[serde(default = "default_loft_insulation")]
    pub loft_insulation: CostTable,
}

impl Default for InsulationCostTables {
    fn default() -> Self {
        Self {
            cavity_wall: default_cavity_wall(),
            internal_wall: default_internal_wall(),
            double_glazing: default_double_glazing(),
            loft_insulation: default_loft_insulation(),
        }
    }
}

impl InsulationCostTables {
    /// The table pricing `measure`.
    pub const fn table(&self, measure: InsulationMeasure) -> &CostTable {
        match measure {
            InsulationMeasure::CavityWall => &self.cavity_wall,
            InsulationMeasure::InternalWall => &self.internal_wall,
            InsulationMeasure::DoubleGlazing => &self.double_glazing,
            InsulationMeasure::LoftInsulation => &self.loft_insulation,
        }
    }

    /// Cost range for `measure` in `segment`.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::MissingCostEntry`] if the segment has no
    /// entry in that measure's table.
    pub fn range(
        &self,
        measure: InsulationMeasure,
        segment: InsulationSegment,
    ) -> Result<CostRange, HouseholdError> {
        self.table(measure)
            .get(segment)
            .ok_or(HouseholdError::MissingCostEntry { measure, segment })
    }

    /// Sample a cost for `measure` in `segment`.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::MissingCostEntry`] if the segment has no
    /// entry in that measure's table.
    pub fn quote(
        &self,
        measure: InsulationMeasure,
        segment: InsulationSegment,
        rng: &mut impl Rng,
    ) -> Result<u32, HouseholdError> {
        Ok(self.range(measure, segment)?.sample(rng))
    }
}

/// Build a table from literal bounds in [`InsulationSegment::ALL`] order.
fn table_from_bounds(bounds: [(u32, u32); 9]) -> CostTable {
    CostTable::new(
        InsulationSegment::ALL
            .into_iter()
            .zip(bounds)
            .map(|(segment, (low, high))| (segment, CostRange { low, high })),
    )
}

fn default_cavity_wall() -> CostTable {
    table_from_bounds([
        (300, 630),
        (350, 640),
        (350, 640),
        (450, 670),
        (480, 660),
        (600, 690),
        (550, 800),
        (750, 1_200),
        (500, 650),
    ])
}

fn default_internal_wall() -> CostTable {
    table_from_bounds([
        (2_500, 3_000),
        (3_000, 4_000),
        (3_000, 5_000),
        (4_000, 4_000),
        (5_000, 10_400),
        (6_000, 8_000),
        (6_600, 8_000),
        (7_000, 11_600),
        (5_600, 7_000),
    ])
}

fn default_double_glazing() -> CostTable {
    table_from_bounds([
        (1_200, 3_000),
        (3_000, 4_200),
        (3_200, 5_000),
        (4_800, 5_500),
        (4_800, 7_000),
        (6_000, 8_000),
        (5_000, 7_000),
        (7_000, 10_000),
        (5_800, 8_000),
    ])
}

fn default_loft_insulation() -> CostTable {
    table_from_bounds([
        (180, 580),
        (235, 590),
        (180, 600),
        (200, 645),
        (180, 610),
        (210, 650),
        (220, 750),
        (300, 955),
        (430, 900),
    ])
}
