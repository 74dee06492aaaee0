//! Enumeration types for the household retrofit simulation.
//!
//! Property classification, heating, envelope elements, and the insulation
//! segments used to key empirical cost data. Everything here is a closed
//! set; string forms are `snake_case` so housing-stock records can name
//! them directly (`"mid_terrace"`, `"boiler_gas"`).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// The broad type of a dwelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// A house of any built form.
    House,
    /// A self-contained unit within a larger building.
    Flat,
    /// A single-storey dwelling.
    Bungalow,
}

/// How a dwelling is attached to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltForm {
    /// Attached on both sides.
    MidTerrace,
    /// Attached on one side to a single neighbour.
    SemiDetached,
    /// Not attached to any neighbour.
    Detached,
    /// The last dwelling of a terrace, attached on one side.
    EndTerrace,
}

/// Tenure of the occupying household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupantType {
    /// The household owns the property it lives in.
    OwnerOccupier,
    /// Rented from a private landlord.
    RenterPrivate,
    /// Rented from a council or housing association.
    RenterSocial,
}

/// Energy Performance Certificate rating, best (`A`) to worst (`G`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Epc {
    /// Most efficient band.
    A,
    /// Band B.
    B,
    /// Band C.
    C,
    /// Band D.
    D,
    /// Band E.
    E,
    /// Band F.
    F,
    /// Least efficient band.
    G,
}

impl Epc {
    /// The rating one band better than `self`. `A` stays `A`.
    pub const fn improved(self) -> Self {
        match self {
            Self::A | Self::B => Self::A,
            Self::C => Self::B,
            Self::D => Self::C,
            Self::E => Self::D,
            Self::F => Self::E,
            Self::G => Self::F,
        }
    }
}

// ---------------------------------------------------------------------------
// Heating
// ---------------------------------------------------------------------------

/// The primary space-heating system installed in a dwelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingSystem {
    /// Mains gas boiler.
    BoilerGas,
    /// Heating oil boiler.
    BoilerOil,
    /// Electric boiler.
    BoilerElectric,
    /// Air-source heat pump.
    HeatPumpAirSource,
    /// Ground-source heat pump.
    HeatPumpGroundSource,
}

/// All boiler-type heating systems.
pub const BOILERS: [HeatingSystem; 3] = [
    HeatingSystem::BoilerGas,
    HeatingSystem::BoilerOil,
    HeatingSystem::BoilerElectric,
];

/// All heat-pump heating systems.
pub const HEAT_PUMPS: [HeatingSystem; 2] = [
    HeatingSystem::HeatPumpAirSource,
    HeatingSystem::HeatPumpGroundSource,
];

impl HeatingSystem {
    /// Every heating system, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::BoilerGas,
        Self::BoilerOil,
        Self::BoilerElectric,
        Self::HeatPumpAirSource,
        Self::HeatPumpGroundSource,
    ];

    /// The fuel this system burns or draws.
    pub const fn fuel(self) -> HeatingFuel {
        match self {
            Self::BoilerGas => HeatingFuel::Gas,
            Self::BoilerOil => HeatingFuel::Oil,
            Self::BoilerElectric | Self::HeatPumpAirSource | Self::HeatPumpGroundSource => {
                HeatingFuel::Electricity
            }
        }
    }

    /// Whether this system is a heat pump.
    pub const fn is_heat_pump(self) -> bool {
        matches!(self, Self::HeatPumpAirSource | Self::HeatPumpGroundSource)
    }
}

/// Fuel supplying a heating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingFuel {
    /// Mains gas.
    Gas,
    /// Grid electricity.
    Electricity,
    /// Heating oil.
    Oil,
}

// ---------------------------------------------------------------------------
// Envelope and insulation
// ---------------------------------------------------------------------------

/// A building element whose thermal efficiency can be upgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// External walls.
    Walls,
    /// Windows.
    Glazing,
    /// Roof or loft.
    Roof,
}

impl Element {
    /// Every element, in declaration order.
    pub const ALL: [Self; 3] = [Self::Walls, Self::Glazing, Self::Roof];
}

/// An insulation measure with its own empirical cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulationMeasure {
    /// Cavity-wall fill, for cavity-wall construction.
    CavityWall,
    /// Internal-wall insulation, for solid-wall construction.
    InternalWall,
    /// uPVC double glazing.
    DoubleGlazing,
    /// Loft insulation between joists.
    LoftInsulation,
}

impl InsulationMeasure {
    /// The measure that upgrades `element`.
    ///
    /// Walls depend on construction: solid walls take internal insulation,
    /// cavity walls take cavity fill.
    pub const fn for_element(element: Element, is_solid_wall: bool) -> Self {
        match element {
            Element::Walls if is_solid_wall => Self::InternalWall,
            Element::Walls => Self::CavityWall,
            Element::Glazing => Self::DoubleGlazing,
            Element::Roof => Self::LoftInsulation,
        }
    }
}

/// Cost-data segment: property type x built form x size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulationSegment {
    /// Flat under 54 m2.
    SmallFlat,
    /// Flat of 54 m2 or more.
    LargeFlat,
    /// Mid-terrace house under 76 m2.
    SmallMidTerraceHouse,
    /// Mid-terrace house of 76 m2 or more.
    LargeMidTerraceHouse,
    /// Semi-detached or end-terrace house under 80 m2.
    SmallSemiEndTerraceHouse,
    /// Semi-detached or end-terrace house of 80 m2 or more.
    LargeSemiEndTerraceHouse,
    /// Detached house under 117 m2.
    SmallDetachedHouse,
    /// Detached house of 117 m2 or more.
    LargeDetachedHouse,
    /// Any bungalow.
    Bungalow,
}

impl InsulationSegment {
    /// Every segment, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::SmallFlat,
        Self::LargeFlat,
        Self::SmallMidTerraceHouse,
        Self::LargeMidTerraceHouse,
        Self::SmallSemiEndTerraceHouse,
        Self::LargeSemiEndTerraceHouse,
        Self::SmallDetachedHouse,
        Self::LargeDetachedHouse,
        Self::Bungalow,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_and_oil_boilers_map_to_their_fuel() {
        assert_eq!(HeatingSystem::BoilerGas.fuel(), HeatingFuel::Gas);
        assert_eq!(HeatingSystem::BoilerOil.fuel(), HeatingFuel::Oil);
    }

    #[test]
    fn electric_systems_map_to_electricity() {
        for system in [
            HeatingSystem::BoilerElectric,
            HeatingSystem::HeatPumpAirSource,
            HeatingSystem::HeatPumpGroundSource,
        ] {
            assert_eq!(system.fuel(), HeatingFuel::Electricity);
        }
    }

    #[test]
    fn boiler_and_heat_pump_groups_partition_all_systems() {
        for system in HeatingSystem::ALL {
            assert_ne!(BOILERS.contains(&system), HEAT_PUMPS.contains(&system));
            assert_eq!(system.is_heat_pump(), HEAT_PUMPS.contains(&system));
        }
    }

    #[test]
    fn epc_improves_one_band_and_saturates() {
        assert_eq!(Epc::D.improved(), Epc::C);
        assert_eq!(Epc::G.improved(), Epc::F);
        assert_eq!(Epc::B.improved(), Epc::A);
        assert_eq!(Epc::A.improved(), Epc::A);
    }

    #[test]
    fn wall_measure_depends_on_construction() {
        assert_eq!(
            InsulationMeasure::for_element(Element::Walls, true),
            InsulationMeasure::InternalWall
        );
        assert_eq!(
            InsulationMeasure::for_element(Element::Walls, false),
            InsulationMeasure::CavityWall
        );
        assert_eq!(
            InsulationMeasure::for_element(Element::Roof, true),
            InsulationMeasure::LoftInsulation
        );
        assert_eq!(
            InsulationMeasure::for_element(Element::Glazing, false),
            InsulationMeasure::DoubleGlazing
        );
    }

    #[test]
    fn snake_case_serialization() {
        let json = serde_json::to_string(&BuiltForm::MidTerrace).ok();
        assert_eq!(json.as_deref(), Some("\"mid_terrace\""));
        let system: Result<HeatingSystem, _> = serde_json::from_str("\"heat_pump_air_source\"");
        assert_eq!(system.ok(), Some(HeatingSystem::HeatPumpAirSource));
        let epc: Result<Epc, _> = serde_json::from_str("\"C\"");
        assert_eq!(epc.ok(), Some(Epc::C));
    }
}
