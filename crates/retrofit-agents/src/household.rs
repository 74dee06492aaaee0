//! Household agent state and the per-step entry point.
//!
//! A [`Household`] is built once per simulated property from an explicit
//! [`HouseholdParams`]. Its structural attributes are fixed for the run;
//! each step only rewrites the transient [`RenovationState`].
//!
//! Derived properties live next to the logic that defines them:
//! wealth and budget in [`crate::wealth`], the insulation segment in
//! [`crate::segment`], decisions in [`crate::renovation`], and quotes in
//! [`crate::insulation`].

use std::collections::BTreeMap;

use rand::Rng;
use retrofit_types::{
    BuiltForm, ConstructionYearBand, Element, Epc, HeatingFuel, HeatingSystem, HouseholdId,
    OccupantType, PropertyType,
};
use tracing::debug;

use crate::config::HouseholdConfig;
use crate::costs::InsulationCostTables;
use crate::error::HouseholdError;
use crate::renovation::{ModelContext, RenovationScope};

/// Everything needed to construct a [`Household`].
///
/// Every field is required; there are no implicit defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdParams {
    /// Opaque location label (e.g. local authority name).
    pub location: String,
    /// Property value in whole pounds.
    pub property_value: u64,
    /// Total floor area in square metres.
    pub floor_area_sqm: f64,
    /// Whether the property has no mains gas connection.
    pub off_gas_grid: bool,
    /// Construction year band.
    pub construction_year_band: ConstructionYearBand,
    /// Property type.
    pub property_type: PropertyType,
    /// Built form.
    pub built_form: BuiltForm,
    /// Installed heating system.
    pub heating_system: HeatingSystem,
    /// Energy Performance Certificate rating.
    pub epc: Epc,
    /// Tenure of the occupying household.
    pub occupant_type: OccupantType,
    /// Solid-wall (true) or cavity-wall (false) construction.
    pub is_solid_wall: bool,
    /// Walls energy-efficiency grade (0--5).
    pub walls_energy_efficiency: u8,
    /// Windows energy-efficiency grade (0--5).
    pub windows_energy_efficiency: u8,
    /// Roof energy-efficiency grade (0--5), `None` when the property has no
    /// roof of its own.
    pub roof_energy_efficiency: Option<u8>,
    /// Whether the property archetype is suitable for a heat pump.
    pub is_heat_pump_suitable_archetype: bool,
    /// Whether the household is aware of heat pumps.
    pub is_heat_pump_aware: bool,
}

/// Transient renovation outputs, overwritten every step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenovationState {
    /// Whether the household renovates this step.
    pub is_renovating: bool,
    /// Which measures are in scope (all false when not renovating).
    pub scope: RenovationScope,
    /// Sampled insulation quotes, empty unless insulation is in scope.
    pub insulation_quotes: BTreeMap<Element, u32>,
}

/// A simulated household and the property it occupies.
#[derive(Debug, Clone, PartialEq)]
pub struct Household {
    id: HouseholdId,
    location: String,
    property_value: u64,
    floor_area_sqm: f64,
    off_gas_grid: bool,
    construction_year_band: ConstructionYearBand,
    property_type: PropertyType,
    built_form: BuiltForm,
    occupant_type: OccupantType,
    is_solid_wall: bool,
    is_heat_pump_suitable_archetype: bool,
    is_heat_pump_aware: bool,
    heating_system: HeatingSystem,
    heating_system_age: u32,
    heating_functioning: bool,
    pub(crate) epc: Epc,
    pub(crate) walls_energy_efficiency: u8,
    pub(crate) windows_energy_efficiency: u8,
    pub(crate) roof_energy_efficiency: Option<u8>,
    pub(crate) renovation: RenovationState,
}

impl Household {
    /// Create a household from explicit parameters.
    ///
    /// The id and the heating system age are both drawn from `rng`; the age
    /// is uniform over `0..=config.heating_system_lifetime_years`.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::InvalidGrade`] if any envelope grade exceeds
    /// `config.max_energy_efficiency_grade`.
    pub fn new(
        params: HouseholdParams,
        config: &HouseholdConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, HouseholdError> {
        let max = config.max_energy_efficiency_grade;
        check_grade(Element::Walls, params.walls_energy_efficiency, max)?;
        check_grade(Element::Glazing, params.windows_energy_efficiency, max)?;
        if let Some(roof) = params.roof_energy_efficiency {
            check_grade(Element::Roof, roof, max)?;
        }

        let id = HouseholdId::from_random_bytes(rng.random());
        let heating_system_age = rng.random_range(0..=config.heating_system_lifetime_years);

        Ok(Self {
            id,
            location: params.location,
            property_value: params.property_value,
            floor_area_sqm: params.floor_area_sqm,
            off_gas_grid: params.off_gas_grid,
            construction_year_band: params.construction_year_band,
            property_type: params.property_type,
            built_form: params.built_form,
            occupant_type: params.occupant_type,
            is_solid_wall: params.is_solid_wall,
            is_heat_pump_suitable_archetype: params.is_heat_pump_suitable_archetype,
            is_heat_pump_aware: params.is_heat_pump_aware,
            heating_system: params.heating_system,
            heating_system_age,
            heating_functioning: true,
            epc: params.epc,
            walls_energy_efficiency: params.walls_energy_efficiency,
            windows_energy_efficiency: params.windows_energy_efficiency,
            roof_energy_efficiency: params.roof_energy_efficiency,
            renovation: RenovationState::default(),
        })
    }

    /// Run one simulation step.
    ///
    /// Rolls for renovation; a renovating household then picks its scope,
    /// and when insulation is in scope, quotes every upgradable element.
    /// Quotes are recorded on the household but envelope grades are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Propagates invalid model parameters, an unclassifiable property, or
    /// a cost-table gap for this household's segment.
    pub fn step<M: ModelContext + ?Sized>(
        &mut self,
        model: &M,
        config: &HouseholdConfig,
        cost_tables: &InsulationCostTables,
        rng: &mut impl Rng,
    ) -> Result<&RenovationState, HouseholdError> {
        self.renovation = RenovationState::default();

        if !self.evaluate_renovation(model, rng)? {
            return Ok(&self.renovation);
        }

        let scope = self.decide_renovation_scope(config, rng);
        if scope.insulation {
            let elements = self.upgradable_insulation_elements(config);
            self.renovation.insulation_quotes =
                self.quote_insulation_elements(elements, cost_tables, rng)?;
        }

        debug!(
            household_id = %self.id,
            heating_system = scope.heating_system,
            insulation = scope.insulation,
            quoted_elements = self.renovation.insulation_quotes.len(),
            "Household renovating"
        );

        Ok(&self.renovation)
    }

    /// Unique identifier.
    pub const fn id(&self) -> HouseholdId {
        self.id
    }

    /// Opaque location label.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Property value in whole pounds.
    pub const fn property_value(&self) -> u64 {
        self.property_value
    }

    /// Floor area in square metres.
    pub const fn floor_area_sqm(&self) -> f64 {
        self.floor_area_sqm
    }

    /// Whether the property has no mains gas connection.
    pub const fn off_gas_grid(&self) -> bool {
        self.off_gas_grid
    }

    /// Construction year band.
    pub const fn construction_year_band(&self) -> ConstructionYearBand {
        self.construction_year_band
    }

    /// Property type.
    pub const fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Built form.
    pub const fn built_form(&self) -> BuiltForm {
        self.built_form
    }

    /// Tenure of the occupying household.
    pub const fn occupant_type(&self) -> OccupantType {
        self.occupant_type
    }

    /// Solid-wall (true) or cavity-wall (false) construction.
    pub const fn is_solid_wall(&self) -> bool {
        self.is_solid_wall
    }

    /// Whether the property archetype is suitable for a heat pump.
    pub const fn is_heat_pump_suitable_archetype(&self) -> bool {
        self.is_heat_pump_suitable_archetype
    }

    /// Whether the household is aware of heat pumps.
    pub const fn is_heat_pump_aware(&self) -> bool {
        self.is_heat_pump_aware
    }

    /// Installed heating system.
    pub const fn heating_system(&self) -> HeatingSystem {
        self.heating_system
    }

    /// Fuel of the installed heating system.
    pub const fn heating_fuel(&self) -> HeatingFuel {
        self.heating_system.fuel()
    }

    /// Age of the heating system in years, fixed at creation.
    pub const fn heating_system_age(&self) -> u32 {
        self.heating_system_age
    }

    /// Whether the heating system is working.
    pub const fn heating_functioning(&self) -> bool {
        self.heating_functioning
    }

    /// Energy Performance Certificate rating.
    pub const fn epc(&self) -> Epc {
        self.epc
    }

    /// Walls energy-efficiency grade.
    pub const fn walls_energy_efficiency(&self) -> u8 {
        self.walls_energy_efficiency
    }

    /// Windows energy-efficiency grade.
    pub const fn windows_energy_efficiency(&self) -> u8 {
        self.windows_energy_efficiency
    }

    /// Roof energy-efficiency grade, `None` when there is no roof.
    pub const fn roof_energy_efficiency(&self) -> Option<u8> {
        self.roof_energy_efficiency
    }

    /// Whether the last step decided to renovate.
    pub const fn is_renovating(&self) -> bool {
        self.renovation.is_renovating
    }

    /// Outputs of the last step.
    pub const fn renovation(&self) -> &RenovationState {
        &self.renovation
    }
}

const fn check_grade(element: Element, grade: u8, max: u8) -> Result<(), HouseholdError> {
    if grade > max {
        return Err(HouseholdError::InvalidGrade {
            element,
            grade,
            max,
        });
    }
    Ok(())
}

/// Shared fixtures for unit tests across the crate.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use chrono::TimeDelta;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    /// Minimal model context with fixed values.
    pub(crate) struct FixedModel {
        pub(crate) step_interval: TimeDelta,
        pub(crate) annual_renovation_rate: f64,
    }

    impl ModelContext for FixedModel {
        fn step_interval(&self) -> TimeDelta {
            self.step_interval
        }

        fn annual_renovation_rate(&self) -> f64 {
            self.annual_renovation_rate
        }
    }

    /// Mid-terrace, 82 sqm, cavity wall, grades 3/3/3, worth 264,000.
    pub(crate) fn params() -> HouseholdParams {
        HouseholdParams {
            location: String::from("Test Location"),
            property_value: 264_000,
            floor_area_sqm: 82.0,
            off_gas_grid: false,
            construction_year_band: ConstructionYearBand::new(1919, 1944).unwrap(),
            property_type: PropertyType::House,
            built_form: BuiltForm::MidTerrace,
            heating_system: HeatingSystem::BoilerGas,
            epc: Epc::D,
            occupant_type: OccupantType::OwnerOccupier,
            is_solid_wall: false,
            walls_energy_efficiency: 3,
            windows_energy_efficiency: 3,
            roof_energy_efficiency: Some(3),
            is_heat_pump_suitable_archetype: true,
            is_heat_pump_aware: true,
        }
    }

    pub(crate) fn household_with(params: HouseholdParams) -> Household {
        let mut rng = SmallRng::seed_from_u64(0);
        Household::new(params, &HouseholdConfig::default(), &mut rng).unwrap()
    }

    pub(crate) fn household() -> Household {
        household_with(params())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::fixtures::{FixedModel, household, params};
    use super::*;

    #[test]
    fn create_household_keeps_attributes() {
        let mut rng = SmallRng::seed_from_u64(11);
        let config = HouseholdConfig::default();
        let household = Household::new(
            HouseholdParams {
                location: String::from("London"),
                property_value: 400_000,
                floor_area_sqm: 100.0,
                heating_system: HeatingSystem::BoilerElectric,
                epc: Epc::C,
                occupant_type: OccupantType::RenterPrivate,
                walls_energy_efficiency: 4,
                windows_energy_efficiency: 4,
                roof_energy_efficiency: Some(2),
                ..params()
            },
            &config,
            &mut rng,
        )
        .unwrap();

        assert_eq!(household.location(), "London");
        assert_eq!(household.property_value(), 400_000);
        assert!(!household.off_gas_grid());
        assert_eq!(household.property_type(), PropertyType::House);
        assert_eq!(household.built_form(), BuiltForm::MidTerrace);
        assert_eq!(household.heating_system(), HeatingSystem::BoilerElectric);
        assert_eq!(household.heating_fuel(), HeatingFuel::Electricity);
        assert!(household.heating_system_age() <= config.heating_system_lifetime_years);
        assert_eq!(household.epc(), Epc::C);
        assert_eq!(household.occupant_type(), OccupantType::RenterPrivate);
        assert!(!household.is_solid_wall());
        assert_eq!(household.walls_energy_efficiency(), 4);
        assert_eq!(household.windows_energy_efficiency(), 4);
        assert_eq!(household.roof_energy_efficiency(), Some(2));
        assert!(household.is_heat_pump_suitable_archetype());
        assert!(household.is_heat_pump_aware());
        assert!(household.heating_functioning());
        assert!(!household.is_renovating());
    }

    #[test]
    fn heating_system_age_spans_lifetime() {
        let mut rng = SmallRng::seed_from_u64(5);
        let config = HouseholdConfig::default();
        let ages: Vec<u32> = (0..500)
            .map(|_| {
                Household::new(params(), &config, &mut rng)
                    .unwrap()
                    .heating_system_age()
            })
            .collect();
        assert!(ages.iter().all(|&age| age <= 15));
        assert!(ages.contains(&0));
        assert!(ages.contains(&15));
    }

    #[test]
    fn ids_follow_the_seed() {
        let config = HouseholdConfig::default();
        let build = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let first = Household::new(params(), &config, &mut rng).unwrap();
            let second = Household::new(params(), &config, &mut rng).unwrap();
            (first.id(), second.id())
        };
        let (a, b) = build(3);
        assert_eq!(build(3), (a, b));
        assert_ne!(a, b);
        assert_ne!(build(4).0, a);
    }

    #[test]
    fn grade_above_maximum_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let result = Household::new(
            HouseholdParams {
                roof_energy_efficiency: Some(6),
                ..params()
            },
            &HouseholdConfig::default(),
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(HouseholdError::InvalidGrade {
                element: Element::Roof,
                grade: 6,
                max: 5
            })
        ));
    }

    #[test]
    fn step_without_renovation_leaves_empty_outputs() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut household = household();
        let model = FixedModel {
            step_interval: TimeDelta::days(1),
            annual_renovation_rate: 0.0,
        };
        let state = household
            .step(
                &model,
                &HouseholdConfig::default(),
                &InsulationCostTables::default(),
                &mut rng,
            )
            .unwrap();
        assert!(!state.is_renovating);
        assert_eq!(state.scope, RenovationScope::NONE);
        assert!(state.insulation_quotes.is_empty());
    }

    #[test]
    fn step_with_insulation_quotes_every_upgradable_element() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut household = household();
        let model = FixedModel {
            step_interval: TimeDelta::days(365),
            annual_renovation_rate: 1.0,
        };
        let config = HouseholdConfig {
            insulation_renovation_probability: 1.0,
            ..HouseholdConfig::default()
        };
        let tables = InsulationCostTables::default();

        let state = household.step(&model, &config, &tables, &mut rng).unwrap();
        assert!(state.is_renovating);
        assert!(state.scope.insulation);
        assert_eq!(
            state.insulation_quotes.keys().copied().collect::<Vec<_>>(),
            vec![Element::Walls, Element::Glazing, Element::Roof]
        );
        // Grades are not applied by the step.
        assert_eq!(household.walls_energy_efficiency(), 3);
        assert_eq!(household.roof_energy_efficiency(), Some(3));
    }

    #[test]
    fn step_resets_previous_outputs() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut household = household();
        let config = HouseholdConfig {
            insulation_renovation_probability: 1.0,
            ..HouseholdConfig::default()
        };
        let tables = InsulationCostTables::default();
        let always = FixedModel {
            step_interval: TimeDelta::days(365),
            annual_renovation_rate: 1.0,
        };
        let never = FixedModel {
            step_interval: TimeDelta::days(365),
            annual_renovation_rate: 0.0,
        };

        household.step(&always, &config, &tables, &mut rng).unwrap();
        assert!(household.is_renovating());
        household.step(&never, &config, &tables, &mut rng).unwrap();
        assert!(!household.is_renovating());
        assert!(household.renovation().insulation_quotes.is_empty());
    }
}
