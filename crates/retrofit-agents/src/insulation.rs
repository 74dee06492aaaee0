//! Insulation quoting, choice, and installation.
//!
//! [`Household::step`] only goes as far as quoting. Choosing among quotes
//! and installing the chosen elements are left to whatever consumes the
//! quotes downstream.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use retrofit_types::{Element, InsulationMeasure};

use crate::config::HouseholdConfig;
use crate::costs::InsulationCostTables;
use crate::error::HouseholdError;
use crate::household::Household;

impl Household {
    /// Current grade of `element`, `None` when the property has no such
    /// element (a roofless flat).
    pub const fn element_grade(&self, element: Element) -> Option<u8> {
        match element {
            Element::Walls => Some(self.walls_energy_efficiency),
            Element::Glazing => Some(self.windows_energy_efficiency),
            Element::Roof => self.roof_energy_efficiency,
        }
    }

    /// Elements whose grade is strictly below the maximum.
    pub fn upgradable_insulation_elements(&self, config: &HouseholdConfig) -> BTreeSet<Element> {
        Element::ALL
            .into_iter()
            .filter(|&element| {
                self.element_grade(element)
                    .is_some_and(|grade| grade < config.max_energy_efficiency_grade)
            })
            .collect()
    }

    /// The measure that upgrades `element` on this property.
    pub const fn insulation_measure(&self, element: Element) -> InsulationMeasure {
        InsulationMeasure::for_element(element, self.is_solid_wall())
    }

    /// Sample a cost for each requested element.
    ///
    /// # Errors
    ///
    /// Returns [`HouseholdError::UnclassifiedProperty`] if the property has
    /// no segment and [`HouseholdError::MissingCostEntry`] if a table lacks
    /// the segment.
    pub fn quote_insulation_elements(
        &self,
        elements: impl IntoIterator<Item = Element>,
        cost_tables: &InsulationCostTables,
        rng: &mut impl Rng,
    ) -> Result<BTreeMap<Element, u32>, HouseholdError> {
        let segment = self.insulation_segment()?;
        elements
            .into_iter()
            .map(|element| {
                let measure = self.insulation_measure(element);
                Ok((element, cost_tables.quote(measure, segment, rng)?))
            })
            .collect()
    }

    /// Install the quoted elements.
    ///
    /// Each element is raised to the maximum grade and the EPC improves
    /// one band per element, stopping at A.
    pub fn install_insulation_elements(
        &mut self,
        quotes: &BTreeMap<Element, u32>,
        config: &HouseholdConfig,
    ) {
        let max = config.max_energy_efficiency_grade;
        for &element in quotes.keys() {
            match element {
                Element::Walls => self.walls_energy_efficiency = max,
                Element::Glazing => self.windows_energy_efficiency = max,
                Element::Roof => self.roof_energy_efficiency = Some(max),
            }
            self.epc = self.epc.improved();
        }
    }
}

/// The `n` cheapest quoted elements, ties broken by element order.
pub fn choose_insulation_elements(
    quotes: &BTreeMap<Element, u32>,
    n: usize,
) -> BTreeMap<Element, u32> {
    let mut ranked: Vec<(Element, u32)> = quotes.iter().map(|(&e, &c)| (e, c)).collect();
    ranked.sort_by_key(|&(element, cost)| (cost, element));
    ranked.into_iter().take(n).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use retrofit_types::{Epc, InsulationSegment};

    use super::*;
    use crate::household::HouseholdParams;
    use crate::household::fixtures::{household, household_with, params};

    #[test]
    fn grade_five_excluded_grade_four_included() {
        let config = HouseholdConfig::default();
        let household = household_with(HouseholdParams {
            walls_energy_efficiency: 5,
            windows_energy_efficiency: 4,
            roof_energy_efficiency: Some(5),
            ..params()
        });
        let elements = household.upgradable_insulation_elements(&config);
        assert_eq!(elements, BTreeSet::from([Element::Glazing]));
    }

    #[test]
    fn roofless_property_never_quotes_roof() {
        let config = HouseholdConfig::default();
        let household = household_with(HouseholdParams {
            roof_energy_efficiency: None,
            ..params()
        });
        let elements = household.upgradable_insulation_elements(&config);
        assert!(!elements.contains(&Element::Roof));
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn solid_wall_uses_internal_wall_table() {
        let solid = household_with(HouseholdParams {
            is_solid_wall: true,
            ..params()
        });
        assert_eq!(
            solid.insulation_measure(Element::Walls),
            InsulationMeasure::InternalWall
        );
        assert_eq!(
            household().insulation_measure(Element::Walls),
            InsulationMeasure::CavityWall
        );

        let tables = InsulationCostTables::default();
        let range = tables
            .range(
                InsulationMeasure::InternalWall,
                InsulationSegment::LargeMidTerraceHouse,
            )
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(6);
        let quotes = solid
            .quote_insulation_elements([Element::Walls], &tables, &mut rng)
            .unwrap();
        assert_eq!(quotes.get(&Element::Walls).copied(), Some(range.low()));
    }

    #[test]
    fn mid_terrace_scenario_end_to_end() {
        let config = HouseholdConfig::default();
        let tables = InsulationCostTables::default();
        let household = household();

        assert_eq!(
            household.insulation_segment().unwrap(),
            InsulationSegment::LargeMidTerraceHouse
        );
        let elements = household.upgradable_insulation_elements(&config);
        assert_eq!(
            elements,
            BTreeSet::from([Element::Walls, Element::Roof, Element::Glazing])
        );

        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..100 {
            let quotes = household
                .quote_insulation_elements(elements.iter().copied(), &tables, &mut rng)
                .unwrap();
            assert_eq!(quotes.len(), 3);
            for (element, cost) in quotes {
                let measure = household.insulation_measure(element);
                let range = tables
                    .range(measure, InsulationSegment::LargeMidTerraceHouse)
                    .unwrap();
                assert!(
                    (range.low()..=range.high()).contains(&cost),
                    "{element:?} {cost}"
                );
            }
        }
    }

    #[test]
    fn unclassifiable_property_cannot_be_quoted() {
        let household = household_with(HouseholdParams {
            floor_area_sqm: 0.0,
            ..params()
        });
        let mut rng = SmallRng::seed_from_u64(1);
        let result = household.quote_insulation_elements(
            [Element::Walls],
            &InsulationCostTables::default(),
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(HouseholdError::UnclassifiedProperty { .. })
        ));
    }

    #[test]
    fn choose_picks_cheapest() {
        let quotes = BTreeMap::from([
            (Element::Walls, 3_000),
            (Element::Glazing, 600),
            (Element::Roof, 600),
        ]);
        let chosen = choose_insulation_elements(&quotes, 2);
        assert_eq!(
            chosen,
            BTreeMap::from([(Element::Glazing, 600), (Element::Roof, 600)])
        );
        assert_eq!(choose_insulation_elements(&quotes, 10).len(), 3);
        assert!(choose_insulation_elements(&quotes, 0).is_empty());
    }

    #[test]
    fn install_maxes_grades_and_improves_epc() {
        let config = HouseholdConfig::default();
        let mut household = household();
        let quotes = BTreeMap::from([(Element::Walls, 500), (Element::Roof, 300)]);

        household.install_insulation_elements(&quotes, &config);

        assert_eq!(household.walls_energy_efficiency(), 5);
        assert_eq!(household.roof_energy_efficiency(), Some(5));
        assert_eq!(household.windows_energy_efficiency(), 3);
        assert_eq!(household.epc(), Epc::B);
        assert_eq!(
            household.upgradable_insulation_elements(&config),
            BTreeSet::from([Element::Glazing])
        );
    }

    #[test]
    fn epc_improvement_saturates_at_a() {
        let config = HouseholdConfig::default();
        let mut household = household_with(HouseholdParams {
            epc: Epc::B,
            ..params()
        });
        let quotes = BTreeMap::from([
            (Element::Walls, 1),
            (Element::Glazing, 1),
            (Element::Roof, 1),
        ]);
        household.install_insulation_elements(&quotes, &config);
        assert_eq!(household.epc(), Epc::A);
    }
}
