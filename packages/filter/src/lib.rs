#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter engine for the housing map dashboard.
//!
//! A [`FilterCriteria`] holds the three sidebar selections (minimum price,
//! proximity labels, income band). [`apply`] intersects the three
//! predicates over a [`Dataset`] and returns a borrowed [`FilteredView`].
//! The dataset itself is never modified.

use std::collections::BTreeSet;

use housing_map_dataset::Dataset;
use housing_map_housing_models::{HousingRecord, IncomeLevel, OceanProximity};
use serde::{Deserialize, Serialize};

/// User-selected filter state for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Lower bound (inclusive) on `median_house_value`.
    pub min_price: u32,
    /// Proximity labels to keep. Empty keeps nothing.
    pub selected_locations: BTreeSet<OceanProximity>,
    /// Income band to keep.
    pub income_level: IncomeLevel,
}

impl FilterCriteria {
    /// Initial control state for `dataset`: the lowest observed price, every
    /// label present in the data, and the first income band.
    #[must_use]
    pub fn defaults_for(dataset: &Dataset) -> Self {
        Self {
            min_price: dataset.value_range().map_or(0, |(min, _)| min),
            selected_locations: dataset.locations().into_iter().collect(),
            income_level: IncomeLevel::default(),
        }
    }

    /// Whether `record` passes every predicate.
    #[must_use]
    pub fn matches(&self, record: &HousingRecord) -> bool {
        Stage::ALL.iter().all(|stage| stage.accepts(self, record))
    }
}

/// `record.median_house_value >= min_price`
#[must_use]
pub const fn price_predicate(record: &HousingRecord, min_price: u32) -> bool {
    record.median_house_value >= min_price
}

/// `record.ocean_proximity` is one of `selected`.
#[must_use]
pub fn location_predicate(record: &HousingRecord, selected: &BTreeSet<OceanProximity>) -> bool {
    selected.contains(&record.ocean_proximity)
}

/// `record.median_income` falls inside `level`.
#[must_use]
pub fn income_predicate(record: &HousingRecord, level: IncomeLevel) -> bool {
    level.contains(record.median_income)
}

/// One of the three independent filter predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Minimum house value.
    Price,
    /// Proximity label membership.
    Location,
    /// Income band.
    Income,
}

impl Stage {
    /// Every stage.
    pub const ALL: [Self; 3] = [Self::Price, Self::Location, Self::Income];

    /// Order used by [`apply`]: income band first, then price and location
    /// over the intermediate view.
    pub const DEFAULT_ORDER: [Self; 3] = [Self::Income, Self::Price, Self::Location];

    /// Whether `record` passes this stage under `criteria`.
    #[must_use]
    pub fn accepts(self, criteria: &FilterCriteria, record: &HousingRecord) -> bool {
        match self {
            Self::Price => price_predicate(record, criteria.min_price),
            Self::Location => location_predicate(record, &criteria.selected_locations),
            Self::Income => income_predicate(record, criteria.income_level),
        }
    }
}

/// The records of a [`Dataset`] that passed every filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a HousingRecord>,
    total: usize,
}

impl<'a> FilteredView<'a> {
    /// Builds a view from already-selected records of a dataset holding
    /// `total` records.
    #[must_use]
    pub const fn new(records: Vec<&'a HousingRecord>, total: usize) -> Self {
        Self { records, total }
    }

    /// Matching records, in dataset order.
    #[must_use]
    pub fn records(&self) -> &[&'a HousingRecord] {
        &self.records
    }

    /// Number of matching records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Size of the dataset the view was taken from.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Iterates over the matching records.
    pub fn iter(&self) -> impl Iterator<Item = &'a HousingRecord> + '_ {
        self.records.iter().copied()
    }

    /// Observed `(min, max)` of `median_house_value` within the view.
    #[must_use]
    pub fn value_range(&self) -> Option<(u32, u32)> {
        let min = self.iter().map(|r| r.median_house_value).min()?;
        let max = self.iter().map(|r| r.median_house_value).max()?;
        Some((min, max))
    }
}

/// Applies `criteria` to `dataset` in [`Stage::DEFAULT_ORDER`].
#[must_use]
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    apply_stages(dataset, criteria, &Stage::DEFAULT_ORDER)
}

/// Applies the given stages to `dataset`, one after another.
///
/// Stages are pure predicates combined by AND, so any permutation of
/// [`Stage::ALL`] yields the same view.
#[must_use]
pub fn apply_stages<'a>(
    dataset: &'a Dataset,
    criteria: &FilterCriteria,
    order: &[Stage],
) -> FilteredView<'a> {
    let mut records: Vec<&HousingRecord> = dataset.iter().collect();

    for stage in order {
        records.retain(|record| stage.accepts(criteria, record));
        log::trace!("{stage:?} stage kept {} records", records.len());
    }

    log::debug!(
        "Filter kept {} of {} records (min_price={}, locations={}, income={})",
        records.len(),
        dataset.len(),
        criteria.min_price,
        criteria.selected_locations.len(),
        criteria.income_level
    );

    FilteredView::new(records, dataset.len())
}

#[cfg(test)]
mod tests {
    use housing_map_dataset::{SyntheticConfig, synthesize};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn all_locations() -> BTreeSet<OceanProximity> {
        OceanProximity::all().iter().copied().collect()
    }

    fn record(value: u32, income: f64, proximity: OceanProximity) -> HousingRecord {
        HousingRecord {
            longitude: -119.0,
            latitude: 37.0,
            median_house_value: value,
            median_income: income,
            ocean_proximity: proximity,
        }
    }

    fn permutations() -> Vec<[Stage; 3]> {
        use Stage::{Income, Location, Price};
        vec![
            [Price, Location, Income],
            [Price, Income, Location],
            [Location, Price, Income],
            [Location, Income, Price],
            [Income, Price, Location],
            [Income, Location, Price],
        ]
    }

    #[test]
    fn medium_band_with_default_price_keeps_exactly_medium_incomes() {
        let dataset = synthesize(&SyntheticConfig::default());
        let (min, _) = dataset.value_range().unwrap();
        let criteria = FilterCriteria {
            min_price: min,
            selected_locations: all_locations(),
            income_level: IncomeLevel::Medium,
        };

        let view = apply(&dataset, &criteria);
        let expected: Vec<&HousingRecord> = dataset
            .iter()
            .filter(|r| r.median_income > 2.5 && r.median_income < 4.5)
            .collect();

        assert_eq!(view.records(), expected.as_slice());
        assert_eq!(view.total(), 1000);
        assert!(!view.is_empty());
    }

    #[test]
    fn max_price_keeps_only_records_at_the_max() {
        let dataset = synthesize(&SyntheticConfig::default());
        let (_, max) = dataset.value_range().unwrap();

        for &income_level in IncomeLevel::all() {
            let criteria = FilterCriteria {
                min_price: max,
                selected_locations: all_locations(),
                income_level,
            };
            let view = apply(&dataset, &criteria);
            assert!(view.iter().all(|r| r.median_house_value == max));

            let expected = dataset
                .iter()
                .filter(|r| r.median_house_value == max && income_level.contains(r.median_income))
                .count();
            assert_eq!(view.len(), expected);
        }
    }

    #[test]
    fn price_bound_is_inclusive() {
        let dataset = Dataset::new(vec![
            record(99_999, 3.0, OceanProximity::Inland),
            record(100_000, 3.0, OceanProximity::Inland),
        ]);
        let criteria = FilterCriteria {
            min_price: 100_000,
            selected_locations: all_locations(),
            income_level: IncomeLevel::Medium,
        };
        let view = apply(&dataset, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].median_house_value, 100_000);
    }

    #[test]
    fn empty_location_selection_yields_empty_view() {
        let dataset = synthesize(&SyntheticConfig::default());
        for &income_level in IncomeLevel::all() {
            let criteria = FilterCriteria {
                min_price: 0,
                selected_locations: BTreeSet::new(),
                income_level,
            };
            assert!(apply(&dataset, &criteria).is_empty());
        }
    }

    #[test]
    fn island_only_is_small() {
        let dataset = synthesize(&SyntheticConfig::default());
        let criteria = FilterCriteria {
            min_price: 0,
            selected_locations: BTreeSet::from([OceanProximity::Island]),
            income_level: IncomeLevel::High,
        };
        let view = apply(&dataset, &criteria);
        assert!(view.len() < 50);
        assert!(view.iter().all(|r| r.ocean_proximity == OceanProximity::Island));
    }

    #[test]
    fn boundary_incomes_land_in_one_band() {
        let dataset = Dataset::new(vec![
            record(100_000, 2.5, OceanProximity::NearBay),
            record(100_000, 4.5, OceanProximity::NearBay),
        ]);
        let count = |income_level| {
            let criteria = FilterCriteria {
                min_price: 0,
                selected_locations: all_locations(),
                income_level,
            };
            apply(&dataset, &criteria).len()
        };
        assert_eq!(count(IncomeLevel::Low), 1);
        assert_eq!(count(IncomeLevel::Medium), 0);
        assert_eq!(count(IncomeLevel::High), 1);
    }

    #[test]
    fn bands_partition_the_dataset() {
        let dataset = synthesize(&SyntheticConfig::default());
        let total: usize = IncomeLevel::all()
            .iter()
            .map(|&income_level| {
                let criteria = FilterCriteria {
                    min_price: 0,
                    selected_locations: all_locations(),
                    income_level,
                };
                apply(&dataset, &criteria).len()
            })
            .sum();
        assert_eq!(total, dataset.len());
    }

    #[test]
    fn stage_order_does_not_change_membership() {
        let mut rng = StdRng::seed_from_u64(9);

        for seed in 0..5 {
            let dataset = synthesize(&SyntheticConfig { seed, count: 400 });
            for _ in 0..10 {
                let selected_locations: BTreeSet<OceanProximity> = OceanProximity::all()
                    .iter()
                    .copied()
                    .filter(|_| rng.gen_bool(0.5))
                    .collect();
                let criteria = FilterCriteria {
                    min_price: rng.gen_range(50_000..=500_000),
                    selected_locations,
                    income_level: IncomeLevel::all()[rng.gen_range(0..3)],
                };

                let baseline = apply(&dataset, &criteria);
                assert!(baseline.len() <= dataset.len());
                for order in permutations() {
                    assert_eq!(apply_stages(&dataset, &criteria, &order), baseline);
                }
                assert!(baseline.iter().all(|r| criteria.matches(r)));
            }
        }
    }

    #[test]
    fn defaults_select_everything_present() {
        let dataset = synthesize(&SyntheticConfig::default());
        let criteria = FilterCriteria::defaults_for(&dataset);
        assert_eq!(criteria.min_price, dataset.value_range().unwrap().0);
        assert_eq!(criteria.income_level, IncomeLevel::Low);
        assert_eq!(
            criteria.selected_locations,
            dataset.locations().into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn defaults_for_empty_dataset() {
        let criteria = FilterCriteria::defaults_for(&Dataset::default());
        assert_eq!(criteria.min_price, 0);
        assert!(criteria.selected_locations.is_empty());
    }

    #[test]
    fn view_value_range_is_local() {
        let dataset = Dataset::new(vec![
            record(60_000, 1.0, OceanProximity::Inland),
            record(300_000, 3.0, OceanProximity::Inland),
            record(400_000, 3.5, OceanProximity::Inland),
        ]);
        let criteria = FilterCriteria {
            min_price: 0,
            selected_locations: all_locations(),
            income_level: IncomeLevel::Medium,
        };
        let view = apply(&dataset, &criteria);
        assert_eq!(view.value_range(), Some((300_000, 400_000)));
        assert_eq!(dataset.value_range(), Some((60_000, 400_000)));
    }
}
