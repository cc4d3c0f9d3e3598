#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Housing record types shared across the housing map dashboard.
//!
//! Defines the [`HousingRecord`] row shape, the closed [`OceanProximity`]
//! label set, and the three [`IncomeLevel`] bands the dashboard filters on.
//! Every other crate in the workspace speaks in these types.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Western edge of the synthesized region (California).
pub const MIN_LONGITUDE: f64 = -124.3;
/// Eastern edge of the synthesized region.
pub const MAX_LONGITUDE: f64 = -114.3;
/// Southern edge of the synthesized region.
pub const MIN_LATITUDE: f64 = 32.5;
/// Northern edge of the synthesized region.
pub const MAX_LATITUDE: f64 = 42.0;
/// Lowest synthesized median house value, in dollars.
pub const MIN_HOUSE_VALUE: u32 = 50_000;
/// Highest synthesized median house value, in dollars (inclusive).
pub const MAX_HOUSE_VALUE: u32 = 500_000;
/// Lowest synthesized median income, in tens of thousands of dollars.
pub const MIN_INCOME: f64 = 0.5;
/// Upper bound (exclusive) of synthesized median income.
pub const MAX_INCOME: f64 = 15.0;

/// Column names of a housing dataset, in table order.
pub const COLUMNS: [&str; 5] = [
    "longitude",
    "latitude",
    "median_house_value",
    "median_income",
    "ocean_proximity",
];

/// A block group's relation to the ocean.
///
/// Printed and serialized with the dataset's space-separated labels
/// (`NEAR BAY`). Parsing also accepts the underscore form and ignores case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum OceanProximity {
    /// Close to a bay (e.g. San Francisco Bay)
    #[serde(rename = "NEAR BAY", alias = "NEAR_BAY")]
    #[strum(to_string = "NEAR BAY", serialize = "NEAR_BAY")]
    NearBay,
    /// Away from the coast
    #[serde(rename = "INLAND")]
    #[strum(to_string = "INLAND")]
    Inland,
    /// On the open coast
    #[serde(rename = "NEAR OCEAN", alias = "NEAR_OCEAN")]
    #[strum(to_string = "NEAR OCEAN", serialize = "NEAR_OCEAN")]
    NearOcean,
    /// Offshore islands
    #[serde(rename = "ISLAND")]
    #[strum(to_string = "ISLAND")]
    Island,
}

impl OceanProximity {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::NearBay, Self::Inland, Self::NearOcean, Self::Island]
    }

    /// Sampling weight used when synthesizing records.
    ///
    /// The weights sum to 1.0. Islands are deliberately rare.
    #[must_use]
    pub const fn synthetic_weight(self) -> f64 {
        match self {
            Self::NearBay => 0.30,
            Self::Inland => 0.40,
            Self::NearOcean => 0.29,
            Self::Island => 0.01,
        }
    }
}

/// Median income bands offered by the dashboard.
///
/// The bands partition the income axis: 2.5 belongs to [`Self::Low`] and
/// 4.5 belongs to [`Self::High`], leaving the open interval (2.5, 4.5) to
/// [`Self::Medium`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IncomeLevel {
    /// `median_income <= 2.5`
    #[default]
    Low,
    /// `2.5 < median_income < 4.5`
    Medium,
    /// `median_income >= 4.5`
    High,
}

impl IncomeLevel {
    /// Upper bound (inclusive) of the low band.
    pub const LOW_MAX: f64 = 2.5;
    /// Lower bound (inclusive) of the high band.
    pub const HIGH_MIN: f64 = 4.5;

    /// Returns all variants of this enum, in radio-button order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// Human-readable option label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low (≤2.5)",
            Self::Medium => "Medium (>2.5 & <4.5)",
            Self::High => "High (≥4.5)",
        }
    }

    /// Whether `income` falls inside this band.
    #[must_use]
    pub fn contains(self, income: f64) -> bool {
        match self {
            Self::Low => income <= Self::LOW_MAX,
            Self::Medium => income > Self::LOW_MAX && income < Self::HIGH_MIN,
            Self::High => income >= Self::HIGH_MIN,
        }
    }

    /// Returns the band `income` belongs to, or `None` for NaN.
    #[must_use]
    pub fn classify(income: f64) -> Option<Self> {
        Self::all().iter().copied().find(|band| band.contains(income))
    }
}

/// One housing observation (a census block group).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HousingRecord {
    /// Longitude in WGS84 degrees.
    pub longitude: f64,
    /// Latitude in WGS84 degrees.
    pub latitude: f64,
    /// Median house value in dollars.
    pub median_house_value: u32,
    /// Median income in tens of thousands of dollars.
    pub median_income: f64,
    /// Relation to the ocean.
    pub ocean_proximity: OceanProximity,
}

impl HousingRecord {
    /// Income band of this record, `None` if the income is NaN.
    #[must_use]
    pub fn income_level(&self) -> Option<IncomeLevel> {
        IncomeLevel::classify(self.median_income)
    }

    /// Cell values in [`COLUMNS`] order, formatted for display.
    #[must_use]
    pub fn cells(&self) -> [String; 5] {
        [
            self.longitude.to_string(),
            self.latitude.to_string(),
            self.median_house_value.to_string(),
            self.median_income.to_string(),
            self.ocean_proximity.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_band_boundaries() {
        assert_eq!(IncomeLevel::classify(2.5), Some(IncomeLevel::Low));
        assert_eq!(IncomeLevel::classify(2.500_001), Some(IncomeLevel::Medium));
        assert_eq!(IncomeLevel::classify(4.499_999), Some(IncomeLevel::Medium));
        assert_eq!(IncomeLevel::classify(4.5), Some(IncomeLevel::High));
        assert_eq!(IncomeLevel::classify(0.5), Some(IncomeLevel::Low));
        assert_eq!(IncomeLevel::classify(15.0), Some(IncomeLevel::High));
    }

    #[test]
    fn income_bands_partition_the_axis() {
        let samples = (0..=3000).map(|i| f64::from(i) * 0.005);
        for income in samples.chain([2.5, 4.5, -1.0, f64::INFINITY]) {
            let hits = IncomeLevel::all()
                .iter()
                .filter(|band| band.contains(income))
                .count();
            assert_eq!(hits, 1, "income {income} matched {hits} bands");
        }
    }

    #[test]
    fn nan_income_has_no_band() {
        assert_eq!(IncomeLevel::classify(f64::NAN), None);
    }

    #[test]
    fn proximity_labels_display_with_spaces() {
        assert_eq!(OceanProximity::NearBay.to_string(), "NEAR BAY");
        assert_eq!(OceanProximity::NearOcean.as_ref(), "NEAR OCEAN");
        assert_eq!(OceanProximity::Island.to_string(), "ISLAND");
    }

    #[test]
    fn proximity_parses_both_spellings() {
        assert_eq!("NEAR BAY".parse::<OceanProximity>(), Ok(OceanProximity::NearBay));
        assert_eq!("near_ocean".parse::<OceanProximity>(), Ok(OceanProximity::NearOcean));
        assert_eq!("inland".parse::<OceanProximity>(), Ok(OceanProximity::Inland));
        assert!("<1H OCEAN".parse::<OceanProximity>().is_err());
    }

    #[test]
    fn proximity_weights_sum_to_one() {
        let total: f64 = OceanProximity::all()
            .iter()
            .map(|p| p.synthetic_weight())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn income_level_parses_keys() {
        assert_eq!("medium".parse::<IncomeLevel>(), Ok(IncomeLevel::Medium));
        assert_eq!("HIGH".parse::<IncomeLevel>(), Ok(IncomeLevel::High));
        assert_eq!(IncomeLevel::Low.to_string(), "low");
        assert_eq!(IncomeLevel::Medium.label(), "Medium (>2.5 & <4.5)");
        assert!("average".parse::<IncomeLevel>().is_err());
    }

    #[test]
    fn record_serializes_with_dataset_columns() {
        let record = HousingRecord {
            longitude: -122.23,
            latitude: 37.88,
            median_house_value: 452_600,
            median_income: 8.3252,
            ocean_proximity: OceanProximity::NearBay,
        };
        let json = serde_json::to_value(record).unwrap();
        for column in COLUMNS {
            assert!(json.get(column).is_some(), "missing column {column}");
        }
        assert_eq!(json["ocean_proximity"], "NEAR BAY");
        assert_eq!(record.income_level(), Some(IncomeLevel::High));
    }
}
