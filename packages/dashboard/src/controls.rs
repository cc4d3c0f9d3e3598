//! Sidebar control descriptors.
//!
//! The sidebar is derived from the dataset (slider bounds, label options)
//! and the current [`FilterCriteria`] (selected values). Front ends render
//! these descriptors; they never compute bounds themselves.

use std::collections::BTreeSet;

use housing_map_dataset::Dataset;
use housing_map_filter::FilterCriteria;
use housing_map_housing_models::{IncomeLevel, OceanProximity};
use serde::Serialize;

/// Slider step for the minimum price control, in dollars.
pub const PRICE_STEP: u32 = 1000;

/// Minimum price slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSlider {
    /// Control label.
    pub label: &'static str,
    /// Lowest selectable price (dataset minimum).
    pub min: u32,
    /// Highest selectable price (dataset maximum).
    pub max: u32,
    /// Current value.
    pub value: u32,
    /// Step between selectable values.
    pub step: u32,
}

impl PriceSlider {
    /// Builds the slider for `dataset` with the given current value.
    #[must_use]
    pub fn for_dataset(dataset: &Dataset, value: u32) -> Self {
        let (min, max) = dataset.value_range().unwrap_or((0, 0));
        Self {
            label: "Minimal Median House Price",
            min,
            max,
            value: value.clamp(min, max),
            step: PRICE_STEP,
        }
    }

    /// Clamps a requested price into the slider bounds.
    #[must_use]
    pub fn clamp(&self, requested: u32) -> u32 {
        requested.clamp(self.min, self.max)
    }

    /// Track bounds snapped outward to whole steps.
    ///
    /// A stepped range input only offers `min + k * step`, which usually
    /// misses the dataset maximum. Snapping both ends to multiples of the
    /// step makes every selectable value a whole step and the top of the
    /// track reachable; [`Self::clamp`] maps the ends back onto the
    /// dataset bounds.
    #[must_use]
    pub fn track_bounds(&self) -> (u32, u32) {
        let step = self.step.max(1);
        (
            self.min / step * step,
            self.max.div_ceil(step).saturating_mul(step),
        )
    }
}

/// Proximity label multiselect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSelect {
    /// Control label.
    pub label: &'static str,
    /// Labels present in the dataset, in first-appearance order.
    pub options: Vec<OceanProximity>,
    /// Currently selected labels, in option order.
    pub selected: Vec<OceanProximity>,
}

/// One radio option of the income control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeOption {
    /// Query value for the option.
    pub key: IncomeLevel,
    /// Display label.
    pub label: &'static str,
}

/// Income band radio buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRadio {
    /// Control label.
    pub label: &'static str,
    /// The three bands, in display order.
    pub options: Vec<IncomeOption>,
    /// Currently selected band.
    pub selected: IncomeLevel,
}

/// The complete sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    /// Sidebar heading.
    pub header: &'static str,
    /// Minimum price control.
    pub price: PriceSlider,
    /// Location type control.
    pub locations: LocationSelect,
    /// Income level control.
    pub income: IncomeRadio,
    /// Footer heading.
    pub footer_heading: &'static str,
    /// Footer text.
    pub footer_text: &'static str,
}

impl Sidebar {
    /// Builds the sidebar for `dataset` reflecting `criteria`.
    #[must_use]
    pub fn for_dataset(dataset: &Dataset, criteria: &FilterCriteria) -> Self {
        let options = dataset.locations();
        let selected = options
            .iter()
            .copied()
            .filter(|label| criteria.selected_locations.contains(label))
            .collect();

        Self {
            header: "Filters",
            price: PriceSlider::for_dataset(dataset, criteria.min_price),
            locations: LocationSelect {
                label: "Location Type",
                options,
                selected,
            },
            income: IncomeRadio {
                label: "Income Level",
                options: IncomeLevel::all()
                    .iter()
                    .map(|&key| IncomeOption {
                        key,
                        label: key.label(),
                    })
                    .collect(),
                selected: criteria.income_level,
            },
            footer_heading: "See more filters in the sidebar:",
            footer_text: "Use the filters above to explore the California housing data from 1990.",
        }
    }
}

impl Sidebar {
    /// Clamps a requested minimum price into the slider bounds.
    #[must_use]
    pub fn clamp_price(&self, requested: u32) -> u32 {
        self.price.clamp(requested)
    }
}

/// Turns raw control input into criteria for `dataset`.
///
/// Missing values fall back to [`FilterCriteria::defaults_for`]. A supplied
/// price is clamped into the slider bounds; a supplied location set is used
/// as-is, so an empty set stays empty.
#[must_use]
pub fn resolve_criteria(
    dataset: &Dataset,
    min_price: Option<u32>,
    locations: Option<BTreeSet<OceanProximity>>,
    income_level: Option<IncomeLevel>,
) -> FilterCriteria {
    let defaults = FilterCriteria::defaults_for(dataset);
    let sidebar = Sidebar::for_dataset(dataset, &defaults);

    FilterCriteria {
        min_price: min_price.map_or(defaults.min_price, |price| sidebar.clamp_price(price)),
        selected_locations: locations.unwrap_or(defaults.selected_locations),
        income_level: income_level.unwrap_or(defaults.income_level),
    }
}
