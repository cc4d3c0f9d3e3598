#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the housing map server.
//!
//! Dashboard queries arrive as raw key/value pairs rather than a derived
//! struct because `locations` may repeat. [`DashboardQuery`] does the
//! parsing; the response types are serialized to JSON for the REST API.

use std::collections::BTreeSet;

use housing_map_dashboard::resolve_criteria;
use housing_map_dataset::Dataset;
use housing_map_filter::{FilterCriteria, FilteredView};
use housing_map_housing_models::{HousingRecord, IncomeLevel, OceanProximity};
use serde::{Deserialize, Serialize};

/// Query parameter holding the minimum median house value.
pub const MIN_PRICE_PARAM: &str = "min_price";
/// Query parameter holding proximity labels.
pub const LOCATIONS_PARAM: &str = "locations";
/// Query parameter holding the income band.
pub const INCOME_PARAM: &str = "income";

/// Errors from parsing dashboard query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// `min_price` is not a non-negative integer.
    #[error("Invalid min_price '{value}': expected a whole number of dollars")]
    InvalidPrice {
        /// The rejected value.
        value: String,
    },
    /// `income` is not one of the three bands.
    #[error("Invalid income '{value}': expected low, medium or high")]
    InvalidIncome {
        /// The rejected value.
        value: String,
    },
    /// A `locations` entry is not a known proximity label.
    #[error("Invalid location '{value}'")]
    InvalidLocation {
        /// The rejected value.
        value: String,
    },
}

/// Parsed dashboard query. Absent fields fall back to the defaults for the
/// dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Requested minimum price.
    pub min_price: Option<u32>,
    /// Requested labels. `Some` of an empty set is an explicit empty
    /// selection.
    pub locations: Option<BTreeSet<OceanProximity>>,
    /// Requested income band.
    pub income: Option<IncomeLevel>,
}

impl DashboardQuery {
    /// Parses raw query pairs.
    ///
    /// `locations` may repeat and each value may be comma-separated. A
    /// `locations` key with only empty values yields an explicit empty
    /// selection. Later `min_price` or `income` values replace earlier
    /// ones. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// * [`QueryError::InvalidPrice`] if `min_price` is not a `u32`
    /// * [`QueryError::InvalidIncome`] if `income` is not a known band
    /// * [`QueryError::InvalidLocation`] if a label is unknown
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                MIN_PRICE_PARAM => {
                    query.min_price = Some(value.parse().map_err(|_| QueryError::InvalidPrice {
                        value: value.to_string(),
                    })?);
                }
                INCOME_PARAM => {
                    query.income = Some(value.parse().map_err(|_| QueryError::InvalidIncome {
                        value: value.to_string(),
                    })?);
                }
                LOCATIONS_PARAM => {
                    let selected = query.locations.get_or_insert_with(BTreeSet::new);
                    for label in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        selected.insert(label.parse().map_err(|_| {
                            QueryError::InvalidLocation {
                                value: label.to_string(),
                            }
                        })?);
                    }
                }
                _ => {}
            }
        }

        Ok(query)
    }

    /// Resolves this query into criteria for `dataset`.
    #[must_use]
    pub fn to_criteria(&self, dataset: &Dataset) -> FilterCriteria {
        resolve_criteria(dataset, self.min_price, self.locations.clone(), self.income)
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Filtered records response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecords {
    /// Dataset size.
    pub total: usize,
    /// Number of records returned.
    pub count: usize,
    /// The criteria the records were filtered with.
    pub criteria: FilterCriteria,
    /// The matching records, in dataset order.
    pub records: Vec<HousingRecord>,
}

impl ApiRecords {
    /// Builds the response for `view`, filtered with `criteria`.
    #[must_use]
    pub fn new(view: &FilteredView<'_>, criteria: FilterCriteria) -> Self {
        Self {
            total: view.total(),
            count: view.len(),
            criteria,
            records: view.iter().copied().collect(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl From<&QueryError> for ApiError {
    fn from(e: &QueryError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}
