#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset provider for the housing map dashboard.
//!
//! The dashboard works on a single immutable [`Dataset`] per process. By
//! default it is synthesized from a fixed seed ([`synthetic`]); it can also
//! be read from a CSV export ([`csv_source`]). Construction happens once:
//! [`load`] and [`init`] hand out the same `&'static` instance on every
//! call, and [`DatasetProvider`] offers the same memoization without the
//! process-wide singleton.

pub mod csv_source;
pub mod synthetic;

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use housing_map_housing_models::{COLUMNS, HousingRecord, OceanProximity};
use thiserror::Error;

pub use csv_source::{load_csv, read_csv};
pub use synthetic::{SyntheticConfig, synthesize};

/// Environment variable selecting a CSV file instead of synthetic data.
pub const DATA_PATH_ENV: &str = "HOUSING_DATA_PATH";
/// Environment variable overriding the synthesis seed.
pub const SEED_ENV: &str = "HOUSING_SEED";
/// Environment variable overriding the number of synthesized records.
pub const RECORD_COUNT_ENV: &str = "HOUSING_RECORD_COUNT";

/// Errors that can occur while building a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The configured data file does not exist.
    #[error("Dataset file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV header lacks one or more required columns.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Names of the absent columns.
        columns: Vec<String>,
    },

    /// A data row could not be converted into a [`HousingRecord`].
    #[error("Malformed row on line {line}: {message}")]
    MalformedRow {
        /// 1-based line number in the source file.
        line: u64,
        /// What was wrong with the row.
        message: String,
    },

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the bad setting.
        message: String,
    },
}

/// An immutable table of housing records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<HousingRecord>,
}

impl Dataset {
    /// Wraps an already-built list of records.
    #[must_use]
    pub const fn new(records: Vec<HousingRecord>) -> Self {
        Self { records }
    }

    /// All records, in source order.
    #[must_use]
    pub fn records(&self) -> &[HousingRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, HousingRecord> {
        self.records.iter()
    }

    /// Column names, in table order.
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// Observed `(min, max)` of `median_house_value`, `None` when empty.
    #[must_use]
    pub fn value_range(&self) -> Option<(u32, u32)> {
        let min = self.records.iter().map(|r| r.median_house_value).min()?;
        let max = self.records.iter().map(|r| r.median_house_value).max()?;
        Some((min, max))
    }

    /// Distinct proximity labels, in order of first appearance.
    #[must_use]
    pub fn locations(&self) -> Vec<OceanProximity> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|r| r.ocean_proximity)
            .filter(|label| seen.insert(*label))
            .collect()
    }
}

impl From<Vec<HousingRecord>> for Dataset {
    fn from(records: Vec<HousingRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a HousingRecord;
    type IntoIter = std::slice::Iter<'a, HousingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Deterministic synthetic records.
    Synthetic(SyntheticConfig),
    /// A headered CSV file with at least the [`COLUMNS`].
    Csv(PathBuf),
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Synthetic(SyntheticConfig::default())
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synthetic(config) => write!(
                f,
                "synthetic ({} records, seed {})",
                config.count, config.seed
            ),
            Self::Csv(path) => write!(f, "csv ({})", path.display()),
        }
    }
}

impl DatasetSource {
    /// Reads the source from `HOUSING_DATA_PATH`, `HOUSING_SEED` and
    /// `HOUSING_RECORD_COUNT`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidConfig`] if the seed or record count
    /// is not a valid unsigned integer.
    pub fn from_env() -> Result<Self, DatasetError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reads settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidConfig`] if the seed or record count
    /// is not a valid unsigned integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DatasetError> {
        if let Some(path) = lookup(DATA_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            return Ok(Self::Csv(PathBuf::from(path.trim())));
        }

        let mut config = SyntheticConfig::default();
        if let Some(seed) = lookup(SEED_ENV) {
            config.seed = parse_setting(SEED_ENV, &seed)?;
        }
        if let Some(count) = lookup(RECORD_COUNT_ENV) {
            config.count = parse_setting(RECORD_COUNT_ENV, &count)?;
        }

        Ok(Self::Synthetic(config))
    }

    /// Builds a fresh dataset from this source.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the CSV file is missing or malformed.
    /// Synthesis never fails.
    pub fn build(&self) -> Result<Dataset, DatasetError> {
        log::info!("Building dataset from {self}");
        match self {
            Self::Synthetic(config) => Ok(synthesize(config)),
            Self::Csv(path) => load_csv(path),
        }
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, DatasetError>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DatasetError::InvalidConfig {
            message: format!("{key}={value:?}: {e}"),
        })
}

static DATASET: OnceLock<Dataset> = OnceLock::new();

/// Returns the process-wide dataset, synthesizing the default one on first
/// use.
///
/// Later calls return the same instance without regenerating it. If
/// [`init`] ran first, its dataset is returned instead.
pub fn load() -> &'static Dataset {
    DATASET.get_or_init(|| synthesize(&SyntheticConfig::default()))
}

/// Initializes the process-wide dataset from `source`.
///
/// Only the first successful initialization builds anything; once the
/// dataset exists it is returned as-is and `source` is ignored.
///
/// # Errors
///
/// Returns [`DatasetError`] if the source cannot be built. The singleton is
/// left unset in that case.
pub fn init(source: &DatasetSource) -> Result<&'static Dataset, DatasetError> {
    if let Some(dataset) = DATASET.get() {
        log::debug!("Dataset already initialized, ignoring {source}");
        return Ok(dataset);
    }

    let dataset = source.build()?;
    log::info!("Dataset ready: {} records", dataset.len());
    Ok(DATASET.get_or_init(|| dataset))
}

/// A memoizing dataset provider that is not tied to the process singleton.
#[derive(Debug, Default)]
pub struct DatasetProvider {
    source: DatasetSource,
    cell: OnceLock<Dataset>,
}

impl DatasetProvider {
    /// Creates a provider that will build from `source` on first load.
    #[must_use]
    pub const fn new(source: DatasetSource) -> Self {
        Self {
            source,
            cell: OnceLock::new(),
        }
    }

    /// The configured source.
    #[must_use]
    pub const fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Returns the dataset, building it on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the source cannot be built. A failed
    /// build is not cached; the next call retries.
    pub fn load(&self) -> Result<&Dataset, DatasetError> {
        if let Some(dataset) = self.cell.get() {
            return Ok(dataset);
        }

        let dataset = self.source.build()?;
        Ok(self.cell.get_or_init(|| dataset))
    }
}
