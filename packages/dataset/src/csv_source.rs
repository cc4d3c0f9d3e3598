//! CSV loading for real housing exports.
//!
//! Accepts any headered CSV that contains at least the dataset
//! [`COLUMNS`]; extra columns are ignored. House values may be written as
//! floats (`452600.0`) and are rounded to whole dollars.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use housing_map_housing_models::{COLUMNS, HousingRecord, OceanProximity};
use serde::Deserialize;

use crate::{Dataset, DatasetError};

/// Raw CSV row before validation.
#[derive(Debug, Deserialize)]
struct CsvRow {
    longitude: f64,
    latitude: f64,
    median_house_value: f64,
    median_income: f64,
    ocean_proximity: String,
}

impl CsvRow {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn into_record(self) -> Result<HousingRecord, String> {
        for (column, reading) in [
            ("longitude", self.longitude),
            ("latitude", self.latitude),
            ("median_income", self.median_income),
        ] {
            if !reading.is_finite() {
                return Err(format!("{column} {reading} is not a finite number"));
            }
        }
        if self.median_income < 0.0 {
            return Err(format!(
                "median_income {} is negative",
                self.median_income
            ));
        }

        let value = self.median_house_value.round();
        if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
            return Err(format!(
                "median_house_value {} is out of range",
                self.median_house_value
            ));
        }

        let ocean_proximity: OceanProximity = self
            .ocean_proximity
            .parse()
            .map_err(|_| format!("unknown ocean_proximity label {:?}", self.ocean_proximity))?;

        Ok(HousingRecord {
            longitude: self.longitude,
            latitude: self.latitude,
            median_house_value: value as u32,
            median_income: self.median_income,
            ocean_proximity,
        })
    }
}

/// Loads a dataset from the CSV file at `path`.
///
/// # Errors
///
/// * [`DatasetError::NotFound`] if `path` does not exist
/// * [`DatasetError::MissingColumns`] if the header lacks a required column
/// * [`DatasetError::MalformedRow`] if a row cannot be parsed
/// * [`DatasetError::Io`] / [`DatasetError::Csv`] for reader failures
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let dataset = read_csv(file)?;

    log::info!(
        "Loaded {} records from {}",
        dataset.len(),
        path.display()
    );

    Ok(dataset)
}

/// Reads a dataset from any CSV byte stream.
///
/// # Errors
///
/// Same as [`load_csv`], minus [`DatasetError::NotFound`].
pub fn read_csv<R: Read>(source: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();

    let missing: Vec<String> = COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns { columns: missing });
    }

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);

        let raw: CsvRow = row
            .deserialize(Some(&headers))
            .map_err(|e| DatasetError::MalformedRow {
                line,
                message: e.to_string(),
            })?;

        let record = raw
            .into_record()
            .map_err(|message| DatasetError::MalformedRow { line, message })?;

        records.push(record);
    }

    Ok(Dataset::new(records))
}
