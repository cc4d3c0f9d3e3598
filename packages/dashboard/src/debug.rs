//! Debug expander: dataset columns and a few sample rows.

use housing_map_dataset::Dataset;
use housing_map_filter::FilteredView;
use housing_map_housing_models::HousingRecord;
use serde::Serialize;

use crate::panel::Panel;

/// Expander label for the debug panel.
pub const DEBUG_EXPANDER: &str = "Debug Info";

/// Maximum number of sample rows.
pub const SAMPLE_ROWS: usize = 3;

/// Column names plus the first few filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    /// Dataset column names.
    pub columns: Vec<&'static str>,
    /// Up to [`SAMPLE_ROWS`] filtered rows, or a "No data" notice.
    pub sample: Panel<Vec<HousingRecord>>,
}

/// Builds the debug panel for `dataset` and its filtered `view`.
#[must_use]
pub fn render_debug(dataset: &Dataset, view: &FilteredView<'_>) -> DebugInfo {
    let sample = if view.is_empty() {
        Panel::Notice("No data".to_string())
    } else {
        Panel::Rendered(view.iter().take(SAMPLE_ROWS).copied().collect())
    };

    DebugInfo {
        columns: dataset.columns().to_vec(),
        sample,
    }
}
