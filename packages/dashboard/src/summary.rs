//! Filtered/total count line.

use housing_map_filter::FilteredView;

/// `"Showing {k} out of {n} records"` for `view`.
#[must_use]
pub fn summary_line(view: &FilteredView<'_>) -> String {
    format!("Showing {} out of {} records", view.len(), view.total())
}
