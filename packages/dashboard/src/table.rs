//! Raw table of the filtered rows.

use housing_map_filter::FilteredView;
use housing_map_housing_models::{COLUMNS, HousingRecord};
use serde::Serialize;

use crate::panel::Panel;

/// Expander label for the raw table.
pub const TABLE_EXPANDER: &str = "View Filtered Data";

/// Notice shown instead of the table for an empty view.
pub const EMPTY_TABLE_NOTICE: &str = "No data to display with current filters";

/// The filtered rows, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Column names, in table order.
    pub columns: Vec<&'static str>,
    /// Rows, in dataset order.
    pub rows: Vec<HousingRecord>,
}

/// Renders the raw table for `view`, or a notice when it is empty.
#[must_use]
pub fn render_table(view: &FilteredView<'_>) -> Panel<TableView> {
    if view.is_empty() {
        return Panel::Notice(EMPTY_TABLE_NOTICE.to_string());
    }

    Panel::Rendered(TableView {
        columns: COLUMNS.to_vec(),
        rows: view.iter().copied().collect(),
    })
}
