//! One full render cycle.

use housing_map_dataset::Dataset;
use housing_map_filter::{FilterCriteria, apply};
use serde::Serialize;

use crate::controls::Sidebar;
use crate::debug::{DEBUG_EXPANDER, DebugInfo, render_debug};
use crate::histogram::{Histogram, render_histogram};
use crate::map::{MapChart, render_map};
use crate::panel::Panel;
use crate::summary::summary_line;
use crate::table::{TABLE_EXPANDER, TableView, render_table};

/// Browser-level page settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageConfig {
    /// Document title.
    pub title: &'static str,
    /// Favicon glyph.
    pub icon: &'static str,
    /// Layout mode.
    pub layout: &'static str,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "California Housing Data",
            icon: "🏠",
            layout: "wide",
        }
    }
}

/// Everything shown for one set of sidebar selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Browser-level settings.
    pub config: PageConfig,
    /// Main heading.
    pub heading: &'static str,
    /// Sidebar controls reflecting the current criteria.
    pub sidebar: Sidebar,
    /// The criteria this page was rendered for.
    pub criteria: FilterCriteria,
    /// Filtered/total count line.
    pub summary: String,
    /// Debug expander label.
    pub debug_expander: &'static str,
    /// Debug panel.
    pub debug: DebugInfo,
    /// Map section heading.
    pub map_heading: &'static str,
    /// Scatter map.
    pub map: Panel<MapChart>,
    /// Histogram section heading.
    pub histogram_heading: &'static str,
    /// Value histogram.
    pub histogram: Panel<Histogram>,
    /// Raw table expander label.
    pub table_expander: &'static str,
    /// Raw table.
    pub table: Panel<TableView>,
}

/// Runs the filter engine and every renderer for `criteria`.
///
/// Nothing is cached between cycles except the dataset itself; each call
/// recomputes the view and all panels from scratch.
#[must_use]
pub fn render_cycle(dataset: &Dataset, criteria: &FilterCriteria) -> Page {
    let view = apply(dataset, criteria);

    if view.is_empty() {
        log::info!("No records match the current filters");
    }

    Page {
        config: PageConfig::default(),
        heading: "California Housing Data (1990)",
        sidebar: Sidebar::for_dataset(dataset, criteria),
        criteria: criteria.clone(),
        summary: summary_line(&view),
        debug_expander: DEBUG_EXPANDER,
        debug: render_debug(dataset, &view),
        map_heading: "Housing Distribution Map",
        map: render_map(&view),
        histogram_heading: "Median House Value Distribution",
        histogram: render_histogram(&view),
        table_expander: TABLE_EXPANDER,
        table: render_table(&view),
    }
}
