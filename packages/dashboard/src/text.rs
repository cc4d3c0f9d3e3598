//! Plain-text rendering of a [`Page`] for terminals.

use housing_map_housing_models::HousingRecord;

use crate::histogram::Histogram;
use crate::map::{MapChart, tooltip_text};
use crate::page::Page;
use crate::panel::Panel;

/// Widest histogram bar, in characters.
pub const BAR_WIDTH: usize = 40;

/// Rows of the raw table printed before truncating.
pub const TABLE_ROWS: usize = 10;

/// Renders `page` as terminal text.
#[must_use]
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} {}\n", page.config.icon, page.heading));
    out.push_str(&format!("{}\n\n", page.summary));

    let sidebar = &page.sidebar;
    let locations: Vec<String> = sidebar
        .locations
        .selected
        .iter()
        .map(ToString::to_string)
        .collect();
    let income = sidebar
        .income
        .options
        .iter()
        .find(|option| option.key == sidebar.income.selected)
        .map_or("", |option| option.label);
    out.push_str(&format!("[{}]\n", sidebar.header));
    out.push_str(&format!(
        "  {}: {} (range {} to {})\n",
        sidebar.price.label, sidebar.price.value, sidebar.price.min, sidebar.price.max
    ));
    out.push_str(&format!(
        "  {}: {}\n",
        sidebar.locations.label,
        if locations.is_empty() {
            "(none)".to_string()
        } else {
            locations.join(", ")
        }
    ));
    out.push_str(&format!("  {}: {income}\n\n", sidebar.income.label));

    out.push_str(&format!("[{}]\n", page.debug_expander));
    out.push_str(&format!("  Data columns: {}\n", page.debug.columns.join(", ")));
    match &page.debug.sample {
        Panel::Rendered(rows) => out.push_str(&render_rows(&page.debug.columns, rows, rows.len())),
        other => out.push_str(&format!("  {}\n", other.message().unwrap_or_default())),
    }
    out.push('\n');

    out.push_str(&format!("== {} ==\n", page.map_heading));
    out.push_str(&match &page.map {
        Panel::Rendered(chart) => render_map_synopsis(chart),
        other => render_message(other),
    });
    out.push('\n');

    out.push_str(&format!("== {} ==\n", page.histogram_heading));
    out.push_str(&match &page.histogram {
        Panel::Rendered(histogram) => render_bars(histogram),
        other => render_message(other),
    });
    out.push('\n');

    out.push_str(&format!("[{}]\n", page.table_expander));
    out.push_str(&match &page.table {
        Panel::Rendered(table) => render_rows(&table.columns, &table.rows, TABLE_ROWS),
        other => render_message(other),
    });

    out
}

fn render_message<T>(panel: &Panel<T>) -> String {
    let prefix = if panel.is_warning() { "! " } else { "" };
    format!("  {prefix}{}\n", panel.message().unwrap_or_default())
}

fn render_map_synopsis(chart: &MapChart) -> String {
    let points = chart.layers.iter().flat_map(|layer| &layer.data);
    let (mut lon_lo, mut lon_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut lat_lo, mut lat_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for point in points {
        lon_lo = lon_lo.min(point.longitude);
        lon_hi = lon_hi.max(point.longitude);
        lat_lo = lat_lo.min(point.latitude);
        lat_hi = lat_hi.max(point.latitude);
    }

    let view = &chart.initial_view_state;
    let mut out = format!(
        "  {} points, longitude {lon_lo:.2} to {lon_hi:.2}, latitude {lat_lo:.2} to {lat_hi:.2}\n  \
         centre ({:.1}, {:.1}), zoom {}\n",
        chart.point_count(),
        view.latitude,
        view.longitude,
        view.zoom
    );
    if let Some(first) = chart.layers.iter().flat_map(|layer| &layer.data).next() {
        out.push_str(&format!("  first point: {}\n", tooltip_text(first)));
    }
    out
}

fn render_bars(histogram: &Histogram) -> String {
    let max = histogram.max_count().max(1);
    let mut out = format!("  {}\n", histogram.title);
    for bin in &histogram.bins {
        let width = bin.count * BAR_WIDTH / max;
        out.push_str(&format!(
            "  {:>9.0} - {:>9.0} | {:<BAR_WIDTH$} {}\n",
            bin.start,
            bin.end,
            "#".repeat(width),
            bin.count
        ));
    }
    out
}

fn render_rows(columns: &[&str], rows: &[HousingRecord], limit: usize) -> String {
    let mut out = format!("  {}\n", columns.join(" | "));
    for row in rows.iter().take(limit) {
        out.push_str(&format!("  {}\n", row.cells().join(" | ")));
    }
    if rows.len() > limit {
        out.push_str(&format!("  ... and {} more rows\n", rows.len() - limit));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use housing_map_dataset::{SyntheticConfig, synthesize};
    use housing_map_filter::FilterCriteria;
    use housing_map_housing_models::IncomeLevel;

    use super::*;
    use crate::histogram::BIN_COUNT;
    use crate::page::render_cycle;

    #[test]
    fn default_page_lists_every_section() {
        let dataset = synthesize(&SyntheticConfig::default());
        let page = render_cycle(&dataset, &FilterCriteria::defaults_for(&dataset));
        let text = render_page(&page);

        assert!(text.contains("California Housing Data (1990)"));
        assert!(text.contains(&page.summary));
        assert!(text.contains("Income Level: Low (≤2.5)"));
        assert!(text.contains("== Housing Distribution Map =="));
        assert!(text.contains("== Median House Value Distribution =="));
        assert!(text.contains("centre (37.0, -119.0), zoom 5"));
        assert!(text.contains("first point: Median House Value: $"));
        assert_eq!(text.matches(" | #").count() + text.matches(" |  ").count(), BIN_COUNT);
        assert!(text.contains("more rows"));
    }

    #[test]
    fn empty_page_prints_messages() {
        let dataset = synthesize(&SyntheticConfig::default());
        let criteria = FilterCriteria {
            min_price: 0,
            selected_locations: BTreeSet::new(),
            income_level: IncomeLevel::Medium,
        };
        let text = render_page(&render_cycle(&dataset, &criteria));

        assert!(text.contains("Location Type: (none)"));
        assert!(text.contains("! No data available with current filters. Try adjusting your filters."));
        assert!(text.contains("! No data available for histogram"));
        assert!(text.contains("  No data to display with current filters"));
        assert!(text.contains("  No data\n"));
    }

    #[test]
    fn rows_truncate_after_limit() {
        let dataset = synthesize(&SyntheticConfig { seed: 9, count: 15 });
        let rows: Vec<HousingRecord> = dataset.iter().copied().collect();
        let out = render_rows(dataset.columns(), &rows, 10);
        assert!(out.contains("... and 5 more rows"));
        assert_eq!(out.lines().count(), 12);
    }
}
