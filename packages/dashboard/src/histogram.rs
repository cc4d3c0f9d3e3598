//! Median house value histogram.
//!
//! Values are binned over the filtered view's own range, not the full
//! dataset's, so the chart always spans exactly the selected records.

use housing_map_filter::FilteredView;
use serde::Serialize;

use crate::panel::Panel;

/// Number of equal-width bins.
pub const BIN_COUNT: usize = 30;

/// Warning shown instead of the histogram for an empty view.
pub const EMPTY_HISTOGRAM_WARNING: &str = "No data available for histogram";

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    /// Left edge (inclusive).
    pub start: f64,
    /// Right edge (exclusive, except for the last bin).
    pub end: f64,
    /// Number of values in the bin.
    pub count: usize,
}

/// Cosmetic chart settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramStyle {
    /// Bar fill color.
    pub color: &'static str,
    /// Bar outline color.
    pub edge_color: &'static str,
    /// Bar opacity.
    pub alpha: f64,
    /// Grid line opacity.
    pub grid_alpha: f64,
    /// Figure size in inches, `(width, height)`.
    pub figsize: (f64, f64),
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            color: "skyblue",
            edge_color: "black",
            alpha: 0.7,
            grid_alpha: 0.3,
            figsize: (10.0, 6.0),
        }
    }
}

/// A binned frequency chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    /// Chart title.
    pub title: &'static str,
    /// X axis label.
    pub x_label: &'static str,
    /// Y axis label.
    pub y_label: &'static str,
    /// Bars, left to right.
    pub bins: Vec<Bin>,
    /// Cosmetics.
    pub style: HistogramStyle,
}

impl Histogram {
    /// Height of the tallest bar.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Sum of all bar heights.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

/// Splits `values` into `bin_count` equal-width bins over their observed
/// range.
///
/// The last bin includes its right edge. A degenerate range (all values
/// equal) is widened to `value ± 0.5`. Returns no bins for empty input.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<Bin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bin_count as f64;
    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            start: (i as f64).mul_add(width, lo),
            end: if i + 1 == bin_count {
                hi
            } else {
                ((i + 1) as f64).mul_add(width, lo)
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let idx = (((value - lo) / width).floor().max(0.0) as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}

/// Renders the value histogram for `view`, or a warning when it is empty.
#[must_use]
pub fn render_histogram(view: &FilteredView<'_>) -> Panel<Histogram> {
    if view.is_empty() {
        return Panel::Warning(EMPTY_HISTOGRAM_WARNING.to_string());
    }

    let values: Vec<f64> = view.iter().map(|r| f64::from(r.median_house_value)).collect();

    Panel::Rendered(Histogram {
        title: "Distribution of Median House Values",
        x_label: "Median House Value",
        y_label: "Frequency",
        bins: bin_values(&values, BIN_COUNT),
        style: HistogramStyle::default(),
    })
}
