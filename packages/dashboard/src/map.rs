//! Geographic scatter map.
//!
//! Produces a deck.gl-style chart description: one scatterplot layer with a
//! fixed color and radius, a fixed initial view over California, and a
//! hover tooltip. The front end turns this into an interactive map.

use housing_map_filter::FilteredView;
use housing_map_housing_models::HousingRecord;
use serde::Serialize;

use crate::panel::Panel;

/// Warning shown instead of the map for an empty view.
pub const EMPTY_MAP_WARNING: &str =
    "No data available with current filters. Try adjusting your filters.";

/// Tooltip template; `{field}` placeholders are filled per hovered point.
pub const TOOLTIP_HTML: &str =
    "<b>Median House Value:</b> ${median_house_value}<br/><b>Median Income:</b> {median_income}";

/// RGBA point color (semi-transparent red).
pub const POINT_COLOR: [u8; 4] = [255, 0, 0, 160];
/// Point radius in meters.
pub const POINT_RADIUS: u32 = 5000;

/// A single plotted point with the fields the tooltip needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    /// Longitude in WGS84 degrees.
    pub longitude: f64,
    /// Latitude in WGS84 degrees.
    pub latitude: f64,
    /// Median house value in dollars.
    pub median_house_value: u32,
    /// Median income.
    pub median_income: f64,
}

impl From<&HousingRecord> for MapPoint {
    fn from(record: &HousingRecord) -> Self {
        Self {
            longitude: record.longitude,
            latitude: record.latitude,
            median_house_value: record.median_house_value,
            median_income: record.median_income,
        }
    }
}

/// A scatterplot layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterplotLayer {
    /// Layer kind, always `ScatterplotLayer`.
    #[serde(rename = "type")]
    pub layer_type: &'static str,
    /// Points to draw.
    pub data: Vec<MapPoint>,
    /// Field names holding `[x, y]`.
    pub get_position: [&'static str; 2],
    /// RGBA fill color shared by every point.
    pub get_color: [u8; 4],
    /// Radius shared by every point, in meters.
    pub get_radius: u32,
    /// Whether points react to hover.
    pub pickable: bool,
    /// Whether the hovered point is highlighted.
    pub auto_highlight: bool,
}

/// Initial camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Zoom level.
    pub zoom: f64,
    /// Camera pitch in degrees.
    pub pitch: f64,
}

impl ViewState {
    /// Center of California at state-wide zoom.
    pub const CALIFORNIA: Self = Self {
        latitude: 37.0,
        longitude: -119.0,
        zoom: 5.0,
        pitch: 0.0,
    };
}

/// Tooltip box styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    /// Background color.
    pub background_color: &'static str,
    /// Text color.
    pub color: &'static str,
}

/// Hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    /// HTML template with `{field}` placeholders.
    pub html: &'static str,
    /// Box styling.
    pub style: TooltipStyle,
}

/// A complete map description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapChart {
    /// Layers, bottom to top.
    pub layers: Vec<ScatterplotLayer>,
    /// Initial camera.
    pub initial_view_state: ViewState,
    /// Hover tooltip.
    pub tooltip: Tooltip,
    /// Base map style name.
    pub map_style: &'static str,
}

impl MapChart {
    /// Total number of plotted points across layers.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.data.len()).sum()
    }
}

/// Plain-text tooltip for `point`.
#[must_use]
pub fn tooltip_text(point: &MapPoint) -> String {
    format!(
        "Median House Value: ${} / Median Income: {}",
        point.median_house_value, point.median_income
    )
}

/// Renders the scatter map for `view`, or a warning when it is empty.
#[must_use]
pub fn render_map(view: &FilteredView<'_>) -> Panel<MapChart> {
    if view.is_empty() {
        return Panel::Warning(EMPTY_MAP_WARNING.to_string());
    }

    let layer = ScatterplotLayer {
        layer_type: "ScatterplotLayer",
        data: view.iter().map(MapPoint::from).collect(),
        get_position: ["longitude", "latitude"],
        get_color: POINT_COLOR,
        get_radius: POINT_RADIUS,
        pickable: true,
        auto_highlight: true,
    };

    Panel::Rendered(MapChart {
        layers: vec![layer],
        initial_view_state: ViewState::CALIFORNIA,
        tooltip: Tooltip {
            html: TOOLTIP_HTML,
            style: TooltipStyle {
                background_color: "steelblue",
                color: "white",
            },
        },
        map_style: "light",
    })
}
