//! HTML rendering of a [`Page`].
//!
//! The sidebar is a plain GET form that re-submits on every change, so each
//! control change is a fresh request and a fresh render cycle. The map is
//! shipped as JSON and drawn client-side with deck.gl; the histogram is
//! drawn server-side as inline SVG.

use housing_map_housing_models::HousingRecord;
use serde::Serialize;

use crate::controls::Sidebar;
use crate::debug::DebugInfo;
use crate::histogram::Histogram;
use crate::map::MapChart;
use crate::page::Page;
use crate::panel::Panel;

const STYLES: &str = r"
body { margin: 0; font-family: sans-serif; display: flex; min-height: 100vh; color: #262730; }
.sidebar { width: 300px; padding: 1.5rem; background: #f0f2f6; box-sizing: border-box; }
.sidebar fieldset { border: none; padding: 0; margin: 1rem 0; }
.sidebar legend, .sidebar label.control { font-weight: 600; display: block; margin-bottom: 0.4rem; }
.sidebar input[type=range] { width: 100%; }
main { flex: 1; padding: 1.5rem 3rem; min-width: 0; }
#map { position: relative; width: 100%; height: 500px; }
.warning { background: #fffce7; border-left: 4px solid #f0b400; padding: 0.75rem 1rem; }
.notice { background: #eef4fb; border-left: 4px solid #1c83e1; padding: 0.75rem 1rem; }
details { margin: 1rem 0; }
table { border-collapse: collapse; font-size: 0.85rem; }
th, td { border: 1px solid #ddd; padding: 0.2rem 0.5rem; text-align: right; }
.table-scroll { max-height: 400px; overflow: auto; }
";

const MAP_SCRIPT: &str = r"
(function () {
  const MAP_STYLES = {
    light: 'https://basemaps.cartocdn.com/gl/positron-gl-style/style.json',
    dark: 'https://basemaps.cartocdn.com/gl/dark-matter-gl-style/style.json',
  };
  const spec = JSON.parse(document.getElementById('map-spec').textContent);
  const layers = spec.layers.map((layer, i) => new deck.ScatterplotLayer({
    id: 'layer-' + i,
    data: layer.data,
    getPosition: (d) => [d[layer.getPosition[0]], d[layer.getPosition[1]]],
    getFillColor: layer.getColor,
    getRadius: layer.getRadius,
    pickable: layer.pickable,
    autoHighlight: layer.autoHighlight,
  }));
  new deck.DeckGL({
    container: 'map',
    mapStyle: MAP_STYLES[spec.mapStyle] || MAP_STYLES.light,
    initialViewState: spec.initialViewState,
    controller: true,
    layers,
    getTooltip: ({ object }) => object && {
      html: spec.tooltip.html.replace(/\{(\w+)\}/g, (_, key) => object[key]),
      style: spec.tooltip.style,
    },
  });
})();
";

const SVG_WIDTH: f64 = 800.0;
const SVG_HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;
const Y_TICKS: usize = 5;

/// Escapes text for use in HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes `value` for embedding inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json.replace("</", "<\\/")),
        Err(e) => {
            log::error!("Failed to serialize map spec: {e}");
            None
        }
    }
}

/// Renders a complete HTML document for `page`.
#[must_use]
pub fn render_page(page: &Page) -> String {
    let mut body = String::new();

    body.push_str(&render_sidebar(&page.sidebar));
    body.push_str("<main>\n");
    body.push_str(&format!("<h1>{}</h1>\n", escape(page.heading)));
    body.push_str(&format!("<p class=\"summary\">{}</p>\n", escape(&page.summary)));

    body.push_str(&format!(
        "<details><summary>{}</summary>\n{}</details>\n",
        escape(page.debug_expander),
        render_debug(&page.debug)
    ));

    body.push_str(&format!("<h3>{}</h3>\n", escape(page.map_heading)));
    body.push_str(&render_map_panel(&page.map));

    body.push_str(&format!("<h3>{}</h3>\n", escape(page.histogram_heading)));
    body.push_str(&match &page.histogram {
        Panel::Rendered(histogram) => render_histogram_svg(histogram),
        other => render_message(other),
    });

    body.push_str(&format!(
        "<details><summary>{}</summary>\n{}</details>\n",
        escape(page.table_expander),
        match &page.table {
            Panel::Rendered(table) => render_records(&table.columns, &table.rows),
            other => render_message(other),
        }
    ));
    body.push_str("</main>\n");

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>\">\n\
         <link href=\"https://unpkg.com/maplibre-gl@3/dist/maplibre-gl.css\" rel=\"stylesheet\">\n\
         <script src=\"https://unpkg.com/maplibre-gl@3/dist/maplibre-gl.js\"></script>\n\
         <script src=\"https://unpkg.com/deck.gl@9/dist.min.js\"></script>\n\
         <style>{STYLES}</style>\n</head>\n<body class=\"layout-{layout}\">\n{body}</body>\n</html>\n",
        title = escape(page.config.title),
        icon = page.config.icon,
        layout = escape(page.config.layout),
    )
}

/// Renders a minimal error document, used when the request itself is bad.
#[must_use]
pub fn render_error_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>Bad request</title></head>\n\
         <body><div class=\"warning\">{}</div><p><a href=\"/\">Reset filters</a></p></body>\n</html>\n",
        escape(message)
    )
}

fn render_sidebar(sidebar: &Sidebar) -> String {
    let mut html = String::new();

    html.push_str("<form class=\"sidebar\" method=\"get\" action=\"/\" onchange=\"this.submit()\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", escape(sidebar.header)));

    let price = &sidebar.price;
    let (track_min, track_max) = price.track_bounds();
    html.push_str(&format!(
        "<label class=\"control\" for=\"min_price\">{}: <output id=\"min_price_value\">{}</output></label>\n\
         <input type=\"range\" id=\"min_price\" name=\"min_price\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\" \
         oninput=\"document.getElementById('min_price_value').value = this.value\">\n",
        escape(price.label),
        price.value,
        track_min,
        track_max,
        price.step,
        price.value
    ));

    let locations = &sidebar.locations;
    html.push_str(&format!(
        "<fieldset>\n<legend>{}</legend>\n<input type=\"hidden\" name=\"locations\" value=\"\">\n",
        escape(locations.label)
    ));
    for option in &locations.options {
        let label = option.to_string();
        let checked = if locations.selected.contains(option) {
            " checked"
        } else {
            ""
        };
        html.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"locations\" value=\"{label}\"{checked}> {label}</label><br>\n",
            label = escape(&label),
        ));
    }
    html.push_str("</fieldset>\n");

    let income = &sidebar.income;
    html.push_str(&format!(
        "<fieldset>\n<legend>{}</legend>\n",
        escape(income.label)
    ));
    for option in &income.options {
        let checked = if option.key == income.selected {
            " checked"
        } else {
            ""
        };
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"income\" value=\"{}\"{checked}> {}</label><br>\n",
            escape(option.key.as_ref()),
            escape(option.label)
        ));
    }
    html.push_str("</fieldset>\n");

    html.push_str("<noscript><button type=\"submit\">Apply</button></noscript>\n");
    html.push_str(&format!(
        "<hr>\n<h3>{}</h3>\n<p>{}</p>\n</form>\n",
        escape(sidebar.footer_heading),
        escape(sidebar.footer_text)
    ));

    html
}

fn render_message<T>(panel: &Panel<T>) -> String {
    let class = if panel.is_warning() {
        "warning"
    } else {
        "notice"
    };
    format!(
        "<div class=\"{class}\">{}</div>\n",
        escape(panel.message().unwrap_or_default())
    )
}

fn render_debug(debug: &DebugInfo) -> String {
    let columns: Vec<String> = debug.columns.iter().map(|c| format!("'{c}'")).collect();
    let mut html = format!(
        "<p>Data columns: [{}]</p>\n<p>Filtered data sample:</p>\n",
        escape(&columns.join(", "))
    );
    html.push_str(&match &debug.sample {
        Panel::Rendered(rows) => render_records(&debug.columns, rows),
        other => format!("<p>{}</p>\n", escape(other.message().unwrap_or_default())),
    });
    html
}

fn render_map_panel(panel: &Panel<MapChart>) -> String {
    let Panel::Rendered(chart) = panel else {
        return render_message(panel);
    };
    let Some(spec) = script_json(chart) else {
        return render_message(&Panel::<()>::Warning(
            "Map could not be rendered".to_string(),
        ));
    };

    format!(
        "<div id=\"map\"></div>\n<script type=\"application/json\" id=\"map-spec\">{spec}</script>\n\
         <script>{MAP_SCRIPT}</script>\n"
    )
}

fn render_records(columns: &[&str], rows: &[HousingRecord]) -> String {
    let mut html = String::from("<div class=\"table-scroll\"><table>\n<thead><tr><th></th>");
    for column in columns {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (index, row) in rows.iter().enumerate() {
        html.push_str(&format!("<tr><th>{index}</th>"));
        for cell in row.cells() {
            html.push_str(&format!("<td>{}</td>", escape(&cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table></div>\n");
    html
}

#[allow(clippy::cast_precision_loss)]
fn render_histogram_svg(histogram: &Histogram) -> String {
    let plot_w = SVG_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = SVG_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;
    let max_count = histogram.max_count().max(1) as f64;
    let bar_w = plot_w / histogram.bins.len().max(1) as f64;
    let style = &histogram.style;

    let mut svg = format!(
        "<svg class=\"histogram\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {SVG_WIDTH} {SVG_HEIGHT}\" \
         width=\"100%\" role=\"img\" aria-label=\"{}\">\n",
        escape(histogram.title)
    );

    for tick in 0..=Y_TICKS {
        let fraction = tick as f64 / Y_TICKS as f64;
        let y = bottom - fraction * plot_h;
        svg.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"gray\" stroke-opacity=\"{}\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"end\">{:.0}</text>\n",
            MARGIN_LEFT + plot_w,
            style.grid_alpha,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            fraction * max_count
        ));
    }

    for (i, bin) in histogram.bins.iter().enumerate() {
        let height = bin.count as f64 / max_count * plot_h;
        let x = (i as f64).mul_add(bar_w, MARGIN_LEFT);
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{:.2}\" width=\"{bar_w:.2}\" height=\"{height:.2}\" fill=\"{}\" \
             fill-opacity=\"{}\" stroke=\"{}\"><title>{:.0} to {:.0}: {}</title></rect>\n",
            bottom - height,
            escape(style.color),
            style.alpha,
            escape(style.edge_color),
            bin.start,
            bin.end,
            bin.count
        ));
        if i % 6 == 0 {
            svg.push_str(&format!(
                "<text x=\"{x:.2}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{:.0}</text>\n",
                bottom + 18.0,
                bin.start
            ));
        }
    }

    if let Some(last) = histogram.bins.last() {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\">{:.0}</text>\n",
            MARGIN_LEFT + plot_w,
            bottom + 18.0,
            last.end
        ));
    }

    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"24\" font-size=\"16\" text-anchor=\"middle\">{}</text>\n\
         <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"14\" text-anchor=\"middle\">{}</text>\n\
         <text transform=\"translate(18 {:.1}) rotate(-90)\" font-size=\"14\" text-anchor=\"middle\">{}</text>\n\
         </svg>\n",
        MARGIN_LEFT + plot_w / 2.0,
        escape(histogram.title),
        MARGIN_LEFT + plot_w / 2.0,
        SVG_HEIGHT - 12.0,
        escape(histogram.x_label),
        MARGIN_TOP + plot_h / 2.0,
        escape(histogram.y_label)
    ));

    svg
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use housing_map_dataset::{SyntheticConfig, synthesize};
    use housing_map_filter::FilterCriteria;
    use housing_map_housing_models::{IncomeLevel, OceanProximity};

    use super::*;
    use crate::histogram::BIN_COUNT;
    use crate::page::render_cycle;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn page_contains_controls_and_panels() {
        let dataset = synthesize(&SyntheticConfig::default());
        let page = render_cycle(&dataset, &FilterCriteria::defaults_for(&dataset));
        let html = render_page(&page);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>California Housing Data</title>"));
        assert!(html.contains("name=\"min_price\""));
        assert!(html.contains("step=\"1000\""));
        assert!(html.contains("value=\"NEAR BAY\" checked"));
        assert!(html.contains("value=\"low\" checked"));
        assert!(html.contains("Low (≤2.5)"));
        assert!(html.contains("Medium (&gt;2.5 &amp; &lt;4.5)"));
        assert!(html.contains("id=\"map-spec\""));
        assert!(html.contains("ScatterplotLayer"));
        assert_eq!(html.matches("<rect ").count(), BIN_COUNT);
        assert!(html.contains("Distribution of Median House Values"));
        assert!(html.contains(&page.summary));
    }

    #[test]
    fn empty_page_shows_warnings_instead_of_charts() {
        let dataset = synthesize(&SyntheticConfig::default());
        let criteria = FilterCriteria {
            min_price: 0,
            selected_locations: BTreeSet::new(),
            income_level: IncomeLevel::High,
        };
        let html = render_page(&render_cycle(&dataset, &criteria));

        assert!(!html.contains("id=\"map-spec\""));
        assert!(!html.contains("<rect "));
        assert!(html.contains("No data available with current filters. Try adjusting your filters."));
        assert!(html.contains("No data available for histogram"));
        assert!(html.contains("No data to display with current filters"));
        assert!(!html.contains("value=\"INLAND\" checked"));
        assert!(html.contains("value=\"high\" checked"));
    }

    #[test]
    fn unchecked_locations_stay_unchecked() {
        let dataset = synthesize(&SyntheticConfig::default());
        let criteria = FilterCriteria {
            min_price: 0,
            selected_locations: BTreeSet::from([OceanProximity::Inland]),
            income_level: IncomeLevel::Low,
        };
        let html = render_page(&render_cycle(&dataset, &criteria));
        assert!(html.contains("value=\"INLAND\" checked"));
        assert!(html.contains("value=\"NEAR BAY\">"));
    }

    #[test]
    fn slider_track_reaches_dataset_maximum() {
        let dataset = synthesize(&SyntheticConfig::default());
        let page = render_cycle(&dataset, &FilterCriteria::defaults_for(&dataset));
        let (_, max) = dataset.value_range().unwrap();
        let (lo, hi) = page.sidebar.price.track_bounds();
        let html = render_page(&page);

        assert!(html.contains(&format!("min=\"{lo}\" max=\"{hi}\" step=\"1000\"")));
        assert_eq!((hi - lo) % 1000, 0);
        assert!(hi >= max);
    }

    #[test]
    fn script_json_cannot_close_the_script_element() {
        let json = script_json(&"</script><script>alert(1)</script>").unwrap();
        assert!(!json.contains("</script>"));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = render_error_page("bad <income>");
        assert!(html.contains("bad &lt;income&gt;"));
    }
}
