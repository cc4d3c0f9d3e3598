//! One-shot rendering to stdout.

use clap::{Args, ValueEnum};
use housing_map_dashboard::{html, render_cycle, text};
use housing_map_dataset::Dataset;
use housing_map_housing_models::IncomeLevel;
use housing_map_server_models::{
    DashboardQuery, INCOME_PARAM, LOCATIONS_PARAM, MIN_PRICE_PARAM, QueryError,
};

/// Output format of `render`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Terminal text
    #[default]
    Text,
    /// The page as JSON
    Json,
    /// A standalone HTML document
    Html,
}

/// Flags of the `render` subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Minimum median house value in dollars
    #[arg(long)]
    pub min_price: Option<u32>,
    /// Comma-separated proximity labels (an empty string selects none)
    #[arg(long)]
    pub locations: Option<String>,
    /// Income band: low, medium or high
    #[arg(long)]
    pub income: Option<IncomeLevel>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

impl RenderArgs {
    /// Converts the flags into a dashboard query.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if `--locations` names an unknown label.
    pub fn query(&self) -> Result<DashboardQuery, QueryError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(min_price) = self.min_price {
            pairs.push((MIN_PRICE_PARAM, min_price.to_string()));
        }
        if let Some(locations) = &self.locations {
            pairs.push((LOCATIONS_PARAM, locations.clone()));
        }
        if let Some(income) = self.income {
            pairs.push((INCOME_PARAM, income.to_string()));
        }
        DashboardQuery::from_pairs(pairs)
    }
}

/// Runs one render cycle for `args` and formats it.
///
/// # Errors
///
/// Returns an error if the flags are invalid or JSON serialization fails.
pub fn render(dataset: &Dataset, args: &RenderArgs) -> Result<String, Box<dyn std::error::Error>> {
    let criteria = args.query()?.to_criteria(dataset);
    log::debug!("Rendering {:?} for {criteria:?}", args.format);
    let page = render_cycle(dataset, &criteria);

    Ok(match args.format {
        Format::Text => text::render_page(&page),
        Format::Json => serde_json::to_string_pretty(&page)?,
        Format::Html => html::render_page(&page),
    })
}
