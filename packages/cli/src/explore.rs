//! Interactive terminal render loop.
//!
//! Each round prints the dashboard for the current selections, then
//! prompts for new ones. Every round is a full render cycle.

use dialoguer::{Confirm, Input, MultiSelect, Select};
use housing_map_dashboard::{Sidebar, render_cycle, resolve_criteria, text};
use housing_map_dataset::Dataset;
use housing_map_filter::FilterCriteria;

/// Runs the render loop until the user stops adjusting filters.
///
/// # Errors
///
/// Returns an error if a prompt cannot read from the terminal.
pub fn run(dataset: &Dataset) -> Result<(), dialoguer::Error> {
    let mut criteria = FilterCriteria::defaults_for(dataset);

    loop {
        let page = render_cycle(dataset, &criteria);
        println!("{}", text::render_page(&page));

        if !Confirm::new()
            .with_prompt("Adjust filters?")
            .default(true)
            .interact()?
        {
            return Ok(());
        }

        criteria = prompt_criteria(dataset, &page.sidebar)?;
    }
}

fn prompt_criteria(dataset: &Dataset, sidebar: &Sidebar) -> Result<FilterCriteria, dialoguer::Error> {
    let price = &sidebar.price;
    let min_price: u32 = Input::new()
        .with_prompt(format!("{} ({} to {})", price.label, price.min, price.max))
        .default(price.value)
        .interact_text()?;

    let options = &sidebar.locations.options;
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let checked: Vec<bool> = options
        .iter()
        .map(|option| sidebar.locations.selected.contains(option))
        .collect();
    let picked = MultiSelect::new()
        .with_prompt(sidebar.locations.label)
        .items(&labels)
        .defaults(&checked)
        .interact()?;

    let income = &sidebar.income;
    let income_labels: Vec<&str> = income.options.iter().map(|option| option.label).collect();
    let current = income
        .options
        .iter()
        .position(|option| option.key == income.selected)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt(income.label)
        .items(&income_labels)
        .default(current)
        .interact()?;

    Ok(resolve_criteria(
        dataset,
        Some(min_price),
        Some(picked.into_iter().map(|i| options[i]).collect()),
        Some(income.options[idx].key),
    ))
}
