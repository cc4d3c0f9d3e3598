#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line entry point for the housing map dashboard.
//!
//! `serve` starts the web dashboard, `explore` runs the render loop in the
//! terminal, and `render` prints a single render cycle. Without a
//! subcommand the user picks one interactively.

mod explore;
mod render;

use clap::{Parser, Subcommand};
use dialoguer::Select;
use housing_map_dataset::{Dataset, DatasetError, DatasetSource};

#[derive(Parser)]
#[command(name = "housing_map", about = "California housing data dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard web server
    Serve,
    /// Adjust filters and view the dashboard in the terminal
    Explore,
    /// Run one render cycle and print it
    Render(render::RenderArgs),
}

/// Interactive tool selection.
enum Tool {
    Server,
    Explore,
    Render,
}

impl Tool {
    const ALL: &[Self] = &[Self::Server, Self::Explore, Self::Render];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Server => "Start server",
            Self::Explore => "Explore in the terminal",
            Self::Render => "Print the default dashboard",
        }
    }
}

fn load_dataset() -> Result<&'static Dataset, DatasetError> {
    let source = DatasetSource::from_env()?;
    log::info!("Loading dataset from {source}...");
    housing_map_dataset::init(&source)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    housing_map_server::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => {
            actix_web::rt::System::new().block_on(housing_map_server::run_server())?;
        }
        Some(Commands::Explore) => explore::run(load_dataset()?)?,
        Some(Commands::Render(args)) => {
            println!("{}", render::render(load_dataset()?, &args)?);
        }
        None => {
            println!("California Housing Data");
            println!();

            let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

            let idx = Select::new()
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact()?;

            match Tool::ALL[idx] {
                Tool::Server => {
                    actix_web::rt::System::new()
                        .block_on(housing_map_server::interactive::run())?;
                }
                Tool::Explore => explore::run(load_dataset()?)?,
                Tool::Render => {
                    let args = render::RenderArgs::default();
                    println!("{}", render::render(load_dataset()?, &args)?);
                }
            }
        }
    }

    Ok(())
}
