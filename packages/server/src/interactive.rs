//! Interactive mode for the server.
//!
//! Prompts the user for the dataset source, bind address and port before
//! starting the server.

use dialoguer::{Confirm, Input};
use housing_map_dataset::{DATA_PATH_ENV, RECORD_COUNT_ENV, SEED_ENV};
use housing_map_dataset::synthetic::{DEFAULT_RECORD_COUNT, DEFAULT_SEED};

use crate::{BIND_ADDR_ENV, DEFAULT_BIND_ADDR, DEFAULT_PORT, PORT_ENV, ServerError};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks for an optional CSV path (or a seed and record count for synthetic
/// data), a bind address and a port, sets the corresponding environment
/// variables, and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns [`ServerError`] if the underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> Result<(), ServerError> {
    println!("Housing Map Server");
    println!();

    let data_path: String = Input::new()
        .with_prompt("CSV data path (empty for synthetic data)")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    let (seed, count) = if data_path.trim().is_empty() {
        let seed: String = Input::new()
            .with_prompt("Random seed")
            .default(DEFAULT_SEED.to_string())
            .interact_text()
            .unwrap_or_else(|_| DEFAULT_SEED.to_string());
        let count: String = Input::new()
            .with_prompt("Record count")
            .default(DEFAULT_RECORD_COUNT.to_string())
            .interact_text()
            .unwrap_or_else(|_| DEFAULT_RECORD_COUNT.to_string());
        (Some(seed), Some(count))
    } else {
        (None, None)
    };

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(DEFAULT_BIND_ADDR.to_string())
        .interact_text()
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default(DEFAULT_PORT.to_string())
        .interact_text()
        .unwrap_or_else(|_| DEFAULT_PORT.to_string());

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        if data_path.trim().is_empty() {
            std::env::remove_var(DATA_PATH_ENV);
        } else {
            std::env::set_var(DATA_PATH_ENV, data_path.trim());
        }
        if let Some(seed) = &seed {
            std::env::set_var(SEED_ENV, seed);
        }
        if let Some(count) = &count {
            std::env::set_var(RECORD_COUNT_ENV, count);
        }
        std::env::set_var(BIND_ADDR_ENV, &bind_addr);
        std::env::set_var(PORT_ENV, &port_str);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port_str}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
