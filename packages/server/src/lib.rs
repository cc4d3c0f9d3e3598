#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the housing map dashboard.
//!
//! Serves the HTML dashboard at `/` and the same render cycle as JSON under
//! `/api`. The dataset is built once at start-up into the process-wide
//! singleton; every request reads it and re-runs the filter and renderers.

mod handlers;
pub mod interactive;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use housing_map_dataset::{Dataset, DatasetError, DatasetSource};

/// Environment variable holding the bind address.
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";
/// Environment variable holding the port.
pub const PORT_ENV: &str = "PORT";
/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default port.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The dataset could not be configured or built.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Binding or serving failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The memoized dataset.
    pub dataset: &'static Dataset,
}

/// Initializes `pretty_env_logger` from `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logger() {
    if pretty_env_logger::try_init_custom_env("RUST_LOG").is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Registers every route. Shared by [`run_server`] and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/dashboard", web::get().to(handlers::dashboard))
            .route("/records", web::get().to(handlers::records)),
    )
    .route("/", web::get().to(handlers::index));
}

/// Bind address and port from `BIND_ADDR` and `PORT`.
#[must_use]
pub fn bind_config() -> (String, u16) {
    let bind_addr =
        std::env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    (bind_addr, port)
}

/// Starts the housing map server.
///
/// Reads the dataset source from the environment, builds the dataset, and
/// starts the Actix-Web HTTP server. This is a regular async function;
/// the caller provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// * [`ServerError::Dataset`] if the dataset source is misconfigured or
///   cannot be loaded
/// * [`ServerError::Io`] if the server fails to bind or run
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    init_logger();

    let source = DatasetSource::from_env()?;
    log::info!("Loading dataset from {source}...");
    let dataset = housing_map_dataset::init(&source).inspect_err(|e| {
        log::error!("Failed to load dataset: {e}");
    })?;

    let state = web::Data::new(AppState { dataset });
    let (bind_addr, port) = bind_config();

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
