//! Application entry point for the `rester` demo server.
//!
//! This binary orchestrates the startup sequence, including:
//! - Loading configuration from environment variables or `.env`
//! - Building the JSON logger and installing it as the global subscriber
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `RESTER_ADDR` (optional) – listen address (default: `0.0.0.0:8080`)
//! - `RESTER_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//! - `RESTER_LOG_SOURCE` (optional) – attach file/line to log records
use axum::Router;
use dotenvy::dotenv;

use anyhow::Result;

use rester::{config, logger, routes};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();

    let cfg = config::load_from_env()?;

    let logger = logger::Options::default()
        .with_level(cfg.log_level)
        .with_source(cfg.log_source)
        .build();
    logger.install_global()?;
    cfg.log_config();

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(logger);

    tracing::info!("Listening on {}", cfg.addr);

    let listener = tokio::net::TcpListener::bind(cfg.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
