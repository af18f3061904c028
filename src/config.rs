//! Configuration loader for the `rester` demo server.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
use std::{env, net::SocketAddr};

use anyhow::{anyhow, Result};
use tracing::Level;

/// Parse an optional environment variable with `FromStr`, falling back to a default.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,

    /// Minimum level emitted by the JSON logger.
    pub log_level: Level,

    /// Attach file and line of the call site to log records.
    pub log_source: bool,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `RESTER_ADDR` – listen address (default: `0.0.0.0:8080`)
/// - `RESTER_LOG_LEVEL` – `trace|debug|info|warn|error` (default: `info`)
/// - `RESTER_LOG_SOURCE` – `1|true|yes` / `0|false|no` (default: off)
///
/// Returns an error if any variable is set to an invalid value.
pub fn load_from_env() -> Result<Config> {
    // ---
    let addr = parse_env!("RESTER_ADDR", SocketAddr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    let log_level = parse_env!("RESTER_LOG_LEVEL", Level, Level::INFO);
    let log_source = match env::var("RESTER_LOG_SOURCE").ok() {
        Some(v) => parse_flag(&v).ok_or_else(|| anyhow!("Invalid RESTER_LOG_SOURCE: {}", v))?,
        None => false,
    };

    Ok(Config {
        addr,
        log_level,
        log_source,
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  RESTER_ADDR       : {}", self.addr);
        tracing::info!("  RESTER_LOG_LEVEL  : {}", self.log_level);
        tracing::info!("  RESTER_LOG_SOURCE : {}", self.log_source);
    }
}
