//! Configuration loader for the `farmwatch-gateway` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). The rest of the gateway only ever sees the typed
//! [`Config`] snapshot.
use std::env;
use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use farmwatch::profiles::PageDefaults;
use farmwatch::ClockFormat;

/// Parse an optional environment variable with a default value.
macro_rules! parse_env {
    ($lookup:expr, $var_name:expr, $ty:ty, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($lookup:expr, $var_name:expr) => {
        $lookup($var_name)
            .ok_or_else(|| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed gateway configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Farm backend base URL, including the `/api` prefix.
    pub api_url: String,

    /// Bearer token forwarded to the backend, if it requires one.
    pub api_token: Option<String>,

    /// Address the gateway listens on.
    pub bind_addr: SocketAddr,

    /// Readings per history chart.
    pub history_limit: usize,

    /// Rows per action table.
    pub action_limit: usize,

    /// Offset of the dashboard's wall clock from UTC, in minutes.
    pub utc_offset_minutes: i32,

    /// Actor shown for actions with no user attached.
    pub actor_fallback: String,

    /// `HH:MM` formatter at `utc_offset_minutes`.
    pub clock: ClockFormat,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `FARM_API_URL` – farm backend base URL (e.g. `http://localhost:3000/api`)
///
/// Optional:
/// - `FARM_API_TOKEN` – bearer token for the backend
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
/// - `HISTORY_LIMIT` – readings per chart (default: 10)
/// - `ACTION_LIMIT` – rows per action table (default: 10)
/// - `UTC_OFFSET_MINUTES` – dashboard clock offset (default: -180, Brasília)
/// - `ACTOR_FALLBACK` – actor for automated actions (default: `Sistema`)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    load_from(|name| env::var(name).ok())
}

/// Same as [`load_from_env`], reading variables through `lookup`.
pub fn load_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let api_url = require_env!(lookup, "FARM_API_URL");
    let api_url = api_url.trim_end_matches('/').to_string();
    let api_token = lookup("FARM_API_TOKEN").filter(|t| !t.is_empty());
    let bind_addr = parse_env!(lookup, "BIND_ADDR", SocketAddr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    let history_limit = parse_env!(lookup, "HISTORY_LIMIT", usize, 10);
    let action_limit = parse_env!(lookup, "ACTION_LIMIT", usize, 10);
    let utc_offset_minutes = parse_env!(lookup, "UTC_OFFSET_MINUTES", i32, -180);
    let actor_fallback = lookup("ACTOR_FALLBACK").unwrap_or_else(|| "Sistema".to_string());

    let clock = ClockFormat::from_offset_minutes(utc_offset_minutes)
        .ok_or_else(|| anyhow!("Invalid UTC_OFFSET_MINUTES: {}", utc_offset_minutes))?;

    Ok(Config {
        api_url,
        api_token,
        bind_addr,
        history_limit,
        action_limit,
        utc_offset_minutes,
        actor_fallback,
        clock,
    })
}

impl Config {
    // ---
    pub fn page_defaults(&self) -> PageDefaults {
        PageDefaults {
            history_limit: self.history_limit,
            action_limit: self.action_limit,
            actor_fallback: self.actor_fallback.clone(),
        }
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the backend token while showing all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_token = self.api_token.as_deref().map_or("<none>".to_string(), mask_secret);

        tracing::info!("Configuration loaded:");
        tracing::info!("  FARM_API_URL       : {}", self.api_url);
        tracing::info!("  FARM_API_TOKEN     : {}", masked_token);
        tracing::info!("  BIND_ADDR          : {}", self.bind_addr);
        tracing::info!("  HISTORY_LIMIT      : {}", self.history_limit);
        tracing::info!("  ACTION_LIMIT       : {}", self.action_limit);
        tracing::info!("  UTC_OFFSET_MINUTES : {}", self.utc_offset_minutes);
        tracing::info!("  ACTOR_FALLBACK     : {}", self.actor_fallback);
    }
}

/// Keep the first four characters of a secret, mask the rest.
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
