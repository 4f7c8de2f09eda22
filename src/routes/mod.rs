use axum::Router;
use farmwatch::profiles;
use farmwatch::{FarmConfig, SubsystemConfig};
use tracing::warn;

use crate::{Config, FarmBackend};

mod command;
mod devices;
mod error;
mod health;
mod overview;
mod view;

pub use error::ApiError;

// ---

pub fn router(backend: FarmBackend, config: Config) -> Router {
    // ---
    Router::new()
        .merge(view::router())
        .merge(overview::router())
        .merge(command::router())
        .merge(devices::router())
        .merge(health::router())
        .with_state((backend, config))
}

/// The backend's farm config, or `None` when it cannot be fetched. Pages
/// still render with built-in calibration in that case.
fn farm_or_none(farm: anyhow::Result<FarmConfig>) -> Option<FarmConfig> {
    match farm {
        Ok(farm) => Some(farm),
        Err(e) => {
            warn!("Using built-in calibration: {}", e);
            None
        }
    }
}

/// Page configurations calibrated from `farm` when available.
fn page_configs(farm: Option<&FarmConfig>, config: &Config) -> Result<Vec<SubsystemConfig>, ApiError> {
    // ---
    let defaults = config.page_defaults();
    let configs = match farm {
        Some(farm) => profiles::from_farm_config(farm, &defaults)?,
        None => profiles::all(&defaults)?,
    };
    Ok(configs)
}
