//! `GET /devices`: every actuator with its on/off state and toggle label.

use axum::{extract::State, routing::get, Json, Router};
use farmwatch::DeviceStatus;
use tracing::info;

use super::ApiError;
use crate::{Config, FarmBackend};

// ---

pub fn router() -> Router<(FarmBackend, Config)> {
    // ---
    Router::new().route("/devices", get(handler))
}

async fn handler(
    State((backend, _config)): State<(FarmBackend, Config)>,
) -> Result<Json<Vec<DeviceStatus>>, ApiError> {
    // ---
    info!("GET /devices - Listing devices");

    let devices = backend.devices().await.map_err(ApiError::Backend)?;

    let on = devices.iter().filter(|d| d.state.is_on()).count();
    info!("Devices complete: {} listed, {} on", devices.len(), on);
    Ok(Json(devices))
}
