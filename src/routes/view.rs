//! `GET /view/{subsystem}`: the view model of one subsystem page.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use farmwatch::{build_view_model, profiles, Subsystem, ViewModel};
use tracing::{debug, info};

use super::{farm_or_none, page_configs, ApiError};
use crate::{Config, FarmBackend};

// ---

pub fn router() -> Router<(FarmBackend, Config)> {
    // ---
    Router::new().route("/view/{subsystem}", get(handler))
}

async fn handler(
    Path(name): Path<String>,
    State((backend, config)): State<(FarmBackend, Config)>,
) -> Result<Json<ViewModel>, ApiError> {
    // ---
    let subsystem: Subsystem = name.parse()?;
    info!("GET /view/{} - Building page", subsystem);

    // Step 1: Fetch readings, actions and calibration together
    debug!("GET /view/{} - Step 1", subsystem);

    let (history, actions, farm) = tokio::join!(
        backend.reading_history(config.history_limit.max(1)),
        backend.actions(Some(subsystem), config.action_limit),
        backend.farm_config(),
    );
    let history = history.map_err(ApiError::Backend)?;
    let actions = actions.map_err(ApiError::Backend)?;
    let configs = page_configs(farm_or_none(farm).as_ref(), &config)?;

    // Step 2: Derive the view model; the newest reading is the current one
    debug!("GET /view/{} - Step 2", subsystem);

    let page = profiles::find(&configs, subsystem)
        .ok_or_else(|| ApiError::UnknownSubsystem(farmwatch::models::UnknownSubsystem(name)))?;
    let view = build_view_model(history.last(), &history, &actions, page, &config.clock)?;

    info!(
        "View complete: {} is {} with {} points and {} rows",
        subsystem,
        view.status_label(),
        view.chart_series.len(),
        view.history_rows.len()
    );
    Ok(Json(view))
}
