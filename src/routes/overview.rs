//! `GET /overview`: the dashboard home page.

use axum::{extract::State, routing::get, Json, Router};
use farmwatch::{build_overview, Overview};
use tracing::info;

use super::{farm_or_none, page_configs, ApiError};
use crate::{Config, FarmBackend};

// ---

pub fn router() -> Router<(FarmBackend, Config)> {
    // ---
    Router::new().route("/overview", get(handler))
}

async fn handler(
    State((backend, config)): State<(FarmBackend, Config)>,
) -> Result<Json<Overview>, ApiError> {
    // ---
    info!("GET /overview - Building dashboard");

    let (latest, actions, farm) = tokio::join!(
        backend.reading_history(1),
        backend.actions(None, config.action_limit),
        backend.farm_config(),
    );
    let latest = latest.map_err(ApiError::Backend)?;
    let actions = actions.map_err(ApiError::Backend)?;
    let farm = farm_or_none(farm);
    let configs = page_configs(farm.as_ref(), &config)?;
    let mode = farm.map(|f| f.mode);

    let overview = build_overview(latest.last(), &actions, &configs, mode, &config.clock)?;

    info!(
        "Dashboard complete: {} cards, {} alerts",
        overview.cards.len(),
        overview.alerts.len()
    );
    Ok(Json(overview))
}
