//! `POST /commands`: forward an actuator command to the farm backend and
//! log it as a manual action.

use axum::{extract::State, routing::post, Json, Router};
use farmwatch::CommandRequest;
use tracing::{info, warn};

use super::ApiError;
use crate::{CommandResponse, Config, FarmBackend};

// ---

pub fn router() -> Router<(FarmBackend, Config)> {
    // ---
    Router::new().route("/commands", post(handler))
}

async fn handler(
    State((backend, _config)): State<(FarmBackend, Config)>,
    Json(command): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    // ---
    let label = command.actuator.state_label(command.state);
    info!(
        "POST /commands - {} ({}) -> {}",
        command.actuator.subsystem(),
        command.user_id,
        label
    );

    let response = backend
        .send_command(&command)
        .await
        .map_err(ApiError::Backend)?;

    info!("Command accepted: {}", response.message);

    // The device already switched, so a failed log entry does not fail the request
    if let Err(e) = backend.create_action(&command.to_action()).await {
        warn!("Command for {} not recorded: {}", command.actuator.subsystem(), e);
    }

    Ok(Json(response))
}
