// src/routes/health.rs
//! Gateway health check endpoint.
//!
//! This module defines the `/health` route used by container orchestrators
//! and the dashboard itself to verify that the gateway is running and able to
//! respond to HTTP requests. It follows the Explicit Module Boundary Pattern
//! (EMBP):
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/health` route

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Handle `GET /health`.
///
/// Returns a static JSON object indicating the gateway is reachable. It does
/// not call the farm backend, so a backend outage does not fail this check.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the gateway
/// router whatever the state type is.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
