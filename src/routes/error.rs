//! JSON error responses shared by every route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use farmwatch::models::UnknownSubsystem;
use farmwatch::TelemetryError;
use serde_json::json;
use uuid::Uuid;

// ---

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownSubsystem(#[from] UnknownSubsystem),

    #[error("farm backend unavailable: {0}")]
    Backend(anyhow::Error),

    #[error("invalid dashboard configuration: {0}")]
    Telemetry(#[from] TelemetryError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownSubsystem(_) => StatusCode::NOT_FOUND,
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
            ApiError::Telemetry(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": self.to_string()
        });

        // Server-side failures get an id that ties the response to the log line
        if status.is_server_error() {
            let error_id = Uuid::new_v4();
            tracing::error!(error_id = ?error_id, "{}", self);
            error_obj["error_id"] = json!(error_id.to_string());
        }

        (status, Json(json!({ "error": error_obj }))).into_response()
    }
}
