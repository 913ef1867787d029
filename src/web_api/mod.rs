//! WebAPI - REST API Endpoints
//!
//! ## Responsibilities
//!
//! - HTTP API routes
//! - Request validation
//! - Response formatting

mod detection_log_routes;
mod openapi;
mod routes;

pub use detection_log_routes::detection_log_routes;
pub use openapi::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
pub use routes::create_router;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Banner at the server root
pub async fn root() -> &'static str {
    "Face Log Server is running"
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_connected = match state.detection_log.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let status = if db_connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_connected { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        db_connected,
    };

    (status, Json(response))
}

/// Status endpoint
pub async fn service_status(State(_state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": "face-log-server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
