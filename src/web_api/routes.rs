//! API Routes

use axum::{routing::get, Router};

use super::detection_log_routes::detection_log_routes;
use super::openapi::docs_router;
use crate::state::AppState;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health & Status
        .route("/", get(super::root))
        .route("/healthz", get(super::health_check))
        .route("/api/status", get(super::service_status))
        // Detection Logs
        .nest("/api", detection_log_routes())
        .with_state(state)
        // Swagger UI + OpenAPI document
        .merge(docs_router())
}
