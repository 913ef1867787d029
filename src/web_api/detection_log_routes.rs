//! Detection Log API Routes
//!
//! ## Endpoints (nested under /api)
//! - GET /detection-logs - all logs with picture paths
//! - GET /detection-logs/detail - recognized / unrecognized split
//! - GET /detection-logs/:id - single log
//! - GET /identities/:id/detection-logs - logs of an identity's faces
//! - POST /detection-logs - create one
//! - POST /detection-logs/bulk - create many
//! - PATCH /detection-logs/:id - change face
//! - DELETE /detection-logs/:id - delete
//!
//! Every handled outcome answers 200; success or failure is in the envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::openapi::{
    BatchCountEnvelope, DetailEnvelope, DetectionLogEnvelope, DetectionLogListEnvelope,
    MessageEnvelope, PictureListEnvelope,
};
use crate::detection_log_service::{
    CreateDetectionLogRequest, CreateManyDetectionLogRequest, UpdateDetectionLogRequest,
};
use crate::error::Error;
use crate::models::{ApiResponse, DetailResponse};
use crate::state::AppState;

/// Detection log API router
pub fn detection_log_routes() -> Router<AppState> {
    Router::new()
        .route("/detection-logs", get(list_detection_logs).post(create_detection_log))
        .route("/detection-logs/detail", get(list_detection_log_details))
        .route("/detection-logs/bulk", post(create_many_detection_logs))
        .route(
            "/detection-logs/:id",
            get(get_detection_log)
                .patch(update_detection_log)
                .delete(delete_detection_log),
        )
        .route("/identities/:id/detection-logs", get(detection_logs_by_identity))
}

/// Turn a body rejection into a validation error
fn body_error(rejection: JsonRejection) -> Error {
    Error::Validation(rejection.body_text())
}

// ========================================
// Read Handlers
// ========================================

#[utoipa::path(
    get,
    path = "/api/detection-logs",
    tag = "detection-logs",
    responses(
        (status = 200, description = "All logs with picture paths, id ascending", body = PictureListEnvelope)
    )
)]
pub async fn list_detection_logs(State(state): State<AppState>) -> Response {
    match state.detection_log.list().await {
        Ok(logs) => Json(ApiResponse::success("List Data Detection Log!", logs)).into_response(),
        Err(e) => e.into_envelope("Failed to get detection logs"),
    }
}

#[utoipa::path(
    get,
    path = "/api/detection-logs/detail",
    tag = "detection-logs",
    responses(
        (status = 200, description = "Logs split into recognized and unrecognized", body = DetailEnvelope)
    )
)]
pub async fn list_detection_log_details(State(state): State<AppState>) -> Response {
    match state.detection_log.list_detail().await {
        Ok((recognized, unrecognized)) => Json(DetailResponse::new(
            "List Data Detail Detection Log!",
            recognized,
            unrecognized,
        ))
        .into_response(),
        Err(e) => e.into_envelope("Failed to get detection logs"),
    }
}

#[utoipa::path(
    get,
    path = "/api/detection-logs/{id}",
    tag = "detection-logs",
    params(("id" = String, Path, description = "Detection log id")),
    responses(
        (status = 200, description = "Single log, or a not-found / validation envelope", body = DetectionLogEnvelope)
    )
)]
pub async fn get_detection_log(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.detection_log.get_by_id(&id).await {
        Ok(log) => Json(ApiResponse::success(
            format!("Detection Log Details for ID: {}", id),
            log,
        ))
        .into_response(),
        Err(e) => e.into_envelope("Internal Server Error"),
    }
}

#[utoipa::path(
    get,
    path = "/api/identities/{id}/detection-logs",
    tag = "detection-logs",
    params(("id" = String, Path, description = "Identity id")),
    responses(
        (status = 200, description = "Logs of every face of the identity", body = DetectionLogListEnvelope)
    )
)]
pub async fn detection_logs_by_identity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.detection_log.get_by_identity(&id).await {
        Ok(logs) => {
            Json(ApiResponse::success("List Data Detection Log by Identity!", logs)).into_response()
        }
        Err(e) => e.into_envelope("Failed to get detection logs by identity"),
    }
}

// ========================================
// Write Handlers
// ========================================

#[utoipa::path(
    post,
    path = "/api/detection-logs",
    tag = "detection-logs",
    request_body = CreateDetectionLogRequest,
    responses(
        (status = 200, description = "Created log, or a failure envelope", body = DetectionLogEnvelope)
    )
)]
pub async fn create_detection_log(
    State(state): State<AppState>,
    payload: Result<Json<CreateDetectionLogRequest>, JsonRejection>,
) -> Response {
    const FAILED: &str = "Failed to create detection log";

    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return body_error(rejection).into_envelope(FAILED),
    };

    match state.detection_log.create(req.face).await {
        Ok(log) => {
            Json(ApiResponse::success("Detection Log Created Successfully!", log)).into_response()
        }
        Err(e) => e.into_envelope(FAILED),
    }
}

#[utoipa::path(
    post,
    path = "/api/detection-logs/bulk",
    tag = "detection-logs",
    request_body = CreateManyDetectionLogRequest,
    responses(
        (status = 200, description = "Inserted row count, or a failure envelope", body = BatchCountEnvelope)
    )
)]
pub async fn create_many_detection_logs(
    State(state): State<AppState>,
    payload: Result<Json<CreateManyDetectionLogRequest>, JsonRejection>,
) -> Response {
    const FAILED: &str = "Failed to create detection log";

    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return body_error(rejection).into_envelope(FAILED),
    };

    match state.detection_log.create_many(&req.face).await {
        Ok(count) => {
            Json(ApiResponse::success("Detection Logs Created Successfully!", count))
                .into_response()
        }
        Err(e) => e.into_envelope(FAILED),
    }
}

#[utoipa::path(
    patch,
    path = "/api/detection-logs/{id}",
    tag = "detection-logs",
    params(("id" = String, Path, description = "Detection log id")),
    request_body = UpdateDetectionLogRequest,
    responses(
        (status = 200, description = "Updated log, or a failure envelope", body = DetectionLogEnvelope)
    )
)]
pub async fn update_detection_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDetectionLogRequest>, JsonRejection>,
) -> Response {
    const FAILED: &str = "Failed to update face";

    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return body_error(rejection).into_envelope(FAILED),
    };

    match state.detection_log.update(&id, req.face).await {
        Ok(log) => {
            Json(ApiResponse::success("Detection Log Updated Successfully!", log)).into_response()
        }
        Err(e) => e.into_envelope(FAILED),
    }
}

#[utoipa::path(
    delete,
    path = "/api/detection-logs/{id}",
    tag = "detection-logs",
    params(("id" = String, Path, description = "Detection log id")),
    responses(
        (status = 200, description = "Deletion result", body = MessageEnvelope)
    )
)]
pub async fn delete_detection_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.detection_log.delete(&id).await {
        Ok(()) => {
            Json(ApiResponse::<()>::message("Detection Log Deleted Successfully!")).into_response()
        }
        Err(e) => e.into_envelope("Failed to delete detection log"),
    }
}
