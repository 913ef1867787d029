//! OpenAPI document and Swagger UI
//!
//! The envelope structs below only describe response bodies for the
//! generated document; handlers build [`crate::models::ApiResponse`].

#![allow(dead_code)]

use axum::Router;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use super::detection_log_routes;
use crate::detection_log_service::{
    BatchCount, CreateDetectionLogRequest, CreateManyDetectionLogRequest, DetectionLog,
    DetectionLogDetail, DetectionLogWithPictures, FaceDetail, FacePictures, IdentityName,
    PicturePath, UpdateDetectionLogRequest,
};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Envelope carrying one detection log
#[derive(ToSchema)]
pub struct DetectionLogEnvelope {
    success: bool,
    message: String,
    data: Option<DetectionLog>,
    error: Option<String>,
}

/// Envelope carrying plain detection logs
#[derive(ToSchema)]
pub struct DetectionLogListEnvelope {
    success: bool,
    message: String,
    data: Option<Vec<DetectionLog>>,
    error: Option<String>,
}

/// Envelope carrying logs joined to picture paths
#[derive(ToSchema)]
pub struct PictureListEnvelope {
    success: bool,
    message: String,
    data: Option<Vec<DetectionLogWithPictures>>,
    error: Option<String>,
}

/// Envelope carrying a bulk insert count
#[derive(ToSchema)]
pub struct BatchCountEnvelope {
    success: bool,
    message: String,
    data: Option<BatchCount>,
    error: Option<String>,
}

/// Envelope without a payload (delete, not-found, failures)
#[derive(ToSchema)]
pub struct MessageEnvelope {
    success: bool,
    message: String,
    data: Option<bool>,
    error: Option<String>,
}

/// Recognized / unrecognized split
#[derive(ToSchema)]
pub struct DetailEnvelope {
    success: bool,
    message: String,
    recognized: Vec<DetectionLogDetail>,
    unrecognized: Vec<DetectionLogDetail>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        detection_log_routes::list_detection_logs,
        detection_log_routes::list_detection_log_details,
        detection_log_routes::get_detection_log,
        detection_log_routes::detection_logs_by_identity,
        detection_log_routes::create_detection_log,
        detection_log_routes::create_many_detection_logs,
        detection_log_routes::update_detection_log,
        detection_log_routes::delete_detection_log,
    ),
    components(schemas(
        DetectionLog,
        DetectionLogWithPictures,
        DetectionLogDetail,
        FacePictures,
        FaceDetail,
        PicturePath,
        IdentityName,
        BatchCount,
        CreateDetectionLogRequest,
        CreateManyDetectionLogRequest,
        UpdateDetectionLogRequest,
        DetectionLogEnvelope,
        DetectionLogListEnvelope,
        PictureListEnvelope,
        BatchCountEnvelope,
        MessageEnvelope,
        DetailEnvelope,
    )),
    tags((name = "detection-logs", description = "Face detection log CRUD"))
)]
pub struct ApiDoc;

/// Swagger UI plus the raw OpenAPI document
pub fn docs_router() -> Router {
    SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];

        for (path, method) in [
            ("/api/detection-logs", "get"),
            ("/api/detection-logs", "post"),
            ("/api/detection-logs/detail", "get"),
            ("/api/detection-logs/bulk", "post"),
            ("/api/detection-logs/{id}", "get"),
            ("/api/detection-logs/{id}", "patch"),
            ("/api/detection-logs/{id}", "delete"),
            ("/api/identities/{id}/detection-logs", "get"),
        ] {
            assert!(paths[path][method].is_object(), "missing {} {}", method, path);
        }
    }

    #[test]
    fn test_schemas_use_camel_case_relations() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let list_item = &doc["components"]["schemas"]["DetectionLogWithPictures"];
        assert!(list_item["properties"]["faceRelation"].is_object());
    }
}
