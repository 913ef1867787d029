//! Detection Log Types
//!
//! Rows, joined projections and request bodies for the detection log API.
//! JSON keys stay camelCase for the existing dashboard clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Database Entities
// ============================================================================

/// Detection log row (matches detection_logs table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectionLog {
    pub id: i32,
    pub face: i32,
    pub timestamp: DateTime<Utc>,
}

/// Identity with the ids of its faces
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityFaces {
    pub id: i32,
    pub name: String,
    pub face_ids: Vec<i32>,
}

// ============================================================================
// Joined Projections
// ============================================================================

/// Stored picture path of a face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PicturePath {
    pub path: String,
}

/// Face projection used by the list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacePictures {
    pub single_pictures: Vec<PicturePath>,
}

/// List item: log joined to its face's pictures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectionLogWithPictures {
    pub id: i32,
    pub face: i32,
    pub face_relation: FacePictures,
}

/// Identity name projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IdentityName {
    pub name: String,
}

/// Face projection used by the detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetail {
    /// Identity reference, `None` when the face is unrecognized
    pub identity: Option<i32>,
    pub single_pictures: Vec<PicturePath>,
    pub identities: Option<IdentityName>,
}

/// Detail item: log with face identity, name and pictures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectionLogDetail {
    pub id: i32,
    pub face: i32,
    pub face_relation: FaceDetail,
    pub timestamp: DateTime<Utc>,
}

impl DetectionLogDetail {
    pub fn is_recognized(&self) -> bool {
        self.face_relation.identity.is_some()
    }
}

/// Flat row of the list query (one per log/picture pair)
#[derive(Debug, Clone)]
pub struct PictureRow {
    pub id: i32,
    pub face: i32,
    pub path: Option<String>,
}

/// Flat row of the detail query (one per log/picture pair)
#[derive(Debug, Clone)]
pub struct DetailRow {
    pub id: i32,
    pub face: i32,
    pub timestamp: DateTime<Utc>,
    pub identity: Option<i32>,
    pub identity_name: Option<String>,
    pub path: Option<String>,
}

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Create detection log request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDetectionLogRequest {
    pub face: i32,
}

/// Bulk create request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateManyDetectionLogRequest {
    pub face: Vec<i32>,
}

/// Update request; a missing `face` leaves the row unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateDetectionLogRequest {
    #[serde(default)]
    pub face: Option<i32>,
}

/// Bulk create result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchCount {
    pub count: u64,
}
