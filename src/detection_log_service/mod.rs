//! DetectionLogService - Face Detection Log Persistence
//!
//! ## Responsibilities
//!
//! - CRUD over the detection_logs table
//! - Join logs to their face's stored pictures and identity
//! - Split logs into recognized / unrecognized
//!
//! Schema: migrations/0001_face_log_schema.sql

mod repository;
mod service;
mod types;

pub use repository::{group_detail_rows, group_picture_rows, DetectionLogStore, MySqlDetectionLogStore};
pub use service::{
    parse_id, partition_by_recognition, DetectionLogService, DETECTION_LOG_NOT_FOUND,
    IDENTITY_NOT_FOUND,
};
pub use types::*;
