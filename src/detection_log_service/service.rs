//! Detection Log Service
//!
//! Business logic over a [`DetectionLogStore`]: id parsing, not-found
//! handling and the recognized/unrecognized split.

use super::repository::DetectionLogStore;
use super::types::*;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub const DETECTION_LOG_NOT_FOUND: &str = "Detection Log Not Found!";
pub const IDENTITY_NOT_FOUND: &str = "Identity Not Found!";

/// Parse a path id into a positive integer
///
/// `what` names the resource in the validation message.
pub fn parse_id(raw: &str, what: &str) -> Result<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::Validation(format!("Invalid {} id: {}", what, raw))),
    }
}

/// Split detail rows into (recognized, unrecognized), keeping order
pub fn partition_by_recognition(
    logs: Vec<DetectionLogDetail>,
) -> (Vec<DetectionLogDetail>, Vec<DetectionLogDetail>) {
    logs.into_iter().partition(DetectionLogDetail::is_recognized)
}

/// DetectionLogService instance
#[derive(Clone)]
pub struct DetectionLogService {
    store: Arc<dyn DetectionLogStore>,
}

impl DetectionLogService {
    /// Create new DetectionLogService
    pub fn new(store: Arc<dyn DetectionLogStore>) -> Self {
        Self { store }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    /// All logs with picture paths, id ascending
    pub async fn list(&self) -> Result<Vec<DetectionLogWithPictures>> {
        self.store.list_with_pictures().await
    }

    /// All logs split into (recognized, unrecognized)
    pub async fn list_detail(&self) -> Result<(Vec<DetectionLogDetail>, Vec<DetectionLogDetail>)> {
        let logs = self.store.list_with_detail().await?;
        Ok(partition_by_recognition(logs))
    }

    pub async fn create(&self, face: i32) -> Result<DetectionLog> {
        let log = self.store.insert(face).await?;
        info!(log_id = log.id, face = log.face, "Detection log created");
        Ok(log)
    }

    /// Insert one log per face id in a single batch
    pub async fn create_many(&self, faces: &[i32]) -> Result<BatchCount> {
        if faces.is_empty() {
            return Ok(BatchCount { count: 0 });
        }

        let count = self.store.insert_many(faces).await?;
        info!(count = count, "Detection logs created");
        Ok(BatchCount { count })
    }

    /// Logs of every face belonging to an identity
    pub async fn get_by_identity(&self, raw_id: &str) -> Result<Vec<DetectionLog>> {
        let identity_id = parse_id(raw_id, "identity")?;
        let identity = self
            .store
            .find_identity(identity_id)
            .await?
            .ok_or_else(|| Error::NotFound(IDENTITY_NOT_FOUND.to_string()))?;

        debug!(
            identity_id = identity.id,
            name = %identity.name,
            faces = identity.face_ids.len(),
            "Listing detection logs for identity"
        );

        self.store.list_by_faces(&identity.face_ids).await
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<DetectionLog> {
        let id = parse_id(raw_id, "detection log")?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(DETECTION_LOG_NOT_FOUND.to_string()))
    }

    /// Overwrite the face reference when given; `None` leaves the row as is
    pub async fn update(&self, raw_id: &str, face: Option<i32>) -> Result<DetectionLog> {
        let id = parse_id(raw_id, "detection log")?;
        let log = self
            .store
            .update_face(id, face)
            .await?
            .ok_or_else(|| Error::NotFound(DETECTION_LOG_NOT_FOUND.to_string()))?;

        info!(log_id = log.id, face = log.face, "Detection log updated");
        Ok(log)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<()> {
        let id = parse_id(raw_id, "detection log")?;
        if !self.store.delete(id).await? {
            return Err(Error::NotFound(DETECTION_LOG_NOT_FOUND.to_string()));
        }

        info!(log_id = id, "Detection log deleted");
        Ok(())
    }
}
