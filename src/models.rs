//! Shared data models

use serde::{Deserialize, Serialize};

/// API response envelope
///
/// Every endpoint answers with `{success, message, data, error?}`.
/// `data` is always present (possibly `null`), `error` only on failure.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Success without a payload (delete)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Envelope for the recognized/unrecognized split
#[derive(Debug, Serialize)]
pub struct DetailResponse<T> {
    pub success: bool,
    pub message: String,
    pub recognized: Vec<T>,
    pub unrecognized: Vec<T>,
}

impl<T> DetailResponse<T> {
    pub fn new(message: impl Into<String>, recognized: Vec<T>, unrecognized: Vec<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            recognized,
            unrecognized,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub db_connected: bool,
}
