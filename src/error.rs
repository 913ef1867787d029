//! Error handling for the Face Log Server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not found
    #[error("{0}")]
    NotFound(String),

    /// Validation error (bad input or constraint violation)
    #[error("{0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// SQLx database error
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl Error {
    /// Map a driver error, surfacing constraint violations as validation errors
    pub fn from_db(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return Error::Validation(db_err.message().to_string());
            }
        }
        Error::Sqlx(err)
    }

    /// Status class of this error, logged with the failure.
    ///
    /// Responses themselves are always 200; failures are signaled in the body.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Internal(_) | Error::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Sqlx(_) => "DATABASE_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Render this error as a failure envelope.
    ///
    /// Not-found errors carry their own message and no `error` detail;
    /// everything else uses `failure_message` and exposes the detail.
    pub fn into_envelope(self, failure_message: &str) -> Response {
        tracing::error!(
            status = %self.status_code(),
            error_code = %self.error_code(),
            error = %self,
            "Request error"
        );

        let body: ApiResponse<()> = match self {
            Error::NotFound(msg) => ApiResponse::not_found(msg),
            other => ApiResponse::failure(failure_message, other.to_string()),
        };

        Json(body).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_envelope("Request failed")
    }
}
