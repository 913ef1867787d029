//! Face Log Server Library
//!
//! HTTP API over face detection logs.
//!
//! ## Components
//!
//! 1. DetectionLogService - CRUD over detection_logs, joined to faces,
//!    identities and stored pictures
//! 2. WebAPI - REST API endpoints and response envelopes
//!
//! The database pool is built once in `main` and injected through
//! [`AppState`]; handlers never reach for global state.

pub mod detection_log_service;
pub mod error;
pub mod models;
pub mod state;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
