//! Application state
//!
//! Holds the configuration and the injected service handles

use crate::detection_log_service::DetectionLogService;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database URL
    pub database_url: String,
    /// Server port
    pub port: u16,
    /// Server host
    pub host: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub db_acquire_timeout_sec: u64,
    /// Apply bundled migrations at startup
    pub run_migrations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "mysql://root@localhost/face_log".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            db_acquire_timeout_sec: std::env::var("DB_ACQUIRE_TIMEOUT_SEC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            run_migrations: std::env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl AppConfig {
    /// Listen address (host:port)
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Database URL with the password masked, for logging
    pub fn redacted_database_url(&self) -> String {
        let Some((scheme, rest)) = self.database_url.split_once("://") else {
            return self.database_url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.database_url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
            None => self.database_url.clone(),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// DetectionLogService (MySQL persistence)
    pub detection_log: Arc<DetectionLogService>,
}

impl AppState {
    pub fn new(config: AppConfig, detection_log: DetectionLogService) -> Self {
        Self {
            config,
            detection_log: Arc::new(detection_log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> AppConfig {
        AppConfig {
            database_url: url.to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            db_max_connections: 10,
            db_acquire_timeout_sec: 10,
            run_migrations: false,
        }
    }

    #[test]
    fn test_listen_addr() {
        assert_eq!(config_with_url("mysql://x").listen_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_redacted_database_url() {
        assert_eq!(
            config_with_url("mysql://root:secret@db:3306/face_log").redacted_database_url(),
            "mysql://root:***@db:3306/face_log"
        );
        // Passwords containing '@' stay hidden
        assert_eq!(
            config_with_url("mysql://root:p@ss@db/face_log").redacted_database_url(),
            "mysql://root:***@db/face_log"
        );
        assert_eq!(
            config_with_url("mysql://root@localhost/face_log").redacted_database_url(),
            "mysql://root@localhost/face_log"
        );
    }
}
