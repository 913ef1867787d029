//! In-memory DetectionLogStore for router tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use face_log_server::detection_log_service::{
    DetectionLog, DetectionLogDetail, DetectionLogService, DetectionLogStore,
    DetectionLogWithPictures, FaceDetail, FacePictures, IdentityFaces, IdentityName, PicturePath,
};
use face_log_server::state::{AppConfig, AppState};
use face_log_server::{web_api, Error, Result};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const FK_VIOLATION: &str =
    "Cannot add or update a child row: a foreign key constraint fails (`detection_logs`)";

#[derive(Default)]
struct Tables {
    identities: Vec<(i32, String)>,
    faces: Vec<(i32, Option<i32>)>,
    pictures: Vec<(i32, String)>,
    logs: Vec<DetectionLog>,
    next_log_id: i32,
}

impl Tables {
    fn face_exists(&self, face: i32) -> bool {
        self.faces.iter().any(|(id, _)| *id == face)
    }

    fn pictures_of(&self, face: i32) -> Vec<PicturePath> {
        self.pictures
            .iter()
            .filter(|(f, _)| *f == face)
            .map(|(_, path)| PicturePath { path: path.clone() })
            .collect()
    }

    fn push_log(&mut self, face: i32) -> DetectionLog {
        self.next_log_id += 1;
        let log = DetectionLog {
            id: self.next_log_id,
            face,
            timestamp: Utc::now(),
        };
        self.logs.push(log.clone());
        log
    }
}

/// Store with the same constraint behavior as the MySQL schema
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every call fails like a dropped database
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_identity(self, id: i32, name: &str) -> Self {
        self.tables.lock().unwrap().identities.push((id, name.to_string()));
        self
    }

    pub fn with_face(self, id: i32, identity: Option<i32>) -> Self {
        self.tables.lock().unwrap().faces.push((id, identity));
        self
    }

    pub fn with_picture(self, face: i32, path: &str) -> Self {
        self.tables.lock().unwrap().pictures.push((face, path.to_string()));
        self
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl DetectionLogStore for InMemoryStore {
    async fn ping(&self) -> Result<()> {
        self.check_online()
    }

    async fn list_with_pictures(&self) -> Result<Vec<DetectionLogWithPictures>> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        let mut logs: Vec<_> = tables
            .logs
            .iter()
            .map(|log| DetectionLogWithPictures {
                id: log.id,
                face: log.face,
                face_relation: FacePictures {
                    single_pictures: tables.pictures_of(log.face),
                },
            })
            .collect();
        logs.sort_by_key(|log| log.id);
        Ok(logs)
    }

    async fn list_with_detail(&self) -> Result<Vec<DetectionLogDetail>> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        let mut logs: Vec<_> = tables
            .logs
            .iter()
            .map(|log| {
                let identity = tables
                    .faces
                    .iter()
                    .find(|(id, _)| *id == log.face)
                    .and_then(|(_, identity)| *identity);
                let identities = identity.and_then(|identity_id| {
                    tables
                        .identities
                        .iter()
                        .find(|(id, _)| *id == identity_id)
                        .map(|(_, name)| IdentityName { name: name.clone() })
                });
                DetectionLogDetail {
                    id: log.id,
                    face: log.face,
                    face_relation: FaceDetail {
                        identity,
                        single_pictures: tables.pictures_of(log.face),
                        identities,
                    },
                    timestamp: log.timestamp,
                }
            })
            .collect();
        logs.sort_by_key(|log| log.id);
        Ok(logs)
    }

    async fn insert(&self, face: i32) -> Result<DetectionLog> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.face_exists(face) {
            return Err(Error::Validation(FK_VIOLATION.to_string()));
        }
        Ok(tables.push_log(face))
    }

    async fn insert_many(&self, faces: &[i32]) -> Result<u64> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();
        if faces.iter().any(|face| !tables.face_exists(*face)) {
            return Err(Error::Validation(FK_VIOLATION.to_string()));
        }
        for face in faces {
            tables.push_log(*face);
        }
        Ok(faces.len() as u64)
    }

    async fn find_identity(&self, id: i32) -> Result<Option<IdentityFaces>> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .identities
            .iter()
            .find(|(identity_id, _)| *identity_id == id)
            .map(|(identity_id, name)| IdentityFaces {
                id: *identity_id,
                name: name.clone(),
                face_ids: tables
                    .faces
                    .iter()
                    .filter(|(_, identity)| *identity == Some(id))
                    .map(|(face_id, _)| *face_id)
                    .collect(),
            }))
    }

    async fn list_by_faces(&self, face_ids: &[i32]) -> Result<Vec<DetectionLog>> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        let mut logs: Vec<_> = tables
            .logs
            .iter()
            .filter(|log| face_ids.contains(&log.face))
            .cloned()
            .collect();
        logs.sort_by_key(|log| log.id);
        Ok(logs)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<DetectionLog>> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.logs.iter().find(|log| log.id == id).cloned())
    }

    async fn update_face(&self, id: i32, face: Option<i32>) -> Result<Option<DetectionLog>> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();
        if let Some(face) = face {
            if !tables.face_exists(face) {
                return Err(Error::Validation(FK_VIOLATION.to_string()));
            }
            if let Some(log) = tables.logs.iter_mut().find(|log| log.id == id) {
                log.face = face;
            }
        }
        Ok(tables.logs.iter().find(|log| log.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.logs.len();
        tables.logs.retain(|log| log.id != id);
        Ok(tables.logs.len() < before)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "mysql://test@localhost/face_log".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        db_max_connections: 1,
        db_acquire_timeout_sec: 1,
        run_migrations: false,
    }
}

pub fn app(store: InMemoryStore) -> Router {
    let service = DetectionLogService::new(Arc::new(store));
    web_api::create_router(AppState::new(test_config(), service))
}

/// Send a request and decode the JSON body
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}
