//! Detection Log Repository
//!
//! Database access layer for detection logs and the face/identity rows they
//! reference.

use super::types::*;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{MySql, QueryBuilder, Row};

/// Rows per INSERT statement in a bulk create
const INSERT_CHUNK_SIZE: usize = 1000;

/// Data-access seam for the detection log service
///
/// Not-found is reported as `Ok(None)` / `Ok(false)`; the service decides
/// the response shape.
#[async_trait]
pub trait DetectionLogStore: Send + Sync {
    /// Check database connectivity
    async fn ping(&self) -> Result<()>;

    /// All logs (id ascending) with their face's picture paths
    async fn list_with_pictures(&self) -> Result<Vec<DetectionLogWithPictures>>;

    /// All logs (id ascending) with identity, identity name and picture paths
    async fn list_with_detail(&self) -> Result<Vec<DetectionLogDetail>>;

    /// Insert one log
    async fn insert(&self, face: i32) -> Result<DetectionLog>;

    /// Insert one log per face id as a single batch, returns the row count
    async fn insert_many(&self, faces: &[i32]) -> Result<u64>;

    /// Identity with its face ids
    async fn find_identity(&self, id: i32) -> Result<Option<IdentityFaces>>;

    /// Logs whose face is in `face_ids` (id ascending)
    async fn list_by_faces(&self, face_ids: &[i32]) -> Result<Vec<DetectionLog>>;

    /// Single log by id
    async fn find_by_id(&self, id: i32) -> Result<Option<DetectionLog>>;

    /// Overwrite the face reference when given, returns the current row
    async fn update_face(&self, id: i32, face: Option<i32>) -> Result<Option<DetectionLog>>;

    /// Delete a log, `false` when nothing matched
    async fn delete(&self, id: i32) -> Result<bool>;
}

/// MySQL-backed detection log store
#[derive(Clone)]
pub struct MySqlDetectionLogStore {
    pool: MySqlPool,
}

impl MySqlDetectionLogStore {
    /// Create new repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to DetectionLog
    fn row_to_log(row: &MySqlRow) -> Result<DetectionLog> {
        let timestamp: NaiveDateTime = row.try_get("timestamp")?;
        Ok(DetectionLog {
            id: row.try_get("id")?,
            face: row.try_get("face")?,
            timestamp: DateTime::from_naive_utc_and_offset(timestamp, Utc),
        })
    }
}

#[async_trait]
impl DetectionLogStore for MySqlDetectionLogStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_with_pictures(&self) -> Result<Vec<DetectionLogWithPictures>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.face, p.path
            FROM detection_logs l
            LEFT JOIN single_pictures p ON p.face = l.face
            ORDER BY l.id ASC, p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::from_db)?;

        let rows = rows
            .iter()
            .map(|row| {
                Ok(PictureRow {
                    id: row.try_get("id")?,
                    face: row.try_get("face")?,
                    path: row.try_get("path")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(group_picture_rows(rows))
    }

    async fn list_with_detail(&self) -> Result<Vec<DetectionLogDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT
                l.id, l.face, l.`timestamp`,
                f.identity,
                i.name AS identity_name,
                p.path
            FROM detection_logs l
            JOIN faces f ON f.id = l.face
            LEFT JOIN identities i ON i.id = f.identity
            LEFT JOIN single_pictures p ON p.face = l.face
            ORDER BY l.id ASC, p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::from_db)?;

        let rows = rows
            .iter()
            .map(|row| {
                let timestamp: NaiveDateTime = row.try_get("timestamp")?;
                Ok(DetailRow {
                    id: row.try_get("id")?,
                    face: row.try_get("face")?,
                    timestamp: DateTime::from_naive_utc_and_offset(timestamp, Utc),
                    identity: row.try_get("identity")?,
                    identity_name: row.try_get("identity_name")?,
                    path: row.try_get("path")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(group_detail_rows(rows))
    }

    async fn insert(&self, face: i32) -> Result<DetectionLog> {
        let result = sqlx::query("INSERT INTO detection_logs (face) VALUES (?)")
            .bind(face)
            .execute(&self.pool)
            .await
            .map_err(Error::from_db)?;

        let id = inserted_id(result.last_insert_id())?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| Error::Internal("Failed to get created detection log".to_string()))
    }

    async fn insert_many(&self, faces: &[i32]) -> Result<u64> {
        if faces.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for chunk in faces.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<MySql> =
                QueryBuilder::new("INSERT INTO detection_logs (face) ");
            builder.push_values(chunk, |mut row, face| {
                row.push_bind(*face);
            });

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(Error::from_db)?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn find_identity(&self, id: i32) -> Result<Option<IdentityFaces>> {
        let row = sqlx::query("SELECT id, name FROM identities WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::from_db)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let face_ids: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM faces WHERE identity = ? ORDER BY id ASC")
                .bind(id)
                .fetch_all(&self.pool)
                .await
                .map_err(Error::from_db)?;

        Ok(Some(IdentityFaces {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            face_ids,
        }))
    }

    async fn list_by_faces(&self, face_ids: &[i32]) -> Result<Vec<DetectionLog>> {
        if face_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT id, face, `timestamp` FROM detection_logs WHERE face IN (");
        let mut separated = builder.separated(", ");
        for face in face_ids {
            separated.push_bind(*face);
        }
        separated.push_unseparated(") ORDER BY id ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::from_db)?;

        rows.iter().map(Self::row_to_log).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<DetectionLog>> {
        let row = sqlx::query("SELECT id, face, `timestamp` FROM detection_logs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::from_db)?;

        row.as_ref().map(Self::row_to_log).transpose()
    }

    async fn update_face(&self, id: i32, face: Option<i32>) -> Result<Option<DetectionLog>> {
        if let Some(face) = face {
            sqlx::query("UPDATE detection_logs SET face = ? WHERE id = ?")
                .bind(face)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(Error::from_db)?;
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM detection_logs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::from_db)?;

        Ok(result.rows_affected() > 0)
    }
}

/// AUTO_INCREMENT id reported by the driver, as the INT column type
fn inserted_id(raw: u64) -> Result<i32> {
    i32::try_from(raw).map_err(|_| Error::Internal(format!("Inserted id {} out of range", raw)))
}

// ========================================
// Row Grouping
// ========================================

/// Fold (log, picture) rows into one list item per log.
///
/// Rows must be ordered by log id; a `None` path comes from the LEFT JOIN
/// of a face without pictures.
pub fn group_picture_rows(rows: Vec<PictureRow>) -> Vec<DetectionLogWithPictures> {
    let mut logs: Vec<DetectionLogWithPictures> = Vec::new();

    for row in rows {
        let picture = row.path.map(|path| PicturePath { path });

        match logs.last_mut() {
            Some(last) if last.id == row.id => {
                if let Some(picture) = picture {
                    last.face_relation.single_pictures.push(picture);
                }
            }
            _ => logs.push(DetectionLogWithPictures {
                id: row.id,
                face: row.face,
                face_relation: FacePictures {
                    single_pictures: picture.into_iter().collect(),
                },
            }),
        }
    }

    logs
}

/// Fold detail rows into one detail item per log
pub fn group_detail_rows(rows: Vec<DetailRow>) -> Vec<DetectionLogDetail> {
    let mut logs: Vec<DetectionLogDetail> = Vec::new();

    for row in rows {
        let picture = row.path.map(|path| PicturePath { path });

        match logs.last_mut() {
            Some(last) if last.id == row.id => {
                if let Some(picture) = picture {
                    last.face_relation.single_pictures.push(picture);
                }
            }
            _ => logs.push(DetectionLogDetail {
                id: row.id,
                face: row.face,
                face_relation: FaceDetail {
                    identity: row.identity,
                    single_pictures: picture.into_iter().collect(),
                    identities: row.identity_name.map(|name| IdentityName { name }),
                },
                timestamp: row.timestamp,
            }),
        }
    }

    logs
}
