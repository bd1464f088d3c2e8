//! SQLite Voice Clone Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{RepositoryError, VoiceCloneRepositoryPort};
use crate::domain::voice::VoiceClone;

/// SQLite Voice Clone Repository
pub struct SqliteVoiceCloneRepository {
    pool: DbPool,
}

impl SqliteVoiceCloneRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct VoiceCloneRow {
    id: String,
    user_id: String,
    provider_voice_id: String,
    name: String,
    sample_url: String,
    sample_key: String,
    created_at: String,
}

impl TryFrom<VoiceCloneRow> for VoiceClone {
    type Error = RepositoryError;

    fn try_from(row: VoiceCloneRow) -> Result<Self, Self::Error> {
        Ok(VoiceClone {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: row.user_id,
            provider_voice_id: row.provider_voice_id,
            name: row.name,
            sample_url: row.sample_url,
            sample_key: row.sample_key,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

const VOICE_CLONE_COLUMNS: &str =
    "id, user_id, provider_voice_id, name, sample_url, sample_key, created_at";

#[async_trait]
impl VoiceCloneRepositoryPort for SqliteVoiceCloneRepository {
    async fn save(&self, clone: &VoiceClone) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO voice_clones (id, user_id, provider_voice_id, name, sample_url, sample_key, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                sample_url = excluded.sample_url,
                sample_key = excluded.sample_key
            "#,
        )
        .bind(clone.id.to_string())
        .bind(&clone.user_id)
        .bind(&clone.provider_voice_id)
        .bind(&clone.name)
        .bind(&clone.sample_url)
        .bind(&clone.sample_key)
        .bind(clone.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VoiceClone>, RepositoryError> {
        let row: Option<VoiceCloneRow> = sqlx::query_as(&format!(
            "SELECT {} FROM voice_clones WHERE id = ?",
            VOICE_CLONE_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(VoiceClone::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<VoiceClone>, RepositoryError> {
        let rows: Vec<VoiceCloneRow> = sqlx::query_as(&format!(
            "SELECT {} FROM voice_clones WHERE user_id = ? ORDER BY created_at DESC",
            VOICE_CLONE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(VoiceClone::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM voice_clones WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
