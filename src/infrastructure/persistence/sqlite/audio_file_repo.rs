//! SQLite Audio File Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{AudioFileRepositoryPort, RepositoryError};
use crate::domain::audio::AudioFile;

/// SQLite Audio File Repository
pub struct SqliteAudioFileRepository {
    pool: DbPool,
}

impl SqliteAudioFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AudioFileRow {
    id: String,
    user_id: String,
    text: String,
    voice_id: String,
    voice_name: String,
    audio_url: String,
    audio_key: String,
    format: String,
    share_token: Option<String>,
    created_at: String,
}

impl TryFrom<AudioFileRow> for AudioFile {
    type Error = RepositoryError;

    fn try_from(row: AudioFileRow) -> Result<Self, Self::Error> {
        Ok(AudioFile {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: row.user_id,
            text: row.text,
            voice_id: row.voice_id,
            voice_name: row.voice_name,
            audio_url: row.audio_url,
            audio_key: row.audio_key,
            format: row.format,
            share_token: row.share_token,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

const AUDIO_FILE_COLUMNS: &str =
    "id, user_id, text, voice_id, voice_name, audio_url, audio_key, format, share_token, created_at";

#[async_trait]
impl AudioFileRepositoryPort for SqliteAudioFileRepository {
    async fn save(&self, audio: &AudioFile) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO audio_files
                (id, user_id, text, voice_id, voice_name, audio_url, audio_key, format, share_token, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                share_token = excluded.share_token
            "#,
        )
        .bind(audio.id.to_string())
        .bind(&audio.user_id)
        .bind(&audio.text)
        .bind(&audio.voice_id)
        .bind(&audio.voice_name)
        .bind(&audio.audio_url)
        .bind(&audio.audio_key)
        .bind(&audio.format)
        .bind(&audio.share_token)
        .bind(audio.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(format!("Share token already exists: {}", db))
            }
            other => RepositoryError::DatabaseError(other.to_string()),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AudioFile>, RepositoryError> {
        let row: Option<AudioFileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM audio_files WHERE id = ?",
            AUDIO_FILE_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(AudioFile::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<AudioFile>, RepositoryError> {
        let rows: Vec<AudioFileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM audio_files WHERE user_id = ? ORDER BY created_at DESC",
            AUDIO_FILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(AudioFile::try_from).collect()
    }

    async fn find_by_share_token(&self, token: &str) -> Result<Option<AudioFile>, RepositoryError> {
        let row: Option<AudioFileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM audio_files WHERE share_token = ?",
            AUDIO_FILE_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(AudioFile::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM audio_files WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteAudioFileRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteAudioFileRepository::new(pool)
    }

    fn sample(user_id: &str) -> AudioFile {
        AudioFile::new(
            user_id,
            "hello world",
            "v-1",
            "Aria",
            "http://x/a.mp3",
            format!("{}/audio/a.mp3", user_id),
            "mp3",
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = repo().await;
        let audio = sample("u-1");
        repo.save(&audio).await.unwrap();

        let found = repo.find_by_id(audio.id).await.unwrap().unwrap();
        assert_eq!(found.text, "hello world");
        assert_eq!(found.share_token, audio.share_token);
    }

    #[tokio::test]
    async fn test_find_by_share_token() {
        let repo = repo().await;
        let audio = sample("u-1");
        repo.save(&audio).await.unwrap();

        let token = audio.share_token.as_deref().unwrap();
        let found = repo.find_by_share_token(token).await.unwrap().unwrap();
        assert_eq!(found.id, audio.id);

        assert!(repo
            .find_by_share_token("0000000000000000000000000000000000000000000000000000000000000000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_by_user_excludes_others() {
        let repo = repo().await;
        let mine = sample("u-1");
        let other = sample("u-2");
        repo.save(&mine).await.unwrap();
        repo.save(&other).await.unwrap();

        let found = repo.find_by_user("u-1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, mine.id);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let audio = sample("u-1");
        repo.save(&audio).await.unwrap();
        repo.delete(audio.id).await.unwrap();
        assert!(repo.find_by_id(audio.id).await.unwrap().is_none());
    }
}
