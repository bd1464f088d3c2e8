//! Repository Ports - 仓储抽象
//!
//! VoiceClone / AudioFile 的持久化接口，SQLite 实现在
//! infrastructure/persistence 层

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::audio::AudioFile;
use crate::domain::voice::VoiceClone;

/// 仓储错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// VoiceClone Repository Port
#[async_trait]
pub trait VoiceCloneRepositoryPort: Send + Sync {
    async fn save(&self, clone: &VoiceClone) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VoiceClone>, RepositoryError>;

    /// 按创建时间倒序列出用户的全部克隆音色
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<VoiceClone>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// AudioFile Repository Port
#[async_trait]
pub trait AudioFileRepositoryPort: Send + Sync {
    async fn save(&self, audio: &AudioFile) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AudioFile>, RepositoryError>;

    /// 按创建时间倒序列出用户的全部生成音频
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<AudioFile>, RepositoryError>;

    async fn find_by_share_token(&self, token: &str)
        -> Result<Option<AudioFile>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
