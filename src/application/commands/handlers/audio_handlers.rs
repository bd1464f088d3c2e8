//! Audio Command Handlers

use std::sync::Arc;

use crate::application::commands::DeleteAudioFile;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioFileRepositoryPort, ObjectStoragePort};

/// DeleteAudioFile Handler
pub struct DeleteAudioFileHandler {
    storage: Arc<dyn ObjectStoragePort>,
    audio_repo: Arc<dyn AudioFileRepositoryPort>,
}

impl DeleteAudioFileHandler {
    pub fn new(
        storage: Arc<dyn ObjectStoragePort>,
        audio_repo: Arc<dyn AudioFileRepositoryPort>,
    ) -> Self {
        Self {
            storage,
            audio_repo,
        }
    }

    pub async fn handle(&self, command: DeleteAudioFile) -> Result<(), ApplicationError> {
        let audio = self
            .audio_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("AudioFile", command.id))?;

        if !audio.is_owned_by(&command.user_id) {
            return Err(ApplicationError::forbidden("Audio file belongs to another user"));
        }

        // 存储对象清理失败不阻塞记录删除
        if let Err(e) = self.storage.delete(&audio.audio_key).await {
            tracing::warn!(key = %audio.audio_key, error = %e, "Failed to delete stored audio");
        }

        self.audio_repo.delete(command.id).await?;

        tracing::info!(audio_id = %command.id, "Audio file deleted");

        Ok(())
    }
}
