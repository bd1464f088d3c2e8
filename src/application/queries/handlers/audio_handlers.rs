//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioFileRepositoryPort;
use crate::application::queries::{GetSharedAudio, ListMyAudioFiles};
use crate::domain::audio::AudioFile;

/// ListMyAudioFiles Handler
pub struct ListMyAudioFilesHandler {
    audio_repo: Arc<dyn AudioFileRepositoryPort>,
}

impl ListMyAudioFilesHandler {
    pub fn new(audio_repo: Arc<dyn AudioFileRepositoryPort>) -> Self {
        Self { audio_repo }
    }

    pub async fn handle(
        &self,
        query: ListMyAudioFiles,
    ) -> Result<Vec<AudioFile>, ApplicationError> {
        Ok(self.audio_repo.find_by_user(&query.user_id).await?)
    }
}

/// GetSharedAudio Handler
///
/// 分享令牌即凭据，不做用户校验
pub struct GetSharedAudioHandler {
    audio_repo: Arc<dyn AudioFileRepositoryPort>,
}

impl GetSharedAudioHandler {
    pub fn new(audio_repo: Arc<dyn AudioFileRepositoryPort>) -> Self {
        Self { audio_repo }
    }

    pub async fn handle(&self, query: GetSharedAudio) -> Result<AudioFile, ApplicationError> {
        self.audio_repo
            .find_by_share_token(&query.token)
            .await?
            .ok_or_else(|| ApplicationError::not_found("SharedAudio", &query.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::application::ports::RepositoryError;

    #[derive(Default)]
    struct MemoryAudioRepo {
        files: Mutex<Vec<AudioFile>>,
    }

    #[async_trait]
    impl AudioFileRepositoryPort for MemoryAudioRepo {
        async fn save(&self, audio: &AudioFile) -> Result<(), RepositoryError> {
            self.files.lock().unwrap().push(audio.clone());
            Ok(())
        }
        async fn find_by_id(&self, id: Uuid) -> Result<Option<AudioFile>, RepositoryError> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id == id)
                .cloned())
        }
        async fn find_by_user(&self, user_id: &str) -> Result<Vec<AudioFile>, RepositoryError> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.user_id == user_id)
                .cloned()
                .collect())
        }
        async fn find_by_share_token(
            &self,
            token: &str,
        ) -> Result<Option<AudioFile>, RepositoryError> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.share_token.as_deref() == Some(token))
                .cloned())
        }
        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            self.files.lock().unwrap().retain(|f| f.id != id);
            Ok(())
        }
    }

    fn sample_audio() -> AudioFile {
        AudioFile::new("u-1", "hello", "v-1", "Aria", "http://x/a.mp3", "u-1/a.mp3", "mp3")
    }

    #[tokio::test]
    async fn test_known_token_returns_audio() {
        let repo = Arc::new(MemoryAudioRepo::default());
        let audio = sample_audio();
        repo.save(&audio).await.unwrap();

        let handler = GetSharedAudioHandler::new(repo);
        let token = audio.share_token.clone().unwrap();
        let found = handler.handle(GetSharedAudio { token }).await.unwrap();
        assert_eq!(found.id, audio.id);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let handler = GetSharedAudioHandler::new(Arc::new(MemoryAudioRepo::default()));

        // 未知令牌是资源缺失而不是请求格式错误
        let err = handler
            .handle(GetSharedAudio {
                token: "0".repeat(64),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
