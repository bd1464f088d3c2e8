//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::handlers::speech_handlers::random_suffix;
use crate::application::commands::{CloneVoice, DeleteVoiceClone};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ObjectStoragePort, SpeechSynthesizerPort, VoiceCloneRepositoryPort, VoiceCloneRequest,
};
use crate::domain::voice::{ProviderVoiceId, VoiceClone, VoiceName};

// ============================================================================
// CloneVoice
// ============================================================================

/// CloneVoice Handler
///
/// 样本上传到对象存储 → 服务端创建克隆 → 持久化记录
pub struct CloneVoiceHandler {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    storage: Arc<dyn ObjectStoragePort>,
    voice_repo: Arc<dyn VoiceCloneRepositoryPort>,
}

impl CloneVoiceHandler {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        storage: Arc<dyn ObjectStoragePort>,
        voice_repo: Arc<dyn VoiceCloneRepositoryPort>,
    ) -> Self {
        Self {
            synthesizer,
            storage,
            voice_repo,
        }
    }

    pub async fn handle(&self, command: CloneVoice) -> Result<VoiceClone, ApplicationError> {
        let name = VoiceName::new(command.name).map_err(ApplicationError::validation)?;
        if command.audio_data.is_empty() {
            return Err(ApplicationError::validation("Audio sample must not be empty"));
        }

        let key = format!(
            "{}/voice-samples/{}-{}",
            command.user_id,
            command.file_name,
            random_suffix()
        );
        let stored = self
            .storage
            .put(&key, &command.audio_data, "audio/mpeg")
            .await?;

        let provider_voice_id = self
            .synthesizer
            .clone_voice(VoiceCloneRequest {
                name: name.as_str().to_string(),
                audio_data: command.audio_data,
                file_name: command.file_name,
            })
            .await?;
        // 服务端返回空 ID 说明克隆并未真正建立
        let provider_voice_id =
            ProviderVoiceId::new(provider_voice_id).map_err(ApplicationError::internal)?;

        let clone = VoiceClone::new(
            command.user_id,
            provider_voice_id.as_str(),
            name.into_string(),
            stored.url,
            stored.key,
        );
        self.voice_repo.save(&clone).await?;

        tracing::info!(
            clone_id = %clone.id,
            provider_voice_id = %clone.provider_voice_id,
            name = %clone.name,
            "Voice cloned"
        );

        Ok(clone)
    }
}

// ============================================================================
// DeleteVoiceClone
// ============================================================================

/// DeleteVoiceClone Handler
///
/// 服务端删除与样本清理均为尽力而为，记录删除才是权威操作
pub struct DeleteVoiceCloneHandler {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    storage: Arc<dyn ObjectStoragePort>,
    voice_repo: Arc<dyn VoiceCloneRepositoryPort>,
}

impl DeleteVoiceCloneHandler {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        storage: Arc<dyn ObjectStoragePort>,
        voice_repo: Arc<dyn VoiceCloneRepositoryPort>,
    ) -> Self {
        Self {
            synthesizer,
            storage,
            voice_repo,
        }
    }

    pub async fn handle(&self, command: DeleteVoiceClone) -> Result<(), ApplicationError> {
        let clone = self
            .voice_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("VoiceClone", command.id))?;

        if !clone.is_owned_by(&command.user_id) {
            return Err(ApplicationError::forbidden("Voice clone belongs to another user"));
        }

        // 服务端可能已自行删除该音色，失败只记日志
        if let Err(e) = self.synthesizer.delete_voice(&clone.provider_voice_id).await {
            tracing::warn!(
                provider_voice_id = %clone.provider_voice_id,
                error = %e,
                "Failed to delete provider voice"
            );
        }

        if let Err(e) = self.storage.delete(&clone.sample_key).await {
            tracing::warn!(key = %clone.sample_key, error = %e, "Failed to delete voice sample");
        }

        self.voice_repo.delete(command.id).await?;

        tracing::info!(clone_id = %command.id, name = %clone.name, "Voice clone deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::application::ports::{
        ProviderVoice, RepositoryError, StorageError, StoredObject, SynthesisError,
    };

    #[derive(Default)]
    struct RecordingSynthesizer {
        deleted: Mutex<Vec<String>>,
        fail_delete: bool,
    }

    #[async_trait]
    impl SpeechSynthesizerPort for RecordingSynthesizer {
        async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
            Ok(Vec::new())
        }
        async fn list_voices(&self) -> Result<Vec<ProviderVoice>, SynthesisError> {
            Ok(Vec::new())
        }
        async fn clone_voice(&self, _request: VoiceCloneRequest) -> Result<String, SynthesisError> {
            Ok("el-cloned".to_string())
        }
        async fn delete_voice(&self, voice_id: &str) -> Result<(), SynthesisError> {
            if self.fail_delete {
                return Err(SynthesisError::ProviderError {
                    status: 404,
                    message: "already gone".to_string(),
                });
            }
            self.deleted.lock().unwrap().push(voice_id.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryStorage;

    #[async_trait]
    impl ObjectStoragePort for MemoryStorage {
        async fn put(
            &self,
            key: &str,
            _data: &[u8],
            _content_type: &str,
        ) -> Result<StoredObject, StorageError> {
            Ok(StoredObject {
                key: key.to_string(),
                url: format!("http://localhost/files/{key}"),
            })
        }
        async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
            Err(StorageError::NotFound(key.to_string()))
        }
        async fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryVoiceRepo {
        clones: Mutex<Vec<VoiceClone>>,
    }

    #[async_trait]
    impl VoiceCloneRepositoryPort for MemoryVoiceRepo {
        async fn save(&self, clone: &VoiceClone) -> Result<(), RepositoryError> {
            self.clones.lock().unwrap().push(clone.clone());
            Ok(())
        }
        async fn find_by_id(&self, id: Uuid) -> Result<Option<VoiceClone>, RepositoryError> {
            Ok(self
                .clones
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned())
        }
        async fn find_by_user(&self, user_id: &str) -> Result<Vec<VoiceClone>, RepositoryError> {
            Ok(self
                .clones
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect())
        }
        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            self.clones.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }
    }

    fn clone_command(name: &str, audio: Vec<u8>) -> CloneVoice {
        CloneVoice {
            user_id: "u-1".to_string(),
            name: name.to_string(),
            audio_data: audio,
            file_name: "sample.mp3".to_string(),
        }
    }

    #[tokio::test]
    async fn test_clone_voice_persists_record() {
        let repo = Arc::new(MemoryVoiceRepo::default());
        let handler = CloneVoiceHandler::new(
            Arc::new(RecordingSynthesizer::default()),
            Arc::new(MemoryStorage),
            repo.clone(),
        );

        let clone = handler
            .handle(clone_command("My Voice", vec![1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(clone.provider_voice_id, "el-cloned");
        assert!(clone.sample_key.starts_with("u-1/voice-samples/sample.mp3-"));
        assert_eq!(repo.clones.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clone_voice_rejects_empty_input() {
        let handler = CloneVoiceHandler::new(
            Arc::new(RecordingSynthesizer::default()),
            Arc::new(MemoryStorage),
            Arc::new(MemoryVoiceRepo::default()),
        );

        assert!(handler.handle(clone_command("", vec![1])).await.is_err());
        assert!(handler
            .handle(clone_command("Voice", Vec::new()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_delete_rejects_other_users_clone() {
        let repo = Arc::new(MemoryVoiceRepo::default());
        let clone = VoiceClone::new("u-2", "el-1", "Theirs", "http://x/s", "u-2/s");
        repo.save(&clone).await.unwrap();

        let handler = DeleteVoiceCloneHandler::new(
            Arc::new(RecordingSynthesizer::default()),
            Arc::new(MemoryStorage),
            repo.clone(),
        );

        let result = handler
            .handle(DeleteVoiceClone {
                user_id: "u-1".to_string(),
                id: clone.id,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
        assert_eq!(repo.clones.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_survives_provider_failure() {
        let repo = Arc::new(MemoryVoiceRepo::default());
        let clone = VoiceClone::new("u-1", "el-1", "Mine", "http://x/s", "u-1/s");
        repo.save(&clone).await.unwrap();

        let synthesizer = Arc::new(RecordingSynthesizer {
            deleted: Mutex::new(Vec::new()),
            fail_delete: true,
        });
        let handler =
            DeleteVoiceCloneHandler::new(synthesizer, Arc::new(MemoryStorage), repo.clone());

        handler
            .handle(DeleteVoiceClone {
                user_id: "u-1".to_string(),
                id: clone.id,
            })
            .await
            .unwrap();

        assert!(repo.clones.lock().unwrap().is_empty());
    }
}
