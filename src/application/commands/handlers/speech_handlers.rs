//! Speech Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::GenerateSpeech;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioFileRepositoryPort, ObjectStoragePort, TranslatorPort};
use crate::application::synthesis::SynthesisPipeline;
use crate::domain::audio::AudioFile;
use crate::domain::voice::ProviderVoiceId;

/// 生成语音响应
#[derive(Debug)]
pub struct GenerateSpeechResponse {
    pub audio_file: AudioFile,
    /// 实际合成的片段数（供调用方观测分段行为）
    pub segment_count: usize,
}

/// GenerateSpeech Handler
///
/// 可选翻译 → 分段合成管线 → 对象存储 → 持久化记录
pub struct GenerateSpeechHandler {
    pipeline: SynthesisPipeline,
    translator: Arc<dyn TranslatorPort>,
    storage: Arc<dyn ObjectStoragePort>,
    audio_repo: Arc<dyn AudioFileRepositoryPort>,
}

impl GenerateSpeechHandler {
    pub fn new(
        pipeline: SynthesisPipeline,
        translator: Arc<dyn TranslatorPort>,
        storage: Arc<dyn ObjectStoragePort>,
        audio_repo: Arc<dyn AudioFileRepositoryPort>,
    ) -> Self {
        Self {
            pipeline,
            translator,
            storage,
            audio_repo,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateSpeech,
    ) -> Result<GenerateSpeechResponse, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text must not be empty"));
        }
        let voice_id =
            ProviderVoiceId::new(command.voice_id.clone()).map_err(ApplicationError::validation)?;

        let text = self.resolve_text(&command).await;

        let output = self.pipeline.run(&text, voice_id.as_str()).await?;

        if output.segment_count > 1 {
            tracing::info!(
                segment_count = output.segment_count,
                "Generated speech from multiple segments"
            );
        }

        let key = format!(
            "{}/audio/{}-{}.mp3",
            command.user_id,
            chrono::Utc::now().timestamp_millis(),
            random_suffix()
        );
        let stored = self.storage.put(&key, &output.audio, "audio/mpeg").await?;

        let audio_file = AudioFile::new(
            command.user_id,
            text,
            command.voice_id,
            command.voice_name,
            stored.url,
            stored.key,
            "mp3",
        );
        self.audio_repo.save(&audio_file).await?;

        tracing::info!(
            audio_id = %audio_file.id,
            voice_id = %audio_file.voice_id,
            audio_size = output.audio.len(),
            "Speech generated"
        );

        Ok(GenerateSpeechResponse {
            audio_file,
            segment_count: output.segment_count,
        })
    }

    /// 确定合成文本：按需翻译，翻译失败时回退原文
    async fn resolve_text(&self, command: &GenerateSpeech) -> String {
        let Some(target) = command.target_language.as_deref() else {
            return command.text.clone();
        };

        let source = match &command.source_language {
            Some(lang) => {
                tracing::debug!(source = %lang, "Using manually selected source language");
                lang.clone()
            }
            None => match self.translator.detect_language(&command.text).await {
                Ok(lang) => {
                    tracing::debug!(source = %lang, "Auto-detected source language");
                    lang
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Language detection failed, using original text");
                    return command.text.clone();
                }
            },
        };

        match self
            .translator
            .translate(&command.text, &source, target)
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, "Translation failed, using original text");
                command.text.clone()
            }
        }
    }
}

/// 文件 key 的随机后缀（16 个十六进制字符）
pub(crate) fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::{
        ProviderVoice, RepositoryError, SpeechSynthesizerPort, StorageError, StoredObject,
        SynthesisError, TranslationError, VoiceCloneRequest,
    };

    struct FixedSynthesizer;

    #[async_trait]
    impl SpeechSynthesizerPort for FixedSynthesizer {
        async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
            Ok(vec![0xAA, 0xBB])
        }
        async fn list_voices(&self) -> Result<Vec<ProviderVoice>, SynthesisError> {
            Ok(Vec::new())
        }
        async fn clone_voice(&self, _request: VoiceCloneRequest) -> Result<String, SynthesisError> {
            Ok("cloned".to_string())
        }
        async fn delete_voice(&self, _voice_id: &str) -> Result<(), SynthesisError> {
            Ok(())
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl TranslatorPort for FailingTranslator {
        async fn detect_language(&self, _text: &str) -> Result<String, TranslationError> {
            Err(TranslationError::LlmError("offline".to_string()))
        }
        async fn translate(
            &self,
            _text: &str,
            _source: &str,
            _target: &str,
        ) -> Result<String, TranslationError> {
            Err(TranslationError::LlmError("offline".to_string()))
        }
    }

    #[derive(Default)]
    struct MemoryStorage {
        objects: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ObjectStoragePort for MemoryStorage {
        async fn put(
            &self,
            key: &str,
            _data: &[u8],
            _content_type: &str,
        ) -> Result<StoredObject, StorageError> {
            self.objects.lock().unwrap().push(key.to_string());
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
    struct MemoryAudioRepo {
        saved: Mutex<Vec<AudioFile>>,
    }

    #[async_trait]
    impl AudioFileRepositoryPort for MemoryAudioRepo {
        async fn save(&self, audio: &AudioFile) -> Result<(), RepositoryError> {
            self.saved.lock().unwrap().push(audio.clone());
            Ok(())
        }
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<AudioFile>, RepositoryError> {
            Ok(None)
        }
        async fn find_by_user(&self, _user_id: &str) -> Result<Vec<AudioFile>, RepositoryError> {
            Ok(Vec::new())
        }
        async fn find_by_share_token(
            &self,
            _token: &str,
        ) -> Result<Option<AudioFile>, RepositoryError> {
            Ok(None)
        }
        async fn delete(&self, _id: Uuid) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn handler_with_fakes() -> (GenerateSpeechHandler, Arc<MemoryAudioRepo>) {
        let repo = Arc::new(MemoryAudioRepo::default());
        let handler = GenerateSpeechHandler::new(
            SynthesisPipeline::new(Arc::new(FixedSynthesizer), 100),
            Arc::new(FailingTranslator),
            Arc::new(MemoryStorage::default()),
            repo.clone(),
        );
        (handler, repo)
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let (handler, _) = handler_with_fakes();
        let command = GenerateSpeech {
            user_id: "u-1".to_string(),
            text: "   ".to_string(),
            voice_id: "v-1".to_string(),
            voice_name: "Aria".to_string(),
            source_language: None,
            target_language: None,
        };
        assert!(matches!(
            handler.handle(command).await,
            Err(ApplicationError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_generation_persists_record() {
        let (handler, repo) = handler_with_fakes();
        let command = GenerateSpeech {
            user_id: "u-1".to_string(),
            text: "Hello world.".to_string(),
            voice_id: "v-1".to_string(),
            voice_name: "Aria".to_string(),
            source_language: None,
            target_language: None,
        };

        let response = handler.handle(command).await.unwrap();

        assert_eq!(response.segment_count, 1);
        let saved = repo.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].text, "Hello world.");
        assert!(saved[0].audio_key.starts_with("u-1/audio/"));
        assert!(saved[0].share_token.is_some());
    }

    #[tokio::test]
    async fn test_translation_failure_falls_back_to_original() {
        let (handler, repo) = handler_with_fakes();
        let command = GenerateSpeech {
            user_id: "u-1".to_string(),
            text: "Bonjour.".to_string(),
            voice_id: "v-1".to_string(),
            voice_name: "Aria".to_string(),
            source_language: None,
            target_language: Some("English".to_string()),
        };

        handler.handle(command).await.unwrap();

        let saved = repo.saved.lock().unwrap();
        assert_eq!(saved[0].text, "Bonjour.");
    }
}
