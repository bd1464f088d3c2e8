//! Fake Synthesizer - 本地开发与测试用假合成器
//!
//! 不依赖外部服务，按输入文本生成确定性的假音频数据

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::application::ports::{
    ProviderVoice, SpeechSynthesizerPort, SynthesisError, VoiceCloneRequest,
};

/// 假合成器
///
/// 输出格式：`FAKEMP3:` 前缀 + 文本的 UTF-8 字节，便于测试中断言内容
pub struct FakeSynthesizer {
    /// 模拟的合成延迟
    delay: Duration,
    /// 已克隆音色计数（生成递增的音色 ID）
    clone_counter: AtomicU64,
}

impl FakeSynthesizer {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(0),
            clone_counter: AtomicU64::new(0),
        }
    }

    /// 设置模拟延迟（用于演示长任务）
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for FakeSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSynthesizer {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::debug!(
            voice_id = %voice_id,
            text_chars = text.chars().count(),
            "Fake synthesis"
        );

        let mut audio = b"FAKEMP3:".to_vec();
        audio.extend_from_slice(text.as_bytes());
        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, SynthesisError> {
        Ok(vec![
            ProviderVoice {
                voice_id: "fake-narrator".to_string(),
                name: "Narrator".to_string(),
                category: Some("premade".to_string()),
                description: Some("Deterministic local voice for development".to_string()),
            },
            ProviderVoice {
                voice_id: "fake-casual".to_string(),
                name: "Casual".to_string(),
                category: Some("premade".to_string()),
                description: None,
            },
        ])
    }

    async fn clone_voice(&self, request: VoiceCloneRequest) -> Result<String, SynthesisError> {
        if request.audio_data.is_empty() {
            return Err(SynthesisError::InvalidResponse(
                "Sample audio is empty".to_string(),
            ));
        }
        let n = self.clone_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("fake-clone-{}", n))
    }

    async fn delete_voice(&self, voice_id: &str) -> Result<(), SynthesisError> {
        tracing::debug!(voice_id = %voice_id, "Fake voice deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_synthesize_embeds_text() {
        let synth = FakeSynthesizer::new();
        let audio = synth.synthesize("hello world", "fake-narrator").await.unwrap();
        assert_eq!(audio, b"FAKEMP3:hello world");
    }

    #[tokio::test]
    async fn test_clone_voice_ids_increment() {
        let synth = FakeSynthesizer::new();
        let req = |name: &str| VoiceCloneRequest {
            name: name.to_string(),
            audio_data: vec![1, 2, 3],
            file_name: "sample.mp3".to_string(),
        };
        assert_eq!(synth.clone_voice(req("a")).await.unwrap(), "fake-clone-1");
        assert_eq!(synth.clone_voice(req("b")).await.unwrap(), "fake-clone-2");
    }

    #[tokio::test]
    async fn test_clone_voice_rejects_empty_sample() {
        let synth = FakeSynthesizer::new();
        let result = synth
            .clone_voice(VoiceCloneRequest {
                name: "x".to_string(),
                audio_data: Vec::new(),
                file_name: "sample.mp3".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_voices_is_non_empty() {
        let synth = FakeSynthesizer::new();
        let voices = synth.list_voices().await.unwrap();
        assert!(!voices.is_empty());
    }
}
