//! ElevenLabs Client - 调用 ElevenLabs TTS API
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! - POST   {base}/text-to-speech/{voice_id}   合成，返回音频二进制
//! - GET    {base}/voices                      预置音色目录
//! - POST   {base}/voices/add                  克隆音色 (multipart)
//! - DELETE {base}/voices/{voice_id}           删除音色

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    ProviderVoice, SpeechSynthesizerPort, SynthesisError, VoiceCloneRequest,
};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TextToSpeechRequest {
    text: String,
    model_id: String,
    output_format: String,
}

/// 音色目录响应
#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceItem>,
}

#[derive(Debug, Deserialize)]
struct VoiceItem {
    voice_id: String,
    name: String,
    category: Option<String>,
    description: Option<String>,
}

/// 克隆响应
#[derive(Debug, Deserialize)]
struct AddVoiceResponse {
    voice_id: String,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API Key（xi-api-key 头）
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    /// 合成模型
    pub model_id: String,
    /// 输出格式
    pub output_format: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.elevenlabs.io/v1".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            output_format: "mp3_44100_128".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建新的 ElevenLabs 客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn require_api_key(&self) -> Result<&str, SynthesisError> {
        if self.config.api_key.is_empty() {
            return Err(SynthesisError::MissingApiKey);
        }
        Ok(&self.config.api_key)
    }

    fn map_request_error(e: reqwest::Error) -> SynthesisError {
        if e.is_timeout() {
            SynthesisError::Timeout
        } else if e.is_connect() {
            SynthesisError::NetworkError(format!("Cannot connect to TTS provider: {}", e))
        } else {
            SynthesisError::NetworkError(e.to_string())
        }
    }

    /// 非 2xx 响应转换为 ProviderError（携带状态码与响应体）
    async fn provider_error(response: reqwest::Response) -> SynthesisError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        SynthesisError::ProviderError { status, message }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        let api_key = self.require_api_key()?;
        let url = format!("{}/text-to-speech/{}", self.config.base_url, voice_id);

        tracing::debug!(
            url = %url,
            text_chars = text.chars().count(),
            "Sending text-to-speech request"
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .json(&TextToSpeechRequest {
                text: text.to_string(),
                model_id: self.config.model_id.clone(),
                output_format: self.config.output_format.clone(),
            })
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::debug!(audio_size = audio.len(), "Text-to-speech completed");

        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, SynthesisError> {
        // 未配置 API Key 时目录为空，而不是报错
        if self.config.api_key.is_empty() {
            tracing::warn!("TTS API key is not configured, returning empty voice list");
            return Ok(Vec::new());
        }

        let url = format!("{}/voices", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let body: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        Ok(body
            .voices
            .into_iter()
            .map(|v| ProviderVoice {
                voice_id: v.voice_id,
                name: v.name,
                category: v.category,
                description: v.description,
            })
            .collect())
    }

    async fn clone_voice(&self, request: VoiceCloneRequest) -> Result<String, SynthesisError> {
        let api_key = self.require_api_key()?;
        let url = format!("{}/voices/add", self.config.base_url);

        let part = reqwest::multipart::Part::bytes(request.audio_data)
            .file_name(request.file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("name", request.name.clone())
            .part("files", part);

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .multipart(form)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        let body: AddVoiceResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            provider_voice_id = %body.voice_id,
            name = %request.name,
            "Provider voice clone created"
        );

        Ok(body.voice_id)
    }

    async fn delete_voice(&self, voice_id: &str) -> Result<(), SynthesisError> {
        let api_key = self.require_api_key()?;
        let url = format!("{}/voices/{}", self.config.base_url, voice_id);

        let response = self
            .client
            .delete(&url)
            .header("xi-api-key", api_key)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            return Err(Self::provider_error(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io/v1");
        assert_eq!(config.model_id, "eleven_multilingual_v2");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = ElevenLabsClientConfig::new("key")
            .with_base_url("http://localhost:9000/v1")
            .with_timeout(60);
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.timeout_secs, 60);
    }

    #[tokio::test]
    async fn test_synthesize_without_api_key_fails() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::default()).unwrap();
        let result = client.synthesize("hello", "voice-1").await;
        assert!(matches!(result, Err(SynthesisError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_list_voices_without_api_key_is_empty() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::default()).unwrap();
        let voices = client.list_voices().await.unwrap();
        assert!(voices.is_empty());
    }
}
