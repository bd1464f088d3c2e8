//! Speech Synthesizer Port - 语音合成服务抽象
//!
//! 定义外部 TTS 服务（合成、音色目录、克隆）的抽象接口，
//! 具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Provider error (HTTP {status}): {message}")]
    ProviderError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API key is not configured")]
    MissingApiKey,
}

/// TTS 服务端的预置/克隆音色描述
#[derive(Debug, Clone)]
pub struct ProviderVoice {
    pub voice_id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// 音色克隆请求
#[derive(Debug, Clone)]
pub struct VoiceCloneRequest {
    pub name: String,
    /// 原始参考音频
    pub audio_data: Vec<u8>,
    pub file_name: String,
}

/// Speech Synthesizer Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成单个文本片段，返回编码后的音频字节
    ///
    /// 片段级重试/退避策略由具体实现负责
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError>;

    /// 列出服务端可用的预置音色
    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, SynthesisError>;

    /// 从参考音频创建克隆音色，返回服务端音色 ID
    async fn clone_voice(&self, request: VoiceCloneRequest) -> Result<String, SynthesisError>;

    /// 删除服务端音色
    async fn delete_voice(&self, voice_id: &str) -> Result<(), SynthesisError>;
}
