//! Translator Port - 翻译/语言识别抽象
//!
//! 合成前的可选文本翻译，由 LLM 适配器实现

use async_trait::async_trait;
use thiserror::Error;

/// 翻译错误
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Translator Port
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    /// 识别文本语言，返回语言的英文名称（如 "Spanish"），
    /// 可直接作为 translate 的 source_language
    async fn detect_language(&self, text: &str) -> Result<String, TranslationError>;

    /// 将文本从 source 语言翻译为 target 语言
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;
}
