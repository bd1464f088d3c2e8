//! LLM Translator - 通过 OpenAI 兼容 chat completions API 实现翻译
//!
//! 实现 TranslatorPort trait
//!
//! 两类提示词：
//! - 语言检测：要求只回答语言的英文名称（如 "Spanish"），
//!   该名称直接进入后续翻译提示词作为源语言
//! - 翻译：要求只输出译文本身

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{TranslationError, TranslatorPort};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// LLM 翻译器配置
#[derive(Debug, Clone)]
pub struct LlmTranslatorConfig {
    /// chat completions API 基础 URL
    pub base_url: String,
    /// API Key
    pub api_key: String,
    /// 模型名
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for LlmTranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

/// 语言检测提示词
fn detection_prompt() -> &'static str {
    "You are a language detection tool. Reply with only the English name of the \
     language the text is written in, for example: Spanish. Nothing else."
}

/// 翻译提示词（源/目标均为语言的英文名称）
fn translation_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        "You are a translator. Translate the user's text from {} to {}. \
         Output only the translation, with no explanations or quotes.",
        source_language, target_language
    )
}

/// LLM 翻译器
pub struct LlmTranslator {
    client: Client,
    config: LlmTranslatorConfig,
}

impl LlmTranslator {
    pub fn new(config: LlmTranslatorConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn map_request_error(e: reqwest::Error) -> TranslationError {
        if e.is_timeout() {
            TranslationError::Timeout
        } else {
            TranslationError::NetworkError(e.to_string())
        }
    }

    /// 发送单轮 system+user 对话，返回模型输出（已去除首尾空白）
    async fn complete(&self, system: String, user: String) -> Result<String, TranslationError> {
        if self.config.api_key.is_empty() {
            return Err(TranslationError::LlmError(
                "Translation API key is not configured".to_string(),
            ));
        }

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatCompletionRequest {
                model: self.config.model.clone(),
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: system,
                    },
                    ChatMessage {
                        role: "user",
                        content: user,
                    },
                ],
                temperature: 0.2,
            })
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::LlmError(format!(
                "LLM returned status {}: {}",
                status, message
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                TranslationError::InvalidResponse("LLM response has no choices".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl TranslatorPort for LlmTranslator {
    async fn detect_language(&self, text: &str) -> Result<String, TranslationError> {
        let language = self
            .complete(detection_prompt().to_string(), text.to_string())
            .await?;

        // 语言名应为单个短词组，长输出说明模型在自由发挥
        if language.is_empty() || language.len() > 32 {
            return Err(TranslationError::InvalidResponse(format!(
                "Unexpected language detection output: {:?}",
                language
            )));
        }

        Ok(language)
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let system = translation_prompt(source_language, target_language);
        let translated = self.complete(system, text.to_string()).await?;

        if translated.is_empty() {
            return Err(TranslationError::InvalidResponse(
                "LLM returned empty translation".to_string(),
            ));
        }

        tracing::debug!(
            source = %source_language,
            target = %target_language,
            chars = translated.chars().count(),
            "Translation completed"
        );

        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LlmTranslatorConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_detection_prompt_asks_for_language_name() {
        // 检测结果要直接进入翻译提示词，因此必须是语言名而不是代码
        assert!(detection_prompt().contains("English name"));
    }

    #[test]
    fn test_translation_prompt_carries_both_languages() {
        let prompt = translation_prompt("Spanish", "English");
        assert!(prompt.contains("from Spanish to English"));
    }

    #[tokio::test]
    async fn test_detect_without_api_key_fails() {
        let translator = LlmTranslator::new(LlmTranslatorConfig::default()).unwrap();
        let result = translator.detect_language("hello").await;
        assert!(matches!(result, Err(TranslationError::LlmError(_))));
    }

    #[tokio::test]
    async fn test_translate_without_api_key_fails() {
        let translator = LlmTranslator::new(LlmTranslatorConfig::default()).unwrap();
        let result = translator.translate("hello", "en", "fr").await;
        assert!(result.is_err());
    }
}
