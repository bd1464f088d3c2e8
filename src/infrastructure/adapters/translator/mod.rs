//! 翻译适配器 - TranslatorPort 的具体实现

mod llm_translator;

pub use llm_translator::{LlmTranslator, LlmTranslatorConfig};
