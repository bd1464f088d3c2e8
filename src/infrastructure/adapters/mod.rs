//! 外部服务适配器

pub mod storage;
pub mod translator;
pub mod tts;
