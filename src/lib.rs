//! Voxshare - TTS 语音生成与分享服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 克隆音色管理上下文
//! - Audio Context: 生成音频管理上下文
//! - Segmenter: 长文本分段算法
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechSynthesizer, Translator, ObjectStorage, Repositories）
//! - Synthesis: 分段合成管线（分段 → 逐段合成 → 拼接）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 文件下载
//! - Adapters: ElevenLabs Client, LLM Translator, File Storage
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
