//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::segmenter::DEFAULT_MAX_SEGMENT_CHARS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 分段合成配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 翻译（LLM）配置
    #[serde(default)]
    pub translation: TranslationConfig,

    /// 对象存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（用于生成文件下载链接）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 使用的合成实现: elevenlabs | fake
    #[serde(default = "default_tts_provider")]
    pub provider: String,

    /// ElevenLabs API Key（未配置时预置音色列表为空）
    #[serde(default)]
    pub api_key: String,

    /// API 基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// 合成模型
    #[serde(default = "default_tts_model")]
    pub model_id: String,

    /// 输出格式
    #[serde(default = "default_tts_output_format")]
    pub output_format: String,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
}

fn default_tts_provider() -> String {
    "elevenlabs".to_string()
}

fn default_tts_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_tts_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_tts_output_format() -> String {
    "mp3_44100_128".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: default_tts_provider(),
            api_key: String::new(),
            base_url: default_tts_base_url(),
            model_id: default_tts_model(),
            output_format: default_tts_output_format(),
            timeout_secs: default_tts_timeout(),
        }
    }
}

/// 分段合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 单片段最大字符数（低于服务端 10,000 上限，留出余量）
    #[serde(default = "default_max_segment_chars")]
    pub max_segment_chars: usize,
}

fn default_max_segment_chars() -> usize {
    DEFAULT_MAX_SEGMENT_CHARS
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_segment_chars: default_max_segment_chars(),
        }
    }
}

/// 翻译（LLM）配置
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    /// OpenAI 兼容 chat completions API 基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API Key
    #[serde(default)]
    pub api_key: String,

    /// 模型名
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// 对象存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 对象存储根目录
    #[serde(default = "default_storage_root")]
    pub root_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 10MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("data/objects")
}

fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_storage_root(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/voxshare.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
