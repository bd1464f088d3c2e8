//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOXSHARE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOXSHARE_SERVER__PORT=8080`
/// - `VOXSHARE_TTS__API_KEY=xi-...`
/// - `VOXSHARE_SYNTHESIS__MAX_SEGMENT_CHARS=4000`
/// - `VOXSHARE_DATABASE__PATH=/data/voxshare.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("tts.provider", "elevenlabs")?
        .set_default("tts.api_key", "")?
        .set_default("tts.base_url", "https://api.elevenlabs.io/v1")?
        .set_default("tts.model_id", "eleven_multilingual_v2")?
        .set_default("tts.output_format", "mp3_44100_128")?
        .set_default("tts.timeout_secs", 120)?
        .set_default("synthesis.max_segment_chars", 9_500)?
        .set_default("translation.base_url", "https://api.openai.com/v1")?
        .set_default("translation.api_key", "")?
        .set_default("translation.model", "gpt-4o-mini")?
        .set_default("translation.timeout_secs", 30)?
        .set_default("storage.root_dir", "data/objects")?
        .set_default("storage.max_upload_size", 10 * 1024 * 1024)?
        .set_default("database.path", "data/voxshare.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: VOXSHARE_
    // 层级分隔符: __ (双下划线)
    // 例如: VOXSHARE_TTS__API_KEY=xi-...
    builder = builder.add_source(
        Environment::with_prefix("VOXSHARE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    match config.tts.provider.as_str() {
        "elevenlabs" | "fake" => {}
        other => {
            return Err(ConfigError::ValidationError(format!(
                "Unknown TTS provider: {}",
                other
            )));
        }
    }

    if config.tts.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS base URL cannot be empty".to_string(),
        ));
    }

    if config.synthesis.max_segment_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Max segment chars must be greater than 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("TTS Provider: {}", config.tts.provider);
    tracing::info!("TTS Base URL: {}", config.tts.base_url);
    tracing::info!("TTS API Key configured: {}", !config.tts.api_key.is_empty());
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Max Segment Chars: {}", config.synthesis.max_segment_chars);
    tracing::info!("Translation Model: {}", config.translation.model);
    tracing::info!("Storage Root: {:?}", config.storage.root_dir);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_unknown_provider() {
        let mut config = AppConfig::default();
        config.tts.provider = "espeak".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_segment_limit() {
        let mut config = AppConfig::default();
        config.synthesis.max_segment_chars = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }
}
