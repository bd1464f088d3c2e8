//! Voxshare - TTS 语音生成与分享服务
//!
//! - Domain: voice/, audio/ (Bounded Contexts) + segmenter
//! - Application: commands, queries, ports, synthesis
//! - Infrastructure: http, adapters, persistence

use std::sync::Arc;

use voxshare::application::ports::SpeechSynthesizerPort;
use voxshare::config::{load_config, print_config};
use voxshare::infrastructure::adapters::storage::FileObjectStorage;
use voxshare::infrastructure::adapters::translator::{LlmTranslator, LlmTranslatorConfig};
use voxshare::infrastructure::adapters::tts::{
    ElevenLabsClient, ElevenLabsClientConfig, FakeSynthesizer,
};
use voxshare::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voxshare::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteAudioFileRepository,
    SqliteVoiceCloneRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},voxshare={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Voxshare - TTS 语音生成与分享服务");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.root_dir).await?;
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let voice_repo = Arc::new(SqliteVoiceCloneRepository::new(pool.clone()));
    let audio_repo = Arc::new(SqliteAudioFileRepository::new(pool.clone()));

    // 创建 TTS 合成器
    let synthesizer: Arc<dyn SpeechSynthesizerPort> = match config.tts.provider.as_str() {
        "fake" => {
            tracing::warn!("Using fake synthesizer, audio output is not real speech");
            Arc::new(FakeSynthesizer::new())
        }
        _ => {
            let tts_config = ElevenLabsClientConfig {
                api_key: config.tts.api_key.clone(),
                base_url: config.tts.base_url.clone(),
                model_id: config.tts.model_id.clone(),
                output_format: config.tts.output_format.clone(),
                timeout_secs: config.tts.timeout_secs,
            };
            Arc::new(ElevenLabsClient::new(tts_config)?)
        }
    };

    // 创建 LLM 翻译器
    let translator_config = LlmTranslatorConfig {
        base_url: config.translation.base_url.clone(),
        api_key: config.translation.api_key.clone(),
        model: config.translation.model.clone(),
        timeout_secs: config.translation.timeout_secs,
    };
    let translator = Arc::new(LlmTranslator::new(translator_config)?);

    // 创建本地文件对象存储
    let storage = Arc::new(FileObjectStorage::new(
        config.storage.root_dir.clone(),
        config.server.public_base_url(),
    ));

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(
        &config.server.host,
        config.server.port,
        config.storage.max_upload_size as usize,
    );
    let state = AppState::new(
        synthesizer,
        translator,
        storage,
        voice_repo,
        audio_repo,
        config.synthesis.max_segment_chars,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
