//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping              GET   健康检查
//! - /api/voices/available  GET   列出 TTS 服务端预置音色
//! - /api/voices/mine       GET   列出用户克隆音色
//! - /api/voices/clone      POST  克隆音色（multipart: name + file）
//! - /api/voices/delete     POST  删除克隆音色
//! - /api/tts/generate      POST  生成语音（长文本自动分段）
//! - /api/audio/mine        GET   列出用户生成音频
//! - /api/audio/delete      POST  删除生成音频
//! - /api/shared/{token}    GET   分享链接（公开，无需用户标识）
//! - /files/{key}           GET   存储对象下载（公开）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/files/*key", get(handlers::serve_file))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/voices", voice_routes())
        .nest("/tts", tts_routes())
        .nest("/audio", audio_routes())
        .route("/shared/:token", get(handlers::get_shared_audio))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/available", get(handlers::list_available_voices))
        .route("/mine", get(handlers::list_my_voice_clones))
        .route("/clone", post(handlers::clone_voice))
        .route("/delete", post(handlers::delete_voice_clone))
}

/// TTS 路由
fn tts_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(handlers::generate_speech))
}

/// Audio 路由
fn audio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mine", get(handlers::list_my_audio_files))
        .route("/delete", post(handlers::delete_audio_file))
}
