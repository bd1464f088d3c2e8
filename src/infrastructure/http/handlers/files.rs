//! File Serving Handler
//!
//! 提供对象存储中文件的公开下载，生成音频与克隆样本的
//! URL 均指向这里

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::ports::StorageError;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 按扩展名推断 Content-Type
fn content_type_for(key: &str) -> &'static str {
    match key.rsplit('.').next() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// 下载存储对象
pub async fn serve_file(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.storage.get(&key).await.map_err(|e| match e {
        StorageError::NotFound(key) => ApiError::NotFound(format!("File not found: {}", key)),
        StorageError::InvalidKey(msg) => ApiError::BadRequest(msg),
        StorageError::IoError(msg) => ApiError::Internal(msg),
    })?;

    let content_type = content_type_for(&key);
    let content_length = data.len();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from(data))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
