//! HTTP Handlers

mod audio;
mod files;
mod ping;
mod speech;
mod voice;

pub use audio::*;
pub use files::*;
pub use ping::*;
pub use speech::*;
pub use voice::*;

use axum::http::HeaderMap;

use super::error::ApiError;

/// 上游网关注入的用户标识头
pub const USER_ID_HEADER: &str = "x-user-id";

/// 从请求头中提取用户标识
///
/// 认证由上游网关完成，这里只要求标识存在且非空
pub fn require_user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing X-User-Id header".to_string()))
}
