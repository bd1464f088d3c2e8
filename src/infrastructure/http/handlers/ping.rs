//! Ping Handler

use axum::Json;
use serde::Serialize;

use crate::infrastructure::http::dto::ApiResponse;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// 健康检查
pub async fn ping() -> Json<ApiResponse<PingResponse>> {
    Json(ApiResponse::success(PingResponse {
        message: "pong".to_string(),
    }))
}
