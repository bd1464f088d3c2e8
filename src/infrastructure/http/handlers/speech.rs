//! Speech Generation HTTP Handlers

use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::GenerateSpeech;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::require_user_id;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateSpeechRequest {
    pub text: String,
    pub voice_id: String,
    pub voice_name: String,
    /// 源语言（留空时自动检测）
    pub source_language: Option<String>,
    /// 目标语言（留空时不翻译）
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedAudioResponse {
    pub id: Uuid,
    /// 实际合成所用的文本（翻译后）
    pub text: String,
    pub voice_id: String,
    pub voice_name: String,
    pub audio_url: String,
    pub format: String,
    pub share_token: Option<String>,
    /// 实际合成的片段数
    pub segment_count: usize,
    pub created_at: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 生成语音（同步完成，长文本在服务端自动分段合成）
pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<GenerateSpeechRequest>,
) -> Result<Json<ApiResponse<GeneratedAudioResponse>>, ApiError> {
    let user_id = require_user_id(&headers)?;

    let command = GenerateSpeech {
        user_id,
        text: req.text,
        voice_id: req.voice_id,
        voice_name: req.voice_name,
        source_language: req.source_language,
        target_language: req.target_language,
    };

    let result = state.generate_speech_handler.handle(command).await?;
    let audio = result.audio_file;

    Ok(Json(ApiResponse::success(GeneratedAudioResponse {
        id: audio.id,
        text: audio.text,
        voice_id: audio.voice_id,
        voice_name: audio.voice_name,
        audio_url: audio.audio_url,
        format: audio.format,
        share_token: audio.share_token,
        segment_count: result.segment_count,
        created_at: audio.created_at.to_rfc3339(),
    })))
}
