//! Audio Management HTTP Handlers

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{DeleteAudioFile, GetSharedAudio, ListMyAudioFiles};
use crate::domain::audio::AudioFile;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::require_user_id;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AudioFileResponse {
    pub id: Uuid,
    pub text: String,
    pub voice_id: String,
    pub voice_name: String,
    pub audio_url: String,
    pub format: String,
    pub share_token: Option<String>,
    pub created_at: String,
}

impl From<AudioFile> for AudioFileResponse {
    fn from(audio: AudioFile) -> Self {
        Self {
            id: audio.id,
            text: audio.text,
            voice_id: audio.voice_id,
            voice_name: audio.voice_name,
            audio_url: audio.audio_url,
            format: audio.format,
            share_token: audio.share_token,
            created_at: audio.created_at.to_rfc3339(),
        }
    }
}

/// 公开分享视图，不暴露归属用户
#[derive(Debug, Serialize)]
pub struct SharedAudioResponse {
    pub text: String,
    pub voice_name: String,
    pub audio_url: String,
    pub format: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAudioFileRequest {
    pub id: Uuid,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出用户自己的生成音频
pub async fn list_my_audio_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<AudioFileResponse>>>, ApiError> {
    let user_id = require_user_id(&headers)?;

    let files = state
        .list_my_audio_files_handler
        .handle(ListMyAudioFiles { user_id })
        .await?;

    Ok(Json(ApiResponse::success(
        files.into_iter().map(AudioFileResponse::from).collect(),
    )))
}

/// 删除生成音频
pub async fn delete_audio_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<DeleteAudioFileRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let user_id = require_user_id(&headers)?;

    state
        .delete_audio_file_handler
        .handle(DeleteAudioFile {
            user_id,
            id: req.id,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 通过分享令牌获取音频（公开，无需用户标识）
pub async fn get_shared_audio(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<SharedAudioResponse>>, ApiError> {
    let audio = state
        .get_shared_audio_handler
        .handle(GetSharedAudio { token })
        .await?;

    Ok(Json(ApiResponse::success(SharedAudioResponse {
        text: audio.text,
        voice_name: audio.voice_name,
        audio_url: audio.audio_url,
        format: audio.format,
        created_at: audio.created_at.to_rfc3339(),
    })))
}
