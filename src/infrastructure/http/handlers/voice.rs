//! Voice HTTP Handlers

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{CloneVoice, DeleteVoiceClone, ListAvailableVoices, ListMyVoiceClones};
use crate::domain::voice::VoiceClone;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::require_user_id;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProviderVoiceResponse {
    pub voice_id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoiceCloneResponse {
    pub id: Uuid,
    pub provider_voice_id: String,
    pub name: String,
    pub sample_url: String,
    pub created_at: String,
}

impl From<VoiceClone> for VoiceCloneResponse {
    fn from(clone: VoiceClone) -> Self {
        Self {
            id: clone.id,
            provider_voice_id: clone.provider_voice_id,
            name: clone.name,
            sample_url: clone.sample_url,
            created_at: clone.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteVoiceCloneRequest {
    pub id: Uuid,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出 TTS 服务端的预置音色
pub async fn list_available_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProviderVoiceResponse>>>, ApiError> {
    let voices = state
        .list_available_voices_handler
        .handle(ListAvailableVoices)
        .await?;

    let responses: Vec<ProviderVoiceResponse> = voices
        .into_iter()
        .map(|v| ProviderVoiceResponse {
            voice_id: v.voice_id,
            name: v.name,
            category: v.category,
            description: v.description,
        })
        .collect();

    Ok(Json(ApiResponse::success(responses)))
}

/// 列出用户自己的克隆音色
pub async fn list_my_voice_clones(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<VoiceCloneResponse>>>, ApiError> {
    let user_id = require_user_id(&headers)?;

    let clones = state
        .list_my_voice_clones_handler
        .handle(ListMyVoiceClones { user_id })
        .await?;

    Ok(Json(ApiResponse::success(
        clones.into_iter().map(VoiceCloneResponse::from).collect(),
    )))
}

/// 克隆音色（multipart: name + file）
pub async fn clone_voice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<VoiceCloneResponse>>, ApiError> {
    let user_id = require_user_id(&headers)?;

    let mut name: Option<String> = None;
    let mut audio_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read name: {}", e)))?,
                );
            }
            "file" => {
                let filename = field.file_name().map(|s| s.to_string());

                // 验证音频格式
                let ext = filename.as_ref().and_then(|f| {
                    PathBuf::from(f)
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|s| s.to_lowercase())
                });
                let valid_exts = ["wav", "mp3", "flac", "ogg", "m4a", "webm"];
                if !ext
                    .as_ref()
                    .map(|e| valid_exts.contains(&e.as_str()))
                    .unwrap_or(false)
                {
                    return Err(ApiError::BadRequest(
                        "Only WAV, MP3, FLAC, OGG, M4A, WEBM audio files are allowed".to_string(),
                    ));
                }

                file_name = filename;
                audio_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ApiError::BadRequest("Name is required".to_string()))?;
    let audio_data =
        audio_data.ok_or_else(|| ApiError::BadRequest("Audio file is required".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "sample.mp3".to_string());

    let command = CloneVoice {
        user_id,
        name,
        audio_data,
        file_name,
    };
    let clone = state.clone_voice_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(VoiceCloneResponse::from(clone))))
}

/// 删除克隆音色
pub async fn delete_voice_clone(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<DeleteVoiceCloneRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let user_id = require_user_id(&headers)?;

    state
        .delete_voice_clone_handler
        .handle(DeleteVoiceClone {
            user_id,
            id: req.id,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
