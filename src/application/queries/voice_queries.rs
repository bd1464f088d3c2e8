//! Voice Queries

/// 列出 TTS 服务端的预置音色
#[derive(Debug, Clone)]
pub struct ListAvailableVoices;

/// 列出用户自己的克隆音色
#[derive(Debug, Clone)]
pub struct ListMyVoiceClones {
    pub user_id: String,
}
