//! Voice Commands

use uuid::Uuid;

/// 克隆音色
#[derive(Debug, Clone)]
pub struct CloneVoice {
    pub user_id: String,
    pub name: String,
    /// 参考音频原始字节
    pub audio_data: Vec<u8>,
    pub file_name: String,
}

/// 删除克隆音色
#[derive(Debug, Clone)]
pub struct DeleteVoiceClone {
    pub user_id: String,
    pub id: Uuid,
}
