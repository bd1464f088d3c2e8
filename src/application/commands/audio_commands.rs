//! Audio Commands

use uuid::Uuid;

/// 删除生成音频
#[derive(Debug, Clone)]
pub struct DeleteAudioFile {
    pub user_id: String,
    pub id: Uuid,
}
