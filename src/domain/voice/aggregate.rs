//! Voice Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 音色克隆聚合根
///
/// 不变量:
/// - provider_voice_id 一经创建不可变更（由 TTS 服务分配）
/// - 原始样本在对象存储中的 key 与 URL 必须成对存在
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceClone {
    pub id: Uuid,
    /// 所属用户（上游网关分配的标识）
    pub user_id: String,
    /// TTS 服务返回的音色 ID
    pub provider_voice_id: String,
    pub name: String,
    /// 克隆所用原始音频的公开 URL
    pub sample_url: String,
    /// 对象存储中的样本 key
    pub sample_key: String,
    pub created_at: DateTime<Utc>,
}

impl VoiceClone {
    /// 创建新的音色克隆记录
    pub fn new(
        user_id: impl Into<String>,
        provider_voice_id: impl Into<String>,
        name: impl Into<String>,
        sample_url: impl Into<String>,
        sample_key: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            provider_voice_id: provider_voice_id.into(),
            name: name.into(),
            sample_url: sample_url.into(),
            sample_key: sample_key.into(),
            created_at: Utc::now(),
        }
    }

    /// 记录是否属于指定用户
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
