//! Audio Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ShareToken;

/// 生成音频聚合根
///
/// 记录一次 TTS 生成的最终产物：文本、所用音色与存储位置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFile {
    pub id: Uuid,
    /// 所属用户（上游网关分配的标识）
    pub user_id: String,
    /// 实际合成所用的文本（翻译后）
    pub text: String,
    /// TTS 服务端音色 ID
    pub voice_id: String,
    /// 展示用音色名称
    pub voice_name: String,
    /// 对象存储中的公开 URL
    pub audio_url: String,
    /// 对象存储 key
    pub audio_key: String,
    /// 音频格式（mp3 等）
    pub format: String,
    /// 公开分享令牌
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AudioFile {
    /// 创建新的音频记录，同时签发分享令牌
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: impl Into<String>,
        text: impl Into<String>,
        voice_id: impl Into<String>,
        voice_name: impl Into<String>,
        audio_url: impl Into<String>,
        audio_key: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            text: text.into(),
            voice_id: voice_id.into(),
            voice_name: voice_name.into(),
            audio_url: audio_url.into(),
            audio_key: audio_key.into(),
            format: format.into(),
            share_token: Some(ShareToken::generate().as_str().to_string()),
            created_at: Utc::now(),
        }
    }

    /// 记录是否属于指定用户
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_file_gets_share_token() {
        let audio = AudioFile::new("u-1", "hello", "v-1", "Aria", "http://x/a.mp3", "u-1/a.mp3", "mp3");
        let token = audio.share_token.as_deref().unwrap();
        assert_eq!(token.len(), 64);
        assert!(audio.is_owned_by("u-1"));
    }
}
