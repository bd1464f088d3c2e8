//! Audio Queries

/// 列出用户自己的生成音频
#[derive(Debug, Clone)]
pub struct ListMyAudioFiles {
    pub user_id: String,
}

/// 通过分享令牌获取音频（公开访问）
#[derive(Debug, Clone)]
pub struct GetSharedAudio {
    pub token: String,
}
