//! Speech Commands

/// 生成语音
///
/// target_language 存在时先翻译（source_language 缺省则自动识别），
/// 再走分段合成管线
#[derive(Debug, Clone)]
pub struct GenerateSpeech {
    pub user_id: String,
    pub text: String,
    /// TTS 服务端音色 ID（预置或克隆）
    pub voice_id: String,
    /// 展示用音色名称
    pub voice_name: String,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}
