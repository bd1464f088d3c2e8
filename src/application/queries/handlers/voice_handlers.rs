//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ProviderVoice, SpeechSynthesizerPort, VoiceCloneRepositoryPort};
use crate::application::queries::{ListAvailableVoices, ListMyVoiceClones};
use crate::domain::voice::VoiceClone;

/// ListAvailableVoices Handler
///
/// 直接透传 TTS 服务端的音色目录
pub struct ListAvailableVoicesHandler {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
}

impl ListAvailableVoicesHandler {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizerPort>) -> Self {
        Self { synthesizer }
    }

    pub async fn handle(
        &self,
        _query: ListAvailableVoices,
    ) -> Result<Vec<ProviderVoice>, ApplicationError> {
        Ok(self.synthesizer.list_voices().await?)
    }
}

/// ListMyVoiceClones Handler
pub struct ListMyVoiceClonesHandler {
    voice_repo: Arc<dyn VoiceCloneRepositoryPort>,
}

impl ListMyVoiceClonesHandler {
    pub fn new(voice_repo: Arc<dyn VoiceCloneRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        query: ListMyVoiceClones,
    ) -> Result<Vec<VoiceClone>, ApplicationError> {
        Ok(self.voice_repo.find_by_user(&query.user_id).await?)
    }
}
