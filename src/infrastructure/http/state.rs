//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloneVoiceHandler, DeleteAudioFileHandler, DeleteVoiceCloneHandler, GenerateSpeechHandler,
    // Query handlers
    GetSharedAudioHandler, ListAvailableVoicesHandler, ListMyAudioFilesHandler,
    ListMyVoiceClonesHandler,
    // Ports
    AudioFileRepositoryPort, ObjectStoragePort, SpeechSynthesizerPort, TranslatorPort,
    VoiceCloneRepositoryPort,
};
use crate::application::synthesis::SynthesisPipeline;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub synthesizer: Arc<dyn SpeechSynthesizerPort>,
    pub translator: Arc<dyn TranslatorPort>,
    pub storage: Arc<dyn ObjectStoragePort>,
    pub voice_repo: Arc<dyn VoiceCloneRepositoryPort>,
    pub audio_repo: Arc<dyn AudioFileRepositoryPort>,

    // ========== Command Handlers ==========
    pub generate_speech_handler: GenerateSpeechHandler,
    pub clone_voice_handler: CloneVoiceHandler,
    pub delete_voice_clone_handler: DeleteVoiceCloneHandler,
    pub delete_audio_file_handler: DeleteAudioFileHandler,

    // ========== Query Handlers ==========
    pub list_available_voices_handler: ListAvailableVoicesHandler,
    pub list_my_voice_clones_handler: ListMyVoiceClonesHandler,
    pub list_my_audio_files_handler: ListMyAudioFilesHandler,
    pub get_shared_audio_handler: GetSharedAudioHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        translator: Arc<dyn TranslatorPort>,
        storage: Arc<dyn ObjectStoragePort>,
        voice_repo: Arc<dyn VoiceCloneRepositoryPort>,
        audio_repo: Arc<dyn AudioFileRepositoryPort>,
        max_segment_chars: usize,
    ) -> Self {
        Self {
            // Ports
            synthesizer: synthesizer.clone(),
            translator: translator.clone(),
            storage: storage.clone(),
            voice_repo: voice_repo.clone(),
            audio_repo: audio_repo.clone(),

            // Command handlers
            generate_speech_handler: GenerateSpeechHandler::new(
                SynthesisPipeline::new(synthesizer.clone(), max_segment_chars),
                translator.clone(),
                storage.clone(),
                audio_repo.clone(),
            ),
            clone_voice_handler: CloneVoiceHandler::new(
                synthesizer.clone(),
                storage.clone(),
                voice_repo.clone(),
            ),
            delete_voice_clone_handler: DeleteVoiceCloneHandler::new(
                synthesizer.clone(),
                storage.clone(),
                voice_repo.clone(),
            ),
            delete_audio_file_handler: DeleteAudioFileHandler::new(
                storage.clone(),
                audio_repo.clone(),
            ),

            // Query handlers
            list_available_voices_handler: ListAvailableVoicesHandler::new(synthesizer.clone()),
            list_my_voice_clones_handler: ListMyVoiceClonesHandler::new(voice_repo.clone()),
            list_my_audio_files_handler: ListMyAudioFilesHandler::new(audio_repo.clone()),
            get_shared_audio_handler: GetSharedAudioHandler::new(audio_repo.clone()),
        }
    }
}
