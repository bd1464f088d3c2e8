//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechSynthesizer、Translator、Storage、Repository）
//! - synthesis: 长文本分段合成管线（核心）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod synthesis;

// Re-exports
pub use commands::{
    // Audio commands
    DeleteAudioFile,
    // Speech commands
    GenerateSpeech,
    // Voice commands
    CloneVoice,
    DeleteVoiceClone,
    // Handlers
    handlers::{
        CloneVoiceHandler, DeleteAudioFileHandler, DeleteVoiceCloneHandler,
        GenerateSpeechHandler, GenerateSpeechResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    AudioFileRepositoryPort, ObjectStoragePort, ProviderVoice, RepositoryError,
    SpeechSynthesizerPort, StorageError, StoredObject, SynthesisError, TranslationError,
    TranslatorPort, VoiceCloneRepositoryPort, VoiceCloneRequest,
};

pub use queries::{
    // Audio queries
    GetSharedAudio,
    ListMyAudioFiles,
    // Voice queries
    ListAvailableVoices,
    ListMyVoiceClones,
    // Handlers
    handlers::{
        GetSharedAudioHandler, ListAvailableVoicesHandler, ListMyAudioFilesHandler,
        ListMyVoiceClonesHandler,
    },
};

pub use synthesis::{assemble, AssemblyError, PipelineError, PipelineOutput, SynthesisPipeline};
