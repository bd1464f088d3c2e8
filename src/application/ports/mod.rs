//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod object_storage;
mod repositories;
mod speech_synthesizer;
mod translator;

pub use object_storage::{ObjectStoragePort, StorageError, StoredObject};
pub use repositories::{AudioFileRepositoryPort, RepositoryError, VoiceCloneRepositoryPort};
pub use speech_synthesizer::{
    ProviderVoice, SpeechSynthesizerPort, SynthesisError, VoiceCloneRequest,
};
pub use translator::{TranslationError, TranslatorPort};
