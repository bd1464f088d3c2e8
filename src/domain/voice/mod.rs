//! Voice Context - 音色克隆上下文

mod aggregate;
mod value_objects;

pub use aggregate::VoiceClone;
pub use value_objects::{ProviderVoiceId, VoiceName};
