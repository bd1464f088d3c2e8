//! TTS 适配器 - SpeechSynthesizerPort 的具体实现

mod elevenlabs_client;
mod fake_synthesizer;

pub use elevenlabs_client::{ElevenLabsClient, ElevenLabsClientConfig};
pub use fake_synthesizer::FakeSynthesizer;
