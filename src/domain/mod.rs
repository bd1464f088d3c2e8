//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色克隆
//! - Audio Context: 生成音频

pub mod audio;
pub mod voice;

// 共享的文本分段器（合成管线核心）
pub mod segmenter;

pub use segmenter::{segment, SegmentationError, DEFAULT_MAX_SEGMENT_CHARS};
