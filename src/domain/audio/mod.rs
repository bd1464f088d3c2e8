//! Audio Context - 生成音频上下文

mod aggregate;
mod value_objects;

pub use aggregate::AudioFile;
pub use value_objects::ShareToken;
