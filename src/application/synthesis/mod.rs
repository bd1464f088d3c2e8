//! Chunked Synthesis Pipeline - 长文本合成
//!
//! 分段 → 顺序合成 → 拼接 的核心编排

mod assembler;
mod pipeline;

pub use assembler::{assemble, AssemblyError};
pub use pipeline::{PipelineError, PipelineOutput, SynthesisPipeline};
