//! Chunked Synthesis Pipeline - 长文本合成管线
//!
//! Segmenter → Synthesizer → Assembler 的固定编排：
//! 分段、逐片段顺序调用外部合成服务、拼接输出。
//! 每次调用独立，不缓存结果；首个失败立即终止并携带片段位置。

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{SpeechSynthesizerPort, SynthesisError};
use crate::application::synthesis::assembler::{assemble, AssemblyError};
use crate::domain::segmenter::{segment, SegmentationError, DEFAULT_MAX_SEGMENT_CHARS};

/// 管线错误
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),

    /// 某个片段的外部合成失败；携带片段序号与总数
    #[error("synthesis failed for segment {segment_index}/{segment_count}: {source}")]
    Synthesis {
        /// 失败片段序号（从 1 开始，便于日志阅读）
        segment_index: usize,
        segment_count: usize,
        #[source]
        source: SynthesisError,
    },

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// 管线输出
#[derive(Debug)]
pub struct PipelineOutput {
    /// 拼接后的最终音频
    pub audio: Vec<u8>,
    /// 实际产生的片段数（快速路径为 1）
    pub segment_count: usize,
}

/// 长文本合成管线
///
/// 片段严格按输入顺序串行合成：输出顺序由结构保证，
/// 同时避免对外部服务的并发压力。调用方丢弃 future 即取消，
/// 进行中的外部调用被放弃且不再启动后续片段。
pub struct SynthesisPipeline {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    max_segment_chars: usize,
}

impl SynthesisPipeline {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizerPort>, max_segment_chars: usize) -> Self {
        Self {
            synthesizer,
            max_segment_chars,
        }
    }

    /// 使用默认片段上限创建
    pub fn with_default_limit(synthesizer: Arc<dyn SpeechSynthesizerPort>) -> Self {
        Self::new(synthesizer, DEFAULT_MAX_SEGMENT_CHARS)
    }

    /// 执行完整管线：分段 → 顺序合成 → 拼接
    pub async fn run(&self, text: &str, voice_id: &str) -> Result<PipelineOutput, PipelineError> {
        let segments = segment(text, self.max_segment_chars)?;
        let segment_count = segments.len();

        if segment_count > 1 {
            tracing::info!(
                text_chars = text.chars().count(),
                max_segment_chars = self.max_segment_chars,
                segment_count,
                "Text exceeds segment limit, synthesizing in segments"
            );
        }

        let mut buffers: Vec<Vec<u8>> = Vec::with_capacity(segment_count);
        for (index, piece) in segments.iter().enumerate() {
            tracing::debug!(
                segment = index + 1,
                total = segment_count,
                chars = piece.chars().count(),
                "Synthesizing segment"
            );

            let audio = self
                .synthesizer
                .synthesize(piece, voice_id)
                .await
                .map_err(|source| PipelineError::Synthesis {
                    segment_index: index + 1,
                    segment_count,
                    source,
                })?;

            buffers.push(audio);
        }

        if segment_count > 1 {
            tracing::info!(segment_count, "Merging segment audio buffers");
        }
        let audio = assemble(buffers)?;

        Ok(PipelineOutput {
            audio,
            segment_count,
        })
    }
}
