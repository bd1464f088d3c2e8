//! Audio Assembler - 片段音频拼接
//!
//! 将各片段独立编码的音频按顺序做字节级拼接。
//! 已知的简化：不做解码重编码，也不做容器级合并，
//! 依赖目标编码格式（mp3 帧流）容忍首尾相接的顺序播放。

use thiserror::Error;

/// 拼接错误
///
/// 字节级拼接对合法输入不会失败；此类型为将来的
/// 容器感知合并预留，使升级不必改动管线签名
#[derive(Debug, Error)]
pub enum AssemblyError {}

/// 按顺序拼接片段音频
///
/// 单个缓冲区时原样返回，避免无意义的拷贝
pub fn assemble(mut buffers: Vec<Vec<u8>>) -> Result<Vec<u8>, AssemblyError> {
    if buffers.len() == 1 {
        return Ok(buffers.pop().unwrap());
    }

    let total: usize = buffers.iter().map(|b| b.len()).sum();
    let mut merged = Vec::with_capacity(total);
    for buffer in &buffers {
        merged.extend_from_slice(buffer);
    }

    Ok(merged)
}
