//! 文本分段器
//!
//! 将超长文本切分为 TTS 服务可接受的片段：
//! 优先在句子边界切分，句子仍超限时回退到按词切分

use thiserror::Error;

/// 默认最大片段字符数
/// ElevenLabs 单次请求上限为 10,000 字符，留出余量
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 9_500;

/// 分段错误
///
/// 分段本身对任意字符串都是全函数，仅在配置非法时失败
#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("max segment size must be greater than zero")]
    InvalidMaxChars,
}

/// 检查是否为句末标点
#[inline]
fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// 按句末标点切分句子单元
///
/// 一个单元为非终结符串加上其后连续的终结符串；
/// 末尾没有终结符的剩余部分作为独立单元。
/// 完全没有可切分点时，整段文本作为单一单元返回。
fn split_sentence_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut in_terminator = false;

    for (idx, ch) in text.char_indices() {
        if is_terminal(ch) {
            in_terminator = true;
        } else if in_terminator {
            // 终结符串结束，切出一个单元
            units.push(&text[start..idx]);
            start = idx;
            in_terminator = false;
        }
    }

    if start < text.len() {
        units.push(&text[start..]);
    }

    if units.is_empty() {
        units.push(text);
    }

    units
}

/// 将一个超限句子按空白切词并贪心打包
///
/// 末尾不足 max_chars 的部分留在 current 中，
/// 后续句子单元可以继续拼接到它上面。
/// 单个词超过 max_chars 时整词作为超限片段输出，不再细分。
fn pack_words(
    unit: &str,
    max_chars: usize,
    segments: &mut Vec<String>,
    current: &mut String,
    current_chars: &mut usize,
) {
    for word in unit.split_whitespace() {
        let word_chars = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            *current_chars = word_chars;
        } else if *current_chars + 1 + word_chars <= max_chars {
            current.push(' ');
            current.push_str(word);
            *current_chars += 1 + word_chars;
        } else {
            segments.push(std::mem::take(current));
            current.push_str(word);
            *current_chars = word_chars;
        }
    }
}

/// 对文本进行分段
///
/// 分段策略：
/// 1. 快速路径：文本未超限时原样返回单一片段
/// 2. 按句末标点（`.` `!` `?`）切分句子单元
/// 3. 贪心打包：单元以单个空格拼接，保持片段不超过 `max_chars`
/// 4. 单元本身超限时回退到按词打包
///
/// 输出确定且保序；除单词超限的边界情况外，每个片段
/// 字符数不超过 `max_chars`。
pub fn segment(text: &str, max_chars: usize) -> Result<Vec<String>, SegmentationError> {
    if max_chars == 0 {
        return Err(SegmentationError::InvalidMaxChars);
    }

    // 快速路径：常见情况无需任何切分开销
    if text.chars().count() <= max_chars {
        return Ok(vec![text.to_string()]);
    }

    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for unit in split_sentence_units(text) {
        let unit = unit.trim();
        if unit.is_empty() {
            continue;
        }
        let unit_chars = unit.chars().count();

        // 句子本身超限：先冲刷累积器，再按词打包
        if unit_chars > max_chars {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            pack_words(unit, max_chars, &mut segments, &mut current, &mut current_chars);
            continue;
        }

        if current.is_empty() {
            current.push_str(unit);
            current_chars = unit_chars;
        } else if current_chars + 1 + unit_chars <= max_chars {
            current.push(' ');
            current.push_str(unit);
            current_chars += 1 + unit_chars;
        } else {
            segments.push(std::mem::take(&mut current));
            current.push_str(unit);
            current_chars = unit_chars;
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    Ok(segments)
}

/// 使用默认上限分段（便捷方法）
pub fn segment_default(text: &str) -> Result<Vec<String>, SegmentationError> {
    segment(text, DEFAULT_MAX_SEGMENT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_zero_max_chars_is_rejected() {
        assert!(segment("hello", 0).is_err());
    }

    #[test]
    fn test_fast_path_returns_text_unchanged() {
        let text = "Short text. No splitting needed!";
        let segments = segment(text, 100).unwrap();
        assert_eq!(segments, vec![text.to_string()]);
    }

    #[test]
    fn test_fast_path_keeps_whitespace_text() {
        let segments = segment("   ", 10).unwrap();
        assert_eq!(segments, vec!["   ".to_string()]);
    }

    #[test]
    fn test_greedy_sentence_packing() {
        // "A. B." (5 字符) 恰好放入一个片段，"C." 溢出到下一个
        let segments = segment("A. B. C.", 5).unwrap();
        assert_eq!(segments, vec!["A. B.".to_string(), "C.".to_string()]);
    }

    #[test]
    fn test_no_terminal_punctuation_is_one_unit() {
        let text = "one two three four five six";
        let segments = segment(text, 10).unwrap();
        assert_eq!(segments, vec!["one two", "three four", "five six"]);
    }

    #[test]
    fn test_size_bound_holds_for_every_segment() {
        let text = "The quick brown fox jumps over the lazy dog. \
                    Pack my box with five dozen liquor jugs! \
                    How vexingly quick daft zebras jump? \
                    Sphinx of black quartz judge my vow."
            .repeat(8);
        let max = 50;
        let segments = segment(&text, max).unwrap();
        assert!(segments.len() > 1);
        for seg in &segments {
            assert!(seg.chars().count() <= max, "segment too long: {:?}", seg);
        }
    }

    #[test]
    fn test_word_sequence_is_preserved() {
        let text = "First sentence here. Second one follows! Third asks a question? \
                    And a trailing remainder without punctuation"
            .repeat(4);
        let segments = segment(&text, 40).unwrap();
        let joined = segments.join(" ");
        assert_eq!(words(&joined), words(&text));
    }

    #[test]
    fn test_oversized_word_becomes_single_segment() {
        let word = "a".repeat(20);
        let segments = segment(&word, 10).unwrap();
        assert_eq!(segments, vec![word]);
    }

    #[test]
    fn test_oversized_word_inside_sentence() {
        let long_word = "b".repeat(30);
        let text = format!("tiny {} tail words here", long_word);
        let segments = segment(&text, 10).unwrap();
        assert!(segments.contains(&long_word));
        let joined = segments.join(" ");
        assert_eq!(words(&joined), words(&text));
    }

    #[test]
    fn test_oversized_sentence_falls_back_to_words() {
        let text = "pending part. one two three four five six seven eight nine ten.";
        let segments = segment(text, 20).unwrap();
        for seg in &segments {
            assert!(seg.chars().count() <= 20);
        }
        let joined = segments.join(" ");
        assert_eq!(words(&joined), words(text));
    }

    #[test]
    fn test_word_leftover_carries_into_next_sentence() {
        // 超限句子按词打包后，残余部分应与后续句子继续拼接
        let text = "aaaa bbbb cccc dddd eeee. x. y.";
        let segments = segment(text, 12).unwrap();
        let joined = segments.join(" ");
        assert_eq!(words(&joined), words(text));
        assert!(segments.iter().all(|s| s.chars().count() <= 12));
    }

    #[test]
    fn test_deterministic_output() {
        let text = "Alpha beta gamma. Delta epsilon zeta! Eta theta iota?".repeat(10);
        let first = segment(&text, 30).unwrap();
        let second = segment(&text, 30).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_multibyte_chars_counted_not_bytes() {
        // 12 个汉字 (36 字节)，上限按字符计
        let text = "你好世界你好世界你好世界";
        let segments = segment(text, 100).unwrap();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_default_limit_matches_provider_headroom() {
        assert_eq!(DEFAULT_MAX_SEGMENT_CHARS, 9_500);
        let text = "word ".repeat(100);
        assert_eq!(segment_default(&text).unwrap().len(), 1);
    }
}
