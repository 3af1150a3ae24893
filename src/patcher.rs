//! 二进制替换引擎
//!
//! 在整块字节缓冲区中查找原文字节序列，并用等长（尾部补 0）的译文原地覆盖。
//! 输出长度永远等于输入长度。
//!
//! # 处理顺序
//!
//! 配对按原文字节长度降序处理，长度相同的保持输入顺序（稳定排序）。
//! 先处理长串，避免短串在尚未处理的长串内部命中并破坏它。
//! 每个配对都针对"已被之前配对修改过的缓冲区"求值。

use memchr::memmem;
use crate::translation::TranslationPair;

/// 替换结果与诊断列表
///
/// 每个配对最多出现在一个诊断列表中；各列表保持处理顺序
/// （即按原文长度降序，而非输入顺序）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// 替换后的缓冲区
    pub result: Vec<u8>,
    /// 缓冲区中找不到原文
    pub not_found: Vec<Vec<u8>>,
    /// 译文字节长度超过原文
    pub too_long: Vec<Vec<u8>>,
    /// 译文为空，跳过
    pub empty_skipped: Vec<Vec<u8>>,
    /// 成功替换的配对数
    pub applied: usize,
    /// 所有成功配对替换掉的出现次数总和
    pub replaced_occurrences: usize,
}

impl PatchReport {
    /// 是否存在任何软失败
    pub fn has_failures(&self) -> bool {
        !self.not_found.is_empty() || !self.too_long.is_empty() || !self.empty_skipped.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.not_found.len() + self.too_long.len() + self.empty_skipped.len()
    }
}

/// 单个配对的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// 已替换，附带替换次数
    Applied(usize),
    NotFound,
    Empty,
    TooLong,
}

/// 对缓冲区应用全部配对
pub fn patch(buffer: Vec<u8>, mut pairs: Vec<TranslationPair>) -> PatchReport {
    // sort_by 是稳定排序：等长原文保持输入顺序
    pairs.sort_by(|a, b| b.original.len().cmp(&a.original.len()));

    let mut report = PatchReport {
        result: buffer,
        ..PatchReport::default()
    };

    for pair in pairs {
        let outcome = apply_pair(&mut report.result, &pair);
        tracing::debug!(
            original = %crate::utils::decode_lossy(&pair.original),
            len = pair.original.len(),
            ?outcome,
            "processed pair"
        );

        match outcome {
            PairOutcome::Applied(count) => {
                report.applied += 1;
                report.replaced_occurrences += count;
            }
            PairOutcome::NotFound => report.not_found.push(pair.original),
            PairOutcome::Empty => report.empty_skipped.push(pair.original),
            PairOutcome::TooLong => report.too_long.push(pair.original),
        }
    }

    report
}

/// 对当前缓冲区应用单个配对
///
/// 判定顺序：是否出现 → 译文是否为空 → 译文是否过长。
pub fn apply_pair(buffer: &mut [u8], pair: &TranslationPair) -> PairOutcome {
    let finder = memmem::Finder::new(&pair.original);
    if finder.find(buffer).is_none() {
        return PairOutcome::NotFound;
    }

    if pair.translated.is_empty() {
        return PairOutcome::Empty;
    }

    let Some(replacement) = padded_replacement(&pair.original, &pair.translated) else {
        return PairOutcome::TooLong;
    };

    PairOutcome::Applied(replace_all(buffer, &finder, &replacement))
}

/// 生成补 0 至原文长度的译文字节；译文更长时返回 None
pub fn padded_replacement(original: &[u8], translated: &str) -> Option<Vec<u8>> {
    let translated = translated.as_bytes();
    if translated.len() > original.len() {
        return None;
    }

    let mut padded = Vec::with_capacity(original.len());
    padded.extend_from_slice(translated);
    padded.resize(original.len(), 0);
    Some(padded)
}

/// 从左到右替换所有不重叠的出现，返回替换次数
///
/// 替换值与原文等长，因此先收集位置再覆盖，结果与顺序扫描替换一致。
fn replace_all(buffer: &mut [u8], finder: &memmem::Finder<'_>, replacement: &[u8]) -> usize {
    let positions: Vec<usize> = finder.find_iter(buffer).collect();
    for &start in &positions {
        buffer[start..start + replacement.len()].copy_from_slice(replacement);
    }
    positions.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(original: &str, translated: &str) -> TranslationPair {
        TranslationPair::new(original, translated).unwrap()
    }

    #[test]
    fn test_superstring_before_substring() {
        // 输入顺序故意把短串放在前面
        let report = patch(b"abc".to_vec(), vec![pair("ab", "Y"), pair("abc", "X")]);

        assert_eq!(report.result, b"X\x00\x00");
        assert_eq!(report.not_found, vec![b"ab".to_vec()]);
        assert_eq!(report.applied, 1);
    }

    #[test]
    fn test_padding() {
        let report = patch("[はじめる]".as_bytes().to_vec(), vec![pair("はじめる", "시작")]);

        let original_len = "はじめる".len();
        let mut expected = b"[".to_vec();
        expected.extend_from_slice("시작".as_bytes());
        expected.extend(std::iter::repeat(0u8).take(original_len - "시작".len()));
        expected.push(b']');

        assert_eq!(report.result, expected);
        assert_eq!(report.result.len(), "[はじめる]".len());
    }

    #[test]
    fn test_padded_replacement() {
        assert_eq!(padded_replacement(b"abcd", "X").unwrap(), b"X\x00\x00\x00");
        assert_eq!(padded_replacement(b"ab", "XY").unwrap(), b"XY");
        assert!(padded_replacement(b"a", "한국어").is_none());
    }

    #[test]
    fn test_too_long_rejected() {
        let buffer = b"xax".to_vec();
        let report = patch(buffer.clone(), vec![pair("a", "한국어")]);

        assert_eq!(report.result, buffer);
        assert_eq!(report.too_long, vec![b"a".to_vec()]);
        assert!(report.not_found.is_empty());
        assert!(report.empty_skipped.is_empty());
    }

    #[test]
    fn test_empty_translation_skipped() {
        let buffer = b"hello world".to_vec();
        let report = patch(buffer.clone(), vec![pair("world", "")]);

        assert_eq!(report.result, buffer);
        assert_eq!(report.empty_skipped, vec![b"world".to_vec()]);
        assert!(report.not_found.is_empty());
    }

    #[test]
    fn test_absent_original_with_empty_translation_is_not_found() {
        let report = patch(b"hello".to_vec(), vec![pair("world", "")]);

        assert_eq!(report.not_found, vec![b"world".to_vec()]);
        assert!(report.empty_skipped.is_empty());
    }

    #[test]
    fn test_no_match_passthrough() {
        let buffer = vec![0x00, 0xff, 0x10, 0x20, 0x7f];
        let report = patch(buffer.clone(), vec![pair("abc", "X"), pair("zz", "Y")]);

        assert_eq!(report.result, buffer);
        assert_eq!(report.not_found, vec![b"abc".to_vec(), b"zz".to_vec()]);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn test_global_replacement() {
        let report = patch(b"cat dog cat".to_vec(), vec![pair("cat", "ko")]);

        assert_eq!(report.result, b"ko\x00 dog ko\x00");
        assert_eq!(report.replaced_occurrences, 2);
    }

    #[test]
    fn test_non_overlapping_scan() {
        // "aa" 在 "aaa" 中只替换左侧一次
        let report = patch(b"aaa".to_vec(), vec![pair("aa", "b")]);
        assert_eq!(report.result, b"b\x00a");
        assert_eq!(report.replaced_occurrences, 1);
    }

    #[test]
    fn test_duplicate_original_second_not_found() {
        let report = patch(b"abc".to_vec(), vec![pair("abc", "X"), pair("abc", "Z")]);

        assert_eq!(report.result, b"X\x00\x00");
        assert_eq!(report.applied, 1);
        assert_eq!(report.not_found, vec![b"abc".to_vec()]);
    }

    #[test]
    fn test_padding_can_create_later_match() {
        // "ab" → "x" 产生 "x\0"，随后 "\0c" 可以命中
        let report = patch(b"abc".to_vec(), vec![pair("ab", "x"), pair("\u{0}c", "y")]);
        assert_eq!(report.result, b"xy\x00");
        assert_eq!(report.applied, 2);
    }

    #[test]
    fn test_diagnostics_in_processing_order() {
        let report = patch(
            b"....".to_vec(),
            vec![pair("a", ""), pair("ccc", ""), pair("bb", ""), pair("dd", "")],
        );

        // 长度降序，等长保持输入顺序
        assert_eq!(
            report.not_found,
            vec![b"ccc".to_vec(), b"bb".to_vec(), b"dd".to_vec(), b"a".to_vec()]
        );
    }

    #[test]
    fn test_each_pair_in_at_most_one_list() {
        let report = patch(
            b"one two three".to_vec(),
            vec![pair("one", "1"), pair("two", ""), pair("t", "long"), pair("four", "4")],
        );

        assert_eq!(report.applied, 1);
        assert_eq!(report.empty_skipped, vec![b"two".to_vec()]);
        assert_eq!(report.too_long, vec![b"t".to_vec()]);
        assert_eq!(report.not_found, vec![b"four".to_vec()]);
        assert_eq!(report.applied + report.failure_count(), 4);
    }

    #[test]
    fn test_length_invariance() {
        let buffer: Vec<u8> = "ゲーム開始\x00オプション\x00終了\x00ゲーム".bytes().collect();
        let pairs = vec![
            pair("ゲーム", "게임"),
            pair("オプション", "옵션"),
            pair("終了", "종료하기기"),
            pair("開始", ""),
            pair("存在しない", "없음"),
        ];

        let report = patch(buffer.clone(), pairs);
        assert_eq!(report.result.len(), buffer.len());
    }

    #[test]
    fn test_empty_pairs() {
        let report = patch(b"data".to_vec(), Vec::new());
        assert_eq!(report.result, b"data");
        assert!(!report.has_failures());
    }
}
