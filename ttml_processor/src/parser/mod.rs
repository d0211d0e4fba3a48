//! # TTML (Timed Text Markup Language) 解析器
//!
//! 该解析器设计上仅用于解析 Apple Music 和 AMLL 使用的 TTML 歌词文件，
//! 不建议用于解析通用的 TTML 字幕文件。

mod body;
mod constants;
pub mod document;
mod metadata;
mod utils;

use lyrics_core::{ConvertError, LyricData, ScriptItem, TtmlParsingOptions};
use tracing::{debug, error};

use self::{
    body::{BodyContext, extract_lines},
    constants::{PATH_HEAD_METADATA, TAG_BODY},
    document::XmlElement,
};

/// 使用默认选项解析 TTML 格式的歌词文件。
///
/// # Errors
///
/// 输入不是格式良好的 XML 时返回 `ConvertError`，不会返回部分结果。
pub fn parse_ttml(content: &str) -> Result<LyricData, ConvertError> {
    parse_ttml_with_options(content, &TtmlParsingOptions::default())
}

/// 解析 TTML 格式的歌词文件。
///
/// # 参数
///
/// * `content` - TTML 格式的歌词文件内容字符串。
/// * `options` - TTML 解析选项，包含时间模式和是否提取辅助内容。
///
/// # 返回
///
/// * `Ok(LyricData)` - 元数据和按顺序排列的歌词行。只有 `<body>` 中至少有一个
///   `<p>` 时 `scripts` 才是 `Some`。
/// * `Err(ConvertError)` - 输入不是格式良好的 XML。
///
/// 时间属性缺失或无法解析不是错误，对应的时间按 `0` 处理。
pub fn parse_ttml_with_options(
    content: &str,
    options: &TtmlParsingOptions,
) -> Result<LyricData, ConvertError> {
    let root = XmlElement::parse(content).inspect_err(|e| {
        error!("TTML 解析错误: {e}");
    })?;

    let mut data = LyricData::default();

    let metadata_block = root.descendant_with_path(PATH_HEAD_METADATA);
    if let Some(metadata_block) = metadata_block {
        metadata::extract_metadata(metadata_block, &mut data.metadata);
    }
    metadata::apply_duration(&root, &mut data.metadata);

    if let Some(body) = root.child_named(TAG_BODY) {
        let context = BodyContext::new(options, metadata_block);
        let lines = extract_lines(body, &context);
        if !lines.is_empty() {
            data.scripts = Some(sort_lines(lines));
        }
    }

    debug!(
        "TTML 解析完成: {} 行歌词, {} 项元数据",
        data.scripts().len(),
        data.metadata.len()
    );

    Ok(data)
}

/// 对歌词行排序。
///
/// 两行都带有非零的 `itunes:key` 行号时按行号比较，否则按开始时间比较，
/// 开始时间相同则保持文档顺序。`L0` 视为没有行号。
///
/// 有行号的行先按行号排好，没有行号的行按开始时间排好，再按开始时间归并，
/// 因此任意两行有行号的行之间始终按行号排列。
fn sort_lines(lines: Vec<ScriptItem>) -> Vec<ScriptItem> {
    let usable_idx = |line: &ScriptItem| line.idx.filter(|&idx| idx != 0);

    let (mut keyed, mut unkeyed): (Vec<_>, Vec<_>) = lines
        .into_iter()
        .enumerate()
        .partition(|(_, line)| usable_idx(line).is_some());
    keyed.sort_by_key(|(_, line)| usable_idx(line));
    unkeyed.sort_by(|(_, a), (_, b)| a.start.total_cmp(&b.start));

    let mut sorted = Vec::with_capacity(keyed.len() + unkeyed.len());
    let mut keyed = keyed.into_iter().peekable();
    let mut unkeyed = unkeyed.into_iter().peekable();
    loop {
        let take_unkeyed = match (keyed.peek(), unkeyed.peek()) {
            (Some((keyed_pos, keyed_line)), Some((unkeyed_pos, unkeyed_line))) => unkeyed_line
                .start
                .total_cmp(&keyed_line.start)
                .then(unkeyed_pos.cmp(keyed_pos))
                .is_lt(),
            (None, Some(_)) => true,
            (Some(_), None) => false,
            (None, None) => break,
        };
        let next = if take_unkeyed {
            unkeyed.next()
        } else {
            keyed.next()
        };
        if let Some((_, line)) = next {
            sorted.push(line);
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: f64, idx: Option<u32>, text: &str) -> ScriptItem {
        ScriptItem {
            idx,
            ..ScriptItem::new(start, start + 1.0, text)
        }
    }

    fn texts(lines: &[ScriptItem]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn test_sort_by_index_when_every_line_has_one() {
        let lines = sort_lines(vec![
            line(1.0, Some(3), "c"),
            line(9.0, Some(1), "a"),
            line(5.0, Some(2), "b"),
        ]);
        assert_eq!(texts(&lines), ["a", "b", "c"]);
    }

    #[test]
    fn test_zero_index_falls_back_to_start_time() {
        let lines = sort_lines(vec![line(5.0, Some(0), "late"), line(1.0, Some(0), "early")]);
        assert_eq!(texts(&lines), ["early", "late"]);
    }

    #[test]
    fn test_keyed_lines_keep_index_order_among_unkeyed_lines() {
        let lines = sort_lines(vec![
            line(1.0, Some(2), "second"),
            line(5.0, Some(1), "first"),
            line(10.0, None, "unkeyed"),
        ]);
        assert_eq!(texts(&lines), ["first", "second", "unkeyed"]);

        let lines = sort_lines(vec![
            line(5.0, Some(1), "b"),
            line(1.0, None, "a"),
            line(3.0, Some(2), "c"),
        ]);
        assert_eq!(texts(&lines), ["a", "b", "c"]);
    }

    #[test]
    fn test_unkeyed_line_with_equal_start_keeps_document_order() {
        let lines = sort_lines(vec![
            line(2.0, None, "unkeyed"),
            line(2.0, Some(1), "keyed"),
        ]);
        assert_eq!(texts(&lines), ["unkeyed", "keyed"]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let lines = sort_lines(vec![
            line(2.0, None, "first"),
            line(1.0, None, "zero"),
            line(2.0, None, "second"),
        ]);
        assert_eq!(texts(&lines), ["zero", "first", "second"]);
    }

    #[test]
    fn test_body_without_lines_has_no_scripts() {
        let data = parse_ttml(r#"<tt dur="01:00.000"><body><div/></body></tt>"#).unwrap();
        assert_eq!(data.scripts, None);
        assert_eq!(data.metadata.get("length"), Some("01:00.000"));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_ttml("<tt><body><div><p>oops</div></body></tt>").is_err());
        assert!(parse_ttml("not xml at all").is_err());
    }
}
