//! # TTML 解析器的工具函数
//!
//! 时间属性读取、行号解析和文本清理。

use lyrics_core::{TtmlTimeMode, time::parse_time_seconds};
use tracing::warn;

use super::document::XmlElement;

/// 获取并解析为秒的时间戳属性值。
///
/// 属性缺失或无法解析时记录警告并返回 `0.0`。
pub(super) fn get_time_attribute(element: &XmlElement, attr_name: &str, mode: TtmlTimeMode) -> f64 {
    let Some(value_str) = element.attr(attr_name) else {
        warn!("<{}> 缺少 '{attr_name}' 属性，按 0 处理", element.name);
        return 0.0;
    };

    parse_time_seconds(value_str, mode).unwrap_or_else(|err| {
        warn!("时间戳 '{value_str}' 解析失败 ({err})，按 0 处理");
        0.0
    })
}

/// 解析 `itunes:key` 形式的行号，例如 `L12`。
pub(super) fn parse_line_key(key: &str) -> Option<u32> {
    let parsed = key
        .trim()
        .strip_prefix('L')
        .and_then(|number| number.parse::<u32>().ok());
    if parsed.is_none() {
        warn!("无法解析 itunes:key '{key}'，已忽略");
    }
    parsed
}

/// 清理文本两端的括号（单个或成对）
pub(super) fn clean_parentheses_from_bg_text(text: &str) -> &str {
    text.trim()
        .trim_start_matches(['(', '（'])
        .trim_end_matches([')', '）'])
        .trim()
}
