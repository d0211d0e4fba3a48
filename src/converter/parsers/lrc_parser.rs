//! # LRC 格式解析器
//!
//! 逐行扫描文本，识别 `[key:value]` 元数据标签和 `[MM:SS.ff]` 时间戳。
//! 两种都不匹配的行会被忽略，因此 LRC 解析永远不会失败。

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, trace};

use lyrics_core::{
    LrcParsingOptions, LyricData, LyricMetadata, ScriptItem,
    time::{fraction_to_ms, ms_to_seconds},
};

/// 用于匹配一整行元数据标签，键和值都只能由字母组成
static LRC_METADATA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<key>[A-Za-z]+):(?P<value>[A-Za-z]+)\]$")
        .expect("未能编译 LRC_METADATA_REGEX")
});

/// 用于匹配一行中的第一个时间戳，捕获分、秒和两到三位的小数部分
static LRC_TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<minutes>[0-9]{2}):(?P<seconds>[0-9]{2})\.(?P<fraction>[0-9]{2,3})\]")
        .expect("未能编译 LRC_TIMESTAMP_REGEX")
});

struct TempLrcEntry {
    start: f64,
    /// 还没有确定时为 `None`
    end: Option<f64>,
    text: String,
}

/// 解析 LRC 格式内容。
///
/// `duration_seconds` 是歌曲总时长，最后一行没有后继时间戳时用作它的结束时间。
#[must_use]
pub fn parse_lrc(content: &str, duration_seconds: Option<f64>) -> LyricData {
    let options = LrcParsingOptions {
        duration_seconds,
        ..Default::default()
    };
    parse_lrc_with_options(content, &options)
}

/// 按给定选项解析 LRC 格式内容。
#[must_use]
pub fn parse_lrc_with_options(content: &str, options: &LrcParsingOptions) -> LyricData {
    let mut metadata = LyricMetadata::new();
    let mut entries: Vec<TempLrcEntry> = Vec::new();

    for (line_num, raw_line) in content.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let line = line.trim_start_matches('\u{feff}').trim();

        if let Some(caps) = LRC_METADATA_REGEX.captures(line) {
            let key = caps["key"].trim().to_lowercase();
            metadata.set(&key, caps["value"].trim());
            continue;
        }

        let Some(caps) = LRC_TIMESTAMP_REGEX.captures(line) else {
            if !line.is_empty() {
                trace!("跳过第 {} 行无法识别的 LRC 内容: '{line}'", line_num + 1);
            }
            continue;
        };
        let Some(start) = timestamp_seconds(&caps) else {
            continue;
        };

        // 只移除第一个时间戳标签，其余内容都算作歌词文本
        let text = match caps.get(0) {
            Some(tag) => format!("{}{}", &line[..tag.start()], &line[tag.end()..]),
            None => line.to_owned(),
        };
        entries.push(TempLrcEntry {
            start,
            end: None,
            text: text.trim().to_owned(),
        });
    }

    // 结束时间取下一行的开始时间，空行也参与，因此要在过滤之前完成
    let mut next_start = None;
    for entry in entries.iter_mut().rev() {
        entry.end = next_start;
        next_start = Some(entry.start);
    }

    entries.retain(|entry| !entry.text.trim().is_empty());

    if let Some(last) = entries.last_mut()
        && last.end.is_none()
    {
        last.end = Some(last_line_end(last.start, options));
    }

    let scripts: Vec<ScriptItem> = entries
        .into_iter()
        .map(|entry| {
            let end = entry.end.unwrap_or(entry.start);
            ScriptItem::new(entry.start, end, entry.text)
        })
        .collect();

    debug!(
        "LRC 解析完成: {} 行歌词, {} 项元数据",
        scripts.len(),
        metadata.len()
    );

    LyricData {
        metadata,
        scripts: Some(scripts),
    }
}

/// 把时间戳捕获组换算为秒。
fn timestamp_seconds(caps: &Captures<'_>) -> Option<f64> {
    let minutes: u64 = caps["minutes"].parse().ok()?;
    let seconds: u64 = caps["seconds"].parse().ok()?;
    let milliseconds = fraction_to_ms(&caps["fraction"])?;
    Some(ms_to_seconds((minutes * 60 + seconds) * 1000 + milliseconds))
}

/// 没有后继时间戳的最后一行的结束时间。
///
/// 给定的歌曲总时长有效（有限且不早于该行开始）时使用它，
/// 否则使用开始时间加上默认显示时长。
fn last_line_end(start: f64, options: &LrcParsingOptions) -> f64 {
    options
        .duration_seconds
        .filter(|duration| duration.is_finite() && *duration >= start)
        .unwrap_or(start + options.default_last_line_duration)
}
