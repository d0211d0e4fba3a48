use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use crate::LyricMetadata;

/// 枚举：表示支持的歌词格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum LyricFormat {
    /// 标准 LRC (`LyRiCs`) 格式。
    Lrc,
    /// `Timed Text Markup Language` 格式。
    Ttml,
}

impl LyricFormat {
    /// 将歌词格式枚举转换为对应的文件扩展名字符串。
    #[must_use]
    pub const fn to_extension_str(self) -> &'static str {
        match self {
            Self::Lrc => "lrc",
            Self::Ttml => "ttml",
        }
    }

    /// 从文件扩展名解析歌词格式，忽略大小写和前导的点。
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "lrc" => Some(Self::Lrc),
            "ttml" | "xml" => Some(Self::Ttml),
            _ => None,
        }
    }
}

impl fmt::Display for LyricFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lrc => write!(f, "LRC"),
            Self::Ttml => write!(f, "TTML"),
        }
    }
}

/// 一行歌词中带时间戳的单词。
///
/// 时间都是相对于整首歌开头的绝对秒数。
/// 例如 `start_time = 12.7` 表示歌手在第 12.7 秒开始唱这个词。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricWord {
    /// 开始时间（秒）
    pub start_time: f64,
    /// 结束时间（秒）
    pub end_time: f64,
    /// 单词文本
    pub word: String,
}

/// 一行可显示的歌词。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptItem {
    /// 开始时间（秒，包含）
    pub start: f64,
    /// 结束时间（秒，不包含）
    pub end: f64,
    /// 显示文本。存在逐字数据时，它是所有主唱单词文本的拼接。
    pub text: String,
    /// 与该行关联的合唱 / 背景人声文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chorus: Option<String>,
    /// 行内的单词及其时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<LyricWord>>,
    /// 翻译文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// 演唱者
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singer: Option<String>,
    /// 排序用的显式序号，只由 TTML 的 `itunes:key` 提供
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<u32>,
}

impl ScriptItem {
    /// 创建一个只有时间和文本的歌词行。
    #[must_use]
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            ..Default::default()
        }
    }

    /// 该行的持续时间（秒）。
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// 按顺序拼接所有单词的文本。
    #[must_use]
    pub fn words_text(&self) -> Option<String> {
        self.words
            .as_ref()
            .map(|words| words.iter().map(|w| w.word.as_str()).collect())
    }
}

/// 一次解析的完整结果：元数据加上可选的歌词行序列。
///
/// `scripts` 为 `None` 表示源文件没有提供歌词正文，这不是错误。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricData {
    /// 元数据，序列化时展平到顶层
    #[serde(flatten)]
    pub metadata: LyricMetadata,
    /// 歌词行
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<ScriptItem>>,
}

impl LyricData {
    /// 歌词行的切片，没有歌词正文时为空。
    #[must_use]
    pub fn scripts(&self) -> &[ScriptItem] {
        self.scripts.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lyric_format_from_str() {
        assert_eq!("lrc".parse::<LyricFormat>().unwrap(), LyricFormat::Lrc);
        assert_eq!("TTML".parse::<LyricFormat>().unwrap(), LyricFormat::Ttml);
        assert!("qrc".parse::<LyricFormat>().is_err());
    }

    #[test]
    fn test_lyric_format_from_extension() {
        assert_eq!(LyricFormat::from_extension(".LRC"), Some(LyricFormat::Lrc));
        assert_eq!(LyricFormat::from_extension("xml"), Some(LyricFormat::Ttml));
        assert_eq!(LyricFormat::from_extension("ass"), None);
        assert_eq!(LyricFormat::Ttml.to_extension_str(), "ttml");
    }

    #[test]
    fn test_words_text() {
        let mut item = ScriptItem::new(1.0, 2.5, "临水");
        assert_eq!(item.words_text(), None);

        item.words = Some(vec![
            LyricWord {
                start_time: 1.0,
                end_time: 1.5,
                word: "临".to_string(),
            },
            LyricWord {
                start_time: 1.5,
                end_time: 2.5,
                word: "水".to_string(),
            },
        ]);
        assert_eq!(item.words_text().as_deref(), Some("临水"));
        assert!((item.duration() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lyric_data_serializes_flat() {
        let mut data = LyricData::default();
        data.metadata.set("ar", "Artist");
        data.scripts = Some(vec![ScriptItem::new(12.0, 15.0, "A")]);

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ar": "Artist",
                "scripts": [{ "start": 12.0, "end": 15.0, "text": "A" }],
            })
        );
    }
}
