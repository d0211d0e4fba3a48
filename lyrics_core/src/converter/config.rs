use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::ConvertError;

/// 最后一行歌词没有后继时间戳时，默认的显示时长（秒）。
pub const DEFAULT_LAST_LINE_DURATION_SECS: f64 = 3.0;

/// TTML 时间字符串的解析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TtmlTimeMode {
    /// 标准时钟格式，`[[HH:]MM:]SS[.fff]` 或 `SS[.fff]s`，小数部分按十进制小数处理。
    #[default]
    Clock,
    /// 旧版的逐字面解析规则，小数部分被当作整数毫秒，不按位数归一化。
    Legacy,
}

/// LRC 解析选项
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct LrcParsingOptions {
    /// 歌曲总时长（秒）。最后一行没有后继时间戳时，用它作为结束时间。
    pub duration_seconds: Option<f64>,
    /// 既没有后继时间戳也没有总时长时，最后一行的显示时长（秒）。
    pub default_last_line_duration: f64,
}

impl Default for LrcParsingOptions {
    fn default() -> Self {
        Self {
            duration_seconds: None,
            default_last_line_duration: DEFAULT_LAST_LINE_DURATION_SECS,
        }
    }
}

/// TTML 解析选项
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct TtmlParsingOptions {
    /// `begin` / `end` 属性的时间解析模式。
    pub time_mode: TtmlTimeMode,
    /// 是否提取翻译、背景人声和演唱者等辅助内容。
    pub extract_auxiliary: bool,
}

impl Default for TtmlParsingOptions {
    fn default() -> Self {
        Self {
            time_mode: TtmlTimeMode::default(),
            extract_auxiliary: true,
        }
    }
}

/// 统一管理所有格式的解析选项
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConversionOptions {
    /// LRC 解析选项
    pub lrc_parsing: LrcParsingOptions,
    /// TTML 解析选项
    pub ttml_parsing: TtmlParsingOptions,
}

impl ConversionOptions {
    /// 从 TOML 字符串加载选项，缺失的字段使用默认值。
    ///
    /// ```toml
    /// [lrc_parsing]
    /// default_last_line_duration = 5.0
    ///
    /// [ttml_parsing]
    /// time_mode = "Legacy"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConvertError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConversionOptions::default();
        assert_eq!(options.lrc_parsing.duration_seconds, None);
        assert!((options.lrc_parsing.default_last_line_duration - 3.0).abs() < f64::EPSILON);
        assert_eq!(options.ttml_parsing.time_mode, TtmlTimeMode::Clock);
        assert!(options.ttml_parsing.extract_auxiliary);
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
[lrc_parsing]
duration_seconds = 240.5

[ttml_parsing]
time_mode = "Legacy"
extract_auxiliary = false
"#;
        let options = ConversionOptions::from_toml_str(content).unwrap();
        assert_eq!(options.lrc_parsing.duration_seconds, Some(240.5));
        assert!((options.lrc_parsing.default_last_line_duration - 3.0).abs() < f64::EPSILON);
        assert_eq!(options.ttml_parsing.time_mode, TtmlTimeMode::Legacy);
        assert!(!options.ttml_parsing.extract_auxiliary);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let options = ConversionOptions::from_toml_str("").unwrap();
        assert_eq!(options.ttml_parsing.time_mode, TtmlTimeMode::Clock);
        assert!(options.ttml_parsing.extract_auxiliary);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = ConversionOptions::from_toml_str("[ttml_parsing]\ntime_mode = 3");
        assert!(matches!(result, Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_builder() {
        let options = LrcParsingOptionsBuilder::default()
            .duration_seconds(Some(4.0))
            .build()
            .unwrap();
        assert_eq!(options.duration_seconds, Some(4.0));
        assert!((options.default_last_line_duration - 3.0).abs() < f64::EPSILON);
    }
}
