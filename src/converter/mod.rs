//! # 格式分发
//!
//! 调用方事先确定格式，这里不做内容嗅探。

pub mod parsers;

use lyrics_core::{ConversionOptions, ConvertError, LyricData, LyricFormat};
use ttml_processor::parse_ttml_with_options;

use self::parsers::lrc_parser::parse_lrc_with_options;

/// 按指定格式解析歌词内容。
///
/// LRC 解析永远不会失败；TTML 在输入不是格式良好的 XML 时返回错误。
pub fn parse_lyrics(
    content: &str,
    format: LyricFormat,
    options: &ConversionOptions,
) -> Result<LyricData, ConvertError> {
    match format {
        LyricFormat::Lrc => Ok(parse_lrc_with_options(content, &options.lrc_parsing)),
        LyricFormat::Ttml => parse_ttml_with_options(content, &options.ttml_parsing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_format() {
        let options = ConversionOptions::default();

        let lrc = parse_lyrics("[00:01.00]Hi", LyricFormat::Lrc, &options).unwrap();
        assert_eq!(lrc.scripts().len(), 1);

        let ttml = parse_lyrics(
            r#"<tt><body><div><p begin="00:01.000" end="00:02.000">Hi</p></div></body></tt>"#,
            LyricFormat::Ttml,
            &options,
        )
        .unwrap();
        assert_eq!(ttml.scripts()[0].text, "Hi");
    }

    #[test]
    fn test_lrc_never_fails_but_ttml_can() {
        let options = ConversionOptions::default();
        let garbage = "<tt>[00:01.00]Hi";

        assert!(parse_lyrics(garbage, LyricFormat::Lrc, &options).is_ok());
        assert!(parse_lyrics(garbage, LyricFormat::Ttml, &options).is_err());
    }
}
