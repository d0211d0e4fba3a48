//! # TTML 解析器 - 常量定义
//!
//! 该模块包含了在解析 TTML 文件时用到的所有 XML 标签、属性和路径的常量定义。
//! 带前缀的限定名按原样匹配。

pub(super) const TAG_BODY: &str = "body";
pub(super) const TAG_DIV: &str = "div";
pub(super) const TAG_P: &str = "p";
pub(super) const TAG_SPAN: &str = "span";

pub(super) const TAG_AGENT_TTM: &str = "ttm:agent";
pub(super) const TAG_NAME_TTM: &str = "ttm:name";
pub(super) const TAG_META_AMLL: &str = "amll:meta";
pub(super) const TAG_ITUNES_METADATA: &str = "iTunesMetadata";
pub(super) const TAG_TRANSLATIONS: &str = "translations";
pub(super) const TAG_TRANSLATION: &str = "translation";
pub(super) const TAG_TEXT: &str = "text";

pub(super) const PATH_HEAD_METADATA: &str = "head.metadata";

pub(super) const ATTR_DUR: &str = "dur";
pub(super) const ATTR_BEGIN: &str = "begin";
pub(super) const ATTR_END: &str = "end";
pub(super) const ATTR_AGENT: &str = "ttm:agent";
pub(super) const ATTR_ITUNES_KEY: &str = "itunes:key";
pub(super) const ATTR_ROLE: &str = "ttm:role";
pub(super) const ATTR_XML_ID: &str = "xml:id";
pub(super) const ATTR_KEY: &str = "key";
pub(super) const ATTR_VALUE: &str = "value";
pub(super) const ATTR_FOR: &str = "for";

pub(super) const ROLE_TRANSLATION: &str = "x-translation";
pub(super) const ROLE_BACKGROUND: &str = "x-bg";

/// AMLL 元数据键到统一元数据键的映射表。
pub(super) const AMLL_METADATA_KEY_MAP: [(&str, &str); 8] = [
    ("musicName", "ti"),
    ("artists", "ar"),
    ("album", "al"),
    ("ttmlAuthorGithub", "aligner"),
    ("spotifyId", "spotifyID"),
    ("ncmMusicId", "neteaseMusicID"),
    ("qqMusicID", "qqMusicID"),
    ("appleMusicID", "appleMusicID"),
];
