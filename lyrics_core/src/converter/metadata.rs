//! 歌词元数据。
//!
//! 常用的键以强类型字段保存，其余未知键原样保存在一个有序的附加表中，
//! 对外则合并为同一个键值视图。

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::warn;

use crate::ParseMetadataKeyError;

/// 具有明确含义的元数据键。
///
/// 键名区分大小写，与各格式中出现的规范写法保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MetadataKey {
    /// 艺术家 (`ar`)
    Artist,
    /// 歌曲标题 (`ti`)
    Title,
    /// 专辑名 (`al`)
    Album,
    /// 歌词作者 (`au`)
    Author,
    /// 歌曲长度，`hh:mm:ss.sss` 格式的原始字符串，小时和毫秒可省略 (`length`)
    Length,
    /// 全局时间偏移（毫秒），带 `+` 或 `-` 前缀 (`offset`)
    Offset,
    /// 制作工具 (`tool`)
    Tool,
    /// 程序版本 (`ve`)
    Version,
    /// Apple Music 曲目 ID
    AppleMusicId,
    /// QQ 音乐 ID
    QqMusicId,
    /// 网易云音乐 ID
    NeteaseMusicId,
    /// Spotify ID
    SpotifyId,
    /// 哔哩哔哩视频 BVID
    BilibiliBvid,
    /// 将歌词文本对齐到时间轴的人，即最终歌词文件的制作者
    Aligner,
}

impl MetadataKey {
    /// 返回该键的规范字符串。
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artist => "ar",
            Self::Title => "ti",
            Self::Album => "al",
            Self::Author => "au",
            Self::Length => "length",
            Self::Offset => "offset",
            Self::Tool => "tool",
            Self::Version => "ve",
            Self::AppleMusicId => "appleMusicID",
            Self::QqMusicId => "qqMusicID",
            Self::NeteaseMusicId => "neteaseMusicID",
            Self::SpotifyId => "spotifyID",
            Self::BilibiliBvid => "bilibiliBVID",
            Self::Aligner => "aligner",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataKey {
    type Err = ParseMetadataKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseMetadataKeyError(s.to_string()))
    }
}

/// 一首歌的元数据。
///
/// 序列化时，强类型字段与 `extra` 会被展平为同一个键值表，
/// 键名即 [`MetadataKey::as_str`] 给出的规范写法。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricMetadata {
    #[serde(rename = "ar", default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(rename = "ti", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "al", default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(rename = "au", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(rename = "ve", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "appleMusicID", default, skip_serializing_if = "Option::is_none")]
    pub apple_music_id: Option<String>,
    #[serde(rename = "qqMusicID", default, skip_serializing_if = "Option::is_none")]
    pub qq_music_id: Option<String>,
    #[serde(rename = "neteaseMusicID", default, skip_serializing_if = "Option::is_none")]
    pub netease_music_id: Option<String>,
    #[serde(rename = "spotifyID", default, skip_serializing_if = "Option::is_none")]
    pub spotify_id: Option<String>,
    #[serde(rename = "bilibiliBVID", default, skip_serializing_if = "Option::is_none")]
    pub bilibili_bvid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aligner: Option<String>,
    /// 所有未被识别的键，原样保留。
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl LyricMetadata {
    /// 创建一个新的、空的元数据实例。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取某个已知键对应的字段。
    #[must_use]
    pub const fn field(&self, key: MetadataKey) -> Option<&String> {
        match key {
            MetadataKey::Artist => self.artist.as_ref(),
            MetadataKey::Title => self.title.as_ref(),
            MetadataKey::Album => self.album.as_ref(),
            MetadataKey::Author => self.author.as_ref(),
            MetadataKey::Length => self.length.as_ref(),
            MetadataKey::Offset => self.offset.as_ref(),
            MetadataKey::Tool => self.tool.as_ref(),
            MetadataKey::Version => self.version.as_ref(),
            MetadataKey::AppleMusicId => self.apple_music_id.as_ref(),
            MetadataKey::QqMusicId => self.qq_music_id.as_ref(),
            MetadataKey::NeteaseMusicId => self.netease_music_id.as_ref(),
            MetadataKey::SpotifyId => self.spotify_id.as_ref(),
            MetadataKey::BilibiliBvid => self.bilibili_bvid.as_ref(),
            MetadataKey::Aligner => self.aligner.as_ref(),
        }
    }

    fn field_mut(&mut self, key: MetadataKey) -> &mut Option<String> {
        match key {
            MetadataKey::Artist => &mut self.artist,
            MetadataKey::Title => &mut self.title,
            MetadataKey::Album => &mut self.album,
            MetadataKey::Author => &mut self.author,
            MetadataKey::Length => &mut self.length,
            MetadataKey::Offset => &mut self.offset,
            MetadataKey::Tool => &mut self.tool,
            MetadataKey::Version => &mut self.version,
            MetadataKey::AppleMusicId => &mut self.apple_music_id,
            MetadataKey::QqMusicId => &mut self.qq_music_id,
            MetadataKey::NeteaseMusicId => &mut self.netease_music_id,
            MetadataKey::SpotifyId => &mut self.spotify_id,
            MetadataKey::BilibiliBvid => &mut self.bilibili_bvid,
            MetadataKey::Aligner => &mut self.aligner,
        }
    }

    /// 设置或覆盖一个元数据值。
    ///
    /// 键与某个 [`MetadataKey`] 的规范写法完全一致时写入对应字段，
    /// 否则写入 `extra`。同一个键后写入的值覆盖先写入的值。
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key.parse::<MetadataKey>() {
            Ok(known) => *self.field_mut(known) = Some(value),
            Err(_) => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// 在合并视图中查找一个键。
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match key.parse::<MetadataKey>() {
            Ok(known) => self.field(known).map(String::as_str),
            Err(_) => self.extra.get(key).map(String::as_str),
        }
    }

    /// 移除一个键，返回被移除的值。
    pub fn remove(&mut self, key: &str) -> Option<String> {
        match key.parse::<MetadataKey>() {
            Ok(known) => self.field_mut(known).take(),
            Err(_) => self.extra.remove(key),
        }
    }

    /// 遍历所有存在的键值对。
    ///
    /// 先按 [`MetadataKey`] 的声明顺序给出已知键，再按字典序给出 `extra` 中的键。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        MetadataKey::iter()
            .filter_map(|key| self.field(key).map(|value| (key.as_str(), value.as_str())))
            .chain(
                self.extra
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
    }

    /// 键值对的数量。
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// 将 `offset` 解析为带符号的毫秒数。
    #[must_use]
    pub fn offset_ms(&self) -> Option<i64> {
        let raw = self.offset.as_deref()?.trim();
        raw.strip_prefix('+')
            .unwrap_or(raw)
            .parse::<i64>()
            .inspect_err(|e| warn!("无法解析偏移量 '{raw}': {e}"))
            .ok()
    }

    /// 生成合并后的键值表。
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_go_to_fields() {
        let mut metadata = LyricMetadata::new();
        metadata.set("ti", "Title");
        metadata.set("appleMusicID", "1234");
        metadata.set("musicName", "Some Title");

        assert_eq!(metadata.title.as_deref(), Some("Title"));
        assert_eq!(metadata.apple_music_id.as_deref(), Some("1234"));
        assert_eq!(metadata.get("musicName"), Some("Some Title"));
        assert!(metadata.extra.contains_key("musicName"));
    }

    #[test]
    fn test_key_match_is_case_sensitive() {
        let mut metadata = LyricMetadata::new();
        metadata.set("applemusicid", "1234");

        assert_eq!(metadata.apple_music_id, None);
        assert_eq!(metadata.get("applemusicid"), Some("1234"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut metadata = LyricMetadata::new();
        metadata.set("ar", "First");
        metadata.set("ar", "Second");
        metadata.set("custom", "a");
        metadata.set("custom", "b");

        assert_eq!(metadata.get("ar"), Some("Second"));
        assert_eq!(metadata.get("custom"), Some("b"));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn test_iter_order() {
        let mut metadata = LyricMetadata::new();
        metadata.set("zzz", "3");
        metadata.set("aligner", "someone");
        metadata.set("ar", "Artist");
        metadata.set("aaa", "1");

        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["ar", "aligner", "aaa", "zzz"]);
    }

    #[test]
    fn test_remove() {
        let mut metadata = LyricMetadata::new();
        metadata.set("ti", "Title");
        metadata.set("foo", "bar");

        assert_eq!(metadata.remove("ti").as_deref(), Some("Title"));
        assert_eq!(metadata.remove("foo").as_deref(), Some("bar"));
        assert_eq!(metadata.remove("foo"), None);
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_offset_ms() {
        let mut metadata = LyricMetadata::new();
        assert_eq!(metadata.offset_ms(), None);

        metadata.set("offset", "+500");
        assert_eq!(metadata.offset_ms(), Some(500));

        metadata.set("offset", "-250");
        assert_eq!(metadata.offset_ms(), Some(-250));

        metadata.set("offset", "soon");
        assert_eq!(metadata.offset_ms(), None);
    }

    #[test]
    fn test_serialized_view_is_flat() {
        let mut metadata = LyricMetadata::new();
        metadata.set("ti", "Title");
        metadata.set("neteaseMusicID", "42");
        metadata.set("ttmlAuthorGithubLogin", "someone");

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ti": "Title",
                "neteaseMusicID": "42",
                "ttmlAuthorGithubLogin": "someone",
            })
        );

        let back: LyricMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn test_key_round_trip_through_str() {
        for key in MetadataKey::iter() {
            assert_eq!(key.as_str().parse::<MetadataKey>(), Ok(key));
        }
        assert!("unknown".parse::<MetadataKey>().is_err());
    }
}
