//! # TTML 解析器 - 元数据处理模块
//!
//! 处理 `<head><metadata>` 块：AMLL 元数据、演唱者定义和
//! Apple Music 的 `<iTunesMetadata>` 逐行翻译。

use std::collections::HashMap;

use lyrics_core::{LyricMetadata, MetadataKey};

use super::{
    constants::{
        AMLL_METADATA_KEY_MAP, ATTR_DUR, ATTR_FOR, ATTR_KEY, ATTR_VALUE, ATTR_XML_ID,
        TAG_AGENT_TTM, TAG_BODY, TAG_ITUNES_METADATA, TAG_META_AMLL, TAG_NAME_TTM, TAG_TEXT,
        TAG_TRANSLATION, TAG_TRANSLATIONS,
    },
    document::XmlElement,
};

/// 把 AMLL 的元数据键翻译为统一的元数据键，不认识的键原样返回。
pub(super) fn canonical_amll_key(key: &str) -> &str {
    AMLL_METADATA_KEY_MAP
        .iter()
        .find(|(amll_key, _)| *amll_key == key)
        .map_or(key, |(_, canonical)| *canonical)
}

/// 读取 `<metadata>` 块中所有 `<amll:meta key=".." value="..">` 条目。
///
/// `key` 或 `value` 缺失（或为空）的条目会被跳过，同一个键后写入的覆盖先写入的。
pub(super) fn extract_metadata(metadata: &XmlElement, out: &mut LyricMetadata) {
    for element in metadata.children_named(TAG_META_AMLL) {
        let (Some(key), Some(value)) = (element.attr(ATTR_KEY), element.attr(ATTR_VALUE)) else {
            continue;
        };
        if key.is_empty() || value.is_empty() {
            continue;
        }
        out.set(canonical_amll_key(key), value);
    }
}

/// 根元素的 `dur` 属性。只有文档包含 `<body>` 时才会被采用。
pub(super) fn extract_duration(root: &XmlElement) -> Option<&str> {
    root.child_named(TAG_BODY)?;
    root.attr(ATTR_DUR).filter(|dur| !dur.is_empty())
}

/// 写入歌曲时长。
pub(super) fn apply_duration(root: &XmlElement, out: &mut LyricMetadata) {
    if let Some(duration) = extract_duration(root) {
        out.set(MetadataKey::Length.as_str(), duration);
    }
}

/// 收集 `<ttm:agent xml:id="..">` 定义，返回 id 到 `<ttm:name>` 的映射。
/// 没有名字的演唱者不会出现在结果中。
pub(super) fn collect_agent_names(metadata: &XmlElement) -> HashMap<String, String> {
    metadata
        .children_named(TAG_AGENT_TTM)
        .filter_map(|agent| {
            let id = agent.attr(ATTR_XML_ID)?;
            let name = agent.child_named(TAG_NAME_TTM)?.text();
            let name = name.trim();
            (!id.is_empty() && !name.is_empty()).then(|| (id.to_owned(), name.to_owned()))
        })
        .collect()
}

/// 收集 `<iTunesMetadata>` 中第一个 `<translation>` 块的逐行翻译，
/// 返回 `itunes:key` 到翻译文本的映射。
pub(super) fn collect_itunes_translations(metadata: &XmlElement) -> HashMap<String, String> {
    let Some(translation) = metadata
        .child_named(TAG_ITUNES_METADATA)
        .and_then(|itunes| itunes.child_named(TAG_TRANSLATIONS))
        .and_then(|translations| translations.child_named(TAG_TRANSLATION))
    else {
        return HashMap::new();
    };

    translation
        .children_named(TAG_TEXT)
        .filter_map(|text| {
            let key = text.attr(ATTR_FOR)?;
            let content = text.text();
            let content = content.trim();
            (!content.is_empty()).then(|| (key.to_owned(), content.to_owned()))
        })
        .collect()
}
