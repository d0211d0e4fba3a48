//! # TTML 解析器 - Body 处理模块
//!
//! 该模块遍历 `<body>` 下的 `<div>` 和 `<p>`，
//! 把每个 `<p>` 转换为一个 `ScriptItem`。

use std::collections::HashMap;

use lyrics_core::{LyricWord, ScriptItem, TtmlParsingOptions};

use super::{
    constants::{
        ATTR_AGENT, ATTR_BEGIN, ATTR_END, ATTR_ITUNES_KEY, ATTR_ROLE, ROLE_BACKGROUND,
        ROLE_TRANSLATION, TAG_DIV, TAG_P, TAG_SPAN,
    },
    document::XmlElement,
    metadata::{collect_agent_names, collect_itunes_translations},
    utils::{clean_parentheses_from_bg_text, get_time_attribute, parse_line_key},
};

/// `<span>` 的种类，在遍历时根据 `ttm:role` 属性确定一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SpanKind<'a> {
    /// 主唱音节，计入行文本和单词列表
    Lead,
    /// 翻译、背景人声等带角色的内容，不计入行文本
    Role { role: &'a str },
}

impl<'a> SpanKind<'a> {
    pub(super) fn of(span: &'a XmlElement) -> Self {
        span.attr(ATTR_ROLE)
            .filter(|role| !role.is_empty())
            .map_or(Self::Lead, |role| Self::Role { role })
    }
}

/// 遍历正文时需要的上下文：解析选项和从 `<metadata>` 预先收集的辅助信息。
pub(super) struct BodyContext<'a> {
    options: &'a TtmlParsingOptions,
    agent_names: HashMap<String, String>,
    itunes_translations: HashMap<String, String>,
}

impl<'a> BodyContext<'a> {
    pub(super) fn new(options: &'a TtmlParsingOptions, metadata: Option<&XmlElement>) -> Self {
        let (agent_names, itunes_translations) = match metadata {
            Some(metadata) if options.extract_auxiliary => (
                collect_agent_names(metadata),
                collect_itunes_translations(metadata),
            ),
            _ => (HashMap::new(), HashMap::new()),
        };

        Self {
            options,
            agent_names,
            itunes_translations,
        }
    }
}

/// 按文档顺序提取所有 `<div>` 中的所有 `<p>`。
pub(super) fn extract_lines(body: &XmlElement, context: &BodyContext<'_>) -> Vec<ScriptItem> {
    body.children_named(TAG_DIV)
        .flat_map(|div| div.children_named(TAG_P))
        .map(|p| process_line(p, context))
        .collect()
}

/// 处理单个 `<p>` 元素。
fn process_line(p: &XmlElement, context: &BodyContext<'_>) -> ScriptItem {
    let mode = context.options.time_mode;
    let mut line = ScriptItem {
        start: get_time_attribute(p, ATTR_BEGIN, mode),
        end: get_time_attribute(p, ATTR_END, mode),
        ..Default::default()
    };

    let mut spans = p.children_named(TAG_SPAN).peekable();
    if spans.peek().is_none() {
        line.text = p.text();
    } else {
        let mut words = Vec::new();
        for span in spans {
            match SpanKind::of(span) {
                SpanKind::Lead => {
                    let word = span.text();
                    line.text.push_str(&word);
                    words.push(LyricWord {
                        start_time: get_time_attribute(span, ATTR_BEGIN, mode),
                        end_time: get_time_attribute(span, ATTR_END, mode),
                        word,
                    });
                }
                SpanKind::Role { role } => {
                    if context.options.extract_auxiliary {
                        apply_role_span(&mut line, role, span);
                    }
                }
            }
        }
        line.words = Some(words);
    }

    let line_key = p.attr(ATTR_ITUNES_KEY).filter(|key| !key.is_empty());
    line.idx = line_key.and_then(parse_line_key);

    if context.options.extract_auxiliary {
        line.singer = p
            .attr(ATTR_AGENT)
            .filter(|agent| !agent.is_empty())
            .map(|agent| {
                context
                    .agent_names
                    .get(agent)
                    .cloned()
                    .unwrap_or_else(|| agent.to_owned())
            });

        if line.translation.is_none() {
            line.translation =
                line_key.and_then(|key| context.itunes_translations.get(key).cloned());
        }
    }

    line
}

/// 把带角色的 `<span>` 写入对应的辅助字段。
fn apply_role_span(line: &mut ScriptItem, role: &str, span: &XmlElement) {
    match role {
        ROLE_TRANSLATION => {
            let text = span.text();
            let text = text.trim();
            if line.translation.is_none() && !text.is_empty() {
                line.translation = Some(text.to_owned());
            }
        }
        ROLE_BACKGROUND => {
            let raw = background_text(span);
            let text = clean_parentheses_from_bg_text(&raw);
            if text.is_empty() {
                return;
            }
            match line.chorus.as_mut() {
                Some(chorus) => {
                    chorus.push(' ');
                    chorus.push_str(text);
                }
                None => line.chorus = Some(text.to_owned()),
            }
        }
        _ => {}
    }
}

/// 背景人声的文本：子 `<span>` 中主唱音节的拼接，没有子 `<span>` 时取自身文本。
fn background_text(span: &XmlElement) -> String {
    let mut children = span.children_named(TAG_SPAN).peekable();
    if children.peek().is_none() {
        return span.text();
    }
    children
        .filter(|child| SpanKind::of(child) == SpanKind::Lead)
        .map(XmlElement::text)
        .collect()
}
