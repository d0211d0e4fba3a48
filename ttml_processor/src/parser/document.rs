//! # TTML 解析器 - XML 元素树
//!
//! 在 `quick-xml` 的事件流之上构建一棵只读的元素树，
//! 供元数据和正文提取按名称、按路径访问。
//! 元素名和属性名都是限定名（例如 `amll:meta`），不做命名空间解析。

use std::str;

use lyrics_core::ConvertError;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

/// 元素的一个子节点。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// 子元素
    Element(XmlElement),
    /// 文本或 CDATA，实体已解码，相邻的文本已合并
    Text(String),
}

/// XML 元素。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// 限定名
    pub name: String,
    /// 按出现顺序排列的属性，值已反转义
    pub attributes: Vec<(String, String)>,
    /// 子节点
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// 将完整的 XML 文档解析为根元素。
    ///
    /// 除了 `quick-xml` 本身报告的错误之外，以下情况也会返回
    /// [`ConvertError::MalformedXml`]：没有根元素、存在第二个根元素、
    /// 根元素之外出现非空白文本，以及文档结束时仍有未闭合的元素。
    pub fn parse(content: &str) -> Result<Self, ConvertError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        reader.config_mut().expand_empty_elements = true;

        let mut stack: Vec<Self> = Vec::new();
        let mut root: Option<Self> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ConvertError::MalformedXml(format!(
                            "位置 {} 处出现了第二个根元素",
                            reader.buffer_position()
                        )));
                    }
                    stack.push(Self::from_start(&e, &reader)?);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        ConvertError::MalformedXml(format!(
                            "位置 {} 处的结束标签没有对应的开始标签",
                            reader.buffer_position()
                        ))
                    })?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(e) => push_text(&mut stack, &e.xml_content()?)?,
                Event::CData(e) => push_text(&mut stack, &e.decode()?)?,
                Event::GeneralRef(e) => {
                    let entity_name = str::from_utf8(e.as_ref()).map_err(|err| {
                        ConvertError::MalformedXml(format!("无法将实体名解码为UTF-8: {err}"))
                    })?;
                    let decoded_char = resolve_entity(entity_name)?;
                    push_text(&mut stack, decoded_char.encode_utf8(&mut [0; 4]))?;
                }
                Event::Eof => break,
                // 声明、处理指令、注释和 DOCTYPE
                _ => {}
            }
        }

        if let Some(unclosed) = stack.last() {
            return Err(ConvertError::MalformedXml(format!(
                "元素 <{}> 没有闭合",
                unclosed.name
            )));
        }

        root.ok_or_else(|| ConvertError::MalformedXml("文档中没有根元素".to_string()))
    }

    fn from_start(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self, ConvertError> {
        let decoder = reader.decoder();
        let name = decoder.decode(e.name().as_ref())?.into_owned();

        let attributes = e
            .attributes()
            .map(|attr| {
                let attr = attr?;
                let key = decoder.decode(attr.key.as_ref())?.into_owned();
                let value = attr.decode_and_unescape_value(decoder)?.into_owned();
                Ok((key, value))
            })
            .collect::<Result<Vec<_>, ConvertError>>()?;

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// 按限定名查找属性值。
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 所有子元素。
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// 所有名为 `name` 的直接子元素，按文档顺序。
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> {
        self.elements().filter(move |element| element.name == name)
    }

    /// 第一个名为 `name` 的直接子元素。
    #[must_use]
    pub fn child_named(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    /// 沿着以 `.` 分隔的路径逐级查找子元素，例如 `head.metadata`。
    /// 每一级都取第一个同名子元素。
    #[must_use]
    pub fn descendant_with_path(&self, path: &str) -> Option<&Self> {
        path.split('.')
            .try_fold(self, |element, segment| element.child_named(segment))
    }

    /// 元素自身的文本内容，即所有直接文本子节点的拼接。
    /// 子元素内部的文本不包含在内。
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

/// 把文本追加到当前打开的元素上。根元素之外只允许出现空白。
fn push_text(stack: &mut [XmlElement], text: &str) -> Result<(), ConvertError> {
    let Some(current) = stack.last_mut() else {
        if text.chars().all(|c| c.is_whitespace() || c == '\u{feff}') {
            return Ok(());
        }
        return Err(ConvertError::MalformedXml(format!(
            "根元素之外出现了文本 '{}'",
            text.trim()
        )));
    };

    if let Some(XmlNode::Text(last)) = current.children.last_mut() {
        last.push_str(text);
    } else {
        current.children.push(XmlNode::Text(text.to_owned()));
    }
    Ok(())
}

/// 解码预定义实体和数字字符引用。
fn resolve_entity(entity_name: &str) -> Result<char, ConvertError> {
    if let Some(num_str) = entity_name.strip_prefix('#') {
        let (radix, code_point_str) = num_str
            .strip_prefix('x')
            .map_or((10, num_str), |stripped| (16, stripped));

        return u32::from_str_radix(code_point_str, radix)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                ConvertError::MalformedXml(format!("无效的XML数字实体 '&{entity_name};'"))
            });
    }

    match entity_name {
        "amp" => Ok('&'),
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ => Err(ConvertError::MalformedXml(format!(
            "未知的XML实体 '&{entity_name};'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_tree_with_attributes_and_text() {
        let root = XmlElement::parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<tt xmlns:amll="http://www.example.com/ns/amll" dur="03:00.000">
  <head><metadata><amll:meta key="musicName" value="A &amp; B"/></metadata></head>
  <body><div><p begin="1s">Hello <![CDATA[<world>]]></p></div></body>
</tt>"#,
        )
        .unwrap();

        assert_eq!(root.name, "tt");
        assert_eq!(root.attr("dur"), Some("03:00.000"));
        assert_eq!(root.attr("missing"), None);

        let meta = root
            .descendant_with_path("head.metadata")
            .and_then(|metadata| metadata.child_named("amll:meta"))
            .unwrap();
        assert_eq!(meta.attr("value"), Some("A & B"));
        assert!(meta.children.is_empty());

        let p = root.descendant_with_path("body.div.p").unwrap();
        assert_eq!(p.text(), "Hello <world>");
    }

    #[test]
    fn test_text_excludes_child_elements() {
        let root =
            XmlElement::parse("<p>a<span>b</span>c&#x4E34;&#27700;<span>d</span></p>").unwrap();
        assert_eq!(root.text(), "ac临水");
        let spans: Vec<_> = root.children_named("span").map(XmlElement::text).collect();
        assert_eq!(spans, ["b", "d"]);
    }

    #[test]
    fn test_descendant_with_path_takes_first_match() {
        let root =
            XmlElement::parse("<tt><head><x>1</x></head><head><metadata/></head></tt>").unwrap();
        assert!(root.descendant_with_path("head.metadata").is_none());
        assert!(root.descendant_with_path("head.x").is_some());
        assert!(root.descendant_with_path("nothing").is_none());
    }

    #[test]
    fn test_malformed_documents_are_errors() {
        for input in [
            "",
            "   ",
            "<tt><body></tt>",
            "<tt><body>",
            "<tt></tt><tt></tt>",
            "text<tt></tt>",
            "<tt></tt>tail",
            "<tt>&unknown;</tt>",
            "<tt a=\"1\" a=\"2\"></tt>",
        ] {
            assert!(
                XmlElement::parse(input).is_err(),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn test_comments_and_whitespace_outside_root_are_allowed() {
        let root = XmlElement::parse("\n<!-- lyrics -->\n<tt/>\n").unwrap();
        assert_eq!(root.name, "tt");
        assert!(root.children.is_empty());
    }
}
