use quick_xml::{
    Error as QuickXmlErrorMain, encoding::EncodingError,
    events::attributes::AttrError as QuickXmlAttrError,
};
use thiserror::Error;

/// 定义歌词解析过程中可能发生的各种错误。
///
/// LRC 解析永远不会失败；只有 TTML 解析和配置加载会返回错误。
#[derive(Error, Debug)]
pub enum ConvertError {
    /// XML 读取错误，来自 `quick-xml` 库。
    #[error("XML 解析错误: {0}")]
    Xml(#[from] QuickXmlErrorMain),
    /// XML 属性解析错误，来自 `quick-xml` 库。
    #[error("XML 属性错误: {0}")]
    Attribute(#[from] QuickXmlAttrError),
    /// XML 文本编码或解码错误。
    #[error("文本编码或解码错误: {0}")]
    Encoding(#[from] EncodingError),
    /// 文档结构不完整，例如缺少根元素或存在未闭合的标签。
    #[error("XML 文档格式错误: {0}")]
    MalformedXml(String),
    /// 无效的时间格式字符串。
    #[error("无效的时间格式: {0}")]
    InvalidTime(String),
    /// 配置文件解析错误。
    #[error("配置解析错误: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<ConvertError> for std::io::Error {
    fn from(err: ConvertError) -> Self {
        Self::other(err)
    }
}

/// 定义从字符串解析 `MetadataKey` 时可能发生的错误。
#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("未知的元数据键: {0}")]
pub struct ParseMetadataKeyError(pub String);
