//! 各歌词格式的解析器。TTML 解析器位于独立的 `ttml_processor` crate 中。

pub mod lrc_parser;
