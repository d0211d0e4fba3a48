//! # lyrics_core
//!
//! Core types shared by the LRC and TTML parsers of `aqua_lyrics`: the unified
//! lyric model ([`LyricData`], [`ScriptItem`], [`LyricWord`]), the metadata
//! vocabulary ([`LyricMetadata`], [`MetadataKey`]), parsing options and the
//! time-string helpers both parsers rely on.

pub mod converter;
pub mod error;

pub use converter::config::*;
pub use converter::metadata::*;
pub use converter::time;
pub use converter::types::*;
pub use error::*;
