//! # aqua_lyrics
//!
//! Parses LRC and TTML lyric files into one unified in-memory representation:
//! ordered timed lines, optional timed words within a line, and key/value metadata
//! (title, artist, album, streaming-service IDs...).
//!
//! - [`parse_lrc`] / [`parse_lrc_with_options`]: line-timed LRC text. Never fails;
//!   lines that are neither a metadata tag nor a timestamped lyric are skipped.
//! - [`parse_ttml`] / [`parse_ttml_with_options`]: Apple Music and AMLL flavoured TTML,
//!   provided by the `ttml_processor` crate. Fails only on malformed XML.
//! - [`parse_lyrics`]: dispatches on a [`LyricFormat`] chosen by the caller.
//!
//! Everything works on in-memory strings; the crate performs no I/O.
//!
//! ```rust
//! use aqua_lyrics::parse_lrc;
//!
//! let data = parse_lrc("[ar:Artist]\n[00:12.00]A\n[00:15.00]B", None);
//! assert_eq!(data.metadata.get("ar"), Some("Artist"));
//!
//! let lines = data.scripts();
//! assert_eq!((lines[0].start, lines[0].end), (12.0, 15.0));
//! // The last line is shown for three seconds unless a song duration is given.
//! assert_eq!((lines[1].start, lines[1].end), (15.0, 18.0));
//! ```

pub mod converter;

pub use converter::parse_lyrics;
pub use converter::parsers::lrc_parser::{parse_lrc, parse_lrc_with_options};
pub use lyrics_core::{
    ConversionOptions, ConvertError, LrcParsingOptions, LyricData, LyricFormat, LyricMetadata,
    LyricWord, MetadataKey, ScriptItem, TtmlParsingOptions, TtmlTimeMode, time,
};
pub use ttml_processor::{parse_ttml, parse_ttml_with_options};
