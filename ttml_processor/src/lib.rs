//! # TTML Processor: A Specialized Parser for Apple Music and AMLL Lyrics
//!
//! This crate turns TTML (Timed Text Markup Language) lyric files into the unified
//! [`LyricData`](lyrics_core::LyricData) model from `lyrics_core`. It builds a small
//! read-only element tree on top of `quick-xml` and then extracts metadata, the song
//! duration and the timed lines from it.
//!
//! The two primary functions you will use are:
//! - [`parse_ttml`]: parses with the default [`TtmlParsingOptions`](lyrics_core::TtmlParsingOptions).
//! - [`parse_ttml_with_options`]: lets you pick the time-string mode and turn off the
//!   extraction of translations, background vocals and singers.
//!
//! ## ⚠️ Important: Not a General-Purpose Parser
//!
//! This library is **not** designed for generic TTML subtitle files. It follows the
//! conventions found in Apple Music and AMLL lyrics, such as `itunes:key` line keys,
//! `<amll:meta>` entries and the `<iTunesMetadata>` block.
//!
//! ## Examples
//!
//! ```rust
//! use ttml_processor::parse_ttml;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ttml_content = r#"
//!     <tt xmlns="http://www.w3.org/ns/ttml" xmlns:amll="http://www.example.com/ns/amll">
//!       <head>
//!         <metadata>
//!           <amll:meta key="musicName" value="Example"/>
//!         </metadata>
//!       </head>
//!       <body>
//!         <div>
//!           <p begin="00:05.000" end="00:10.000">
//!             <span begin="00:05.100" end="00:05.500">Hello</span>
//!             <span begin="00:05.600" end="00:06.000">world</span>
//!             <span ttm:role="x-bg">(echo)</span>
//!           </p>
//!         </div>
//!       </body>
//!     </tt>
//!     "#;
//!
//!     let data = parse_ttml(ttml_content)?;
//!     assert_eq!(data.metadata.get("ti"), Some("Example"));
//!
//!     let line = &data.scripts()[0];
//!     assert_eq!(line.start, 5.0);
//!     // Only lead spans make up the line text; whitespace between spans is not kept.
//!     assert_eq!(line.text, "Helloworld");
//!     assert_eq!(line.words.as_ref().map(Vec::len), Some(2));
//!     assert_eq!(line.chorus.as_deref(), Some("echo"));
//!
//!     Ok(())
//! }
//! ```

pub mod parser;

pub use parser::document::{XmlElement, XmlNode};
pub use parser::{parse_ttml, parse_ttml_with_options};
