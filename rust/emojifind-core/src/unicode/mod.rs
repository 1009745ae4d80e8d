//! Parsers for the Unicode source data
//!
//! - `emoji_test.rs` - `emoji-test.txt`: group markers and data lines
//! - `annotations.rs` - CLDR annotation XML: glyph -> keywords
//! - `title.rs` - Title-casing of names, modifiers and subgroups

pub mod annotations;
pub mod emoji_test;
pub mod title;

pub use annotations::*;
pub use emoji_test::*;
pub use title::*;

#[cfg(test)]
mod tests;
