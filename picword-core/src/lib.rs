//! Shared types for the picword catalog pipeline.
//!
//! Languages, source tags, candidate entries and the word-list line format
//! live here so every other crate agrees on them without depending on each
//! other.

pub mod entry;
pub mod language;
pub mod util;
pub mod wordlist;

pub use entry::{AssetRef, CandidateEntry, CanonicalKey, SourceTag, SourceTagParseError};
pub use language::{Language, LanguageParseError, Script};
pub use wordlist::{WordLine, WordListError};

/// Image file extensions accepted from source folders and stripped from labels.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Whether a file name has one of the [`IMAGE_EXTENSIONS`] (case-insensitive).
pub fn has_image_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}
