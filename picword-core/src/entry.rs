//! Candidate entries as produced by source adapters, before merging.

use std::path::PathBuf;

use crate::language::Language;

/// Which source a candidate came from. Lower priority value wins a
/// canonical-key collision during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceTag {
    /// Folder named in the key language (e.g. English file names).
    Primary,
    /// Folder named in another language, translated through the lexicon.
    Secondary,
    /// Images saved by the crawler.
    Crawled,
}

impl SourceTag {
    pub fn priority(&self) -> u8 {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Crawled => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Crawled => "crawled",
        }
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed into a `SourceTag`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown source tag: '{0}' (expected primary, secondary or crawled)")]
pub struct SourceTagParseError(pub String);

impl std::str::FromStr for SourceTag {
    type Err = SourceTagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "crawled" | "crawl" => Ok(Self::Crawled),
            _ => Err(SourceTagParseError(s.to_string())),
        }
    }
}

impl serde::Serialize for SourceTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for SourceTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque handle to the image behind a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    Local(PathBuf),
    Remote(String),
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// Normalized, language-neutral identifier of one catalog subject.
///
/// Keys use lower-case letters and digits separated by single underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Wrap an already-normalized string. Returns `None` for an empty key.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() { None } else { Some(Self(key)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single (label, image, source) triple before merge.
#[derive(Debug, Clone)]
pub struct CandidateEntry {
    /// Label as found at the source (file name or `alt` text).
    pub raw_label: String,
    pub source_tag: SourceTag,
    /// Language the raw label is written in.
    pub language: Language,
    pub asset: AssetRef,
    /// Set once normalization completes; `None` means not yet normalized
    /// or normalized to nothing.
    pub canonical_key: Option<CanonicalKey>,
    /// Cleaned source-language root, kept for translation back-fill.
    pub native_root: Option<String>,
}

impl CandidateEntry {
    pub fn new(
        raw_label: impl Into<String>,
        source_tag: SourceTag,
        language: Language,
        asset: AssetRef,
    ) -> Self {
        Self {
            raw_label: raw_label.into(),
            source_tag,
            language,
            asset,
            canonical_key: None,
            native_root: None,
        }
    }
}
