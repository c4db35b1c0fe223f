//! Label normalization: raw file names and `alt` texts → canonical keys.
//!
//! One normalization step strips the path and image extension, lowercases,
//! turns separators into `_`, drops stop phrases, applies the disambiguation
//! rules and finally maps the root to a key (alias table, otherwise
//! transliteration for Cyrillic-script languages). [`Lexicon::normalize`]
//! repeats the step until the key stops changing, so normalizing a key
//! again always returns the same key.

use picword_core::{CandidateEntry, CanonicalKey, Language, Script, has_image_extension};

use crate::model::{LanguageProfile, Lexicon};
use crate::translit::transliterate;

/// Upper bound on normalization steps before giving up on a fixed point.
pub const MAX_PASSES: usize = 8;

/// Result of normalizing one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// `None` when nothing meaningful survives cleaning.
    pub key: Option<CanonicalKey>,
    /// Source-language root after stop-word removal and rules.
    pub native_root: Option<String>,
    /// False if the step never reached a fixed point within [`MAX_PASSES`].
    pub settled: bool,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || (c.is_ascii_punctuation() && !matches!(c, '\'' | '"' | '`'))
}

/// Lower-case letters and digits joined by single underscores.
///
/// Whitespace and ASCII punctuation become separators; quotes and any other
/// symbol are dropped.
pub fn canonical_form(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for c in text.chars() {
        for lc in c.to_lowercase() {
            if lc.is_alphanumeric() {
                mapped.push(lc);
            } else if is_separator(lc) {
                mapped.push('_');
            }
        }
    }
    mapped
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// File-name part of a path-like label, without an image extension.
fn label_stem(label: &str) -> &str {
    let name = label.rsplit(['/', '\\']).next().unwrap_or(label);
    if has_image_extension(name) {
        name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
    } else {
        name
    }
}

/// One pass of whole-segment stop-phrase removal.
fn strip_stop_phrases<'a>(segments: &[&'a str], phrases: &[Vec<String>]) -> Vec<&'a str> {
    let mut kept = Vec::with_capacity(segments.len());
    let mut i = 0;
    'outer: while i < segments.len() {
        for phrase in phrases {
            let end = i + phrase.len();
            if end <= segments.len() && segments[i..end].iter().zip(phrase).all(|(s, p)| *s == p.as_str()) {
                i = end;
                continue 'outer;
            }
        }
        kept.push(segments[i]);
        i += 1;
    }
    kept
}

/// Canonical form of the label with stop phrases removed until none remain.
pub(crate) fn clean(label: &str, profile: &LanguageProfile) -> String {
    let canonical = canonical_form(label_stem(label));
    let mut segments: Vec<&str> = canonical.split('_').filter(|s| !s.is_empty()).collect();
    loop {
        let next = strip_stop_phrases(&segments, &profile.stop_phrases);
        if next.len() == segments.len() {
            break;
        }
        segments = next;
    }
    segments.join("_")
}

impl Lexicon {
    /// One normalization step. Returns `(root, key)`; both are empty when
    /// the label cleans to nothing.
    fn step(&self, label: &str, language: Language) -> (String, String) {
        let profile = self.profile(language);
        let cleaned = clean(label, profile);
        if cleaned.is_empty() {
            return (String::new(), String::new());
        }

        let root = match profile.rules.apply(&cleaned) {
            Some(result) => result.to_string(),
            None => cleaned,
        };

        let key = if let Some(alias) = profile.aliases.get(&root) {
            alias.clone()
        } else if language.script() == Script::Cyrillic {
            canonical_form(&transliterate(&root))
        } else {
            root.clone()
        };
        (root, key)
    }

    /// Normalize a raw label written in `language`.
    pub fn normalize(&self, raw: &str, language: Language) -> Normalized {
        let (root, mut key) = self.step(raw, language);
        let native_root = (!root.is_empty()).then_some(root);

        let mut settled = false;
        for _ in 1..MAX_PASSES {
            if key.is_empty() {
                settled = true;
                break;
            }
            let (_, next) = self.step(&key, language);
            if next == key {
                settled = true;
                break;
            }
            key = next;
        }
        if !settled {
            log::warn!("Normalization of '{raw}' ({language}) did not settle; using '{key}'");
        }

        Normalized {
            key: CanonicalKey::new(key),
            native_root,
            settled,
        }
    }

    /// Fill in `canonical_key` and `native_root` on a candidate.
    ///
    /// Returns false when the label normalized to nothing.
    pub fn normalize_entry(&self, entry: &mut CandidateEntry) -> bool {
        let normalized = self.normalize(&entry.raw_label, entry.language);
        log::debug!(
            "Normalized '{}' ({}) → {}",
            entry.raw_label,
            entry.language,
            normalized.key.as_ref().map(CanonicalKey::as_str).unwrap_or("<none>")
        );
        entry.canonical_key = normalized.key;
        entry.native_root = normalized.native_root;
        entry.canonical_key.is_some()
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
