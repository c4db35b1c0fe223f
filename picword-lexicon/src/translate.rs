//! Display names per target language for canonical keys.
//!
//! Lookup order: the static translation table, then the source label's own
//! root when the target is the language it was written in, then a
//! humanized fallback built from the key. Fallbacks are logged and counted
//! so gaps in the table stay visible.

use std::collections::BTreeMap;

use picword_core::util::humanize_key;
use picword_core::{CanonicalKey, Language, Script};

use crate::model::Lexicon;
use crate::translit::{has_cyrillic, transliterate};

/// Where a display name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationOrigin {
    Table,
    /// The winning entry's own source-language root.
    Native,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub origin: TranslationOrigin,
}

/// Translator over a lexicon's table that tallies fallbacks per language.
pub struct Translator<'a> {
    lexicon: &'a Lexicon,
    fallbacks: BTreeMap<Language, usize>,
}

impl<'a> Translator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            fallbacks: BTreeMap::new(),
        }
    }

    /// Display name of `key` in `target`.
    ///
    /// `native` is the `(language, root)` of the entry that produced the key;
    /// it is only used when `target` is that language. Never returns an
    /// empty string.
    pub fn translate(
        &mut self,
        key: &CanonicalKey,
        target: Language,
        native: Option<(Language, &str)>,
    ) -> Translation {
        if let Some(text) = self.lexicon.translations().get(key.as_str(), target) {
            return Translation {
                text: text.trim().to_string(),
                origin: TranslationOrigin::Table,
            };
        }

        if let Some((language, root)) = native
            && language == target
        {
            let text = humanize_key(root);
            if !text.is_empty() {
                return Translation {
                    text,
                    origin: TranslationOrigin::Native,
                };
            }
        }

        let text = fallback_name(key.as_str(), target);
        log::warn!("No {target} translation for '{key}'; using '{text}'");
        *self.fallbacks.entry(target).or_insert(0) += 1;
        Translation {
            text,
            origin: TranslationOrigin::Fallback,
        }
    }

    /// Fallback count per target language so far.
    pub fn fallbacks(&self) -> &BTreeMap<Language, usize> {
        &self.fallbacks
    }

    pub fn total_fallbacks(&self) -> usize {
        self.fallbacks.values().sum()
    }
}

/// Humanized key, transliterated when a Cyrillic key targets a Latin-script
/// language.
pub fn fallback_name(key: &str, target: Language) -> String {
    let text = if target.script() == Script::Latin && has_cyrillic(key) {
        humanize_key(&transliterate(key))
    } else {
        humanize_key(key)
    };
    if text.is_empty() { key.to_string() } else { text }
}
