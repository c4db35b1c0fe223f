//! Lexicon data model: the YAML document shape and its compiled form.

use std::collections::{BTreeMap, HashMap};

use picword_core::Language;
use serde::{Deserialize, Serialize};

use crate::rules::RuleTable;

// ── YAML document ───────────────────────────────────────────────────────────

/// One lexicon YAML document, as written by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconFile {
    /// Language canonical keys are spelled in. Defaults to English.
    #[serde(default)]
    pub key_language: Option<Language>,
    #[serde(default)]
    pub languages: BTreeMap<Language, LanguageSection>,
    /// Canonical key → per-language display string.
    #[serde(default)]
    pub translations: BTreeMap<String, BTreeMap<Language, String>>,
}

/// Per-language normalization data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageSection {
    /// Decorative qualifiers removed as whole segments. Multi-word phrases
    /// are written with `_` or spaces (`на_охоте`).
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    /// Cleaned source-language root → canonical key.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// A disambiguation rule: when every pattern occurs in the label,
/// the label becomes `then`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub when: Vec<String>,
    pub then: String,
}

impl LexiconFile {
    /// Fold another document into this one. Stop words and rules append in
    /// order; aliases and translations from `other` replace existing ones.
    pub fn merge(&mut self, other: LexiconFile) {
        if self.key_language.is_none() {
            self.key_language = other.key_language;
        } else if other.key_language.is_some() && other.key_language != self.key_language {
            log::warn!(
                "Conflicting key_language {:?}; keeping {:?}",
                other.key_language,
                self.key_language
            );
        }

        for (language, section) in other.languages {
            let target = self.languages.entry(language).or_default();
            target.stop_words.extend(section.stop_words);
            target.rules.extend(section.rules);
            for (root, key) in section.aliases {
                if let Some(previous) = target.aliases.insert(root.clone(), key) {
                    log::debug!("Alias '{root}' ({language}) overridden (was '{previous}')");
                }
            }
        }

        for (key, names) in other.translations {
            self.translations.entry(key).or_default().extend(names);
        }
    }
}

// ── Compiled form ───────────────────────────────────────────────────────────

/// Normalization data for one source language, ready for matching.
#[derive(Debug, Clone, Default)]
pub struct LanguageProfile {
    /// Stop phrases split into segments, longest first.
    pub stop_phrases: Vec<Vec<String>>,
    pub rules: RuleTable,
    pub aliases: HashMap<String, String>,
}

/// Static translation table keyed by canonical key.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: BTreeMap<String, BTreeMap<Language, String>>,
}

impl TranslationTable {
    pub fn new(entries: BTreeMap<String, BTreeMap<Language, String>>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str, language: Language) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|names| names.get(&language))
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A loaded, validated lexicon.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub(crate) key_language: Language,
    pub(crate) profiles: HashMap<Language, LanguageProfile>,
    pub(crate) translations: TranslationTable,
    empty_profile: LanguageProfile,
}

impl Lexicon {
    pub(crate) fn from_parts(
        key_language: Language,
        profiles: HashMap<Language, LanguageProfile>,
        translations: TranslationTable,
    ) -> Self {
        Self {
            key_language,
            profiles,
            translations,
            empty_profile: LanguageProfile::default(),
        }
    }

    /// A lexicon with no stop words, rules, aliases or translations.
    pub fn empty() -> Self {
        Self::from_parts(Language::En, HashMap::new(), TranslationTable::default())
    }

    pub fn key_language(&self) -> Language {
        self.key_language
    }

    /// Normalization data for a language (empty if the lexicon has none).
    pub fn profile(&self, language: Language) -> &LanguageProfile {
        self.profiles.get(&language).unwrap_or(&self.empty_profile)
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }
}
