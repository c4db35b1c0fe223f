//! YAML loading for hand-curated lexicons.
//!
//! A lexicon is either a single `.yaml` file or a directory of them, merged
//! in file-name order.

use std::collections::HashMap;
use std::path::Path;

use picword_core::Language;
use thiserror::Error;

use crate::model::{LanguageProfile, Lexicon, LexiconFile, TranslationTable};
use crate::normalize::canonical_form;
use crate::rules::RuleTable;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Lexicon not found: {0}")]
    NotFound(String),
    #[error("Rule {index} for {language} has no pattern or an empty result")]
    InvalidRule { language: Language, index: usize },
    #[error("'{value}' ({language}) does not normalize to a stable key")]
    UnstableRule { language: Language, value: String },
}

/// Load a lexicon from a file or a directory of YAML files.
pub fn load_lexicon(path: &Path) -> Result<Lexicon, LexiconError> {
    if !path.exists() {
        return Err(LexiconError::NotFound(path.display().to_string()));
    }
    let file = if path.is_dir() {
        load_yaml_dir(path)?
    } else {
        load_yaml_file(path)?
    };
    compile(file)
}

/// Parse a lexicon from YAML text (`origin` is used in error messages).
pub fn parse_lexicon(contents: &str, origin: &str) -> Result<Lexicon, LexiconError> {
    let file: LexiconFile = serde_yml::from_str(contents).map_err(|e| LexiconError::Parse {
        path: origin.to_string(),
        source: e,
    })?;
    compile(file)
}

fn load_yaml_file(path: &Path) -> Result<LexiconFile, LexiconError> {
    let contents = std::fs::read_to_string(path).map_err(|e| LexiconError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    // An empty document deserializes to null; treat it as an empty lexicon.
    if contents.trim().is_empty() {
        return Ok(LexiconFile::default());
    }
    serde_yml::from_str(&contents).map_err(|e| LexiconError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn load_yaml_dir(dir: &Path) -> Result<LexiconFile, LexiconError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| LexiconError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut merged = LexiconFile::default();
    for entry in entries {
        log::debug!("Loading lexicon file {}", entry.path().display());
        merged.merge(load_yaml_file(&entry.path())?);
    }
    Ok(merged)
}

/// Compile a parsed document and check that every rule result and alias
/// target settles under normalization.
pub fn compile(file: LexiconFile) -> Result<Lexicon, LexiconError> {
    let key_language = file.key_language.unwrap_or(Language::En);

    let mut profiles = HashMap::new();
    for (language, section) in &file.languages {
        let mut stop_phrases: Vec<Vec<String>> = Vec::new();
        for word in &section.stop_words {
            let phrase: Vec<String> = canonical_form(word)
                .split('_')
                .map(str::to_string)
                .filter(|s| !s.is_empty())
                .collect();
            if !phrase.is_empty() && !stop_phrases.contains(&phrase) {
                stop_phrases.push(phrase);
            }
        }
        stop_phrases.sort_by(|a, b| b.len().cmp(&a.len()));

        let rules = RuleTable::compile(&section.rules).map_err(|index| LexiconError::InvalidRule {
            language: *language,
            index,
        })?;

        let aliases = section
            .aliases
            .iter()
            .map(|(root, key)| (canonical_form(root), canonical_form(key)))
            .filter(|(root, key)| !root.is_empty() && !key.is_empty())
            .collect();

        profiles.insert(
            *language,
            LanguageProfile {
                stop_phrases,
                rules,
                aliases,
            },
        );
    }

    let translations = file
        .translations
        .into_iter()
        .map(|(key, names)| (canonical_form(&key), names))
        .filter(|(key, _)| !key.is_empty())
        .collect();

    let lexicon = Lexicon::from_parts(key_language, profiles, TranslationTable::new(translations));
    validate(&lexicon)?;

    log::debug!(
        "Lexicon ready: key language {}, {} languages, {} translated keys",
        lexicon.key_language(),
        lexicon.profiles.len(),
        lexicon.translations().len()
    );
    Ok(lexicon)
}

fn validate(lexicon: &Lexicon) -> Result<(), LexiconError> {
    for (language, profile) in &lexicon.profiles {
        let targets = profile
            .rules
            .iter()
            .map(|rule| rule.result.as_str())
            .chain(profile.aliases.values().map(String::as_str));
        for value in targets {
            let normalized = lexicon.normalize(value, *language);
            if !normalized.settled || normalized.key.is_none() {
                return Err(LexiconError::UnstableRule {
                    language: *language,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/yaml_tests.rs"]
mod tests;
