//! Consistency checks over an emitted category.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use picword_core::Language;

use crate::emitter::read_word_list;
use crate::error::CatalogError;
use crate::layout::{image_path, word_list_path};
use crate::registry::Registry;
use crate::store::CatalogStore;

/// One problem found in a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyProblem {
    MissingWordList { language: Language, path: String },
    BadWordList { language: Language, message: String },
    CountMismatch {
        language: Language,
        expected: usize,
        found: usize,
    },
    AssetMismatch {
        language: Language,
        number: u32,
        expected: String,
        found: String,
    },
    MissingAsset { file: String },
}

impl fmt::Display for VerifyProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWordList { language, path } => {
                write!(f, "{language}: word list {path} is missing")
            }
            Self::BadWordList { language, message } => write!(f, "{language}: {message}"),
            Self::CountMismatch {
                language,
                expected,
                found,
            } => write!(f, "{language}: {found} entries, expected {expected}"),
            Self::AssetMismatch {
                language,
                number,
                expected,
                found,
            } => write!(f, "{language}: entry {number} names {found}, expected {expected}"),
            Self::MissingAsset { file } => write!(f, "image {file} is missing"),
        }
    }
}

/// Outcome of [`verify_category`].
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Entry count per language whose list could be read.
    pub counts: BTreeMap<Language, usize>,
    pub assets_checked: usize,
    pub problems: Vec<VerifyProblem>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check a registered category's word lists and images.
///
/// Every list must parse with dense `1..=N` numbering, all lists must have
/// the same length and name the same asset per number, and every named
/// asset must exist under the category's image folder. Problems are
/// collected; only an unreadable registry or an unknown id is an error.
pub fn verify_category<S: CatalogStore + ?Sized>(
    store: &S,
    category_id: &str,
) -> Result<VerifyReport, CatalogError> {
    let registry = Registry::load(store)?;
    let descriptor = registry
        .get(category_id)?
        .ok_or_else(|| CatalogError::UnknownCategory(category_id.to_string()))?;

    let mut report = VerifyReport::default();
    // Asset per number from the first readable list.
    let mut reference: Option<(Language, Vec<String>)> = None;
    let mut assets = BTreeSet::new();

    for (&language, word_file) in &descriptor.word_files {
        let lines = match read_word_list(store, language, word_file) {
            Ok(Some(lines)) => lines,
            Ok(None) => {
                report.problems.push(VerifyProblem::MissingWordList {
                    language,
                    path: store.display(&word_list_path(language, word_file)),
                });
                continue;
            }
            Err(e @ (CatalogError::WordList { .. } | CatalogError::NumberingGap { .. })) => {
                report.problems.push(VerifyProblem::BadWordList {
                    language,
                    message: e.to_string(),
                });
                continue;
            }
            Err(e) => return Err(e),
        };
        report.counts.insert(language, lines.len());

        match &reference {
            None => {
                reference = Some((language, lines.iter().map(|l| l.asset.clone()).collect()));
            }
            Some((_, expected)) => {
                if expected.len() != lines.len() {
                    report.problems.push(VerifyProblem::CountMismatch {
                        language,
                        expected: expected.len(),
                        found: lines.len(),
                    });
                }
                for (line, want) in lines.iter().zip(expected) {
                    if line.asset != *want {
                        report.problems.push(VerifyProblem::AssetMismatch {
                            language,
                            number: line.number,
                            expected: want.clone(),
                            found: line.asset.clone(),
                        });
                    }
                }
            }
        }
        assets.extend(lines.into_iter().map(|l| l.asset));
    }

    for asset in &assets {
        if !store.exists(&image_path(&descriptor.image_folder, asset)) {
            report.problems.push(VerifyProblem::MissingAsset {
                file: format!("{}/{asset}", descriptor.image_folder),
            });
        }
    }
    report.assets_checked = assets.len();

    Ok(report)
}
