use std::path::PathBuf;

use picword_catalog::CatalogError;
use picword_lexicon::LexiconError;
use thiserror::Error;

/// Errors that stop a category build.
///
/// Per-entry problems (bad labels, undecodable images, collisions, missing
/// translations) never surface here; they are recorded in the run report.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Cannot read job file {path}: {source}")]
    JobIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid job file {path}: {source}")]
    JobParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid job {path}: {message}")]
    Job { path: PathBuf, message: String },

    #[error("Source folder not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Cannot read source folder {path}: {source}")]
    SourceIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl ImportError {
    pub fn job(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Job {
            path: path.into(),
            message: message.into(),
        }
    }
}
