use thiserror::Error;

use picword_catalog::CatalogError;
use picword_import::ImportError;
use picword_lexicon::LexiconError;
use picword_scraper::ScrapeError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Category build failed
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Catalog store error
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Lexicon could not be loaded
    #[error("{0}")]
    Lexicon(#[from] LexiconError),

    /// Crawl or download setup failed
    #[error("{0}")]
    Scrape(#[from] ScrapeError),

    /// Verification found problems
    #[error("Verification failed: {0}")]
    Verify(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn verify(msg: impl Into<String>) -> Self {
        Self::Verify(msg.into())
    }
}
