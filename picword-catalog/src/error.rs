use picword_core::WordListError;

/// Errors from reading or writing the catalog store.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("Category '{0}' is already registered with a different descriptor")]
    DuplicateCategory(String),

    #[error("Category '{0}' is not registered")]
    UnknownCategory(String),

    #[error("Invalid registry {path}: {message}")]
    InvalidRegistry { path: String, message: String },

    #[error("Word list {path}: {source}")]
    WordList {
        path: String,
        source: WordListError,
    },

    #[error("Entry numbers are not dense: expected {expected}, found {found}")]
    NumberingGap { expected: u32, found: u32 },
}

impl CatalogError {
    pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    pub fn json(path: impl std::fmt::Display, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_string(),
            source,
        }
    }

    pub fn invalid_registry(path: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::InvalidRegistry {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
