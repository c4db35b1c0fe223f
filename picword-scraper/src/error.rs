/// Errors that can occur while crawling pages or fetching assets.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an HTML page (content type: {content_type})")]
    NotHtml { url: String, content_type: String },

    #[error("Could not decode image for '{label}': {message}")]
    Decode { label: String, message: String },

    #[error("Label '{0}' has no usable characters")]
    InvalidLabel(String),

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn decode(label: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            label: label.into(),
            message: message.to_string(),
        }
    }

    /// Network or HTTP-level failure (recovered by skipping the node or entry).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::NotHtml { .. }
        )
    }
}
