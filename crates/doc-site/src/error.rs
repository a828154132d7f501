//! Error types for index loading and configuration.

use thiserror::Error;

/// Failure to obtain the search index.
///
/// `Clone` so a single cached failure can be handed to every caller of
/// [`IndexLoader::load`](crate::loader::IndexLoader::load).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a response.
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },
    /// The server answered with a non-success status.
    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The body was not a valid search index document.
    #[error("malformed search index: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Failure to read the inline site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be greater than zero")]
    Zero { field: &'static str },
    #[error("`{field}` must be at most {max}")]
    TooLarge { field: &'static str, max: usize },
}
