//! Error types for updown API operations.

use thiserror::Error;

use crate::cache::ResolveError;

/// Errors that can occur during updown API operations.
#[derive(Debug, Error)]
pub enum UpdownError {
    /// Configuration is missing or incomplete.
    #[error("updown configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument is missing or invalid; no request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No check carries the requested alias, even after a fresh listing.
    #[error("no check found with alias '{alias}'")]
    AliasNotFound { alias: String },

    /// API request failed with a non-success status.
    #[error("updown API error ({status_code}): {message}")]
    ApiError { message: String, status_code: u16 },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl UpdownError {
    /// HTTP status code of the failed response, if the error came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => Some(*status_code),
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this is the alias-resolution miss.
    pub fn is_alias_not_found(&self) -> bool {
        matches!(self, Self::AliasNotFound { .. })
    }
}

impl From<ResolveError<UpdownError>> for UpdownError {
    fn from(err: ResolveError<UpdownError>) -> Self {
        match err {
            ResolveError::NotFound { alias } => Self::AliasNotFound { alias },
            ResolveError::FetchFailed(cause) => cause,
        }
    }
}

/// Result type alias for updown operations.
pub type Result<T> = core::result::Result<T, UpdownError>;
