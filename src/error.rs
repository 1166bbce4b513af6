//! Error types for the Constella client and tools.

use thiserror::Error;

/// Client and tool error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, connection refused, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key cannot be carried in a request header.
    #[error("Invalid API key: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote API answered with a non-success status.
    ///
    /// Displays as the bare message so callers see the remote reason verbatim.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response body, or a generic fallback.
        message: String,
    },

    /// Tool arguments were rejected before any request was made.
    #[error("{0}")]
    InvalidArguments(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidArguments`].
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
