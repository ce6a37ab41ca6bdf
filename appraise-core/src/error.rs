//! Error type shared by every layer of appraise-core.

use thiserror::Error;

/// Crate error type.
///
/// Network variants (`Http`, `Api`, `Json`, `MissingToken`) never escape the
/// controllers as failures; they are folded into controller state. Storage
/// variants propagate to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be sent or no response arrived (includes timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be a base: {0}")]
    InvalidBaseUrl(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// `detail` holds the server's `detail` field when it was a plain string.
    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error detail from the response body, if any.
        detail: Option<String>,
    },

    /// A 2xx auth response did not carry an access token.
    #[error("response did not contain an access token")]
    MissingToken,

    /// A numeric review field received text that is not a finite number.
    #[error("{field}: '{input}' is not a number")]
    InvalidNumber {
        /// Human-readable field label.
        field: &'static str,
        /// The rejected input, verbatim.
        input: String,
    },

    /// Direct rusqlite failure.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failure reported by the async connection wrapper.
    #[error("database error: {0}")]
    Db(#[from] tokio_rusqlite::Error),
}

/// Result type alias for appraise-core operations.
pub type Result<T> = std::result::Result<T, Error>;
