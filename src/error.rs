//! Error handling for the GHG client

use std::fmt;
use thiserror::Error;

/// A non-2xx response from the API, carrying the HTTP status and the
/// server's `message` field (or the raw body when no message was present)
#[derive(Error, Debug, Clone)]
#[error("API error ({status}): {message}")]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,

    /// Server-provided message, or a fallback when the body had none
    pub message: String,
}

impl ApiError {
    /// Whether this is the session-expiry status handled globally by the client
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Unified error type for the GHG client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or transport errors; the request never completed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with an error status
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Client-side schema check failed; nothing was sent over the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// CSV or PDF assembly failed
    #[error("Export error: {0}")]
    Export(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new export error
    pub fn export<T: fmt::Display>(msg: T) -> Self {
        Error::Export(msg.to_string())
    }

    /// The API error behind this error, if that is what it is
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}
