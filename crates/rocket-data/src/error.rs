//! HTTP client error types.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to build or send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Could not connect to the service.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The service answered 404.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// HTTP error response other than 404.
    #[error("HTTP {status} for {url}")]
    HttpError { status: u16, url: String },

    /// Failed to parse response body.
    #[error("Failed to parse response from {url}: {message}")]
    ParseError { url: String, message: String },

    /// Request timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
