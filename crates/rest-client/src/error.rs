//! REST client error types.

use thiserror::Error;

/// Transport-level failures: everything below the HTTP status line.
#[derive(Debug, Error)]
pub enum RestError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Failed to deserialize a response body into the requested type.
    #[error("JSON parse error: {0}")]
    Parse(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// Check if this error is retryable.
    ///
    /// Informational only; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RestError::Timeout | RestError::Connection(_))
    }

    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RestError::Timeout)
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if err.is_body() || err.is_decode() {
            RestError::Body(err.to_string())
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
