//! Binance REST API error types.

use auth::AuthError;
use rest_client::{HeaderMap, RestError, RestResponse};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when interacting with the Binance REST API.
#[derive(Debug, Error)]
pub enum BinanceRestError {
    /// Signing or api-key requirements were not met before the call.
    #[error("Credential error: {0}")]
    Credential(#[from] AuthError),

    /// The exchange rejected the request (HTTP 4xx).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The exchange failed to process the request (HTTP 5xx).
    #[error("Server error {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// REST client error (network, timeout, etc.).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Endpoint arguments were rejected before anything was sent.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BinanceRestError {
    /// HTTP status of a classified response error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client(err) => Some(err.status),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Binance error code, when the exchange supplied one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Client(err) => err.code,
            _ => None,
        }
    }

    /// Check if this error indicates the operation could be retried.
    ///
    /// Informational only; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rest(rest_err) => rest_err.is_retryable(),
            Self::Server { .. } => true,
            Self::Client(err) => {
                err.is_rate_limited() || matches!(err.code, Some(-1000 | -1001 | -1003 | -1015 | -1016))
            }
            _ => false,
        }
    }
}

/// A 4xx response from Binance.
///
/// Binance returns errors in the format `{"code": -1121, "msg": "Invalid symbol."}`.
/// When the body does not have that shape, `code` and `message` are `None` and
/// the raw text is still available in `body`.
#[derive(Debug, Clone)]
pub struct ClientError {
    pub status: u16,
    pub code: Option<i64>,
    pub message: Option<String>,
    /// Optional structured `data` field of the error body.
    pub data: Option<Value>,
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: String,
}

impl ClientError {
    /// Build from a 4xx response, reusing its already decoded body.
    pub fn from_response(response: RestResponse) -> Self {
        let parsed = response.body.as_json().and_then(|value| {
            let code = value.get("code")?.as_i64()?;
            let message = value.get("msg")?.as_str()?.to_string();
            Some((code, message, value.get("data").cloned()))
        });

        let (code, message, data) = match parsed {
            Some((code, message, data)) => (Some(code), Some(message), data),
            None => (None, None, None),
        };

        Self {
            status: response.status.as_u16(),
            code,
            message,
            data,
            headers: response.headers,
            body: response.text,
        }
    }

    /// HTTP 429 (request rate exceeded) or 418 (IP banned).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.status, 418 | 429)
    }

    /// The referenced order does not exist.
    pub fn is_order_not_found(&self) -> bool {
        matches!(self.code, Some(-2011 | -2013))
    }

    /// The account balance cannot cover the order.
    pub fn is_insufficient_balance(&self) -> bool {
        self.code == Some(-2010)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => {
                write!(f, "Binance API error {} ({}): {}", code, self.status, message)
            }
            _ => write!(f, "Binance API error ({}): {}", self.status, self.body),
        }
    }
}

impl std::error::Error for ClientError {}
