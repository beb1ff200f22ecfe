//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Canonical, order-preserving parameter encoding via `Params`
//! - A pluggable `HttpTransport` (pooled reqwest by default)
//! - Support for common HTTP methods (GET, POST, PUT, DELETE)
//! - Single-attempt JSON decoding with a raw-text fallback
//! - Optional rate-limit and full-header reporting envelopes
//! - Optional admission control on concurrently dispatched requests
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::{Params, RestClient, RestConfig};
//!
//! let client = RestClient::new(RestConfig::new("https://api.binance.com"))?;
//! let query = Params::new().with("symbol", "BTCUSDT").encode();
//! let response = client.get("/api/v3/depth", &query).await?;
//! ```

mod client;
mod error;
mod params;
mod response;
mod transport;

pub use client::{RequestOptions, RestClient, RestConfig, DEFAULT_TIMEOUT};
pub use error::RestError;
pub use params::Params;
pub use response::{Reply, Reporting, ResponseBody, RestResponse};
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport};

pub use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
pub use reqwest::{Method, StatusCode};
