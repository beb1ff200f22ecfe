//! The HTTP transport seam.
//!
//! `RestClient` talks to the network only through [`HttpTransport`], so tests
//! can swap the pooled reqwest client for an in-process fake.

use crate::error::RestError;
use crate::response::RestResponse;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::time::Duration;

/// A fully resolved request, ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including the encoded query string.
    pub url: String,
    pub headers: HeaderMap,
    pub timeout: Option<Duration>,
}

/// Executes one HTTP request and reads the body once.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<RestResponse, RestError>;
}

/// Connection-pooling transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build the pooled client.
    ///
    /// # Arguments
    /// * `timeout` - Default total timeout for every request
    /// * `proxy` - Optional proxy URL applied to all schemes
    ///
    /// # Errors
    /// Returns an error if the proxy URL is invalid or the client cannot be built.
    pub fn new(timeout: Option<Duration>, proxy: Option<&str>) -> Result<Self, RestError> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy) = proxy {
            let proxy =
                reqwest::Proxy::all(proxy).map_err(|e| RestError::RequestBuild(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RestResponse, RestError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        Ok(RestResponse::new(status, headers, text))
    }
}
