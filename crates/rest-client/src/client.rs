//! Request dispatch over a shared connection pool.

use crate::error::RestError;
use crate::response::{Reporting, RestResponse};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Session-wide settings for a [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL for all requests (e.g., "https://api.binance.com")
    pub base_url: String,
    /// Default timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Proxy URL for every request of the session.
    pub proxy: Option<String>,
    /// Headers attached to every request.
    pub default_headers: HeaderMap,
    pub reporting: Reporting,
    /// Upper bound on requests dispatched at once. Excess requests wait.
    pub max_in_flight: Option<usize>,
}

impl RestConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            proxy: None,
            default_headers: HeaderMap::new(),
            reporting: Reporting::default(),
            max_in_flight: None,
        }
    }
}

/// Per-call overrides of the session settings.
///
/// Only the timeout can be overridden. The proxy is bound when the connection
/// pool is built, so it is a session setting (`RestConfig::proxy`) and applies
/// to every request of the session.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Generic REST client for making HTTP requests.
///
/// Owns the connection pool for its whole lifetime. Any number of requests
/// may be in flight at once through `&self`; the pool is released when the
/// client is closed or dropped, which the borrow checker only allows once
/// every in-flight request has finished or been cancelled.
pub struct RestClient {
    transport: Box<dyn HttpTransport>,
    base_url: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    reporting: Reporting,
    admission: Option<Semaphore>,
}

impl RestClient {
    /// Create a new REST client on a pooled reqwest transport.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        let transport = ReqwestTransport::new(config.timeout, config.proxy.as_deref())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a REST client on a caller-supplied transport.
    pub fn with_transport(config: RestConfig, transport: impl HttpTransport + 'static) -> Self {
        tracing::debug!(
            base_url = %config.base_url,
            timeout = ?config.timeout,
            max_in_flight = ?config.max_in_flight,
            "HTTP session opened"
        );

        Self {
            transport: Box::new(transport),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers: config.default_headers,
            timeout: config.timeout,
            reporting: config.reporting,
            admission: config.max_in_flight.map(Semaphore::new),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn reporting(&self) -> &Reporting {
        &self.reporting
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Make a GET request.
    pub async fn get(&self, path: &str, query: &str) -> Result<RestResponse, RestError> {
        self.send(Method::GET, path, query, &RequestOptions::default())
            .await
    }

    /// Make a POST request.
    pub async fn post(&self, path: &str, query: &str) -> Result<RestResponse, RestError> {
        self.send(Method::POST, path, query, &RequestOptions::default())
            .await
    }

    /// Make a PUT request.
    pub async fn put(&self, path: &str, query: &str) -> Result<RestResponse, RestError> {
        self.send(Method::PUT, path, query, &RequestOptions::default())
            .await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, path: &str, query: &str) -> Result<RestResponse, RestError> {
        self.send(Method::DELETE, path, query, &RequestOptions::default())
            .await
    }

    /// Execute one request.
    ///
    /// # Arguments
    /// * `method` - HTTP verb
    /// * `path` - Request path (e.g., "/api/v3/time"), joined to the base URL
    /// * `query` - Already encoded (and possibly signed) query string, without '?'
    /// * `options` - Per-request overrides
    ///
    /// Every status code is returned as a response; only transport failures
    /// are errors. Nothing is retried.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &str,
        options: &RequestOptions,
    ) -> Result<RestResponse, RestError> {
        let _permit = match &self.admission {
            // The gate is never closed, so acquire cannot fail.
            Some(gate) => gate.acquire().await.ok(),
            None => None,
        };

        let url = self.build_url(path, query);
        tracing::debug!(method = %method, url = %url, "HTTP request");

        let request = HttpRequest {
            method,
            url,
            headers: self.default_headers.clone(),
            timeout: options.timeout.or(self.timeout),
        };

        let response = self.transport.execute(request).await?;

        tracing::debug!(
            status = response.status.as_u16(),
            body = %response.text,
            "Raw response from server"
        );

        Ok(response)
    }

    /// Release the connection pool.
    pub fn close(self) {
        tracing::debug!(base_url = %self.base_url, "HTTP session closed");
    }

    /// Build a full URL from path and optional query string.
    fn build_url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("reporting", &self.reporting)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures_util::future::join_all;
    use reqwest::header::HeaderValue;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every request and answers with a fixed body.
    #[derive(Default, Clone)]
    struct RecordingTransport {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
        in_flight: Arc<AtomicUsize>,
        max_seen: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn execute(&self, request: HttpRequest) -> Result<RestResponse, RestError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            self.requests.lock().unwrap().push(request);
            Ok(RestResponse::new(
                StatusCode::OK,
                HeaderMap::new(),
                "{}".into(),
            ))
        }
    }

    fn client_with(transport: RecordingTransport, config: RestConfig) -> RestClient {
        RestClient::with_transport(config, transport)
    }

    #[test]
    fn test_build_url_no_query() {
        let client = RestClient::new(RestConfig::new("https://api.example.com")).unwrap();
        assert_eq!(
            client.build_url("/api/v1/time", ""),
            "https://api.example.com/api/v1/time"
        );
    }

    #[test]
    fn test_build_url_with_query() {
        let client = RestClient::new(RestConfig::new("https://api.example.com")).unwrap();
        assert_eq!(
            client.build_url("/api/v1/order", "symbol=BTCUSDT&side=BUY"),
            "https://api.example.com/api/v1/order?symbol=BTCUSDT&side=BUY"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let client = RestClient::new(RestConfig::new("https://api.example.com/")).unwrap();
        assert_eq!(
            client.build_url("/api/v1/time", ""),
            "https://api.example.com/api/v1/time"
        );
    }

    #[tokio::test]
    async fn test_verbs_and_default_headers() {
        let transport = RecordingTransport::default();
        let mut config = RestConfig::new("https://api.example.com");
        config
            .default_headers
            .insert("x-mbx-apikey", HeaderValue::from_static("key"));
        let client = client_with(transport.clone(), config);

        client.get("/a", "x=1").await.unwrap();
        client.post("/b", "").await.unwrap();
        client.put("/c", "").await.unwrap();
        client.delete("/d", "").await.unwrap();

        let requests = transport.requests.lock().unwrap();
        let methods: Vec<Method> = requests.iter().map(|r| r.method.clone()).collect();
        assert_eq!(
            methods,
            vec![Method::GET, Method::POST, Method::PUT, Method::DELETE]
        );
        assert_eq!(requests[0].url, "https://api.example.com/a?x=1");
        assert!(requests
            .iter()
            .all(|r| r.headers.get("x-mbx-apikey").unwrap() == "key"));
    }

    #[tokio::test]
    async fn test_timeout_override() {
        let transport = RecordingTransport::default();
        let client = client_with(transport.clone(), RestConfig::new("https://api.example.com"));

        client.get("/a", "").await.unwrap();
        client
            .send(
                Method::GET,
                "/b",
                "",
                &RequestOptions::with_timeout(Duration::from_millis(250)),
            )
            .await
            .unwrap();

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].timeout, Some(DEFAULT_TIMEOUT));
        assert_eq!(requests[1].timeout, Some(Duration::from_millis(250)));
    }

    #[tokio::test]
    async fn test_admission_limit_bounds_in_flight() {
        let transport = RecordingTransport::default();
        let mut config = RestConfig::new("https://api.example.com");
        config.max_in_flight = Some(2);
        let client = client_with(transport.clone(), config);

        let calls = (0..8).map(|_| client.get("/a", ""));
        let results = join_all(calls).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert!(transport.max_seen.load(Ordering::SeqCst) <= 2);
        assert_eq!(transport.requests.lock().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_admission_survives_cancelled_request() {
        let transport = RecordingTransport::default();
        let mut config = RestConfig::new("https://api.example.com");
        config.max_in_flight = Some(1);
        let client = client_with(transport.clone(), config);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(1), client.get("/slow", "")).await;
        assert!(cancelled.is_err());

        let next = tokio::time::timeout(Duration::from_secs(1), client.get("/a", "")).await;
        assert!(matches!(next, Ok(Ok(_))));

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://api.example.com/a");
    }
}
