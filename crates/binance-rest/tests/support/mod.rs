//! In-process transport used by the integration tests.

#![allow(dead_code)]

use rand::Rng;
use rest_client::{HeaderMap, HttpRequest, HttpTransport, RestError, RestResponse, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type Responder = dyn Fn(&HttpRequest) -> (u16, String) + Send + Sync;
pub type Latency = dyn Fn(&HttpRequest) -> Duration + Send + Sync;

/// Records every request, answers through `responder` after a delay,
/// and tracks the peak number of requests in flight.
///
/// Requests are recorded on arrival, so a call cancelled mid-flight still
/// shows up in `requests`.
#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
    latency: Arc<Latency>,
    pub requests: Arc<Mutex<Vec<HttpRequest>>>,
    in_flight: Arc<AtomicUsize>,
    pub peak_in_flight: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new(
        max_latency_ms: u64,
        responder: impl Fn(&HttpRequest) -> (u16, String) + Send + Sync + 'static,
    ) -> Self {
        Self::with_latency(
            move |_| Duration::from_millis(rand::thread_rng().gen_range(0..=max_latency_ms)),
            responder,
        )
    }

    /// Delay chosen per request by `latency`.
    pub fn with_latency(
        latency: impl Fn(&HttpRequest) -> Duration + Send + Sync + 'static,
        responder: impl Fn(&HttpRequest) -> (u16, String) + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Arc::new(responder),
            latency: Arc::new(latency),
            requests: Arc::default(),
            in_flight: Arc::default(),
            peak_in_flight: Arc::default(),
        }
    }

    /// Always answers `status` with `body`, immediately.
    pub fn fixed(status: u16, body: &'static str) -> Self {
        Self::new(0, move |_| (status, body.to_string()))
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RestResponse, RestError> {
        let _slot = InFlight::enter(&self.in_flight, &self.peak_in_flight);
        self.requests.lock().unwrap().push(request.clone());

        let delay = (self.latency)(&request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (status, body) = (self.responder)(&request);

        Ok(RestResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body,
        ))
    }
}

/// Counts a request as in flight until dropped, including on cancellation.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, peak: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Value of `key` in the query string of `url`.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.to_string())
    })
}
