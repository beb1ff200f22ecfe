//! Binance REST API client.

use crate::classify::classify;
use crate::config::BinanceConfig;
use crate::error::BinanceRestError;
use crate::responses::ServerTimeResponse;
use crate::spot::{SpotMarket, SpotTrade, SpotWallet};
use auth::{ApiCredentials, AuthError, RequestSigner};
use rest_client::{HttpTransport, Method, Params, Reply, RequestOptions, RestClient};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::Instrument;

/// Name of the timestamp parameter added to signed requests.
const TIMESTAMP_PARAM: &str = "timestamp";

/// Binance REST API client with authentication support.
///
/// Endpoint groups borrow the client (`client.market()`, `client.wallet()`,
/// `client.trade()`); all of them funnel into `query`, `limit_request` or
/// `sign_request`. The client may be shared by reference across any number of
/// concurrent requests.
pub struct BinanceClient {
    rest: RestClient,
    credentials: ApiCredentials,
    /// Time offset between local clock and Binance server (local - server).
    time_offset_ms: AtomicI64,
    span: tracing::Span,
}

impl BinanceClient {
    /// Open a session on the pooled reqwest transport.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the api key is
    /// not a valid header value.
    pub fn new(credentials: ApiCredentials, config: BinanceConfig) -> Result<Self, BinanceRestError> {
        let rest = RestClient::new(config.rest_config(&credentials)?)?;
        Ok(Self::from_parts(rest, credentials, config))
    }

    /// Open a session on a caller-supplied transport.
    pub fn with_transport(
        credentials: ApiCredentials,
        config: BinanceConfig,
        transport: impl HttpTransport + 'static,
    ) -> Result<Self, BinanceRestError> {
        let rest = RestClient::with_transport(config.rest_config(&credentials)?, transport);
        Ok(Self::from_parts(rest, credentials, config))
    }

    fn from_parts(rest: RestClient, credentials: ApiCredentials, config: BinanceConfig) -> Self {
        let span = config
            .span
            .unwrap_or_else(|| tracing::info_span!("binance_rest"));

        tracing::info!(
            parent: &span,
            base_url = %rest.base_url(),
            api_key = credentials.api_key().unwrap_or("<none>"),
            signature = ?credentials.signature_algorithm(),
            "Binance REST session opened"
        );

        Self {
            rest,
            credentials,
            time_offset_ms: AtomicI64::new(0),
            span,
        }
    }

    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> Option<&str> {
        self.credentials.api_key()
    }

    /// True when both an api key and an api secret are configured.
    pub fn check_credential(&self) -> bool {
        self.credentials.check_credential()
    }

    /// True when signed endpoints can be called.
    pub fn can_sign(&self) -> bool {
        self.credentials.can_sign()
    }

    /// Public market data endpoints.
    pub fn market(&self) -> SpotMarket<'_> {
        SpotMarket::new(self)
    }

    /// Wallet and account status endpoints.
    pub fn wallet(&self) -> SpotWallet<'_> {
        SpotWallet::new(self)
    }

    /// Order placement and query endpoints.
    pub fn trade(&self) -> SpotTrade<'_> {
        SpotTrade::new(self)
    }

    // ========================================================================
    // Time Synchronization
    // ========================================================================

    /// Current offset (local - server) in milliseconds.
    pub fn time_offset_ms(&self) -> i64 {
        self.time_offset_ms.load(Ordering::Relaxed)
    }

    /// Get the current server timestamp adjusted for time offset.
    ///
    /// This returns the estimated current Binance server time based on
    /// the local clock and the calculated time offset.
    pub fn server_timestamp_ms(&self) -> i64 {
        local_timestamp_ms() - self.time_offset_ms()
    }

    /// Synchronize with Binance server time.
    ///
    /// This calculates the offset between the local clock and the server clock.
    /// Should be called on startup and periodically if timestamps are being rejected.
    /// Returns the new offset in milliseconds.
    pub async fn sync_time(&self) -> Result<i64, BinanceRestError> {
        let before = Instant::now();
        let response: ServerTimeResponse = self.market().time().await?.json()?;
        let rtt = before.elapsed().as_millis() as i64;

        let local_time = local_timestamp_ms();

        // Estimate server time at midpoint of request
        let estimated_server_time = response.server_time + (rtt / 2);
        let offset = local_time - estimated_server_time;

        self.time_offset_ms.store(offset, Ordering::Relaxed);

        tracing::info!(
            parent: &self.span,
            server_time = response.server_time,
            local_time = local_time,
            offset_ms = offset,
            rtt_ms = rtt,
            "Time synchronized with Binance server"
        );

        Ok(offset)
    }

    // ========================================================================
    // Request entry points
    // ========================================================================

    /// Unauthenticated GET.
    pub async fn query(&self, path: &str, params: Params) -> Result<Reply, BinanceRestError> {
        self.send_request(Method::GET, path, params, &RequestOptions::default())
            .await
    }

    /// Unsigned request that still requires an api key (MARKET_DATA endpoints).
    pub async fn limit_request(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<Reply, BinanceRestError> {
        if self.credentials.api_key().is_none() {
            return Err(AuthError::MissingApiKey.into());
        }
        self.send_request(method, path, params, &RequestOptions::default())
            .await
    }

    /// Signed request (TRADE / USER_DATA endpoints).
    pub async fn sign_request(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<Reply, BinanceRestError> {
        self.sign_request_with(method, path, params, &RequestOptions::default())
            .await
    }

    /// Signed request with per-call options.
    ///
    /// A fresh timestamp and signature are generated on every call.
    pub async fn sign_request_with(
        &self,
        method: Method,
        path: &str,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Reply, BinanceRestError> {
        let query = self.signed_query(params)?;
        self.dispatch(method, path, query, options).await
    }

    /// Unsigned request with per-call options.
    pub async fn send_request(
        &self,
        method: Method,
        path: &str,
        params: Params,
        options: &RequestOptions,
    ) -> Result<Reply, BinanceRestError> {
        self.dispatch(method, path, params.encode(), options).await
    }

    /// Build the transmitted query for a signed call.
    ///
    /// Adds the server-synchronized `timestamp`, encodes the canonical string
    /// and appends its `signature`.
    ///
    /// # Errors
    /// Returns `AuthError::MissingSigningKey` when neither an api secret nor a
    /// private key is configured.
    pub fn signed_query(&self, mut params: Params) -> Result<String, BinanceRestError> {
        let signer = RequestSigner::new(&self.credentials);
        let algorithm = signer.algorithm()?;

        params.insert(TIMESTAMP_PARAM, self.server_timestamp_ms());
        let canonical = params.encode();

        tracing::trace!(parent: &self.span, %algorithm, query = %canonical, "Signing request");
        Ok(signer.sign_query(&canonical)?)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: String,
        options: &RequestOptions,
    ) -> Result<Reply, BinanceRestError> {
        let response = self
            .rest
            .send(method, path, &query, options)
            .instrument(self.span.clone())
            .await?;

        match classify(response) {
            Ok(response) => Ok(self.rest.reporting().reply(response)),
            Err(err) => {
                tracing::warn!(
                    parent: &self.span,
                    path = %path,
                    status = ?err.status(),
                    code = ?err.code(),
                    error = %err,
                    "Binance request failed"
                );
                Err(err)
            }
        }
    }

    /// Close the session and release the connection pool.
    ///
    /// Dropping the client has the same effect; this makes the release explicit.
    pub fn close(self) {
        tracing::info!(parent: &self.span, base_url = %self.rest.base_url(), "Binance REST session closed");
        self.rest.close();
    }
}

impl std::fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.rest.base_url())
            .field("credentials", &self.credentials)
            .field("time_offset_ms", &self.time_offset_ms())
            .finish()
    }
}

fn local_timestamp_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
