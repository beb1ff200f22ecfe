//! Client configuration.

use crate::error::BinanceRestError;
use auth::ApiCredentials;
use common::BinanceEnvironment;
use rest_client::{HeaderMap, HeaderValue, Reporting, RestConfig};
use std::time::Duration;

/// Request timeout for Binance API calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Value of the `User-Agent` header.
pub const USER_AGENT: &str = concat!("binance-connector-rust/", env!("CARGO_PKG_VERSION"));

/// Header carrying the api key on every request.
pub const API_KEY_HEADER: &str = "x-mbx-apikey";

/// Header-name prefixes reported under `limit_usage`.
pub const LIMIT_USAGE_HEADER_PREFIXES: [&str; 3] =
    ["x-mbx-used-weight", "x-mbx-order-count", "x-sapi-used"];

/// Settings for a [`crate::BinanceClient`] session.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub base_url: String,
    /// Default timeout for every request; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
    /// Return rate-limit headers alongside each response body.
    pub show_limit_usage: bool,
    /// Return all response headers alongside each response body.
    pub show_header: bool,
    /// Maximum number of requests dispatched at once.
    pub max_in_flight: Option<usize>,
    /// Span every request is recorded under.
    pub span: Option<tracing::Span>,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self::for_environment(BinanceEnvironment::Production)
    }
}

impl BinanceConfig {
    pub fn for_environment(environment: BinanceEnvironment) -> Self {
        Self {
            base_url: environment.rest_base_url().to_string(),
            timeout: Some(REQUEST_TIMEOUT),
            proxy: None,
            show_limit_usage: false,
            show_header: false,
            max_in_flight: None,
            span: None,
        }
    }

    /// Load settings from the environment (and a `.env` file if present).
    ///
    /// Reads `BINANCE_ENVIRONMENT`, `BINANCE_BASE_URL`, `BINANCE_TIMEOUT_MS`,
    /// `BINANCE_PROXY`, `BINANCE_SHOW_LIMIT_USAGE`, `BINANCE_SHOW_HEADER` and
    /// `BINANCE_MAX_IN_FLIGHT`. Unset variables keep their defaults.
    ///
    /// # Errors
    /// Returns `BinanceRestError::Config` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, BinanceRestError> {
        dotenvy::dotenv().ok();

        let mut config = Self::for_environment(BinanceEnvironment::from_env());

        if let Some(base_url) = env_var("BINANCE_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(ms) = env_parse::<u64>("BINANCE_TIMEOUT_MS")? {
            config.timeout = Some(Duration::from_millis(ms));
        }
        config.proxy = env_var("BINANCE_PROXY");
        if let Some(flag) = env_parse::<bool>("BINANCE_SHOW_LIMIT_USAGE")? {
            config.show_limit_usage = flag;
        }
        if let Some(flag) = env_parse::<bool>("BINANCE_SHOW_HEADER")? {
            config.show_header = flag;
        }
        config.max_in_flight = env_parse::<usize>("BINANCE_MAX_IN_FLIGHT")?;

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_limit_usage(mut self, show: bool) -> Self {
        self.show_limit_usage = show;
        self
    }

    pub fn with_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = Some(max);
        self
    }

    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Session settings for the dispatcher, including the default headers.
    pub(crate) fn rest_config(
        &self,
        credentials: &ApiCredentials,
    ) -> Result<RestConfig, BinanceRestError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json;charset=utf-8"),
        );
        headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));

        if let Some(api_key) = credentials.api_key() {
            let mut value = HeaderValue::from_str(api_key)
                .map_err(|_| BinanceRestError::Config("api key is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        Ok(RestConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            proxy: self.proxy.clone(),
            default_headers: headers,
            reporting: Reporting {
                show_limit_usage: self.show_limit_usage,
                show_header: self.show_header,
                limit_header_prefixes: LIMIT_USAGE_HEADER_PREFIXES
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
            },
            max_in_flight: self.max_in_flight,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>, BinanceRestError> {
    env_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| BinanceRestError::Config(format!("{name} has invalid value '{raw}'")))
        })
        .transpose()
}
