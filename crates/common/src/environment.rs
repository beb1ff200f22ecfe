//! Binance REST endpoints.

use std::fmt;
use std::str::FromStr;

/// Which Binance deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinanceEnvironment {
    /// Production environment (real money).
    #[default]
    Production,
    /// Spot testnet (fake money for testing).
    Testnet,
    /// Public market-data mirror. Serves unauthenticated reads only.
    MarketData,
}

impl BinanceEnvironment {
    /// REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.binance.com",
            Self::Testnet => "https://testnet.binance.vision",
            Self::MarketData => "https://data-api.binance.vision",
        }
    }

    /// Whether signed endpoints are reachable on this deployment.
    pub fn supports_signed(&self) -> bool {
        !matches!(self, Self::MarketData)
    }

    /// Load environment from `BINANCE_ENVIRONMENT` env var.
    ///
    /// Returns `Production` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var("BINANCE_ENVIRONMENT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Testnet => write!(f, "testnet"),
            Self::MarketData => write!(f, "market-data"),
        }
    }
}

impl FromStr for BinanceEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "mainnet" => Ok(Self::Production),
            "testnet" | "test" => Ok(Self::Testnet),
            "market-data" | "data" | "data-api" => Ok(Self::MarketData),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Error parsing environment string.
#[derive(Debug, Clone)]
pub struct ParseEnvironmentError(String);

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid environment '{}', expected 'production', 'testnet' or 'market-data'",
            self.0
        )
    }
}

impl std::error::Error for ParseEnvironmentError {}
