//! Binance spot REST API client.
//!
//! This crate provides a typed client for the Binance REST API with:
//!
//! - **Request signing**: HMAC-SHA256, Ed25519 or RSA, chosen from the configured credentials
//! - **Time synchronization**: Adjusts for clock skew between local and server time
//! - **Error classification**: 4xx responses become `ClientError` with Binance's `code` / `msg`,
//!   5xx responses become `Server` errors with the raw body
//! - **Header reporting**: Optional rate-limit usage and full headers alongside each body
//! - **Endpoint groups**: `market()`, `wallet()` and `trade()` borrow one shared session
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ApiCredentials;
//! use binance_rest::{BinanceClient, BinanceConfig, NewOrder, NewOrderResponse, OrderSide, TimeInForce};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let client = BinanceClient::new(credentials, BinanceConfig::from_env()?)?;
//!
//! // Sync time with Binance server
//! client.sync_time().await?;
//!
//! let depth = client.market().depth("BTCUSDT", Some(5)).await?.into_value();
//!
//! let order = NewOrder::limit("BTCUSDT", OrderSide::Buy, dec!(0.001), dec!(50000), TimeInForce::GTC)
//!     .with_client_order_id("my_order_123");
//! let placed: NewOrderResponse = client.trade().new_order(&order).await?.json()?;
//!
//! client.close();
//! ```

mod classify;
mod client;
mod config;
mod error;
mod responses;
mod spot;

pub use classify::classify;
pub use client::BinanceClient;
pub use config::{BinanceConfig, API_KEY_HEADER, LIMIT_USAGE_HEADER_PREFIXES, REQUEST_TIMEOUT, USER_AGENT};
pub use error::{BinanceRestError, ClientError};
pub use responses::{
    AccountResponse, AvgPriceResponse, Balance, NewOrderResponse, OrderFill, OrderQueryResponse,
    ServerTimeResponse, SystemStatusResponse, TickerPrice,
};
pub use spot::{
    NewOrder, OrderRef, OrderSide, OrderType, SpotMarket, SpotTrade, SpotWallet, TimeInForce,
};

pub use auth::{ApiCredentials, AuthError, SignatureAlgorithm};
pub use common::BinanceEnvironment;
pub use rest_client::{Method, Params, Reply, RequestOptions, ResponseBody, RestError};
