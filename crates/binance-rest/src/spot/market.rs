//! Public market data endpoints.

use super::{non_empty, require};
use crate::client::BinanceClient;
use crate::error::BinanceRestError;
use rest_client::{Method, Params, Reply};

/// Market data group. Everything here is unsigned.
#[derive(Debug, Clone, Copy)]
pub struct SpotMarket<'a> {
    client: &'a BinanceClient,
}

impl<'a> SpotMarket<'a> {
    pub(crate) fn new(client: &'a BinanceClient) -> Self {
        Self { client }
    }

    /// GET /api/v3/ping
    pub async fn ping(&self) -> Result<Reply, BinanceRestError> {
        self.client.query("/api/v3/ping", Params::new()).await
    }

    /// GET /api/v3/time
    pub async fn time(&self) -> Result<Reply, BinanceRestError> {
        self.client.query("/api/v3/time", Params::new()).await
    }

    /// GET /api/v3/exchangeInfo
    ///
    /// `symbol` and `symbols` are mutually exclusive, and `permissions` cannot
    /// be combined with either.
    pub async fn exchange_info(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
        permissions: Option<&[&str]>,
    ) -> Result<Reply, BinanceRestError> {
        let symbol = symbol.filter(|s| !s.is_empty());
        let symbols = non_empty(symbols);
        let permissions = non_empty(permissions);

        if symbol.is_some() && symbols.is_some() {
            return Err(BinanceRestError::InvalidParameter(
                "symbol and symbols cannot be sent together".into(),
            ));
        }
        if permissions.is_some() && (symbol.is_some() || symbols.is_some()) {
            return Err(BinanceRestError::InvalidParameter(
                "permissions cannot be sent together with symbol or symbols".into(),
            ));
        }

        let params = Params::new()
            .with_opt("symbol", symbol)
            .with_opt("symbols", symbols.map(|s| s.to_vec()))
            .with_opt("permissions", permissions.map(|p| p.to_vec()));

        self.client.query("/api/v3/exchangeInfo", params).await
    }

    /// GET /api/v3/depth
    pub async fn depth(&self, symbol: &str, limit: Option<u32>) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.client.query("/api/v3/depth", params).await
    }

    /// GET /api/v3/trades
    pub async fn trades(&self, symbol: &str, limit: Option<u32>) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        let params = Params::new().with("symbol", symbol).with_opt("limit", limit);
        self.client.query("/api/v3/trades", params).await
    }

    /// GET /api/v3/historicalTrades
    ///
    /// Requires an api key but is not signed.
    pub async fn historical_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
        from_id: Option<u64>,
    ) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        let params = Params::new()
            .with("symbol", symbol)
            .with_opt("limit", limit)
            .with_opt("fromId", from_id);
        self.client
            .limit_request(Method::GET, "/api/v3/historicalTrades", params)
            .await
    }

    /// GET /api/v3/klines
    ///
    /// `extra` carries the optional `startTime`, `endTime`, `timeZone` and
    /// `limit` arguments.
    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        extra: Params,
    ) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        require(interval, "interval")?;

        let mut params = Params::new()
            .with("symbol", symbol)
            .with("interval", interval);
        params.extend(extra);

        self.client.query("/api/v3/klines", params).await
    }

    /// GET /api/v3/avgPrice
    pub async fn avg_price(&self, symbol: &str) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        self.client
            .query("/api/v3/avgPrice", Params::new().with("symbol", symbol))
            .await
    }

    /// GET /api/v3/aggTrades
    ///
    /// `extra` carries the optional `fromId`, `startTime`, `endTime` and
    /// `limit` arguments.
    pub async fn agg_trades(&self, symbol: &str, extra: Params) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        let mut params = Params::new().with("symbol", symbol);
        params.extend(extra);
        self.client.query("/api/v3/aggTrades", params).await
    }

    /// GET /api/v3/uiKlines
    ///
    /// Same arguments as [`klines`](Self::klines), tuned for chart display.
    pub async fn ui_klines(
        &self,
        symbol: &str,
        interval: &str,
        extra: Params,
    ) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        require(interval, "interval")?;

        let mut params = Params::new()
            .with("symbol", symbol)
            .with("interval", interval);
        params.extend(extra);

        self.client.query("/api/v3/uiKlines", params).await
    }

    /// GET /api/v3/ticker/24hr
    pub async fn ticker_24hr(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
        extra: Params,
    ) -> Result<Reply, BinanceRestError> {
        let mut params = symbol_selection(symbol, symbols)?;
        params.extend(extra);
        self.client.query("/api/v3/ticker/24hr", params).await
    }

    /// GET /api/v3/ticker/price
    ///
    /// With neither argument, prices for every symbol are returned.
    pub async fn ticker_price(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
    ) -> Result<Reply, BinanceRestError> {
        let params = symbol_selection(symbol, symbols)?;
        self.client.query("/api/v3/ticker/price", params).await
    }

    /// GET /api/v3/ticker/bookTicker
    pub async fn book_ticker(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
    ) -> Result<Reply, BinanceRestError> {
        let params = symbol_selection(symbol, symbols)?;
        self.client.query("/api/v3/ticker/bookTicker", params).await
    }

    /// GET /api/v3/ticker
    ///
    /// `extra` carries `windowSize` (defaults to `1d` server side) and `type`.
    pub async fn rolling_window_ticker(
        &self,
        symbol: Option<&str>,
        symbols: Option<&[&str]>,
        extra: Params,
    ) -> Result<Reply, BinanceRestError> {
        let mut params = symbol_selection(symbol, symbols)?;
        params.extend(extra);
        self.client.query("/api/v3/ticker", params).await
    }
}

/// `symbol` or `symbols`, never both. Empty values count as absent.
fn symbol_selection(
    symbol: Option<&str>,
    symbols: Option<&[&str]>,
) -> Result<Params, BinanceRestError> {
    let symbol = symbol.filter(|s| !s.is_empty());
    let symbols = non_empty(symbols);

    if symbol.is_some() && symbols.is_some() {
        return Err(BinanceRestError::InvalidParameter(
            "symbol and symbols cannot be sent together".into(),
        ));
    }

    Ok(Params::new()
        .with_opt("symbol", symbol)
        .with_opt("symbols", symbols.map(|s| s.to_vec())))
}
