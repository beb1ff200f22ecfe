//! Binance API response types.
//!
//! Decode a [`rest_client::Reply`] into one of these with `reply.json::<T>()`.
//! Binance sends prices and quantities as strings; they are parsed into
//! `Decimal` without going through floating point.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response from GET /api/v3/time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimeResponse {
    pub server_time: i64,
}

/// Response from GET /sapi/v1/system/status.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatusResponse {
    /// 0 = normal, 1 = system maintenance.
    pub status: u8,
    pub msg: String,
}

impl SystemStatusResponse {
    pub fn is_normal(&self) -> bool {
        self.status == 0
    }
}

/// Response from GET /api/v3/avgPrice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgPriceResponse {
    pub mins: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(default)]
    pub close_time: Option<i64>,
}

/// One entry of GET /api/v3/ticker/price.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

/// Response from POST /api/v3/order.
///
/// With `newOrderRespType=ACK` only the identifiers are present; the
/// remaining fields then take their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderResponse {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default)]
    pub order_list_id: i64,
    pub client_order_id: String,
    pub transact_time: i64,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub cummulative_quote_qty: Decimal,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(default, rename = "type")]
    pub order_type: String,
    #[serde(default)]
    pub side: String,
    /// Fills included when using newOrderRespType=FULL
    #[serde(default)]
    pub fills: Vec<OrderFill>,
}

/// A fill from an order response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFill {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission: Decimal,
    pub commission_asset: String,
    pub trade_id: u64,
}

/// Response from GET /api/v3/order, and entries of GET /api/v3/openOrders.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQueryResponse {
    pub symbol: String,
    pub order_id: u64,
    pub order_list_id: i64,
    pub client_order_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cummulative_quote_qty: Decimal,
    pub status: String,
    pub time_in_force: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub side: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub stop_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub iceberg_qty: Decimal,
    pub time: i64,
    pub update_time: i64,
    pub is_working: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub orig_quote_order_qty: Decimal,
}

/// Response from GET /api/v3/account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    pub update_time: i64,
    pub account_type: String,
    pub balances: Vec<Balance>,
}

impl AccountResponse {
    /// Balance of one asset, if the account holds it.
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.iter().find(|b| b.asset == asset)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_server_time() {
        let json = r#"{"serverTime": 1499827319559}"#;
        let response: ServerTimeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.server_time, 1499827319559);
    }

    #[test]
    fn test_deserialize_new_order_response() {
        let json = r#"{
            "symbol": "BTCUSDT",
            "orderId": 28,
            "orderListId": -1,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1507725176595,
            "price": "0.00000000",
            "origQty": "10.00000000",
            "executedQty": "10.00000000",
            "cummulativeQuoteQty": "10.00000000",
            "status": "FILLED",
            "timeInForce": "GTC",
            "type": "MARKET",
            "side": "SELL",
            "fills": [
                {
                    "price": "4000.00000000",
                    "qty": "1.00000000",
                    "commission": "4.00000000",
                    "commissionAsset": "USDT",
                    "tradeId": 123
                }
            ]
        }"#;

        let response: NewOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.symbol, "BTCUSDT");
        assert_eq!(response.order_id, 28);
        assert_eq!(response.status, "FILLED");
        assert_eq!(response.orig_qty, dec("10"));
        assert_eq!(response.fills.len(), 1);
        assert_eq!(response.fills[0].price, dec("4000"));
        assert_eq!(response.fills[0].trade_id, 123);
    }

    #[test]
    fn test_deserialize_ack_order_response() {
        let json = r#"{
            "symbol": "BTCUSDT",
            "orderId": 28,
            "orderListId": -1,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
            "transactTime": 1507725176595
        }"#;

        let response: NewOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.order_id, 28);
        assert_eq!(response.executed_qty, Decimal::ZERO);
        assert!(response.fills.is_empty());
    }

    #[test]
    fn test_deserialize_order_query() {
        let json = r#"{
            "symbol": "LTCBTC",
            "orderId": 1,
            "orderListId": -1,
            "clientOrderId": "myOrder1",
            "price": "0.1",
            "origQty": "1.0",
            "executedQty": "0.0",
            "cummulativeQuoteQty": "0.0",
            "status": "NEW",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "BUY",
            "stopPrice": "0.0",
            "icebergQty": "0.0",
            "time": 1499827319559,
            "updateTime": 1499827319559,
            "isWorking": true,
            "workingTime": 1499827319559,
            "origQuoteOrderQty": "0.000000",
            "selfTradePreventionMode": "NONE"
        }"#;

        let response: OrderQueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.client_order_id, "myOrder1");
        assert_eq!(response.price, dec("0.1"));
        assert_eq!(response.order_type, "LIMIT");
        assert!(response.is_working);
    }

    #[test]
    fn test_deserialize_account() {
        let json = r#"{
            "makerCommission": 15,
            "canTrade": true,
            "canWithdraw": true,
            "canDeposit": true,
            "updateTime": 123456789,
            "accountType": "SPOT",
            "balances": [
                {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
                {"asset": "LTC", "free": "4763368.68006011", "locked": "0.00000000"}
            ],
            "permissions": ["SPOT"]
        }"#;

        let response: AccountResponse = serde_json::from_str(json).unwrap();
        assert!(response.can_trade);
        assert_eq!(response.balance("BTC").unwrap().free, dec("4723846.89208129"));
        assert!(response.balance("ETH").is_none());
    }

    #[test]
    fn test_deserialize_small_payloads() {
        let status: SystemStatusResponse =
            serde_json::from_str(r#"{"status": 0, "msg": "normal"}"#).unwrap();
        assert!(status.is_normal());

        let avg: AvgPriceResponse =
            serde_json::from_str(r#"{"mins": 5, "price": "9.35751834", "closeTime": 1694061154503}"#)
                .unwrap();
        assert_eq!(avg.mins, 5);
        assert_eq!(avg.price, dec("9.35751834"));

        let tickers: Vec<TickerPrice> =
            serde_json::from_str(r#"[{"symbol": "LTCBTC", "price": "4.00000200"}]"#).unwrap();
        assert_eq!(tickers[0].price, dec("4.000002"));
    }
}
