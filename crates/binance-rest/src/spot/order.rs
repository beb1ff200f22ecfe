//! Order enums and the new-order request.

use super::require;
use crate::error::BinanceRestError;
use rest_client::Params;
use rust_decimal::Decimal;
use std::fmt;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Convert from Binance string representation.
    pub fn from_binance_str(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }

    pub fn as_binance_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
}

impl OrderType {
    pub fn as_binance_str(&self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopLoss => "STOP_LOSS",
            Self::StopLossLimit => "STOP_LOSS_LIMIT",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            Self::LimitMaker => "LIMIT_MAKER",
        }
    }

    fn needs_price(&self) -> bool {
        matches!(
            self,
            Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit | Self::LimitMaker
        )
    }

    fn needs_time_in_force(&self) -> bool {
        matches!(
            self,
            Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit
        )
    }

    fn needs_stop_price(&self) -> bool {
        matches!(
            self,
            Self::StopLoss | Self::StopLossLimit | Self::TakeProfit | Self::TakeProfitLimit
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_binance_str())
    }
}

/// Time in force for limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    /// Good Till Canceled - remains active until filled or canceled.
    GTC,
    /// Immediate Or Cancel - fill what's possible immediately, cancel rest.
    IOC,
    /// Fill Or Kill - must be filled completely immediately or canceled.
    FOK,
}

impl TimeInForce {
    pub fn as_binance_str(&self) -> &'static str {
        match self {
            Self::GTC => "GTC",
            Self::IOC => "IOC",
            Self::FOK => "FOK",
        }
    }
}

/// Identifies an existing order either by exchange id or by client id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRef<'a> {
    Id(u64),
    ClientId(&'a str),
}

impl OrderRef<'_> {
    pub(crate) fn append_to(&self, params: &mut Params) -> Result<(), BinanceRestError> {
        match self {
            Self::Id(id) => params.insert("orderId", *id),
            Self::ClientId(client_id) => {
                require(client_id, "origClientOrderId")?;
                params.insert("origClientOrderId", *client_id);
            }
        }
        Ok(())
    }
}

/// Parameters of POST /api/v3/order (and /api/v3/order/test).
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub time_in_force: Option<TimeInForce>,
    pub quantity: Option<Decimal>,
    pub quote_order_qty: Option<Decimal>,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub new_client_order_id: Option<String>,
    /// ACK, RESULT or FULL.
    pub new_order_resp_type: Option<String>,
    pub recv_window: Option<u64>,
}

impl NewOrder {
    pub fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            time_in_force: None,
            quantity: None,
            quote_order_qty: None,
            price: None,
            stop_price: None,
            new_client_order_id: None,
            new_order_resp_type: None,
            recv_window: None,
        }
    }

    /// Limit order for `quantity` at `price`.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Self {
        Self {
            time_in_force: Some(time_in_force),
            quantity: Some(quantity),
            price: Some(price),
            ..Self::new(symbol, side, OrderType::Limit)
        }
    }

    /// Market order for `quantity` of the base asset.
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::new(symbol, side, OrderType::Market)
        }
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(client_order_id.into());
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_resp_type(mut self, resp_type: impl Into<String>) -> Self {
        self.new_order_resp_type = Some(resp_type.into());
        self
    }

    pub fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = Some(recv_window);
        self
    }

    /// Check the combination of fields required by the order type.
    pub fn validate(&self) -> Result<(), BinanceRestError> {
        require(&self.symbol, "symbol")?;

        let invalid = |msg: String| Err(BinanceRestError::InvalidParameter(msg));
        let kind = self.order_type;

        match (self.quantity, self.quote_order_qty) {
            (Some(_), Some(_)) => {
                return invalid("quantity and quoteOrderQty cannot be sent together".into())
            }
            (None, Some(_)) if kind != OrderType::Market => {
                return invalid(format!("quoteOrderQty is only accepted by MARKET orders, not {kind}"))
            }
            (None, None) => return invalid(format!("{kind} order requires quantity")),
            _ => {}
        }
        if kind.needs_price() && self.price.is_none() {
            return invalid(format!("{kind} order requires price"));
        }
        if kind.needs_time_in_force() && self.time_in_force.is_none() {
            return invalid(format!("{kind} order requires timeInForce"));
        }
        if kind.needs_stop_price() && self.stop_price.is_none() {
            return invalid(format!("{kind} order requires stopPrice"));
        }
        Ok(())
    }

    /// Wire parameters, in the order Binance documents them.
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("symbol", self.symbol.as_str())
            .with("side", self.side.as_binance_str())
            .with("type", self.order_type.as_binance_str())
            .with_opt("timeInForce", self.time_in_force.map(|t| t.as_binance_str()))
            .with_opt("quantity", self.quantity.map(|q| q.normalize().to_string()))
            .with_opt(
                "quoteOrderQty",
                self.quote_order_qty.map(|q| q.normalize().to_string()),
            )
            .with_opt("price", self.price.map(|p| p.normalize().to_string()))
            .with_opt("stopPrice", self.stop_price.map(|p| p.normalize().to_string()))
            .with_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .with_opt("newOrderRespType", self.new_order_resp_type.as_deref())
            .with_opt("recvWindow", self.recv_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_order_side_conversion() {
        assert_eq!(OrderSide::from_binance_str("BUY"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::from_binance_str("SELL"), Some(OrderSide::Sell));
        assert_eq!(OrderSide::from_binance_str("INVALID"), None);
        assert_eq!(OrderSide::Sell.as_binance_str(), "SELL");
    }

    #[test]
    fn test_limit_order_params() {
        let order = NewOrder::limit(
            "BTCUSDT",
            OrderSide::Buy,
            dec("0.00100"),
            dec("50000.0"),
            TimeInForce::GTC,
        )
        .with_client_order_id("my_order_123");

        assert!(order.validate().is_ok());
        assert_eq!(
            order.to_params().encode(),
            "symbol=BTCUSDT&side=BUY&type=LIMIT&timeInForce=GTC&quantity=0.001&price=50000&newClientOrderId=my_order_123"
        );
    }

    #[test]
    fn test_market_order_by_quote_qty() {
        let mut order = NewOrder::new("BTCUSDT", OrderSide::Sell, OrderType::Market);
        order.quote_order_qty = Some(dec("25"));

        assert!(order.validate().is_ok());
        assert_eq!(
            order.to_params().encode(),
            "symbol=BTCUSDT&side=SELL&type=MARKET&quoteOrderQty=25"
        );
    }

    #[rstest]
    #[case::no_quantity(NewOrder::new("BTCUSDT", OrderSide::Buy, OrderType::Market), "requires quantity")]
    #[case::no_price(
        NewOrder { time_in_force: Some(TimeInForce::GTC), quantity: Some(Decimal::ONE), ..NewOrder::new("BTCUSDT", OrderSide::Buy, OrderType::Limit) },
        "requires price"
    )]
    #[case::no_tif(
        NewOrder { price: Some(Decimal::ONE), quantity: Some(Decimal::ONE), ..NewOrder::new("BTCUSDT", OrderSide::Buy, OrderType::Limit) },
        "requires timeInForce"
    )]
    #[case::market_ack(
        NewOrder::market("BTCUSDT", OrderSide::Sell, Decimal::ONE).with_resp_type("ACK"),
        ""
    )]
    #[case::stop_loss_without_stop(
        NewOrder { quantity: Some(Decimal::ONE), ..NewOrder::new("BTCUSDT", OrderSide::Sell, OrderType::StopLoss) },
        "requires stopPrice"
    )]
    #[case::both_quantities(
        NewOrder { quote_order_qty: Some(Decimal::ONE), ..NewOrder::market("BTCUSDT", OrderSide::Buy, Decimal::ONE) },
        "cannot be sent together"
    )]
    #[case::empty_symbol(NewOrder::market("", OrderSide::Buy, Decimal::ONE), "symbol is mandatory")]
    fn test_validation(#[case] order: NewOrder, #[case] expected: &str) {
        match order.validate() {
            Ok(()) => assert!(expected.is_empty(), "expected rejection containing '{expected}'"),
            Err(err) => {
                assert!(!expected.is_empty(), "unexpected rejection: {err}");
                assert!(err.to_string().contains(expected), "{err}");
            }
        }
    }

    #[test]
    fn test_order_ref_params() {
        let mut params = Params::new().with("symbol", "BTCUSDT");
        OrderRef::Id(42).append_to(&mut params).unwrap();
        assert_eq!(params.encode(), "symbol=BTCUSDT&orderId=42");

        let mut params = Params::new().with("symbol", "BTCUSDT");
        OrderRef::ClientId("abc").append_to(&mut params).unwrap();
        assert_eq!(params.encode(), "symbol=BTCUSDT&origClientOrderId=abc");

        assert!(OrderRef::ClientId("").append_to(&mut Params::new()).is_err());
    }
}
