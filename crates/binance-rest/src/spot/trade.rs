//! Order placement and account endpoints.

use super::{require, NewOrder, OrderRef};
use crate::client::BinanceClient;
use crate::error::BinanceRestError;
use rest_client::{Method, Params, Reply};

/// Trade group. Every endpoint is signed.
#[derive(Debug, Clone, Copy)]
pub struct SpotTrade<'a> {
    client: &'a BinanceClient,
}

impl<'a> SpotTrade<'a> {
    pub(crate) fn new(client: &'a BinanceClient) -> Self {
        Self { client }
    }

    /// POST /api/v3/order/test
    ///
    /// Validated and signed like a real order, but never reaches the matching engine.
    pub async fn new_order_test(&self, order: &NewOrder) -> Result<Reply, BinanceRestError> {
        order.validate()?;
        self.client
            .sign_request(Method::POST, "/api/v3/order/test", order.to_params())
            .await
    }

    /// POST /api/v3/order
    ///
    /// Decode the reply with `reply.json::<NewOrderResponse>()`.
    pub async fn new_order(&self, order: &NewOrder) -> Result<Reply, BinanceRestError> {
        order.validate()?;

        tracing::info!(
            symbol = %order.symbol,
            side = order.side.as_binance_str(),
            order_type = %order.order_type,
            quantity = ?order.quantity,
            price = ?order.price,
            client_order_id = ?order.new_client_order_id,
            "Placing order"
        );

        self.client
            .sign_request(Method::POST, "/api/v3/order", order.to_params())
            .await
    }

    /// GET /api/v3/order
    pub async fn get_order(
        &self,
        symbol: &str,
        order: OrderRef<'_>,
    ) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        let mut params = Params::new().with("symbol", symbol);
        order.append_to(&mut params)?;

        self.client
            .sign_request(Method::GET, "/api/v3/order", params)
            .await
    }

    /// DELETE /api/v3/order
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order: OrderRef<'_>,
    ) -> Result<Reply, BinanceRestError> {
        require(symbol, "symbol")?;
        let mut params = Params::new().with("symbol", symbol);
        order.append_to(&mut params)?;

        tracing::info!(symbol = %symbol, order = ?order, "Canceling order");

        self.client
            .sign_request(Method::DELETE, "/api/v3/order", params)
            .await
    }

    /// GET /api/v3/openOrders
    ///
    /// Without a symbol, open orders across all symbols are returned.
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Result<Reply, BinanceRestError> {
        let params = Params::new().with_opt("symbol", symbol.filter(|s| !s.is_empty()));
        self.client
            .sign_request(Method::GET, "/api/v3/openOrders", params)
            .await
    }

    /// GET /api/v3/account
    pub async fn account(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::GET, "/api/v3/account", params)
            .await
    }
}
