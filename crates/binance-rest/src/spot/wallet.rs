//! Wallet endpoints (`/sapi`).

use super::require;
use crate::client::BinanceClient;
use crate::error::BinanceRestError;
use rest_client::{Method, Params, Reply};

/// Wallet group. All endpoints except `system_status` are USER_DATA and signed.
///
/// `params` carries optional arguments such as `recvWindow` or `asset`.
#[derive(Debug, Clone, Copy)]
pub struct SpotWallet<'a> {
    client: &'a BinanceClient,
}

impl<'a> SpotWallet<'a> {
    pub(crate) fn new(client: &'a BinanceClient) -> Self {
        Self { client }
    }

    /// GET /sapi/v1/system/status
    pub async fn system_status(&self) -> Result<Reply, BinanceRestError> {
        self.client
            .query("/sapi/v1/system/status", Params::new())
            .await
    }

    /// GET /sapi/v1/capital/config/getall
    pub async fn coin_info(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::GET, "/sapi/v1/capital/config/getall", params)
            .await
    }

    /// GET /sapi/v1/accountSnapshot
    ///
    /// `snapshot_type` is one of `SPOT`, `MARGIN` or `FUTURES`.
    pub async fn account_snapshot(
        &self,
        snapshot_type: &str,
        params: Params,
    ) -> Result<Reply, BinanceRestError> {
        require(snapshot_type, "type")?;

        let mut payload = Params::new().with("type", snapshot_type);
        payload.extend(params);

        self.client
            .sign_request(Method::GET, "/sapi/v1/accountSnapshot", payload)
            .await
    }

    /// GET /sapi/v1/account/status
    pub async fn account_status(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::GET, "/sapi/v1/account/status", params)
            .await
    }

    /// GET /sapi/v1/account/apiTradingStatus
    pub async fn api_trading_status(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::GET, "/sapi/v1/account/apiTradingStatus", params)
            .await
    }

    /// GET /sapi/v1/asset/assetDetail
    pub async fn asset_detail(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::GET, "/sapi/v1/asset/assetDetail", params)
            .await
    }

    /// GET /sapi/v1/asset/tradeFee
    pub async fn trade_fee(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::GET, "/sapi/v1/asset/tradeFee", params)
            .await
    }

    /// POST /sapi/v1/asset/get-funding-asset
    ///
    /// Optional `asset` and `needBtcValuation` go in `params`.
    pub async fn funding_wallet(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::POST, "/sapi/v1/asset/get-funding-asset", params)
            .await
    }

    /// POST /sapi/v3/asset/getUserAsset
    ///
    /// Without `asset`, every asset with a positive balance is returned.
    pub async fn user_asset(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::POST, "/sapi/v3/asset/getUserAsset", params)
            .await
    }

    /// GET /sapi/v1/account/apiRestrictions
    pub async fn api_key_permissions(&self, params: Params) -> Result<Reply, BinanceRestError> {
        self.client
            .sign_request(Method::GET, "/sapi/v1/account/apiRestrictions", params)
            .await
    }
}
