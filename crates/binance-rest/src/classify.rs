//! Response classification by HTTP status.

use crate::error::{BinanceRestError, ClientError};
use rest_client::RestResponse;

/// Split a response into success, client error or server error.
///
/// - `status < 400`: passed through unchanged
/// - `400..500`: [`ClientError`] with the decoded `code` / `msg` / `data` when present
/// - `>= 500`: `Server` with the raw body, which is not parsed
pub fn classify(response: RestResponse) -> Result<RestResponse, BinanceRestError> {
    let status = response.status.as_u16();

    if status < 400 {
        return Ok(response);
    }

    if status < 500 {
        return Err(ClientError::from_response(response).into());
    }

    Err(BinanceRestError::Server {
        status,
        body: response.text,
    })
}
