//! Spot endpoint groups.
//!
//! Each group borrows a [`crate::BinanceClient`] and maps one method to one
//! endpoint. Arguments are validated before anything is sent; rejected
//! arguments surface as `BinanceRestError::InvalidParameter`.

mod market;
mod order;
mod trade;
mod wallet;

pub use market::SpotMarket;
pub use order::{NewOrder, OrderRef, OrderSide, OrderType, TimeInForce};
pub use trade::SpotTrade;
pub use wallet::SpotWallet;

use crate::error::BinanceRestError;

/// Reject an empty mandatory string argument.
pub(crate) fn require(value: &str, name: &str) -> Result<(), BinanceRestError> {
    if value.trim().is_empty() {
        return Err(BinanceRestError::InvalidParameter(format!(
            "{name} is mandatory and cannot be empty"
        )));
    }
    Ok(())
}

/// Treat an empty list the same as an absent one.
pub(crate) fn non_empty<'a>(list: Option<&'a [&'a str]>) -> Option<&'a [&'a str]> {
    list.filter(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("BTCUSDT", "symbol").is_ok());

        let err = require("  ", "symbol").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: symbol is mandatory and cannot be empty"
        );
    }

    #[test]
    fn test_non_empty() {
        let empty: &[&str] = &[];
        let one: &[&str] = &["BTCUSDT"];

        assert!(non_empty(Some(empty)).is_none());
        assert_eq!(non_empty(Some(one)), Some(one));
        assert!(non_empty(None).is_none());
    }
}
