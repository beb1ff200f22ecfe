//! Shared building blocks for the Binance client crates.

mod environment;
mod logging;
mod notify;

pub use environment::{BinanceEnvironment, ParseEnvironmentError};
pub use logging::{init_logging, LogFormat};
pub use notify::notify_if_slow;
