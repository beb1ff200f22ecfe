use auth::{ApiCredentials, AuthError};
use binance_rest::{
    AvgPriceResponse, BinanceClient, BinanceConfig, BinanceRestError, NewOrder, OrderSide,
    Params, ServerTimeResponse, SystemStatusResponse, TimeInForce,
};
use common::{notify_if_slow, BinanceEnvironment};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{info, warn};

/// Calls slower than this are reported while they are still running.
const SLOW_CALL_THRESHOLD: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    common::init_logging();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Runner failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BinanceRestError> {
    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());

    let credentials = match ApiCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(AuthError::MissingEnvVar(var)) => {
            warn!(%var, "No credentials configured, only public endpoints will be called");
            ApiCredentials::anonymous()
        }
        Err(e) => return Err(e.into()),
    };

    let environment = BinanceEnvironment::from_env();
    let config = BinanceConfig::from_env()?
        .with_limit_usage(true)
        .with_span(tracing::info_span!("binance", %environment));

    info!(%environment, %symbol, "Starting Binance REST walkthrough");
    let client = BinanceClient::new(credentials, config)?;

    public_calls(&client, &symbol).await?;

    if environment.supports_signed() && client.can_sign() {
        client.sync_time().await?;
        signed_calls(&client, &symbol).await;
    } else {
        info!("Skipping signed endpoints");
    }

    client.close();
    info!("Shutdown complete");
    Ok(())
}

async fn public_calls(client: &BinanceClient, symbol: &str) -> Result<(), BinanceRestError> {
    let market = client.market();

    market.ping().await?;

    let time: ServerTimeResponse = market.time().await?.json()?;
    println!("server time: {}", time.server_time);

    let status: SystemStatusResponse = client.wallet().system_status().await?.json()?;
    info!(status = status.status, msg = %status.msg, "System status");

    let reply = notify_if_slow(SLOW_CALL_THRESHOLD, market.avg_price(symbol), |elapsed| {
        warn!(?elapsed, "avgPrice is taking longer than expected")
    })
    .await?;
    let usage = reply.limit_usage.clone().unwrap_or_default();
    let avg: AvgPriceResponse = reply.json()?;
    println!("{symbol} average price over {} min: {}", avg.mins, avg.price);
    println!("weight used: {usage:?}");

    let depth = market.depth(symbol, Some(5)).await?.into_value();
    println!("{}", serde_json::to_string_pretty(&depth["data"]).unwrap_or_default());

    // Rejected locally, nothing is sent
    if let Err(e) = market.exchange_info(Some(symbol), Some(&[symbol][..]), None).await {
        println!("exchange_info rejected: {e}");
    }

    Ok(())
}

async fn signed_calls(client: &BinanceClient, symbol: &str) {
    match client.wallet().account_status(Params::new()).await {
        Ok(reply) => println!("account status: {}", reply.into_value()),
        Err(e) => report(&e),
    }

    // Far below market so a test order would never fill
    let order = NewOrder::limit(
        symbol,
        OrderSide::Buy,
        Decimal::new(1, 3),
        Decimal::new(1_000, 0),
        TimeInForce::GTC,
    )
    .with_recv_window(5_000);

    match client.trade().new_order_test(&order).await {
        Ok(_) => println!("test order accepted"),
        Err(e) => report(&e),
    }

    match client.trade().get_open_orders(Some(symbol)).await {
        Ok(reply) => println!("open orders: {}", reply.into_value()),
        Err(e) => report(&e),
    }
}

fn report(error: &BinanceRestError) {
    match error {
        BinanceRestError::Client(client_error) => println!(
            "status: {}, code: {:?}, message: {:?}",
            client_error.status, client_error.code, client_error.message
        ),
        other => println!("error: {other}"),
    }
}
