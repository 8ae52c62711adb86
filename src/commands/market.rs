//! Market data commands - one request per invocation, printed to stdout

use anyhow::{Context, Result};
use mercadobitcoin::{ClientConfig, MercadoBitcoinClient, TradeFilter};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// Endpoint selected on the command line
#[derive(Debug)]
pub enum Request {
    Ticker {
        coin: String,
    },
    Orderbook {
        coin: String,
    },
    Trades {
        coin: String,
        since: Option<u64>,
        from: Option<i64>,
        to: Option<i64>,
    },
    DaySummary {
        coin: String,
        year: i32,
        month: u32,
        day: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Status line followed by the body exactly as received
    Raw,
    /// Body decoded into the typed model and pretty-printed as JSON
    Decoded,
}

pub fn run(
    request: Request,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    mode: OutputMode,
) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    info!("Using API host {}", config.base_url);
    let client = MercadoBitcoinClient::with_config(config).context("Failed to create client")?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(execute(&client, request, mode))
}

async fn execute(client: &MercadoBitcoinClient, request: Request, mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Raw => {
            let response = match request {
                Request::Ticker { coin } => client.ticker(&coin).await,
                Request::Orderbook { coin } => client.orderbook(&coin).await,
                Request::Trades {
                    coin,
                    since,
                    from,
                    to,
                } => {
                    client
                        .trades(&coin, TradeFilter::from_options(since, from, to))
                        .await
                }
                Request::DaySummary {
                    coin,
                    year,
                    month,
                    day,
                } => client.day_summary(&coin, year, month, day).await,
            }
            .context("Request to Mercado Bitcoin failed")?;

            let status = response.status();
            if !status.is_success() {
                warn!("Upstream returned {}", status);
            }
            let body = response
                .text()
                .await
                .context("Failed to read response body")?;

            println!("{}", status);
            println!("{}", body);
        }
        OutputMode::Decoded => match request {
            Request::Ticker { coin } => print_json(&client.get_ticker(&coin).await?)?,
            Request::Orderbook { coin } => {
                let book = client.get_orderbook(&coin).await?;
                info!(
                    "{} bids, {} asks, spread {:?}",
                    book.bids.len(),
                    book.asks.len(),
                    book.spread()
                );
                print_json(&book)?
            }
            Request::Trades {
                coin,
                since,
                from,
                to,
            } => {
                let trades = client
                    .get_trades(&coin, TradeFilter::from_options(since, from, to))
                    .await?;
                info!("Fetched {} trades for {}", trades.len(), coin);
                print_json(&trades)?
            }
            Request::DaySummary {
                coin,
                year,
                month,
                day,
            } => print_json(&client.get_day_summary(&coin, year, month, day).await?)?,
        },
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
