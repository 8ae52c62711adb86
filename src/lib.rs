//! Mercado Bitcoin Market Data
//!
//! A thin async client for the exchange's public HTTP endpoints: ticker,
//! order book, trade history and daily summary. Raw operations return the
//! upstream response unmodified; typed `get_*` variants decode it.
//!
//! ```no_run
//! use mercadobitcoin::MercadoBitcoinClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = MercadoBitcoinClient::new();
//!     let book = client.get_orderbook("BTC").await?;
//!     println!("Spread: {:?}", book.spread());
//!     Ok(())
//! }
//! ```

pub mod mercadobitcoin;

pub use mercadobitcoin::*;
