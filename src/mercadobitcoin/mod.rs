//! Mercado Bitcoin public market data API
//! No API key needed: ticker, order book, trades and day summary.

mod client;
mod endpoint;
mod error;
mod types;

pub use client::{ClientConfig, MercadoBitcoinClient, DEFAULT_BASE_URL};
pub use endpoint::{Endpoint, TradeFilter};
pub use error::{MarketDataError, MarketDataResult};
pub use types::*;
