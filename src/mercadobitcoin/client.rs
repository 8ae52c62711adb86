//! Mercado Bitcoin public market data client
//!
//! No API key required. Each raw operation issues exactly one GET and
//! hands back the [`reqwest::Response`] untouched; the status code is the
//! caller's business. The `get_*` methods layer status checking and JSON
//! decoding on top.
//!
//! # Example
//! ```no_run
//! use mercadobitcoin::{MercadoBitcoinClient, TradeFilter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = MercadoBitcoinClient::new();
//!     let response = client.ticker("BTC").await?;
//!     println!("{} {}", response.status(), response.text().await?);
//!
//!     let trades = client.get_trades("BTC", TradeFilter::From(1501871369)).await?;
//!     println!("Fetched {} trades", trades.len());
//!     Ok(())
//! }
//! ```

use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoint::{Endpoint, TradeFilter};
use super::error::{MarketDataError, MarketDataResult};
use super::types::{DaySummary, OrderBook, Ticker, TickerResponse, Trade};

/// Production host of the Mercado Bitcoin API
pub const DEFAULT_BASE_URL: &str = "https://www.mercadobitcoin.net";

const BASE_URL_ENV: &str = "MERCADOBITCOIN_BASE_URL";
const TIMEOUT_ENV: &str = "MERCADOBITCOIN_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host the `/api` root is appended to
    pub base_url: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Set the base host, e.g. a mirror or a local test server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load overrides from the environment (and `.env` if present).
    ///
    /// Reads `MERCADOBITCOIN_BASE_URL` and `MERCADOBITCOIN_TIMEOUT_SECS`;
    /// unset or unparsable values keep the defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

/// Mercado Bitcoin market data client
///
/// Stateless apart from the HTTP connection pool; cheap to clone and safe
/// to share between tasks.
#[derive(Debug, Clone)]
pub struct MercadoBitcoinClient {
    http_client: Client,
    api_url: String,
}

impl Default for MercadoBitcoinClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MercadoBitcoinClient {
    /// Create a client against the production host
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            api_url: format!("{}/api", DEFAULT_BASE_URL),
        }
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> MarketDataResult<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        Url::parse(base_url).map_err(|_| MarketDataError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            api_url: format!("{}/api", base_url),
        })
    }

    /// Create a client from `MERCADOBITCOIN_*` environment variables
    pub fn from_env() -> MarketDataResult<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Root every endpoint path is joined onto, e.g. `https://host/api`
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Full URL for an endpoint, without query parameters
    pub fn url_for(&self, endpoint: &Endpoint<'_>) -> String {
        format!("{}/{}", self.api_url, endpoint.path())
    }

    async fn get(&self, endpoint: Endpoint<'_>) -> MarketDataResult<Response> {
        let url = self.url_for(&endpoint);
        let query = endpoint.query();

        debug!("GET {} query={:?}", url, query);

        let mut request = self.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(&query);
        }

        Ok(request.send().await?)
    }

    /// Summary of the last 24 hours of negotiations
    pub async fn ticker(&self, coin: &str) -> MarketDataResult<Response> {
        self.get(Endpoint::Ticker(coin)).await
    }

    /// Current bids and asks
    pub async fn orderbook(&self, coin: &str) -> MarketDataResult<Response> {
        self.get(Endpoint::OrderBook(coin)).await
    }

    /// History of negotiations selected by `filter`
    pub async fn trades(&self, coin: &str, filter: TradeFilter) -> MarketDataResult<Response> {
        self.get(Endpoint::Trades(coin, filter)).await
    }

    /// Daily summary of trades. Month and day are sent without zero-padding.
    pub async fn day_summary(
        &self,
        coin: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> MarketDataResult<Response> {
        self.get(Endpoint::DaySummary {
            coin,
            year,
            month,
            day,
        })
        .await
    }

    /// [`day_summary`](Self::day_summary) for a calendar date
    pub async fn day_summary_on(&self, coin: &str, date: NaiveDate) -> MarketDataResult<Response> {
        self.day_summary(coin, date.year(), date.month(), date.day())
            .await
    }

    /// Fetch and decode the ticker
    pub async fn get_ticker(&self, coin: &str) -> MarketDataResult<Ticker> {
        let resp: TickerResponse = decode(self.ticker(coin).await?).await?;
        Ok(resp.ticker)
    }

    /// Fetch and decode the order book
    pub async fn get_orderbook(&self, coin: &str) -> MarketDataResult<OrderBook> {
        decode(self.orderbook(coin).await?).await
    }

    /// Fetch and decode trades
    pub async fn get_trades(&self, coin: &str, filter: TradeFilter) -> MarketDataResult<Vec<Trade>> {
        decode(self.trades(coin, filter).await?).await
    }

    /// Fetch and decode a day summary
    pub async fn get_day_summary(
        &self,
        coin: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> MarketDataResult<DaySummary> {
        decode(self.day_summary(coin, year, month, day).await?).await
    }
}

/// Reject non-2xx responses, then parse the body as JSON
async fn decode<T: DeserializeOwned>(response: Response) -> MarketDataResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read error body for status {}: {}", status, e);
                String::new()
            }
        };
        return Err(MarketDataError::Status { status, body });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_client_targets_production() {
        let client = MercadoBitcoinClient::new();
        assert_eq!(client.api_url(), "https://www.mercadobitcoin.net/api");
        assert_eq!(
            client.url_for(&Endpoint::Ticker("BTC")),
            "https://www.mercadobitcoin.net/api/BTC/ticker"
        );
    }

    #[test]
    fn test_custom_base_url_strips_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/");
        let client = MercadoBitcoinClient::with_config(config).unwrap();
        assert_eq!(
            client.url_for(&Endpoint::Trades("LTC", TradeFilter::From(1000))),
            "http://127.0.0.1:8080/api/LTC/trades/1000/"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ClientConfig::default().with_base_url("not a url");
        let err = MercadoBitcoinClient::with_config(config).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    // Env vars are process-wide, so every case runs inside this one test
    #[test]
    fn test_config_from_env_overrides() {
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);

        std::env::set_var(BASE_URL_ENV, "http://127.0.0.1:1/");
        std::env::set_var(TIMEOUT_ENV, " 7 ");
        let config = ClientConfig::from_env();
        assert_eq!(config.timeout, Some(Duration::from_secs(7)));
        let client = MercadoBitcoinClient::with_config(config).unwrap();
        assert_eq!(client.api_url(), "http://127.0.0.1:1/api");

        std::env::set_var(TIMEOUT_ENV, "abc");
        let config = ClientConfig::from_env();
        assert_eq!(config.timeout, None);
        assert_eq!(config.base_url, "http://127.0.0.1:1/");

        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }
}
