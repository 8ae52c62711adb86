//! Mercado Bitcoin error types

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Connection, DNS or timeout failure reported by the HTTP transport
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base url '{0}'")]
    InvalidBaseUrl(String),

    /// Upstream answered with a non-2xx status (typed fetches only)
    #[error("Mercado Bitcoin API error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type MarketDataResult<T> = Result<T, MarketDataError>;
