//! Mercado Bitcoin response models
//!
//! The upstream encodes prices and quantities either as JSON strings or
//! as JSON numbers depending on the endpoint; `Decimal` accepts both.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Envelope returned by `/api/{coin}/ticker`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerResponse {
    pub ticker: Ticker,
}

/// Summary of the last 24 hours of negotiations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    /// Highest unit price of the last 24 hours
    pub high: Decimal,
    /// Lowest unit price of the last 24 hours
    pub low: Decimal,
    /// Quantity traded in the last 24 hours
    pub vol: Decimal,
    /// Unit price of the last negotiation
    pub last: Decimal,
    /// Highest bid of the last 24 hours
    pub buy: Decimal,
    /// Lowest ask of the last 24 hours
    pub sell: Decimal,
    /// Unit price of the first negotiation of the window, when the
    /// upstream includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,
    /// Unix seconds
    pub date: i64,
}

impl Ticker {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }
}

/// One `[price, quantity]` entry of the order book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLevel(pub Decimal, pub Decimal);

impl OrderLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn quantity(&self) -> Decimal {
        self.1
    }
}

/// Book of offers: bids sorted highest first, asks sorted lowest first.
/// The upstream caps each side at 1000 entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    pub bids: Vec<OrderLevel>,
    #[serde(default)]
    pub asks: Vec<OrderLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<OrderLevel> {
        self.bids.first().copied()
    }

    pub fn best_ask(&self) -> Option<OrderLevel> {
        self.asks.first().copied()
    }

    /// Best ask minus best bid, if both sides are populated
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price() - self.best_bid()?.price())
    }
}

/// Executing side of a negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A single executed negotiation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Unix seconds
    pub date: i64,
    pub price: Decimal,
    pub amount: Decimal,
    /// Negotiation identifier, usable as a `since` cursor
    pub tid: u64,
    #[serde(rename = "type")]
    pub side: TradeSide,
}

impl Trade {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }
}

/// Aggregated statistics for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub opening: Decimal,
    pub closing: Decimal,
    pub lowest: Decimal,
    pub highest: Decimal,
    /// Volume of BRL traded on the day
    pub volume: Decimal,
    /// Quantity of the coin traded on the day
    pub quantity: Decimal,
    /// Number of trades made on the day
    pub amount: u64,
    pub avg_price: Decimal,
}
