//! Request paths for the public market data endpoints
//!
//! Every endpoint lives under `/api/{coin}/...`. The coin symbol and all
//! numeric arguments are interpolated verbatim: no validation, no
//! percent-encoding, no zero-padding.

use tracing::warn;

/// Selection of trades to return from `/api/{coin}/trades`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TradeFilter {
    /// Most recent trades
    #[default]
    All,
    /// Up to 1000 trades after the given trade id
    Since(u64),
    /// Up to 1000 trades from the given Unix timestamp
    From(i64),
    /// Trades between two Unix timestamps
    Range { from: i64, to: i64 },
}

impl TradeFilter {
    /// Build a filter from the upstream's three optional parameters.
    ///
    /// `since` wins over `from`/`to`; `to` is only honoured together with
    /// `from`. A `to` supplied on its own is dropped and the request falls
    /// back to [`TradeFilter::All`].
    pub fn from_options(since: Option<u64>, from: Option<i64>, to: Option<i64>) -> Self {
        match (since, from, to) {
            (Some(tid), _, _) => TradeFilter::Since(tid),
            (None, Some(from), Some(to)) => TradeFilter::Range { from, to },
            (None, Some(from), None) => TradeFilter::From(from),
            (None, None, Some(to)) => {
                warn!("'to' ({}) given without 'from', fetching latest trades", to);
                TradeFilter::All
            }
            (None, None, None) => TradeFilter::All,
        }
    }
}

/// A public market data endpoint with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Ticker(&'a str),
    OrderBook(&'a str),
    Trades(&'a str, TradeFilter),
    DaySummary {
        coin: &'a str,
        year: i32,
        month: u32,
        day: u32,
    },
}

impl Endpoint<'_> {
    /// Path relative to the API root, without a leading slash
    pub fn path(&self) -> String {
        match self {
            Endpoint::Ticker(coin) => format!("{}/ticker", coin),
            Endpoint::OrderBook(coin) => format!("{}/orderbook", coin),
            Endpoint::Trades(coin, filter) => match filter {
                TradeFilter::Since(_) => format!("{}/trades", coin),
                TradeFilter::Range { from, to } => format!("{}/trades/{}/{}/", coin, from, to),
                TradeFilter::From(from) => format!("{}/trades/{}/", coin, from),
                TradeFilter::All => format!("{}/trades/", coin),
            },
            Endpoint::DaySummary {
                coin,
                year,
                month,
                day,
            } => format!("{}/day-summary/{}/{}/{}/", coin, year, month, day),
        }
    }

    /// Query parameters; only the `since` cursor uses them
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Trades(_, TradeFilter::Since(tid)) => vec![("since", tid.to_string())],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_and_orderbook_paths() {
        for coin in ["BTC", "LTC", "bch", "weird coin"] {
            let ticker = Endpoint::Ticker(coin);
            assert_eq!(ticker.path(), format!("{}/ticker", coin));
            assert!(ticker.query().is_empty());

            let book = Endpoint::OrderBook(coin);
            assert_eq!(book.path(), format!("{}/orderbook", coin));
            assert!(book.query().is_empty());
        }
    }

    #[test]
    fn test_trades_since_uses_query() {
        let ep = Endpoint::Trades("BTC", TradeFilter::Since(123));
        assert_eq!(ep.path(), "BTC/trades");
        assert_eq!(ep.query(), vec![("since", "123".to_string())]);
    }

    #[test]
    fn test_trades_window_paths() {
        let range = Endpoint::Trades("BTC", TradeFilter::Range { from: 1000, to: 2000 });
        assert_eq!(range.path(), "BTC/trades/1000/2000/");
        assert!(range.query().is_empty());

        let from = Endpoint::Trades("BTC", TradeFilter::From(1000));
        assert_eq!(from.path(), "BTC/trades/1000/");

        let all = Endpoint::Trades("BTC", TradeFilter::All);
        assert_eq!(all.path(), "BTC/trades/");
    }

    #[test]
    fn test_day_summary_not_zero_padded() {
        let ep = |day| Endpoint::DaySummary {
            coin: "BTC",
            year: 2013,
            month: 6,
            day,
        };
        assert_eq!(ep(20).path(), "BTC/day-summary/2013/6/20/");
        assert_eq!(ep(5).path(), "BTC/day-summary/2013/6/5/");
    }

    #[test]
    fn test_filter_precedence() {
        // since beats everything else
        assert_eq!(
            TradeFilter::from_options(Some(123), Some(1000), Some(2000)),
            TradeFilter::Since(123)
        );
        assert_eq!(
            TradeFilter::from_options(None, Some(1000), Some(2000)),
            TradeFilter::Range { from: 1000, to: 2000 }
        );
        assert_eq!(
            TradeFilter::from_options(None, Some(1000), None),
            TradeFilter::From(1000)
        );
        assert_eq!(TradeFilter::from_options(None, None, None), TradeFilter::All);
    }

    #[test]
    fn test_to_without_from_falls_back_to_all() {
        assert_eq!(
            TradeFilter::from_options(None, None, Some(2000)),
            TradeFilter::All
        );
        let ep = Endpoint::Trades("BTC", TradeFilter::from_options(None, None, Some(2000)));
        assert_eq!(ep.path(), "BTC/trades/");
    }
}
