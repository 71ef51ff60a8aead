//! Market domain — index overview, watchlist, and per-stock data.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::domain::order::BadgeCategory;
use crate::shared::{Symbol, Timeframe};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Max news items shown per stock.
pub const DEFAULT_NEWS_LIMIT: usize = 5;

/// A market index row (S&P 500, Nasdaq, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    /// Key in the overview map, e.g. `"sp500"`.
    pub key: String,
    pub symbol: Symbol,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub change: Option<Decimal>,
    pub change_percent: Option<Decimal>,
}

impl MarketIndex {
    pub fn change_badge(&self) -> BadgeCategory {
        change_badge(self.change_percent.or(self.change))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistStock {
    pub symbol: Symbol,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub change: Option<Decimal>,
    pub change_percent: Option<Decimal>,
}

impl WatchlistStock {
    pub fn change_badge(&self) -> BadgeCategory {
        change_badge(self.change_percent.or(self.change))
    }
}

/// Real-time quote: current, previous close, high, low, open, change, change %.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub current: Option<Decimal>,
    pub previous_close: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub open: Option<Decimal>,
    pub change: Option<Decimal>,
    pub change_percent: Option<Decimal>,
}

impl Quote {
    /// Percent move from previous close; zero when there is no previous close.
    pub fn percent_from_previous_close(&self) -> Decimal {
        let current = self.current.unwrap_or_default();
        match self.previous_close {
            Some(pc) if !pc.is_zero() => (current - pc) / pc * Decimal::ONE_HUNDRED,
            _ => Decimal::ZERO,
        }
    }

    pub fn is_up(&self) -> bool {
        self.percent_from_previous_close() >= Decimal::ZERO
    }
}

/// Everything the stock detail page needs in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub symbol: Symbol,
    pub quote: Quote,
    /// Company profile, passed through as sent.
    pub company: serde_json::Value,
    /// Key statistics, passed through as sent.
    pub stats: serde_json::Value,
}

impl StockSnapshot {
    pub fn company_name(&self) -> Option<&str> {
        self.company.get("name").and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub date: Option<DateTime<Utc>>,
    pub close: Option<Decimal>,
}

/// A chart series for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockChart {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub points: Vec<ChartPoint>,
}

impl StockChart {
    /// Points with a usable close price.
    pub fn closes(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.points
            .iter()
            .filter_map(|p| p.close.map(|c| (p.label.as_str(), c)))
    }

    pub fn change(&self) -> Option<Decimal> {
        let first = self.closes().next()?.1;
        let last = self.closes().last()?.1;
        Some(last - first)
    }
}

fn change_badge(change: Option<Decimal>) -> BadgeCategory {
    match change {
        Some(c) if c > Decimal::ZERO => BadgeCategory::Success,
        Some(c) if c < Decimal::ZERO => BadgeCategory::Danger,
        _ => BadgeCategory::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_from_previous_close() {
        let q = Quote {
            current: Some(Decimal::new(105, 0)),
            previous_close: Some(Decimal::new(100, 0)),
            ..Default::default()
        };
        assert_eq!(q.percent_from_previous_close(), Decimal::new(5, 0));
        assert!(q.is_up());
        assert_eq!(Quote::default().percent_from_previous_close(), Decimal::ZERO);
    }

    #[test]
    fn test_chart_change_skips_missing_closes() {
        let chart = StockChart {
            symbol: Symbol::from("AAPL"),
            timeframe: Timeframe::Month1,
            points: vec![
                ChartPoint { label: "a".into(), date: None, close: None },
                ChartPoint { label: "b".into(), date: None, close: Some(Decimal::new(10, 0)) },
                ChartPoint { label: "c".into(), date: None, close: Some(Decimal::new(12, 0)) },
            ],
        };
        assert_eq!(chart.closes().count(), 2);
        assert_eq!(chart.change(), Some(Decimal::new(2, 0)));
    }

    #[test]
    fn test_change_badge() {
        assert_eq!(change_badge(Some(Decimal::ONE)), BadgeCategory::Success);
        assert_eq!(change_badge(Some(Decimal::NEGATIVE_ONE)), BadgeCategory::Danger);
        assert_eq!(change_badge(None), BadgeCategory::Neutral);
    }
}
