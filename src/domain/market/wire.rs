//! Wire types for market overview, watchlist, and stock responses.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

/// `GET /api/market/overview`: `{indices: {key: Index}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketOverviewResponse {
    #[serde(default)]
    pub indices: BTreeMap<String, IndexResponse>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub price: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub change: Option<Decimal>,
    #[serde(
        default,
        alias = "change_percent",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub change_percent: Option<Decimal>,
}

/// `GET /api/market/watchlist` element.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistStockResponse {
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub price: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub change: Option<Decimal>,
    #[serde(
        default,
        alias = "change_percent",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub change_percent: Option<Decimal>,
    #[serde(default)]
    pub quote: Option<QuoteResponse>,
}

/// Finnhub-style quote: `c`, `pc`, `h`, `l`, `o`, `d`, `dp`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct QuoteResponse {
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub c: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub pc: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub h: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub l: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub o: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub d: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub dp: Option<Decimal>,
}

/// `GET /api/stocks/{symbol}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockSnapshotResponse {
    #[serde(default)]
    pub quote: Option<QuoteResponse>,
    #[serde(default)]
    pub company: serde_json::Value,
    #[serde(default)]
    pub stats: serde_json::Value,
}

/// `GET /api/stocks/{symbol}/chart` element.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ChartPointResponse {
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub item: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub close: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub date: Option<String>,
}

/// `GET /api/recommendations`: a bare ticker array, or `{recommendations: [...]}`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecommendationsResponse {
    Bare(Vec<String>),
    Wrapped {
        #[serde(alias = "tickers")]
        recommendations: Vec<String>,
    },
}

impl RecommendationsResponse {
    pub fn into_tickers(self) -> Vec<String> {
        match self {
            Self::Bare(tickers) | Self::Wrapped { recommendations: tickers } => tickers,
        }
    }
}
