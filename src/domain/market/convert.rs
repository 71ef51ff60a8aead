//! Conversions from wire types to domain types for market data.

use super::wire::{
    ChartPointResponse, IndexResponse, MarketOverviewResponse, QuoteResponse,
    RecommendationsResponse, StockSnapshotResponse, WatchlistStockResponse,
};
use super::{ChartPoint, MarketIndex, Quote, StockSnapshot, WatchlistStock};
use crate::shared::serde_util::parse_timestamp;
use crate::shared::Symbol;

impl From<QuoteResponse> for Quote {
    fn from(q: QuoteResponse) -> Self {
        Self {
            current: q.c,
            previous_close: q.pc,
            high: q.h,
            low: q.l,
            open: q.o,
            change: q.d,
            change_percent: q.dp,
        }
    }
}

impl MarketIndex {
    fn from_entry(key: String, i: IndexResponse) -> Self {
        Self {
            symbol: Symbol::new(i.symbol.unwrap_or_else(|| key.to_ascii_uppercase())),
            key,
            name: i.name,
            price: i.price,
            change: i.change,
            change_percent: i.change_percent,
        }
    }
}

/// Flattens the overview map into rows, ordered by key.
pub(crate) fn indices_from_overview(resp: MarketOverviewResponse) -> Vec<MarketIndex> {
    resp.indices
        .into_iter()
        .map(|(key, i)| MarketIndex::from_entry(key, i))
        .collect()
}

/// Watchlist rows; entries without a symbol are dropped.
pub(crate) fn watchlist_from_wire(list: Vec<WatchlistStockResponse>) -> Vec<WatchlistStock> {
    list.into_iter()
        .filter_map(|w| {
            let symbol = w.symbol?;
            let price = w.price.or_else(|| w.quote.as_ref().and_then(|q| q.c));
            Some(WatchlistStock {
                symbol: Symbol::new(symbol),
                name: w.name,
                price,
                change: w.change,
                change_percent: w.change_percent,
            })
        })
        .collect()
}

impl StockSnapshot {
    pub(crate) fn from_wire(symbol: Symbol, resp: StockSnapshotResponse) -> Self {
        Self {
            symbol,
            quote: resp.quote.map(Quote::from).unwrap_or_default(),
            company: resp.company,
            stats: resp.stats,
        }
    }
}

impl From<ChartPointResponse> for ChartPoint {
    fn from(p: ChartPointResponse) -> Self {
        let date = p.date.as_deref().and_then(parse_timestamp);
        Self {
            label: p.item.or(p.date).unwrap_or_default(),
            date,
            close: p.close,
        }
    }
}

/// Uppercased tickers in server order, blanks and repeats dropped.
pub(crate) fn recommendations_from_wire(resp: RecommendationsResponse) -> Vec<Symbol> {
    let mut symbols: Vec<Symbol> = Vec::new();
    for ticker in resp.into_tickers() {
        let ticker = ticker.trim().to_ascii_uppercase();
        if ticker.is_empty() {
            continue;
        }
        let symbol = Symbol::new(ticker);
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}
