//! Markets and stocks sub-clients — overview, watchlist, quotes, charts, news.

use crate::client::TradedeskClient;
use crate::domain::market::convert::{
    indices_from_overview, recommendations_from_wire, watchlist_from_wire,
};
use crate::domain::market::{ChartPoint, MarketIndex, StockChart, StockSnapshot, WatchlistStock};
use crate::error::SdkError;
use crate::shared::{Symbol, Timeframe};
use std::time::Instant;

/// Sub-client for market-wide data.
pub struct Markets<'a> {
    pub(crate) client: &'a TradedeskClient,
}

impl<'a> Markets<'a> {
    pub async fn overview(&self) -> Result<Vec<MarketIndex>, SdkError> {
        let resp = self.client.http.get_market_overview().await?;
        Ok(indices_from_overview(resp))
    }

    pub async fn watchlist(&self) -> Result<Vec<WatchlistStock>, SdkError> {
        let resp = self.client.http.get_watchlist().await?;
        Ok(watchlist_from_wire(resp))
    }

    /// Recommended tickers. Details come from [`Stocks::yahoo_each`].
    pub async fn recommendations(&self) -> Result<Vec<Symbol>, SdkError> {
        let resp = self.client.http.get_recommendations().await?;
        Ok(recommendations_from_wire(resp))
    }
}

/// Sub-client for single-stock data.
pub struct Stocks<'a> {
    pub(crate) client: &'a TradedeskClient,
}

impl<'a> Stocks<'a> {
    /// Quote, company profile, and stats. Uses TTL cache.
    pub async fn snapshot(&self, symbol: &str) -> Result<StockSnapshot, SdkError> {
        let key = normalize_symbol(symbol)?;
        {
            let cache = self.client.quote_cache.read().await;
            if let Some((snapshot, fetched_at)) = cache.get(&key) {
                if fetched_at.elapsed() < self.client.quote_cache_ttl {
                    return Ok(snapshot.clone());
                }
            }
        }

        let resp = self.client.http.get_stock(&key).await?;
        let snapshot = StockSnapshot::from_wire(Symbol::new(key.clone()), resp);
        self.client
            .quote_cache
            .write()
            .await
            .insert(key, (snapshot.clone(), Instant::now()));
        Ok(snapshot)
    }

    pub async fn chart(&self, symbol: &str, timeframe: Timeframe) -> Result<StockChart, SdkError> {
        let key = normalize_symbol(symbol)?;
        let points = self.client.http.get_stock_chart(&key, timeframe).await?;
        Ok(StockChart {
            symbol: Symbol::new(key),
            timeframe,
            points: points.into_iter().map(ChartPoint::from).collect(),
        })
    }

    /// First `limit` news items. A non-array response yields no items.
    pub async fn news(&self, symbol: &str, limit: usize) -> Result<Vec<serde_json::Value>, SdkError> {
        let key = normalize_symbol(symbol)?;
        let value = self.client.http.get_stock_news(&key).await?;
        Ok(first_items(value, limit))
    }

    /// Yahoo Finance extras, passed through undecoded.
    pub async fn yahoo(&self, symbol: &str) -> Result<serde_json::Value, SdkError> {
        let key = normalize_symbol(symbol)?;
        Ok(self.client.http.get_stock_yahoo(&key).await?)
    }

    /// Yahoo lookups one symbol at a time. A failed lookup fails only its own entry.
    pub async fn yahoo_each(
        &self,
        symbols: &[Symbol],
    ) -> Vec<(Symbol, Result<serde_json::Value, SdkError>)> {
        let mut results = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let result = self.yahoo(symbol.as_str()).await;
            if let Err(e) = &result {
                tracing::warn!(symbol = %symbol, error = %e, "Yahoo lookup failed");
            }
            results.push((symbol.clone(), result));
        }
        results
    }

    pub async fn invalidate(&self, symbol: &str) {
        let key = symbol.trim().to_ascii_uppercase();
        self.client.quote_cache.write().await.remove(&key);
    }

    pub async fn clear_cache(&self) {
        self.client.quote_cache.write().await.clear();
    }
}

fn normalize_symbol(symbol: &str) -> Result<String, SdkError> {
    let key = symbol.trim().to_ascii_uppercase();
    if key.is_empty() {
        return Err(SdkError::Validation("Symbol is required".to_string()));
    }
    Ok(key)
}

fn first_items(value: serde_json::Value, limit: usize) -> Vec<serde_json::Value> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().take(limit).collect(),
        other => {
            tracing::debug!(kind = ?other, "News response is not an array");
            Vec::new()
        }
    }
}
