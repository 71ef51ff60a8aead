//! High-level client — `TradedeskClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::account::client::Account;
use crate::domain::market::client::{Markets, Stocks};
use crate::domain::market::StockSnapshot;
use crate::domain::order::client::Orders;
use crate::domain::position::client::Positions;
use crate::domain::trade::client::Trades;
use crate::error::SdkError;
use crate::http::retry::RetryPolicy;
use crate::http::TradedeskHttp;
use crate::view::ViewConfig;

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::account::client::Account as AccountClient;
pub use crate::domain::market::client::Markets as MarketsClient;
pub use crate::domain::market::client::Stocks as StocksClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::position::client::Positions as PositionsClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point for the dashboard SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.trades()`, `client.orders()`, etc.
pub struct TradedeskClient {
    pub(crate) http: TradedeskHttp,
    /// Stock snapshot cache: symbol → (snapshot, fetched_at)
    pub(crate) quote_cache: Arc<RwLock<HashMap<String, (StockSnapshot, Instant)>>>,
    pub(crate) quote_cache_ttl: Duration,
    pub(crate) view_config: ViewConfig,
}

impl TradedeskClient {
    pub fn builder() -> TradedeskClientBuilder {
        TradedeskClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn positions(&self) -> Positions<'_> {
        Positions { client: self }
    }

    pub fn account(&self) -> Account<'_> {
        Account { client: self }
    }

    pub fn market(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn stocks(&self) -> Stocks<'_> {
        Stocks { client: self }
    }

    pub fn view_config(&self) -> &ViewConfig {
        &self.view_config
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.quote_cache.write().await.clear();
    }
}

impl Clone for TradedeskClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            quote_cache: self.quote_cache.clone(),
            quote_cache_ttl: self.quote_cache_ttl,
            view_config: self.view_config.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TradedeskClientBuilder {
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
    quote_cache_ttl: Duration,
    view_config: ViewConfig,
}

impl Default for TradedeskClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry_policy: RetryPolicy::None,
            quote_cache_ttl: Duration::from_secs(30),
            view_config: ViewConfig::default(),
        }
    }
}

impl TradedeskClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Takes the base URL from `TRADEDESK_API_URL` when it is set.
    pub fn from_env(mut self) -> Self {
        if let Ok(url) = std::env::var(crate::network::API_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn quote_cache_ttl(mut self, ttl: Duration) -> Self {
        self.quote_cache_ttl = ttl;
        self
    }

    pub fn view_config(mut self, config: ViewConfig) -> Self {
        self.view_config = config;
        self
    }

    pub fn build(self) -> Result<TradedeskClient, SdkError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SdkError::Validation(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.view_config.page_size == 0 {
            return Err(SdkError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }
        Ok(TradedeskClient {
            http: TradedeskHttp::with_options(&self.base_url, self.timeout, self.retry_policy),
            quote_cache: Arc::new(RwLock::new(HashMap::new())),
            quote_cache_ttl: self.quote_cache_ttl,
            view_config: self.view_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = TradedeskClient::builder().build().unwrap();
        assert_eq!(client.base_url(), crate::network::DEFAULT_API_URL);
        assert_eq!(client.view_config().page_size, 100);
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        assert!(TradedeskClient::builder().base_url("localhost").build().is_err());
        let config = ViewConfig {
            page_size: 0,
            ..ViewConfig::default()
        };
        assert!(TradedeskClient::builder().view_config(config).build().is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = TradedeskClient::builder()
            .base_url("https://api.example.com/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }
}
