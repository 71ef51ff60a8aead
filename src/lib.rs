//! # Tradedesk SDK
//!
//! Client and view model for the brokerage dashboard, for native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Types, lifecycle rules, filtering, state containers (always available, WASM-safe)
//! 2. **View model** — Feed pagination, load-more triggering, scoped polling
//! 3. **HTTP API** — `TradedeskHttp` with an opt-in retry policy
//! 4. **High-Level Client** — `TradedeskClient` with nested sub-clients and caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tradedesk::prelude::*;
//!
//! let client = TradedeskClient::builder()
//!     .base_url("http://localhost:5001")
//!     .build()?;
//!
//! let mut fetcher = client.trades().fetcher();
//! fetcher.fetch_page(1).await?;
//!
//! let mut engine = FilterEngine::new();
//! engine.set_criterion(FilterField::TradeType, "buy")?;
//! let visible = engine.displayed(fetcher.feed());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: View model ──────────────────────────────────────────────────────

/// Feed fetching, load-more triggering, polling, section state.
pub mod view;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `TradedeskClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{RecordId, Side, Symbol, Timeframe};

    // Domain types — trade feed + filtering
    pub use crate::domain::trade::{
        FeedPage, FilterCriteria, FilterEngine, FilterField, PageOutcome, RecordSet, TradeDirection,
        TradeFeed, TradeRecord, TradeTypeCategory,
    };

    // Domain types — order lifecycle
    pub use crate::domain::order::{
        BadgeCategory, LifecyclePhase, OrderBoard, OrderRequest, OrderStatusFilter, OrderType,
        ReconcileReport, TimeInForce,
    };

    // Domain types — positions, account, market
    pub use crate::domain::account::AccountSummary;
    pub use crate::domain::market::{
        ChartPoint, MarketIndex, Quote, StockChart, StockSnapshot, WatchlistStock,
    };
    pub use crate::domain::position::{Position, PositionBook, PositionTotals};

    // Errors
    pub use crate::error::{ErrorKind, SdkError};

    // Network
    pub use crate::network::{API_URL_ENV, DEFAULT_API_URL};

    // View model
    pub use crate::view::{
        FeedFetcher, LoadMoreTrigger, PageSource, PollSubscription, ScrollMetrics, Section,
        ViewConfig,
    };

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AccountClient, MarketsClient, OrdersClient, PositionsClient, StocksClient,
        TradedeskClient, TradedeskClientBuilder, TradesClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
