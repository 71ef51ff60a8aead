//! Trade domain — the shared record shape for disclosures and brokerage orders,
//! the paginated feed state, and the filter engine over it.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod filter;
pub mod state;
pub mod wire;

use crate::domain::order::lifecycle::{self, BadgeCategory, LifecyclePhase};
use crate::shared::{RecordId, Symbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use convert::derive_record_id;
pub use filter::{FilterCriteria, FilterEngine, FilterField, RecordSet, TradeTypeCategory};
pub use state::{PageOutcome, PageRequest, TradeFeed};

// ─── TradeRecord ─────────────────────────────────────────────────────────────

/// One disclosed trade or brokerage order.
///
/// Disclosure records leave the lifecycle fields (`status`, `filled_quantity`,
/// `submitted_at`, ...) empty; orders leave the disclosure fields empty. The only
/// field ever rewritten after creation is `status`, by a confirmed cancel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRecord {
    pub id: RecordId,
    pub client_order_id: Option<String>,
    pub symbol: Option<Symbol>,
    /// Raw side or transaction type: `"buy"`, `"sell"`, `"Purchase"`, `"Sale (Partial)"`.
    pub side: Option<String>,
    /// Brokerage order type (`market`, `limit`, ...).
    pub order_type: Option<String>,
    pub quantity: Option<Decimal>,
    pub filled_quantity: Option<Decimal>,
    /// Disclosure amount bracket, e.g. `"$1,001 - $15,000"`.
    pub amount: Option<String>,
    pub status: Option<String>,
    /// Disclosure date for disclosures, creation time for orders.
    pub timestamp: Option<DateTime<Utc>>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub filled_at: Option<DateTime<Utc>>,
    /// Disclosing representative.
    pub counterparty: Option<String>,
    pub party: Option<String>,
    pub state: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub asset_description: Option<String>,
}

impl TradeRecord {
    /// Bare record with only an id; mostly useful for building fixtures.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            client_order_id: None,
            symbol: None,
            side: None,
            order_type: None,
            quantity: None,
            filled_quantity: None,
            amount: None,
            status: None,
            timestamp: None,
            transaction_date: None,
            submitted_at: None,
            filled_at: None,
            counterparty: None,
            party: None,
            state: None,
            sector: None,
            industry: None,
            asset_description: None,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        lifecycle::classify(self.status.as_deref())
    }

    pub fn is_cancellable(&self) -> bool {
        lifecycle::is_cancellable(self.status.as_deref())
    }

    pub fn status_badge(&self) -> BadgeCategory {
        lifecycle::badge_category(self.status.as_deref())
    }

    /// Whether this record carries an order lifecycle at all.
    pub fn has_lifecycle(&self) -> bool {
        self.status.is_some()
    }

    pub fn direction(&self) -> TradeDirection {
        TradeDirection::from_raw(self.side.as_deref())
    }

    /// Unfilled share quantity, when both sides are known.
    pub fn remaining_quantity(&self) -> Option<Decimal> {
        let qty = self.quantity?;
        Some((qty - self.filled_quantity.unwrap_or_default()).max(Decimal::ZERO))
    }
}

// ─── TradeDirection ──────────────────────────────────────────────────────────

/// Normalised buy/sell direction of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TradeDirection {
    Buy,
    Sell,
    /// A recognised-but-neither type such as `"Exchange"`.
    Other(String),
    Unknown,
}

impl TradeDirection {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return TradeDirection::Unknown;
        };
        let lower = raw.to_ascii_lowercase();
        if TradeTypeCategory::Buy.matches(&lower) {
            TradeDirection::Buy
        } else if TradeTypeCategory::Sell.matches(&lower) {
            TradeDirection::Sell
        } else {
            TradeDirection::Other(raw.to_string())
        }
    }

    pub fn badge(&self) -> BadgeCategory {
        match self {
            TradeDirection::Buy => BadgeCategory::Success,
            TradeDirection::Sell => BadgeCategory::Danger,
            TradeDirection::Other(_) | TradeDirection::Unknown => BadgeCategory::Neutral,
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "Buy"),
            TradeDirection::Sell => write!(f, "Sell"),
            TradeDirection::Other(s) => write!(f, "{}", s),
            TradeDirection::Unknown => write!(f, "N/A"),
        }
    }
}

// ─── FeedPage ────────────────────────────────────────────────────────────────

/// One normalised page of the trade feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub records: Vec<TradeRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl FeedPage {
    /// A bare array is one complete page.
    pub fn single(records: Vec<TradeRecord>) -> Self {
        let total = records.len() as u64;
        Self {
            page_size: records.len() as u32,
            records,
            page: 1,
            total,
            total_pages: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_disclosure_types() {
        assert_eq!(TradeDirection::from_raw(Some("Purchase")), TradeDirection::Buy);
        assert_eq!(TradeDirection::from_raw(Some("Sale (Full)")), TradeDirection::Sell);
        assert_eq!(TradeDirection::from_raw(Some("sell")), TradeDirection::Sell);
        assert_eq!(
            TradeDirection::from_raw(Some("Exchange")),
            TradeDirection::Other("Exchange".to_string())
        );
        assert_eq!(TradeDirection::from_raw(Some("  ")), TradeDirection::Unknown);
        assert_eq!(TradeDirection::from_raw(None), TradeDirection::Unknown);
    }

    #[test]
    fn test_direction_badge() {
        assert_eq!(TradeDirection::Buy.badge(), BadgeCategory::Success);
        assert_eq!(TradeDirection::Sell.badge(), BadgeCategory::Danger);
        assert_eq!(TradeDirection::Unknown.badge(), BadgeCategory::Neutral);
    }

    #[test]
    fn test_disclosure_record_has_no_lifecycle() {
        let mut rec = TradeRecord::new("d1");
        rec.side = Some("Purchase".to_string());
        assert!(!rec.has_lifecycle());
        assert_eq!(rec.phase(), LifecyclePhase::Unknown);
        assert!(!rec.is_cancellable());
    }

    #[test]
    fn test_remaining_quantity() {
        let mut rec = TradeRecord::new(7);
        rec.quantity = Some(Decimal::new(10, 0));
        rec.filled_quantity = Some(Decimal::new(4, 0));
        assert_eq!(rec.remaining_quantity(), Some(Decimal::new(6, 0)));
        rec.filled_quantity = None;
        assert_eq!(rec.remaining_quantity(), Some(Decimal::new(10, 0)));
    }

    #[test]
    fn test_single_page_from_bare_array() {
        let page = FeedPage::single(vec![TradeRecord::new(1), TradeRecord::new(2)]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total, 2);
        assert_eq!(page.page, 1);
    }
}
