//! Conversions from wire types to domain types for feed records.

use super::wire::{FeedPayload, TradeRecordResponse};
use super::{FeedPage, TradeRecord};
use crate::shared::serde_util::parse_timestamp;
use crate::shared::{RecordId, Symbol};

impl From<TradeRecordResponse> for TradeRecord {
    fn from(r: TradeRecordResponse) -> Self {
        let id = r.id.clone().unwrap_or_else(|| derive_record_id(&r));
        // Orders carry `side` plus an order `type`; disclosures only a transaction `type`.
        let (side, order_type) = match r.side {
            Some(side) => (Some(side), r.kind),
            None => (r.kind, None),
        };
        let timestamp = r
            .disclosure_date
            .as_deref()
            .or(r.created_at.as_deref())
            .and_then(parse_timestamp);

        Self {
            id,
            client_order_id: r.client_order_id,
            symbol: r.symbol.map(Symbol::new),
            side,
            order_type,
            quantity: r.qty,
            filled_quantity: r.filled_qty,
            amount: r.amount,
            status: r.status,
            timestamp,
            transaction_date: r.transaction_date.as_deref().and_then(parse_timestamp),
            submitted_at: r.submitted_at.as_deref().and_then(parse_timestamp),
            filled_at: r.filled_at.as_deref().and_then(parse_timestamp),
            counterparty: r.representative,
            party: r.party,
            state: r.state,
            sector: r.sector,
            industry: r.industry,
            asset_description: r.asset_description,
        }
    }
}

impl TradeRecord {
    /// Converts one feed row found at absolute position `row` (0-based across pages).
    ///
    /// Rows without a server id are keyed by content plus position, so two
    /// identical disclosures stay two records and only server ids de-duplicate
    /// across pages.
    pub(crate) fn from_feed_row(r: TradeRecordResponse, row: u64) -> Self {
        let id = match &r.id {
            Some(id) => id.clone(),
            None => RecordId::new(format!("{}#{}", derive_record_id(&r), row)),
        };
        Self {
            id,
            ..TradeRecord::from(r)
        }
    }
}

/// Content key for records the backend sends without an id.
pub fn derive_record_id(r: &TradeRecordResponse) -> RecordId {
    let parts = [
        r.representative.as_deref(),
        r.symbol.as_deref(),
        r.transaction_date.as_deref(),
        r.disclosure_date.as_deref(),
        r.kind.as_deref(),
        r.amount.as_deref(),
        r.asset_description.as_deref(),
    ];
    let key = parts
        .iter()
        .map(|p| p.unwrap_or(""))
        .collect::<Vec<_>>()
        .join("|");
    RecordId::new(key)
}

impl FeedPayload {
    /// Normalises either payload shape into a page.
    ///
    /// `requested_page` and `page_size` fill in whatever the envelope leaves out.
    pub fn into_page(self, requested_page: u32, page_size: u32) -> FeedPage {
        match self {
            FeedPayload::Bare(records) => FeedPage::single(feed_rows(records, 0)),
            FeedPayload::Envelope(env) => {
                let page_size = env.page_size.filter(|s| *s > 0).unwrap_or(page_size);
                let page = env.page.unwrap_or(requested_page);
                let offset = u64::from(page.saturating_sub(1)) * u64::from(page_size);
                let records = feed_rows(env.trades, offset);
                let total = env.total.unwrap_or(records.len() as u64);
                let total_pages = env.total_pages.unwrap_or_else(|| {
                    if page_size == 0 {
                        1
                    } else {
                        (total.div_ceil(page_size as u64) as u32).max(1)
                    }
                });
                FeedPage {
                    records,
                    page,
                    page_size,
                    total,
                    total_pages,
                }
            }
        }
    }
}

fn feed_rows(rows: Vec<TradeRecordResponse>, offset: u64) -> Vec<TradeRecord> {
    rows.into_iter()
        .enumerate()
        .map(|(i, r)| TradeRecord::from_feed_row(r, offset + i as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disclosure_conversion() {
        let resp: TradeRecordResponse = serde_json::from_value(json!({
            "disclosure_date": "2024-03-05",
            "transaction_date": "02/20/2024",
            "representative": "Jane Doe",
            "ticker": "NVDA",
            "asset_description": "NVIDIA Corporation",
            "type": "Purchase",
            "amount": "$1,001 - $15,000",
            "state": "CA",
            "party": "Democrat",
            "sector": "Technology",
            "industry": "Semiconductors"
        }))
        .unwrap();
        let rec = TradeRecord::from(resp);
        assert_eq!(rec.symbol, Some(Symbol::from("NVDA")));
        assert_eq!(rec.side.as_deref(), Some("Purchase"));
        assert_eq!(rec.order_type, None);
        assert_eq!(rec.counterparty.as_deref(), Some("Jane Doe"));
        assert_eq!(rec.timestamp.unwrap().format("%Y-%m-%d").to_string(), "2024-03-05");
        assert_eq!(
            rec.transaction_date.unwrap().format("%Y-%m-%d").to_string(),
            "2024-02-20"
        );
        assert!(rec.id.as_str().starts_with("Jane Doe|NVDA|"));
    }

    #[test]
    fn test_order_conversion_keeps_side_and_type_apart() {
        let resp: TradeRecordResponse = serde_json::from_value(json!({
            "id": 42,
            "symbol": "AAPL",
            "side": "buy",
            "type": "limit",
            "status": "new",
            "created_at": "2024-03-01 14:30:00"
        }))
        .unwrap();
        let rec = TradeRecord::from(resp);
        assert_eq!(rec.id, RecordId::from(42));
        assert_eq!(rec.side.as_deref(), Some("buy"));
        assert_eq!(rec.order_type.as_deref(), Some("limit"));
        assert!(rec.timestamp.is_some());
    }

    #[test]
    fn test_derived_ids_are_stable() {
        let a: TradeRecordResponse =
            serde_json::from_value(json!({"ticker": "MSFT", "type": "Sale"})).unwrap();
        let b = a.clone();
        assert_eq!(derive_record_id(&a), derive_record_id(&b));
        let c: TradeRecordResponse =
            serde_json::from_value(json!({"ticker": "MSFT", "type": "Purchase"})).unwrap();
        assert_ne!(derive_record_id(&a), derive_record_id(&c));
    }

    #[test]
    fn test_envelope_page_metadata_fallbacks() {
        let payload = FeedPayload::decode(json!({
            "trades": [{"id": 1}, {"id": 2}],
            "total": 250
        }))
        .unwrap();
        let page = payload.into_page(2, 100);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.total, 250);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_bare_array_is_single_page() {
        let payload = FeedPayload::decode(json!([{"id": 1}, {"id": 2}, {"id": 3}])).unwrap();
        let page = payload.into_page(1, 100);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.records.len(), 3);
    }

    #[test]
    fn test_identical_idless_rows_keep_their_position() {
        let row = json!({"representative": "Jane Doe", "ticker": "MSFT", "type": "Sale"});
        let first = FeedPayload::decode(json!({
            "trades": [row.clone(), row.clone()],
            "total": 4,
            "page": 1,
            "page_size": 2
        }))
        .unwrap()
        .into_page(1, 2);
        let second = FeedPayload::decode(json!({
            "trades": [row.clone(), {"id": 9}],
            "total": 4,
            "page": 2,
            "page_size": 2
        }))
        .unwrap()
        .into_page(2, 2);

        let ids: Vec<&str> = first
            .records
            .iter()
            .chain(second.records.iter())
            .map(|r| r.id.as_str())
            .collect();
        assert!(ids[0].ends_with("#0"));
        assert!(ids[1].ends_with("#1"));
        assert!(ids[2].ends_with("#2"));
        assert_eq!(ids[3], "9");
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_server_ids_are_kept_verbatim() {
        let page = FeedPayload::decode(json!([{"id": "abc", "ticker": "MSFT"}]))
            .unwrap()
            .into_page(1, 100);
        assert_eq!(page.records[0].id, RecordId::from("abc"));
    }
}
