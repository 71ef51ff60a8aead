//! Wire types for the trade feed.
//!
//! The backend serves two record flavours (congressional disclosures and
//! brokerage orders) with inconsistent casing and loosely typed scalars, so
//! every field here is optional and tolerant.

use crate::error::SdkError;
use crate::shared::RecordId;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One record as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TradeRecordResponse {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(
        default,
        alias = "clientOrderId",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub client_order_id: Option<String>,
    #[serde(
        default,
        alias = "ticker",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub side: Option<String>,
    /// Order type on order records, transaction type on disclosures.
    #[serde(
        default,
        rename = "type",
        alias = "order_type",
        alias = "orderType",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub kind: Option<String>,
    #[serde(
        default,
        alias = "quantity",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub qty: Option<Decimal>,
    #[serde(
        default,
        alias = "filledQty",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub filled_qty: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub amount: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        alias = "createdAt",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub created_at: Option<String>,
    #[serde(
        default,
        alias = "submittedAt",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub submitted_at: Option<String>,
    #[serde(
        default,
        alias = "filledAt",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub filled_at: Option<String>,
    #[serde(
        default,
        alias = "disclosureDate",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub disclosure_date: Option<String>,
    #[serde(
        default,
        alias = "transactionDate",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub transaction_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub representative: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub party: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub state: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub sector: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub industry: Option<String>,
    #[serde(
        default,
        alias = "assetDescription",
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub asset_description: Option<String>,
}

/// Paginated envelope: `{trades, total, page, page_size, total_pages}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEnvelope {
    #[serde(alias = "records")]
    pub trades: Vec<TradeRecordResponse>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "pageSize")]
    pub page_size: Option<u32>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u32>,
}

/// The two accepted feed payload shapes.
#[derive(Debug, Clone)]
pub enum FeedPayload {
    Envelope(FeedEnvelope),
    Bare(Vec<TradeRecordResponse>),
}

impl FeedPayload {
    /// Tagged decode: envelope first, then bare array, otherwise an error.
    pub fn decode(value: serde_json::Value) -> Result<Self, SdkError> {
        let is_envelope = value
            .as_object()
            .is_some_and(|map| map.contains_key("trades") || map.contains_key("records"));
        if is_envelope {
            serde_json::from_value(value)
                .map(FeedPayload::Envelope)
                .map_err(|e| SdkError::MalformedPayload(format!("bad envelope: {}", e)))
        } else if value.is_array() {
            serde_json::from_value(value)
                .map(FeedPayload::Bare)
                .map_err(|e| SdkError::MalformedPayload(format!("bad record in array: {}", e)))
        } else {
            Err(SdkError::MalformedPayload(format!(
                "expected envelope or array, got {}",
                describe(&value)
            )))
        }
    }
}

fn describe(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object without records",
    }
}
