//! Conversions: order payloads → `TradeRecord`s.

use super::wire::{OrderListPayload, SubmitOrderPayload};
use crate::domain::trade::TradeRecord;
use crate::error::SdkError;

pub(crate) fn orders_from_value(value: serde_json::Value) -> Result<Vec<TradeRecord>, SdkError> {
    let orders = OrderListPayload::decode(value)?;
    let records: Vec<TradeRecord> = orders.into_iter().map(TradeRecord::from).collect();
    if let Some(missing) = records.iter().find(|r| r.status.is_none()) {
        tracing::debug!(id = %missing.id, "Order without status; classified as unknown");
    }
    Ok(records)
}

pub(crate) fn submitted_order_from_value(value: serde_json::Value) -> Result<TradeRecord, SdkError> {
    SubmitOrderPayload::decode(value).map(TradeRecord::from)
}
