//! Wire types for order responses.
//!
//! Orders arrive in the same loose record shape as feed records.

use crate::error::SdkError;
use serde::Deserialize;

pub use crate::domain::trade::wire::TradeRecordResponse as OrderResponse;

/// Orders list: a bare array, or `{orders: [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderListPayload {
    Bare(Vec<OrderResponse>),
    Wrapped { orders: Vec<OrderResponse> },
}

impl OrderListPayload {
    pub fn decode(value: serde_json::Value) -> Result<Vec<OrderResponse>, SdkError> {
        match serde_json::from_value::<OrderListPayload>(value) {
            Ok(OrderListPayload::Bare(orders)) | Ok(OrderListPayload::Wrapped { orders }) => {
                Ok(orders)
            }
            Err(e) => Err(SdkError::MalformedPayload(format!(
                "expected an order array: {}",
                e
            ))),
        }
    }
}

/// `POST /api/orders` answers with the created order, sometimes wrapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmitOrderPayload {
    Wrapped { order: OrderResponse },
    Bare(OrderResponse),
}

impl SubmitOrderPayload {
    pub fn decode(value: serde_json::Value) -> Result<OrderResponse, SdkError> {
        if !value.is_object() {
            return Err(SdkError::MalformedPayload(
                "expected an order object".to_string(),
            ));
        }
        match serde_json::from_value::<SubmitOrderPayload>(value) {
            Ok(SubmitOrderPayload::Wrapped { order }) | Ok(SubmitOrderPayload::Bare(order)) => {
                Ok(order)
            }
            Err(e) => Err(SdkError::MalformedPayload(e.to_string())),
        }
    }
}
