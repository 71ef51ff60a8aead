//! Orders sub-client — list, refresh, cancel, submit.

use crate::client::TradedeskClient;
use crate::domain::order::convert::{orders_from_value, submitted_order_from_value};
use crate::domain::order::{OrderBoard, OrderRequest, OrderStatusFilter, ReconcileReport};
use crate::domain::trade::TradeRecord;
use crate::error::SdkError;
use crate::shared::RecordId;

pub struct Orders<'a> {
    pub(crate) client: &'a TradedeskClient,
}

impl<'a> Orders<'a> {
    pub async fn list(&self, filter: OrderStatusFilter) -> Result<Vec<TradeRecord>, SdkError> {
        let value = self.client.http.get_orders(filter).await?;
        orders_from_value(value)
    }

    /// Refetches and merges into `board`. On failure the board keeps its orders.
    pub async fn refresh(
        &self,
        board: &mut OrderBoard,
        filter: OrderStatusFilter,
    ) -> Result<ReconcileReport, SdkError> {
        match self.list(filter).await {
            Ok(orders) => Ok(board.apply_snapshot(orders)),
            Err(e) => {
                board.record_error(&e);
                Err(e)
            }
        }
    }

    /// `DELETE /api/orders/{id}`, then the local status flips to canceled.
    pub async fn cancel(&self, board: &mut OrderBoard, id: &RecordId) -> Result<(), SdkError> {
        let http = &self.client.http;
        board
            .request_cancel(id, |id| async move {
                http.cancel_order(id.as_str()).await.map_err(SdkError::from)
            })
            .await
    }

    /// Validated submission. Never retried.
    pub async fn submit(&self, request: &OrderRequest) -> Result<TradeRecord, SdkError> {
        tracing::info!(
            symbol = %request.symbol,
            side = request.side.as_str(),
            order_type = %request.order_type,
            client_order_id = %request.client_order_id,
            "Submitting order"
        );
        let value = self.client.http.submit_order(request).await?;
        submitted_order_from_value(value)
    }
}
