//! Order state containers — app-owned, SDK-provided update logic.

use super::lifecycle::{LifecyclePhase, CANCELED_STATUS};
use super::OrderStatusFilter;
use crate::domain::trade::{RecordSet, TradeRecord};
use crate::error::SdkError;
use crate::shared::RecordId;
use std::collections::{HashMap, HashSet};
use std::future::Future;

/// Counts from merging a refetched order list into the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub inserted: usize,
    pub updated: usize,
    /// Refetched records whose status would have moved backwards; the held copy won.
    pub held_back: usize,
    pub removed: usize,
}

/// The orders table for one view.
///
/// The board never lets a held order move from closed back to open, or from a
/// recognised phase back to unknown, whatever a refetch says. The only local
/// mutation is the status rewrite after a confirmed cancel.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: Vec<TradeRecord>,
    index: HashMap<RecordId, usize>,
    pending_cancels: HashSet<RecordId>,
    version: u64,
    last_error: Option<String>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the board with a refetched list, merging monotonically.
    pub fn apply_snapshot(&mut self, incoming: Vec<TradeRecord>) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut orders = Vec::with_capacity(incoming.len());
        let mut index = HashMap::with_capacity(incoming.len());

        for record in incoming {
            if index.contains_key(&record.id) {
                continue;
            }
            let merged = match self.get(&record.id) {
                None => {
                    report.inserted += 1;
                    record
                }
                Some(held) if held.phase().can_transition_to(record.phase()) => {
                    if held != &record {
                        report.updated += 1;
                    }
                    record
                }
                Some(held) => {
                    tracing::debug!(
                        id = %record.id,
                        held = ?held.status,
                        incoming = ?record.status,
                        "Ignoring backwards status transition"
                    );
                    report.held_back += 1;
                    held.clone()
                }
            };
            index.insert(merged.id.clone(), orders.len());
            orders.push(merged);
        }

        report.removed = self
            .orders
            .iter()
            .filter(|o| !index.contains_key(&o.id))
            .count();
        self.pending_cancels.retain(|id| index.contains_key(id));
        self.orders = orders;
        self.index = index;
        self.last_error = None;
        self.version += 1;
        tracing::debug!(?report, held = self.orders.len(), "Order board reconciled");
        report
    }

    pub fn get(&self, id: &RecordId) -> Option<&TradeRecord> {
        self.index.get(id).and_then(|i| self.orders.get(*i))
    }

    pub fn orders(&self) -> &[TradeRecord] {
        &self.orders
    }

    pub fn by_phase(&self, phase: LifecyclePhase) -> Vec<&TradeRecord> {
        self.orders.iter().filter(|o| o.phase() == phase).collect()
    }

    /// Orders visible under a status tab.
    pub fn visible(&self, filter: OrderStatusFilter) -> Vec<&TradeRecord> {
        self.orders
            .iter()
            .filter(|o| filter.matches(o.phase()))
            .collect()
    }

    pub fn is_cancel_pending(&self, id: &RecordId) -> bool {
        self.pending_cancels.contains(id)
    }

    /// Whether the cancel affordance should be enabled for `id`.
    pub fn can_cancel(&self, id: &RecordId) -> bool {
        self.get(id).is_some_and(|o| o.is_cancellable()) && !self.is_cancel_pending(id)
    }

    /// Gates and marks a cancel as in flight.
    pub fn begin_cancel(&mut self, id: &RecordId) -> Result<(), SdkError> {
        let order = self
            .get(id)
            .ok_or_else(|| SdkError::Validation(format!("Order {} not found", id)))?;
        if !order.is_cancellable() {
            return Err(SdkError::Validation(format!(
                "Order {} is {} and cannot be canceled",
                id,
                order.status.as_deref().unwrap_or("of unknown status")
            )));
        }
        if !self.pending_cancels.insert(id.clone()) {
            return Err(SdkError::Validation(format!(
                "Cancel for order {} is already in flight",
                id
            )));
        }
        Ok(())
    }

    /// The server accepted the cancel: rewrite the local status.
    pub fn confirm_cancel(&mut self, id: &RecordId) -> bool {
        self.pending_cancels.remove(id);
        let Some(order) = self.index.get(id).and_then(|i| self.orders.get_mut(*i)) else {
            return false;
        };
        order.status = Some(CANCELED_STATUS.to_string());
        self.version += 1;
        tracing::info!(id = %id, "Order canceled");
        true
    }

    /// The cancel failed: status is left as it was.
    pub fn abort_cancel(&mut self, id: &RecordId, error: &SdkError) {
        self.pending_cancels.remove(id);
        self.last_error = Some(error.user_message());
        tracing::warn!(id = %id, error = %error, "Order cancel rejected");
    }

    /// Gates, sends, and applies a cancel.
    ///
    /// `send` performs the request. The status only changes if it succeeds.
    pub async fn request_cancel<F, Fut>(&mut self, id: &RecordId, send: F) -> Result<(), SdkError>
    where
        F: FnOnce(RecordId) -> Fut,
        Fut: Future<Output = Result<(), SdkError>>,
    {
        self.begin_cancel(id)?;
        match send(id.clone()).await {
            Ok(()) => {
                self.confirm_cancel(id);
                Ok(())
            }
            Err(e) => {
                self.abort_cancel(id, &e);
                Err(e)
            }
        }
    }

    /// Records a failed refresh. Held orders are kept.
    pub fn record_error(&mut self, error: &SdkError) {
        tracing::warn!(error = %error, "Order refresh failed");
        self.last_error = Some(error.user_message());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn clear(&mut self) {
        self.orders.clear();
        self.index.clear();
        self.pending_cancels.clear();
        self.version += 1;
    }
}

impl RecordSet for OrderBoard {
    fn records(&self) -> &[TradeRecord] {
        &self.orders
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;

    fn order(id: i64, status: Option<&str>) -> TradeRecord {
        let mut r = TradeRecord::new(id);
        r.status = status.map(str::to_string);
        r.side = Some("buy".to_string());
        r
    }

    fn board(orders: Vec<TradeRecord>) -> OrderBoard {
        let mut b = OrderBoard::new();
        b.apply_snapshot(orders);
        b
    }

    fn status(b: &OrderBoard, id: i64) -> Option<String> {
        b.get(&RecordId::from(id)).and_then(|o| o.status.clone())
    }

    #[tokio::test]
    async fn test_cancel_success_rewrites_status() {
        let mut b = board(vec![order(42, Some("new"))]);
        b.request_cancel(&RecordId::from(42), |_| async { Ok(()) })
            .await
            .unwrap();
        assert_eq!(status(&b, 42).as_deref(), Some("canceled"));
        assert_eq!(b.by_phase(LifecyclePhase::Closed).len(), 1);
        assert!(!b.can_cancel(&RecordId::from(42)));
    }

    #[tokio::test]
    async fn test_cancel_failure_leaves_status() {
        let mut b = board(vec![order(42, Some("new"))]);
        let err = b
            .request_cancel(&RecordId::from(42), |_| async {
                Err(SdkError::Http(HttpError::ServerError {
                    status: 500,
                    body: "broker unavailable".into(),
                }))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Http(_)));
        assert_eq!(status(&b, 42).as_deref(), Some("new"));
        assert!(b.last_error().is_some());
        assert!(b.can_cancel(&RecordId::from(42)));
    }

    #[tokio::test]
    async fn test_cancel_gated_for_closed_orders() {
        let mut b = board(vec![order(1, Some("filled")), order(2, None)]);
        let mut sent = 0;
        for id in [1, 2, 3] {
            let res = b
                .request_cancel(&RecordId::from(id), |_| {
                    sent += 1;
                    async { Ok(()) }
                })
                .await;
            assert!(matches!(res, Err(SdkError::Validation(_))));
        }
        assert_eq!(sent, 0);
    }

    #[test]
    fn test_duplicate_cancel_rejected_while_pending() {
        let mut b = board(vec![order(7, Some("accepted"))]);
        b.begin_cancel(&RecordId::from(7)).unwrap();
        assert!(b.is_cancel_pending(&RecordId::from(7)));
        assert!(b.begin_cancel(&RecordId::from(7)).is_err());
        assert!(b.confirm_cancel(&RecordId::from(7)));
        assert!(!b.is_cancel_pending(&RecordId::from(7)));
    }

    #[test]
    fn test_refetch_never_reopens_closed_order() {
        let mut b = board(vec![order(42, Some("new"))]);
        b.begin_cancel(&RecordId::from(42)).unwrap();
        b.confirm_cancel(&RecordId::from(42));

        // Lagging server still reports the order open.
        let report = b.apply_snapshot(vec![order(42, Some("new"))]);
        assert_eq!(report.held_back, 1);
        assert_eq!(status(&b, 42).as_deref(), Some("canceled"));
    }

    #[test]
    fn test_refetch_never_returns_to_unknown() {
        let mut b = board(vec![order(1, Some("partially_filled"))]);
        let report = b.apply_snapshot(vec![order(1, Some("mystery"))]);
        assert_eq!(report.held_back, 1);
        assert_eq!(status(&b, 1).as_deref(), Some("partially_filled"));
    }

    #[test]
    fn test_refetch_applies_forward_transitions() {
        let mut b = board(vec![order(1, None), order(2, Some("new")), order(3, Some("held"))]);
        let report = b.apply_snapshot(vec![
            order(1, Some("accepted")),
            order(2, Some("filled")),
            order(4, Some("pending_new")),
        ]);
        assert_eq!(
            report,
            ReconcileReport {
                inserted: 1,
                updated: 2,
                held_back: 0,
                removed: 1
            }
        );
        assert_eq!(status(&b, 2).as_deref(), Some("filled"));
        assert!(b.get(&RecordId::from(3)).is_none());
        let ids: Vec<_> = b.orders().iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, ["1", "2", "4"]);
    }

    #[test]
    fn test_visible_by_status_tab() {
        let b = board(vec![
            order(1, Some("new")),
            order(2, Some("filled")),
            order(3, Some("whatever")),
        ]);
        assert_eq!(b.visible(OrderStatusFilter::All).len(), 3);
        assert_eq!(b.visible(OrderStatusFilter::Open).len(), 1);
        assert_eq!(b.visible(OrderStatusFilter::Closed).len(), 1);
    }

    #[test]
    fn test_version_tracks_mutations() {
        let mut b = board(vec![order(1, Some("new"))]);
        let v = b.version();
        b.begin_cancel(&RecordId::from(1)).unwrap();
        assert_eq!(b.version(), v);
        b.confirm_cancel(&RecordId::from(1));
        assert!(b.version() > v);
    }
}
