//! Trade feed state — app-owned pagination state with SDK-provided update logic.

use super::filter::RecordSet;
use super::{FeedPage, TradeRecord};
use crate::error::SdkError;
use crate::shared::RecordId;
use std::collections::HashSet;

/// Ticket for one dispatched page request.
///
/// Carries the feed session it belongs to, so a response that lands after a
/// [`TradeFeed::reset`] is recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
    generation: u64,
}

/// What applying a page response did to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page 1 replaced the held collection.
    Replaced { records: usize },
    /// A forward page was appended. `duplicates` were already held and skipped.
    Appended { added: usize, duplicates: usize },
    /// The response belonged to an earlier session and was dropped.
    Stale,
}

/// Accumulated, de-duplicated trade feed for one view.
///
/// The app owns instances of this type. Dispatch goes through
/// [`begin_fetch`](Self::begin_fetch) / [`begin_load_more`](Self::begin_load_more),
/// and responses come back through [`complete`](Self::complete). At most one
/// request is outstanding at a time.
#[derive(Debug, Clone)]
pub struct TradeFeed {
    records: Vec<TradeRecord>,
    seen: HashSet<RecordId>,
    current_page: u32,
    total: Option<u64>,
    total_pages: Option<u32>,
    page_size: u32,
    in_flight: Option<PageRequest>,
    generation: u64,
    version: u64,
    last_error: Option<String>,
}

impl TradeFeed {
    pub fn new(page_size: u32) -> Self {
        Self {
            records: Vec::new(),
            seen: HashSet::new(),
            current_page: 0,
            total: None,
            total_pages: None,
            page_size: page_size.max(1),
            in_flight: None,
            generation: 0,
            version: 0,
            last_error: None,
        }
    }

    /// Drops every held record and the cursor, and orphans any in-flight request.
    pub fn reset(&mut self) {
        self.records.clear();
        self.seen.clear();
        self.current_page = 0;
        self.total = None;
        self.total_pages = None;
        self.in_flight = None;
        self.last_error = None;
        self.generation += 1;
        self.version += 1;
        tracing::debug!(generation = self.generation, "Trade feed reset");
    }

    /// Reserves the single request slot for page `page`.
    ///
    /// Only page 1 (refresh) and `current_page + 1` (forward) are accepted.
    pub fn begin_fetch(&mut self, page: u32) -> Result<PageRequest, SdkError> {
        if let Some(pending) = &self.in_flight {
            return Err(SdkError::Validation(format!(
                "Page {} is still loading",
                pending.page
            )));
        }
        let forward = self.current_page + 1;
        if page != 1 && page != forward {
            return Err(SdkError::Validation(format!(
                "Cannot fetch page {}: expected 1 or {}",
                page, forward
            )));
        }
        if page > 1 && !self.has_more() {
            return Err(SdkError::Validation(format!(
                "Cannot fetch page {}: feed has {} pages",
                page,
                self.total_pages.unwrap_or(self.current_page)
            )));
        }

        let request = PageRequest {
            page,
            page_size: self.page_size,
            generation: self.generation,
        };
        self.in_flight = Some(request.clone());
        tracing::debug!(page, page_size = self.page_size, "Dispatching trade feed page");
        Ok(request)
    }

    /// Next forward page, or `None` when the feed is exhausted or busy.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            tracing::debug!("Load more skipped: request in flight");
            return None;
        }
        if !self.has_more() {
            tracing::debug!(page = self.current_page, "Load more skipped: last page reached");
            return None;
        }
        self.begin_fetch(self.current_page + 1).ok()
    }

    /// Applies the response for `request`.
    ///
    /// Failures release the slot and record the error; held records are kept.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<FeedPage, SdkError>,
    ) -> Result<PageOutcome, SdkError> {
        if self.in_flight.as_ref() != Some(request) {
            tracing::debug!(
                page = request.page,
                generation = request.generation,
                "Dropping stale trade feed response"
            );
            return Ok(PageOutcome::Stale);
        }
        self.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(page = request.page, error = %e, "Trade feed page failed");
                self.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        self.last_error = None;
        self.current_page = request.page;
        self.total = Some(page.total);
        self.total_pages = Some(page.total_pages.max(1));
        self.version += 1;

        let outcome = if request.page == 1 {
            self.seen = page.records.iter().map(|r| r.id.clone()).collect();
            self.records = page.records;
            PageOutcome::Replaced {
                records: self.records.len(),
            }
        } else {
            let (fresh, held): (Vec<_>, Vec<_>) = page
                .records
                .into_iter()
                .partition(|r| !self.seen.contains(&r.id));
            self.seen.extend(fresh.iter().map(|r| r.id.clone()));
            let added = fresh.len();
            self.records.extend(fresh);
            PageOutcome::Appended {
                added,
                duplicates: held.len(),
            }
        };

        tracing::debug!(
            page = request.page,
            ?outcome,
            held = self.records.len(),
            total_pages = self.total_pages,
            "Trade feed page applied"
        );
        Ok(outcome)
    }

    pub fn has_more(&self) -> bool {
        self.total_pages
            .map_or(true, |total_pages| self.current_page < total_pages)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// A forward page (not a refresh) is loading.
    pub fn is_loading_more(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|r| r.page > 1)
    }

    pub fn in_flight(&self) -> Option<&PageRequest> {
        self.in_flight.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Server-reported total record count, once a page has arrived.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Highest page applied so far; 0 before the first page.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn get(&self, id: &RecordId) -> Option<&TradeRecord> {
        self.records.iter().find(|r| &r.id == id)
    }
}

impl Default for TradeFeed {
    fn default() -> Self {
        Self::new(100)
    }
}

impl RecordSet for TradeFeed {
    fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[i64], page: u32, total_pages: u32) -> FeedPage {
        FeedPage {
            records: ids.iter().map(|id| TradeRecord::new(*id)).collect(),
            page,
            page_size: 2,
            total: (total_pages * 2) as u64,
            total_pages,
        }
    }

    fn held_ids(feed: &TradeFeed) -> Vec<String> {
        feed.records().iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_forward_pages_concatenate() {
        let mut feed = TradeFeed::new(2);
        for (n, ids) in [(1, [1, 2]), (2, [3, 4]), (3, [5, 6])] {
            let req = if n == 1 {
                feed.begin_fetch(1).unwrap()
            } else {
                feed.begin_load_more().unwrap()
            };
            assert_eq!(req.page, n);
            feed.complete(&req, Ok(page(&ids, n, 3))).unwrap();
        }
        assert_eq!(held_ids(&feed), ["1", "2", "3", "4", "5", "6"]);
        assert!(!feed.has_more());
        assert!(feed.begin_load_more().is_none());
    }

    #[test]
    fn test_drifted_page_skips_held_ids() {
        let mut feed = TradeFeed::new(2);
        let req = feed.begin_fetch(1).unwrap();
        feed.complete(&req, Ok(page(&[1, 2], 1, 3))).unwrap();
        let req = feed.begin_load_more().unwrap();
        let outcome = feed.complete(&req, Ok(page(&[2, 3], 2, 3))).unwrap();
        assert_eq!(outcome, PageOutcome::Appended { added: 1, duplicates: 1 });
        assert_eq!(held_ids(&feed), ["1", "2", "3"]);
    }

    #[test]
    fn test_page_one_replaces() {
        let mut feed = TradeFeed::new(2);
        let req = feed.begin_fetch(1).unwrap();
        feed.complete(&req, Ok(page(&[1, 2], 1, 2))).unwrap();
        let req = feed.begin_fetch(1).unwrap();
        let outcome = feed.complete(&req, Ok(page(&[7], 1, 1))).unwrap();
        assert_eq!(outcome, PageOutcome::Replaced { records: 1 });
        assert_eq!(held_ids(&feed), ["7"]);
        assert_eq!(feed.total_pages(), Some(1));
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut feed = TradeFeed::new(2);
        let _req = feed.begin_fetch(1).unwrap();
        assert!(feed.is_loading());
        assert!(feed.begin_load_more().is_none());
        assert!(matches!(feed.begin_fetch(1), Err(SdkError::Validation(_))));
    }

    #[test]
    fn test_out_of_order_page_rejected() {
        let mut feed = TradeFeed::new(2);
        assert!(feed.begin_fetch(3).is_err());
        assert!(feed.begin_fetch(0).is_err());
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_failure_keeps_held_records() {
        let mut feed = TradeFeed::new(2);
        let req = feed.begin_fetch(1).unwrap();
        feed.complete(&req, Ok(page(&[1, 2], 1, 3))).unwrap();

        let req = feed.begin_load_more().unwrap();
        let err = feed
            .complete(&req, Err(SdkError::MalformedPayload("{}".into())))
            .unwrap_err();
        assert!(matches!(err, SdkError::MalformedPayload(_)));
        assert_eq!(held_ids(&feed), ["1", "2"]);
        assert_eq!(feed.current_page(), 1);
        assert!(feed.last_error().is_some());
        assert!(!feed.is_loading());

        // Retrying the same page is allowed after the failure.
        assert_eq!(feed.begin_load_more().unwrap().page, 2);
    }

    #[test]
    fn test_response_after_reset_is_stale() {
        let mut feed = TradeFeed::new(2);
        let old = feed.begin_fetch(1).unwrap();
        feed.reset();
        let fresh = feed.begin_fetch(1).unwrap();

        let outcome = feed.complete(&old, Ok(page(&[9], 1, 1))).unwrap();
        assert_eq!(outcome, PageOutcome::Stale);
        assert!(feed.is_empty());
        assert!(feed.is_loading());

        feed.complete(&fresh, Ok(page(&[1, 2], 1, 1))).unwrap();
        assert_eq!(held_ids(&feed), ["1", "2"]);
    }

    #[test]
    fn test_version_bumps_on_change() {
        let mut feed = TradeFeed::new(2);
        let v0 = feed.version();
        let req = feed.begin_fetch(1).unwrap();
        assert_eq!(feed.version(), v0);
        feed.complete(&req, Ok(page(&[1], 1, 1))).unwrap();
        assert!(feed.version() > v0);
    }

    #[test]
    fn test_has_more_before_first_page() {
        let mut feed = TradeFeed::new(2);
        assert!(feed.has_more());
        assert_eq!(feed.begin_load_more().unwrap().page, 1);
    }
}
