//! Feed fetcher — drives a [`TradeFeed`] from a [`PageSource`].

use crate::domain::trade::{FeedPage, PageOutcome, TradeFeed};
use crate::error::SdkError;
use crate::shared::fmt::num::group_thousands;
use std::future::Future;

/// Anything that can produce one page of the feed.
///
/// Implemented by the `Trades` sub-client; tests and alternative transports
/// implement it directly.
pub trait PageSource {
    fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<FeedPage, SdkError>>;
}

/// Owns a feed and its source, and serialises requests through the feed's
/// single in-flight slot.
pub struct FeedFetcher<S> {
    source: S,
    feed: TradeFeed,
}

impl<S: PageSource> FeedFetcher<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self::with_feed(source, TradeFeed::new(page_size))
    }

    pub fn with_feed(source: S, feed: TradeFeed) -> Self {
        Self { source, feed }
    }

    pub fn feed(&self) -> &TradeFeed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut TradeFeed {
        &mut self.feed
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_parts(self) -> (S, TradeFeed) {
        (self.source, self.feed)
    }

    /// Clears held records and the cursor.
    pub fn reset(&mut self) {
        self.feed.reset();
    }

    /// Fetches page `page`: 1 replaces, `current_page + 1` appends.
    pub async fn fetch_page(&mut self, page: u32) -> Result<PageOutcome, SdkError> {
        let request = self.feed.begin_fetch(page)?;
        let result = self
            .source
            .fetch_page(request.page, request.page_size)
            .await;
        self.feed.complete(&request, result)
    }

    /// Fetches the next page. `None` means nothing was dispatched.
    pub async fn load_more(&mut self) -> Option<Result<PageOutcome, SdkError>> {
        let request = self.feed.begin_load_more()?;
        let result = self
            .source
            .fetch_page(request.page, request.page_size)
            .await;
        Some(self.feed.complete(&request, result))
    }

    /// Refetches page 1. Held records survive a failure.
    pub async fn refresh(&mut self) -> Result<PageOutcome, SdkError> {
        self.fetch_page(1).await
    }

    /// Drops everything, then loads page 1.
    pub async fn reload(&mut self) -> Result<PageOutcome, SdkError> {
        self.reset();
        self.fetch_page(1).await
    }
}

/// Footer text under a filtered feed, e.g. `"Showing 12 of 200 loaded (1,250 total)"`.
pub fn load_status(shown: usize, feed: &TradeFeed) -> String {
    let loaded = group_thousands(&feed.len().to_string());
    let shown = group_thousands(&shown.to_string());
    match feed.total() {
        Some(total) => format!(
            "Showing {} of {} loaded ({} total)",
            shown,
            loaded,
            group_thousands(&total.to_string())
        ),
        None => format!("Showing {} of {} loaded", shown, loaded),
    }
}
