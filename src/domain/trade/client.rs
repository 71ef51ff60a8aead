//! Trades sub-client — the paginated disclosure feed.

use crate::client::TradedeskClient;
use crate::domain::trade::wire::FeedPayload;
use crate::domain::trade::{FeedPage, TradeFeed};
use crate::error::SdkError;
use crate::view::feed::{FeedFetcher, PageSource};

pub struct Trades<'a> {
    pub(crate) client: &'a TradedeskClient,
}

impl<'a> Trades<'a> {
    /// One page of the feed, normalised from either payload shape.
    pub async fn page(&self, page: u32, page_size: u32) -> Result<FeedPage, SdkError> {
        let value = self.client.http.get_trade_feed(page, page_size).await?;
        let payload = FeedPayload::decode(value)?;
        Ok(payload.into_page(page, page_size))
    }

    /// Empty feed state sized from the client's view config.
    pub fn feed(&self) -> TradeFeed {
        TradeFeed::new(self.client.view_config.page_size)
    }

    /// Feed fetcher driving this sub-client.
    pub fn fetcher(self) -> FeedFetcher<Self> {
        let feed = self.feed();
        FeedFetcher::with_feed(self, feed)
    }
}

impl PageSource for Trades<'_> {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<FeedPage, SdkError> {
        self.page(page, page_size).await
    }
}
