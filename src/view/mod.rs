//! View model — the pieces a dashboard view drives directly.
//!
//! - [`feed`]: paginated feed fetching over a [`feed::PageSource`]
//! - [`trigger`]: scroll proximity detection and debouncing for load-more
//! - [`poll`]: scoped periodic refresh, cancelled on drop
//! - [`section`]: last-good-value holder for independently failing sections

pub mod feed;
pub mod poll;
pub mod section;
pub mod trigger;

use std::time::Duration;

pub use feed::{load_status, FeedFetcher, PageSource};
pub use poll::{poll_every, PollSubscription};
pub use section::Section;
pub use trigger::{Debouncer, LoadMoreTrigger, ScrollMetrics};

/// Tunables shared by every view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Records requested per feed page.
    pub page_size: u32,
    /// Quiet period before a proximity signal dispatches a load-more.
    pub debounce: Duration,
    /// Distance from the bottom of the list, in scroll units, that counts as near.
    pub proximity_threshold: f64,
    pub order_poll_interval: Duration,
    pub account_poll_interval: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            debounce: Duration::from_millis(300),
            proximity_threshold: 500.0,
            order_poll_interval: Duration::from_secs(15),
            account_poll_interval: Duration::from_secs(60),
        }
    }
}

impl ViewConfig {
    pub fn load_more_trigger(&self) -> LoadMoreTrigger {
        LoadMoreTrigger::new(self.proximity_threshold, self.debounce)
    }
}
