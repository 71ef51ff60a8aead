//! Periodic refresh with explicit teardown.
//!
//! A poll loop is an abortable future. The returned [`PollSubscription`]
//! aborts it when cancelled or dropped, so a view that goes away stops its
//! refreshes without further bookkeeping.

use futures_util::future::{AbortHandle, Abortable};
use futures_util::{Stream, StreamExt};
use std::future::Future;
use std::time::Duration;

/// Yields once per `period`, starting after the first full period.
pub fn interval(period: Duration) -> impl Stream<Item = u64> {
    async_stream::stream! {
        let mut tick = 0u64;
        loop {
            futures_timer::Delay::new(period).await;
            tick += 1;
            yield tick;
        }
    }
}

/// Handle to a running poll loop. Aborts the loop on drop.
#[derive(Debug)]
pub struct PollSubscription {
    handle: AbortHandle,
}

impl PollSubscription {
    pub fn cancel(&self) {
        if !self.handle.is_aborted() {
            tracing::debug!("Poll subscription cancelled");
            self.handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        !self.handle.is_aborted()
    }
}

impl Drop for PollSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Builds a loop that calls `tick` every `period`.
///
/// The caller drives the returned future (spawn it, or await it alongside
/// other work). It completes only once the subscription is cancelled.
pub fn poll_every<F, Fut>(
    period: Duration,
    mut tick: F,
) -> (PollSubscription, impl Future<Output = ()>)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let (handle, registration) = AbortHandle::new_pair();
    let task = async move {
        let mut ticks = Box::pin(interval(period));
        while let Some(n) = ticks.next().await {
            tracing::trace!(tick = n, "Poll tick");
            tick().await;
        }
    };
    let fut = async move {
        let _ = Abortable::new(task, registration).await;
        tracing::debug!("Poll loop stopped");
    };
    (PollSubscription { handle }, fut)
}

/// Spawns a poll loop on the tokio runtime.
#[cfg(feature = "native")]
pub fn spawn_poll<F, Fut>(period: Duration, tick: F) -> PollSubscription
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (subscription, fut) = poll_every(period, tick);
    tokio::spawn(fut);
    subscription
}

/// Spawns a poll loop on the browser event loop.
#[cfg(feature = "wasm")]
pub fn spawn_poll_local<F, Fut>(period: Duration, tick: F) -> PollSubscription
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let (subscription, fut) = poll_every(period, tick);
    wasm_bindgen_futures::spawn_local(fut);
    subscription
}
