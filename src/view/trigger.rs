//! Load-more triggering: scroll proximity plus a trailing-edge debounce.
//!
//! Everything here takes the current [`Instant`] as an argument, so the host
//! event loop decides what "now" is and tests need no clock.

use std::time::{Duration, Instant};

/// Scroll geometry of the list container, in the host's scroll units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> f64 {
        (self.content_height - (self.scroll_top + self.viewport_height)).max(0.0)
    }

    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.viewport_height >= self.content_height - threshold
    }
}

/// Trailing-edge debouncer: fires once, `delay` after the last call.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Registers a signal, pushing the deadline out.
    pub fn call(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Decides when a view should call `load_more`.
///
/// Proximity signals are debounced; [`manual`](Self::manual) fires immediately
/// and swallows any pending debounced fire.
#[derive(Debug, Clone)]
pub struct LoadMoreTrigger {
    threshold: f64,
    debouncer: Debouncer,
}

impl LoadMoreTrigger {
    pub fn new(threshold: f64, debounce: Duration) -> Self {
        Self {
            threshold,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Feeds a scroll event. Returns whether it armed the debouncer.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now: Instant) -> bool {
        if !metrics.is_near_bottom(self.threshold) {
            return false;
        }
        self.debouncer.call(now);
        true
    }

    /// True when a debounced load-more is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        let fire = self.debouncer.poll(now);
        if fire {
            tracing::debug!("Load more triggered by scroll proximity");
        }
        fire
    }

    /// The "load more" button. Always fires.
    pub fn manual(&mut self) -> bool {
        self.debouncer.cancel();
        tracing::debug!("Load more triggered manually");
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Drops a pending fire, e.g. when the view is torn down.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    /// Waits out the pending debounce, if any, and reports whether to fire.
    pub async fn settle(&mut self) -> bool {
        let Some(deadline) = self.debouncer.next_deadline() else {
            return false;
        };
        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            futures_timer::Delay::new(wait).await;
        }
        self.poll(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEAR: ScrollMetrics = ScrollMetrics {
        scroll_top: 1_600.0,
        viewport_height: 800.0,
        content_height: 2_800.0,
    };
    const FAR: ScrollMetrics = ScrollMetrics {
        scroll_top: 0.0,
        viewport_height: 800.0,
        content_height: 2_800.0,
    };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_proximity() {
        assert!(NEAR.is_near_bottom(500.0));
        assert_eq!(NEAR.distance_to_bottom(), 400.0);
        assert!(!FAR.is_near_bottom(500.0));
        assert_eq!(FAR.distance_to_bottom(), 2_000.0);
    }

    #[test]
    fn test_ten_signals_in_300ms_fire_once() {
        let t0 = Instant::now();
        let mut trigger = LoadMoreTrigger::new(500.0, ms(300));
        let mut fired = 0;
        for i in 0..10 {
            let now = t0 + ms(i * 30);
            trigger.on_scroll(NEAR, now);
            if trigger.poll(now) {
                fired += 1;
            }
        }
        // Walk the clock well past the last deadline.
        for step in 0..40 {
            if trigger.poll(t0 + ms(270 + step * 25)) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(!trigger.is_pending());
    }

    #[test]
    fn test_fires_after_quiet_period_only() {
        let t0 = Instant::now();
        let mut trigger = LoadMoreTrigger::new(500.0, ms(300));
        trigger.on_scroll(NEAR, t0);
        assert!(!trigger.poll(t0 + ms(299)));
        assert!(trigger.poll(t0 + ms(300)));
        assert!(!trigger.poll(t0 + ms(600)));
    }

    #[test]
    fn test_far_scroll_does_not_arm() {
        let t0 = Instant::now();
        let mut trigger = LoadMoreTrigger::new(500.0, ms(300));
        assert!(!trigger.on_scroll(FAR, t0));
        assert!(!trigger.poll(t0 + ms(1_000)));
    }

    #[test]
    fn test_manual_cancels_pending() {
        let t0 = Instant::now();
        let mut trigger = LoadMoreTrigger::new(500.0, ms(300));
        trigger.on_scroll(NEAR, t0);
        assert!(trigger.manual());
        assert!(!trigger.poll(t0 + ms(1_000)));
    }

    #[tokio::test]
    async fn test_settle_waits_for_deadline() {
        let mut trigger = LoadMoreTrigger::new(500.0, ms(20));
        assert!(!trigger.settle().await);
        trigger.on_scroll(NEAR, Instant::now());
        assert!(trigger.settle().await);
        assert!(!trigger.is_pending());
    }
}
