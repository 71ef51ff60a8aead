//! HTTP client layer — `TradedeskHttp` with an opt-in retry policy.

pub mod client;
pub mod retry;

pub use client::TradedeskHttp;
pub use retry::{RetryConfig, RetryPolicy};
