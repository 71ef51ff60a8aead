//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types and display logic
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `convert.rs` — `From`/`TryFrom` conversions from wire to domain
//! - `state.rs` — App-owned state containers with update methods
//! - `client.rs` — Sub-client with HTTP methods and caching

pub mod account;
pub mod market;
pub mod order;
pub mod position;
pub mod trade;
