//! Cache Module
//!
//! Per-domain in-memory stores with TTL expiry, a hard entry-count bound,
//! and periodic background sweeping.

mod entry;
mod registry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, CachedPayload};
pub use registry::{CacheRegistry, SharedStore};
pub use stats::StoreStats;
pub use store::CacheStore;
