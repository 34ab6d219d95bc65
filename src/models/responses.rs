//! Response DTOs for the admin and health endpoints.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::StoreStats;

/// Response body for GET /admin/cache/stats
///
/// One entry per domain store, plus each store's derived hit rate.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub stores: BTreeMap<String, StoreStatsEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStatsEntry {
    pub key_count: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

impl CacheStatsResponse {
    /// Creates the response from per-store snapshots.
    pub fn new(snapshots: BTreeMap<String, StoreStats>) -> Self {
        let stores = snapshots
            .into_iter()
            .map(|(name, stats)| {
                let hit_rate = stats.hit_rate();
                (
                    name,
                    StoreStatsEntry {
                        key_count: stats.key_count,
                        hits: stats.hits,
                        misses: stats.misses,
                        hit_rate,
                    },
                )
            })
            .collect();
        Self { stores }
    }
}

/// Response body for POST /admin/cache/flush
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub message: String,
    pub entries_removed: usize,
}

impl FlushResponse {
    pub fn new(entries_removed: usize) -> Self {
        Self {
            message: "All caches flushed".to_string(),
            entries_removed,
        }
    }
}

/// Response body for POST /admin/cache/warm
#[derive(Debug, Clone, Serialize)]
pub struct WarmResponse {
    pub message: String,
    pub entries_warmed: usize,
}

impl WarmResponse {
    pub fn new(entries_warmed: usize) -> Self {
        Self {
            message: "Cache warming complete".to_string(),
            entries_warmed,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
