//! Cache Statistics Module
//!
//! Tracks per-store hit/miss counters and the live key count.

use serde::Serialize;

// == Store Stats ==
/// Snapshot of a single store's performance counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Current number of live entries in the store
    pub key_count: usize,
    /// Number of lookups answered from the cache
    pub hits: u64,
    /// Number of lookups that found no valid entry (absent or expired)
    pub misses: u64,
}

impl StoreStats {
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the hit rate: hits / (hits + misses), or 0.0 when idle.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Update Key Count ==
    /// Updates the live key count.
    pub fn set_key_count(&mut self, count: usize) {
        self.key_count = count;
    }
}
