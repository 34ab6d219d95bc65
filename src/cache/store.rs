//! Cache Store Module
//!
//! A single named key/value store with per-store TTL, a hard entry-count
//! bound, and lazy expiry on read. One instance exists per data domain.

use std::collections::HashMap;

use tracing::trace;

use crate::cache::{CacheEntry, CachedPayload, StoreStats};
use crate::config::StoreConfig;

// == Cache Store ==
/// In-memory TTL store for one data domain.
///
/// Best-effort by construction: a lookup that finds nothing valid is a
/// miss, never an error, and an insert refused at capacity is invisible
/// to the caller except as a future miss.
#[derive(Debug)]
pub struct CacheStore {
    /// Domain name, e.g. "market-data"
    name: &'static str,
    /// TTL applied to every entry at insertion
    ttl_seconds: u64,
    /// Period of the background expiry sweep
    sweep_interval_seconds: u64,
    /// Hard cap on live entry count
    max_entries: usize,
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Hit/miss counters
    stats: StoreStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store from its fixed per-domain configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            name: config.name,
            ttl_seconds: config.ttl_seconds,
            sweep_interval_seconds: config.sweep_interval_seconds,
            max_entries: config.max_entries,
            entries: HashMap::new(),
            stats: StoreStats::new(),
        }
    }

    // == Get ==
    /// Returns the payload for `key` if present and unexpired.
    ///
    /// Expiry is checked lazily on every read, independent of the
    /// background sweep: an expired-but-unswept entry is removed here and
    /// counted as a miss, exactly like a key that was never set.
    pub fn get(&mut self, key: &str) -> Option<CachedPayload> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.set_key_count(self.entries.len());
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites `key`, resetting its expiry window.
    ///
    /// Admission policy: a NEW key arriving while the store is at
    /// `max_entries` is rejected silently. The cache is best-effort, so a
    /// lost entry costs a future recomputation, nothing more. Overwrites
    /// never change the entry count and are always admitted.
    pub fn set(&mut self, key: String, value: CachedPayload) {
        let is_new = !self.entries.contains_key(&key);

        if is_new && self.entries.len() >= self.max_entries {
            trace!(store = self.name, key = %key, "at capacity, rejecting new entry");
            return;
        }

        let entry = CacheEntry::new(value, self.ttl_seconds);
        self.entries.insert(key, entry);
        self.stats.set_key_count(self.entries.len());
    }

    // == Delete ==
    /// Removes an entry if present; no-op otherwise.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.set_key_count(self.entries.len());
        }
        removed
    }

    // == Flush ==
    /// Removes all entries immediately. Returns the number removed.
    pub fn flush(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_key_count(0);
        count
    }

    // == Sweep ==
    /// Removes every entry whose TTL has elapsed.
    ///
    /// Called on a fixed period by the background sweep task; returns the
    /// number of entries physically removed.
    pub fn sweep(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        self.stats.set_key_count(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the store's counters.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_key_count(self.entries.len());
        stats
    }

    /// Domain name of this store.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Period of the background sweep, in seconds.
    pub fn sweep_interval_seconds(&self) -> u64 {
        self.sweep_interval_seconds
    }

    // == Length ==
    /// Current number of entries, including any not-yet-swept expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
