//! Cache Registry Module
//!
//! The fixed set of per-domain cache stores, built once at process start
//! and passed by handle to the router, the background tasks, and the
//! admin handlers. There is deliberately no way to add or remove stores
//! after construction.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheStore, StoreStats};
use crate::config::StoreConfig;

/// Thread-safe handle to a single store.
pub type SharedStore = Arc<RwLock<CacheStore>>;

// == Cache Registry ==
/// One store per data domain, each with its own TTL, sweep interval and
/// capacity.
#[derive(Debug, Clone)]
pub struct CacheRegistry {
    market_data: SharedStore,
    user_data: SharedStore,
    lessons: SharedStore,
    forum: SharedStore,
}

impl CacheRegistry {
    // == Constructor ==
    /// Builds all four domain stores from their fixed configurations.
    pub fn new(
        market_data: &StoreConfig,
        user_data: &StoreConfig,
        lessons: &StoreConfig,
        forum: &StoreConfig,
    ) -> Self {
        Self {
            market_data: Arc::new(RwLock::new(CacheStore::new(market_data))),
            user_data: Arc::new(RwLock::new(CacheStore::new(user_data))),
            lessons: Arc::new(RwLock::new(CacheStore::new(lessons))),
            forum: Arc::new(RwLock::new(CacheStore::new(forum))),
        }
    }

    /// Builds the registry with the standard per-domain configuration.
    pub fn with_defaults() -> Self {
        Self::new(
            &StoreConfig::MARKET_DATA,
            &StoreConfig::USER_DATA,
            &StoreConfig::LESSONS,
            &StoreConfig::FORUM,
        )
    }

    // == Store Accessors ==
    /// Market data store: market snapshot, whale activity, NFT collections.
    pub fn market_data(&self) -> SharedStore {
        self.market_data.clone()
    }

    /// User data store: per-user progress records.
    pub fn user_data(&self) -> SharedStore {
        self.user_data.clone()
    }

    /// Lesson content store.
    pub fn lessons(&self) -> SharedStore {
        self.lessons.clone()
    }

    /// Forum listing store.
    pub fn forum(&self) -> SharedStore {
        self.forum.clone()
    }

    /// All stores, for iteration by the sweep task and admin operations.
    pub fn all(&self) -> [&SharedStore; 4] {
        [&self.market_data, &self.user_data, &self.lessons, &self.forum]
    }

    // == Stats Snapshot ==
    /// Read-only snapshot of every store's counters, keyed by domain name.
    pub async fn stats(&self) -> BTreeMap<String, StoreStats> {
        let mut snapshot = BTreeMap::new();
        for store in self.all() {
            let guard = store.read().await;
            snapshot.insert(guard.name().to_string(), guard.stats());
        }
        snapshot
    }

    // == Flush All ==
    /// Flushes every store. Returns the total number of entries removed.
    pub async fn flush_all(&self) -> usize {
        let mut removed = 0;
        for store in self.all() {
            removed += store.write().await.flush();
        }
        removed
    }
}
