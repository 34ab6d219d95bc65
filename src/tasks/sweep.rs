//! Expiry Sweep Task
//!
//! Each store gets its own background loop that periodically removes
//! expired entries. The sweep runs independently of request traffic;
//! reads already treat expired entries as absent, so the sweep only
//! reclaims memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheRegistry, SharedStore};

/// Spawns one sweep loop per store in the registry.
///
/// Returns the task handles so the caller can abort them during
/// graceful shutdown.
pub fn spawn_sweep_tasks(registry: &CacheRegistry) -> Vec<JoinHandle<()>> {
    registry
        .all()
        .into_iter()
        .map(|store| spawn_sweep_task(store.clone()))
        .collect()
}

/// Spawns the sweep loop for a single store, at the store's own fixed
/// interval.
pub fn spawn_sweep_task(store: SharedStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (name, interval_secs) = {
            let guard = store.read().await;
            (guard.name(), guard.sweep_interval_seconds())
        };
        let interval = Duration::from_secs(interval_secs);

        info!(
            store = name,
            interval_secs, "starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.sweep();

            if removed > 0 {
                info!(store = name, removed, "sweep removed expired entries");
            } else {
                debug!(store = name, "sweep found no expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, CachedPayload};
    use crate::config::StoreConfig;
    use axum::body::Bytes;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn shared_store(ttl_seconds: u64, sweep_interval_seconds: u64) -> SharedStore {
        Arc::new(RwLock::new(CacheStore::new(&StoreConfig {
            name: "test",
            ttl_seconds,
            sweep_interval_seconds,
            max_entries: 100,
        })))
    }

    fn payload() -> CachedPayload {
        CachedPayload {
            body: Bytes::from_static(b"v"),
            content_type: None,
        }
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let store = shared_store(1, 1);

        store.write().await.set("expire_soon".to_string(), payload());

        let handle = spawn_sweep_task(store.clone());

        // Entry expires at 1s, sweep fires on a 1s period
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // len() shows physical removal, not just read-side masking
        assert_eq!(store.read().await.len(), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let store = shared_store(3600, 1);

        store.write().await.set("long_lived".to_string(), payload());

        let handle = spawn_sweep_task(store.clone());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(store.read().await.len(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_tasks_can_be_aborted() {
        let registry = CacheRegistry::with_defaults();

        let handles = spawn_sweep_tasks(&registry);
        assert_eq!(handles.len(), 4);

        for handle in &handles {
            handle.abort();
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        for handle in &handles {
            assert!(handle.is_finished(), "Task should be finished after abort");
        }
    }
}
