//! Cache Warmer Task
//!
//! One-shot deferred pre-population: a few seconds after startup the
//! warmer fills the entries whose first real request would otherwise pay
//! the recomputation cost. Warming goes through the normal `set`
//! contract, so warmed entries expire and count like any other.
//!
//! Warming is strictly best-effort: a failed entry is logged and
//! dropped, never retried. The next real request simply takes the
//! cold-cache path.

use std::time::Duration;

use anyhow::Context;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{CacheRegistry, CachedPayload, SharedStore};
use crate::keys;
use crate::models::{Lesson, MarketData, NftCollections, WhaleActivity};

/// Schedules the one-shot warming pass `delay_seconds` after startup.
pub fn spawn_warm_task(registry: CacheRegistry, delay_seconds: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(delay_seconds)).await;

        info!(delay_seconds, "running deferred cache warm");
        let warmed = warm_caches(&registry).await;
        info!(warmed, "cache warm complete");
    })
}

/// Pre-populates the singleton market entries and every lesson level.
///
/// Returns the number of entries actually written. Also backs the
/// `POST /admin/cache/warm` endpoint, which runs it immediately.
pub async fn warm_caches(registry: &CacheRegistry) -> usize {
    let market = registry.market_data();
    let lessons = registry.lessons();

    let mut warmed = 0;

    warmed += warm_entry(
        &market,
        keys::MARKET_DATA_KEY.to_string(),
        json_payload(&MarketData::compute()),
    )
    .await;
    warmed += warm_entry(
        &market,
        keys::WHALE_ACTIVITY_KEY.to_string(),
        json_payload(&WhaleActivity::compute()),
    )
    .await;
    warmed += warm_entry(
        &market,
        keys::NFT_COLLECTIONS_KEY.to_string(),
        json_payload(&NftCollections::compute()),
    )
    .await;

    for level in Lesson::LEVELS {
        let payload = Lesson::compute(level)
            .context("unknown lesson level")
            .and_then(|lesson| json_payload(&lesson));
        warmed += warm_entry(&lessons, keys::lessons_key(level), payload).await;
    }

    warmed
}

/// Writes one warmed entry; a failure is logged and swallowed.
async fn warm_entry(
    store: &SharedStore,
    key: String,
    payload: anyhow::Result<CachedPayload>,
) -> usize {
    match payload {
        Ok(payload) => {
            store.write().await.set(key, payload);
            1
        }
        Err(err) => {
            warn!(key = %key, error = %err, "cache warm failed for entry");
            0
        }
    }
}

fn json_payload<T: serde::Serialize>(value: &T) -> anyhow::Result<CachedPayload> {
    CachedPayload::json(value).context("serializing warm payload")
}
