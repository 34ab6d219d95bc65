//! API Handlers
//!
//! The backend handlers the middleware wraps, plus the admin surface.
//! The domain handlers stand in for the expensive recomputation the
//! cache shields; each one runs only on a cache miss for its route.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::cache::CacheRegistry;
use crate::error::{ApiError, Result};
use crate::models::{
    CacheStatsResponse, FlushResponse, ForumPage, HealthResponse, Lesson, MarketData,
    NftCollections, UserProgress, WarmResponse, WhaleActivity,
};
use crate::tasks::warm_caches;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The fixed set of domain stores, built once in main
    pub registry: CacheRegistry,
    /// Global cache kill switch, from configuration
    pub cache_enabled: bool,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: CacheRegistry) -> Self {
        Self {
            registry,
            cache_enabled: true,
        }
    }

    /// Overrides the cache kill switch.
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

// == Domain Handlers ==

/// Handler for GET /market-data
pub async fn market_data_handler() -> Json<MarketData> {
    Json(MarketData::compute())
}

/// Handler for GET /whale-activity
pub async fn whale_activity_handler() -> Json<WhaleActivity> {
    Json(WhaleActivity::compute())
}

/// Handler for GET /nft-collections
pub async fn nft_collections_handler() -> Json<NftCollections> {
    Json(NftCollections::compute())
}

/// Handler for GET /users/:user_id/progress
pub async fn user_progress_handler(Path(user_id): Path<String>) -> Json<UserProgress> {
    Json(UserProgress::compute(&user_id))
}

/// Handler for GET /lessons/:level
///
/// Unknown levels fail with 404; the middleware relays the failure and
/// caches nothing, so a later request for a real level still computes.
pub async fn lesson_handler(Path(level): Path<String>) -> Result<Json<Lesson>> {
    Lesson::compute(&level)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no lessons for level '{level}'")))
}

/// Query parameters for the forum listing.
///
/// The page is parsed leniently so the handler and the key generator
/// agree: anything unparseable means page 1.
#[derive(Debug, Deserialize)]
pub struct ForumQuery {
    #[serde(default)]
    pub page: Option<String>,
}

impl ForumQuery {
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1)
    }
}

/// Handler for GET /forum/posts?page=N
pub async fn forum_posts_handler(Query(query): Query<ForumQuery>) -> Json<ForumPage> {
    Json(ForumPage::compute(query.page()))
}

// == Admin Handlers ==

/// Handler for GET /admin/cache/stats
///
/// Read-only: reports each store's counters without touching them.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let snapshots = state.registry.stats().await;
    Json(CacheStatsResponse::new(snapshots))
}

/// Handler for POST /admin/cache/flush
///
/// Administrative cache-busting: flushes every store, immediately and
/// totally.
pub async fn flush_caches_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let removed = state.registry.flush_all().await;
    Json(FlushResponse::new(removed))
}

/// Handler for POST /admin/cache/warm
///
/// Runs the warming pass immediately instead of waiting for the
/// startup timer.
pub async fn warm_cache_handler(State(state): State<AppState>) -> Json<WarmResponse> {
    let warmed = warm_caches(&state.registry).await;
    Json(WarmResponse::new(warmed))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
