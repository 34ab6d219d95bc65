//! API Routes
//!
//! Configures the Axum router: every domain route is wrapped in the
//! memoizing middleware with its own (store, key generator) binding; the
//! admin and health routes bypass the cache entirely.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, flush_caches_handler, forum_posts_handler, health_handler,
    lesson_handler, market_data_handler, nft_collections_handler, user_progress_handler,
    warm_cache_handler, whale_activity_handler, AppState,
};
use crate::keys::{self, KeyFn};
use crate::middleware::{cache_response, RouteCache};

/// Creates the main router with all endpoints configured.
///
/// # Cached endpoints (store: key)
/// - `GET /market-data` (market-data: `market-data`)
/// - `GET /whale-activity` (market-data: `whale-activity`)
/// - `GET /nft-collections` (market-data: `nft-collections`)
/// - `GET /users/:user_id/progress` (user-data: `user-progress-{userId}`)
/// - `GET /lessons/:level` (lessons: `lessons-{level}`)
/// - `GET /forum/posts?page=N` (forum: `forum-posts-{page}`)
///
/// # Uncached endpoints
/// - `GET /admin/cache/stats`, `POST /admin/cache/flush`,
///   `POST /admin/cache/warm`, `GET /health`
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let enabled = state.cache_enabled;
    let registry = &state.registry;

    let bind = |store, key_fn: KeyFn| {
        from_fn_with_state(
            RouteCache::new(store, key_fn).with_enabled(enabled),
            cache_response,
        )
    };

    Router::new()
        .route(
            "/market-data",
            get(market_data_handler)
                .layer(bind(registry.market_data(), keys::fixed(keys::MARKET_DATA_KEY))),
        )
        .route(
            "/whale-activity",
            get(whale_activity_handler)
                .layer(bind(registry.market_data(), keys::fixed(keys::WHALE_ACTIVITY_KEY))),
        )
        .route(
            "/nft-collections",
            get(nft_collections_handler)
                .layer(bind(registry.market_data(), keys::fixed(keys::NFT_COLLECTIONS_KEY))),
        )
        .route(
            "/users/:user_id/progress",
            get(user_progress_handler).layer(bind(registry.user_data(), keys::user_progress())),
        )
        .route(
            "/lessons/:level",
            get(lesson_handler).layer(bind(registry.lessons(), keys::lessons())),
        )
        .route(
            "/forum/posts",
            get(forum_posts_handler).layer(bind(registry.forum(), keys::forum_posts())),
        )
        .route("/admin/cache/stats", get(cache_stats_handler))
        .route("/admin/cache/flush", post(flush_caches_handler))
        .route("/admin/cache/warm", post(warm_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
