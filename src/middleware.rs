//! Cache Middleware Module
//!
//! The interception layer: each cached route is wrapped with a
//! [`RouteCache`] binding one store to one key generator. A hit answers
//! from the store without invoking the handler; a miss runs the handler,
//! captures its successful response, and writes it to the store before
//! the response leaves the middleware.
//!
//! There is no request coalescing: concurrent misses for the same key
//! each invoke the downstream handler and each overwrite the entry.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::cache::{CachedPayload, SharedStore};
use crate::keys::KeyFn;

/// Cache status header, set on every response passing through the layer.
pub const X_CACHE: &str = "x-cache";

/// Responses larger than this are served but not cached.
const MAX_CAPTURE_BYTES: usize = 1024 * 1024; // 1 MB

// == Route Cache ==
/// Per-route middleware state: the store to consult and the key
/// generator for that route.
#[derive(Clone)]
pub struct RouteCache {
    store: SharedStore,
    key_fn: KeyFn,
    enabled: bool,
}

impl RouteCache {
    /// Binds a store and key generator to a route.
    pub fn new(store: SharedStore, key_fn: KeyFn) -> Self {
        Self {
            store,
            key_fn,
            enabled: true,
        }
    }

    /// Disables caching for this route when `enabled` is false: every
    /// request flows straight to the handler and nothing is stored.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// == Middleware ==
/// Memoizing middleware, applied per route via
/// `axum::middleware::from_fn_with_state`.
///
/// On a miss the store write completes before the response is returned,
/// so any request arriving after this handler finishes observes the
/// fresh entry. Failed handler responses are relayed untouched and never
/// cached.
pub async fn cache_response(
    State(route): State<RouteCache>,
    request: Request,
    next: Next,
) -> Response {
    if !route.enabled {
        return tag(next.run(request).await, "MISS");
    }

    let key = (route.key_fn)(request.uri());

    // get() takes the write lock: a hit bumps counters, an expired read
    // removes the entry
    let cached = route.store.write().await.get(&key);
    if let Some(payload) = cached {
        debug!(key = %key, "cache hit");
        return hit_response(payload);
    }

    debug!(key = %key, "cache miss, invoking handler");
    let response = next.run(request).await;

    // Never cache a failure; the caller sees it exactly as the handler
    // produced it
    if !response.status().is_success() {
        return tag(response, "MISS");
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(key = %key, error = %err, "failed to capture response body");
            return (StatusCode::INTERNAL_SERVER_ERROR, "response capture failed")
                .into_response();
        }
    };

    if bytes.len() <= MAX_CAPTURE_BYTES {
        let payload = CachedPayload {
            body: bytes.clone(),
            content_type: parts
                .headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        };
        route.store.write().await.set(key, payload);
    } else {
        debug!(key = %key, size = bytes.len(), "response too large to cache");
    }

    parts
        .headers
        .insert(X_CACHE, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

/// Builds a response from a cached payload, tagged as a hit.
fn hit_response(payload: CachedPayload) -> Response {
    let mut response = Response::new(Body::from(payload.body));
    if let Some(content_type) = payload
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
        .headers_mut()
        .insert(X_CACHE, HeaderValue::from_static("HIT"));
    response
}

/// Tags a passthrough response with its cache status.
fn tag(mut response: Response, status: &'static str) -> Response {
    response
        .headers_mut()
        .insert(X_CACHE, HeaderValue::from_static(status));
    response
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::config::StoreConfig;
    use crate::keys;
    use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    fn test_store() -> SharedStore {
        Arc::new(RwLock::new(CacheStore::new(&StoreConfig {
            name: "test",
            ttl_seconds: 30,
            sweep_interval_seconds: 60,
            max_entries: 100,
        })))
    }

    fn counted_app(store: SharedStore, calls: Arc<AtomicUsize>) -> Router {
        let route = RouteCache::new(store, keys::fixed("counted"));
        Router::new()
            .route(
                "/counted",
                get(move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Json(serde_json::json!({"n": 1}))
                    }
                }),
            )
            .route_layer(from_fn_with_state(route, cache_response))
    }

    async fn send(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn cache_status(response: &Response) -> &str {
        response.headers().get(X_CACHE).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = counted_app(test_store(), calls.clone());

        let first = send(&app, "/counted").await;
        assert_eq!(cache_status(&first), "MISS");

        let second = send(&app, "/counted").await;
        assert_eq!(cache_status(&second), "HIT");

        // The handler ran exactly once
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hit_replays_body_and_content_type() {
        let app = counted_app(test_store(), Arc::new(AtomicUsize::new(0)));

        let first = send(&app, "/counted").await;
        let first_body = axum::body::to_bytes(first.into_body(), usize::MAX)
            .await
            .unwrap();

        let second = send(&app, "/counted").await;
        assert_eq!(
            second
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap(),
            "application/json"
        );
        let second_body = axum::body::to_bytes(second.into_body(), usize::MAX)
            .await
            .unwrap();

        assert_eq!(first_body, second_body);
    }

    #[tokio::test]
    async fn test_handler_failure_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = test_store();
        let route = RouteCache::new(store.clone(), keys::fixed("failing"));
        let inner = calls.clone();
        let app = Router::new()
            .route(
                "/failing",
                get(move || {
                    let calls = inner.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        StatusCode::BAD_GATEWAY
                    }
                }),
            )
            .route_layer(from_fn_with_state(route, cache_response));

        let first = send(&app, "/failing").await;
        assert_eq!(first.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(cache_status(&first), "MISS");

        // Still a miss: nothing was poisoned, the handler runs again
        let second = send(&app, "/failing").await;
        assert_eq!(cache_status(&second), "MISS");
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(store.write().await.get("failing").is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache_always_invokes_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = test_store();
        let route = RouteCache::new(store.clone(), keys::fixed("counted")).with_enabled(false);
        let inner = calls.clone();
        let app = Router::new()
            .route(
                "/counted",
                get(move || {
                    let calls = inner.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Json(serde_json::json!({"n": 1}))
                    }
                }),
            )
            .route_layer(from_fn_with_state(route, cache_response));

        for _ in 0..3 {
            let response = send(&app, "/counted").await;
            assert_eq!(cache_status(&response), "MISS");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_is_visible_before_delivery() {
        let store = test_store();
        let app = counted_app(store.clone(), Arc::new(AtomicUsize::new(0)));

        let _ = send(&app, "/counted").await;

        // The entry is in place as soon as the first response is out
        assert!(store.write().await.get("counted").is_some());
    }
}
