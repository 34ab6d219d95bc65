//! Cache Key Module
//!
//! Pure key derivation: each cached route maps an inbound request URI to a
//! deterministic key string. The key formats are part of the external
//! contract and must stay byte-for-byte stable.
//!
//! Keys surface in stats and logs, so they carry only non-secret
//! identifiers (user ids, lesson levels, page numbers), never credentials
//! or tokens.

use std::sync::Arc;

use axum::http::Uri;

// == Fixed Keys ==
/// Singleton market snapshot.
pub const MARKET_DATA_KEY: &str = "market-data";
/// Singleton whale activity feed.
pub const WHALE_ACTIVITY_KEY: &str = "whale-activity";
/// Singleton NFT collection listing.
pub const NFT_COLLECTIONS_KEY: &str = "nft-collections";

// == Parameterized Keys ==
/// Key for one user's progress record.
pub fn user_progress_key(user_id: &str) -> String {
    format!("user-progress-{user_id}")
}

/// Key for one lesson level's content.
pub fn lessons_key(level: &str) -> String {
    format!("lessons-{level}")
}

/// Key for one page of the forum listing.
pub fn forum_posts_key(page: u32) -> String {
    format!("forum-posts-{page}")
}

// == Key Generators ==
/// A key generator: pure and deterministic over the request URI.
pub type KeyFn = Arc<dyn Fn(&Uri) -> String + Send + Sync>;

/// Generator returning a fixed key, for singleton resources.
pub fn fixed(key: &'static str) -> KeyFn {
    Arc::new(move |_| key.to_string())
}

/// Generator for `GET /users/{userId}/progress`.
pub fn user_progress() -> KeyFn {
    Arc::new(|uri| user_progress_key(path_segment(uri, 1).unwrap_or("unknown")))
}

/// Generator for `GET /lessons/{level}`.
pub fn lessons() -> KeyFn {
    Arc::new(|uri| lessons_key(path_segment(uri, 1).unwrap_or("unknown")))
}

/// Generator for `GET /forum/posts?page=N`. Missing or malformed page
/// defaults to 1, matching the handler's own default.
pub fn forum_posts() -> KeyFn {
    Arc::new(|uri| {
        let page = query_param(uri, "page")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        forum_posts_key(page)
    })
}

// == URI Helpers ==
/// Returns the `index`-th path segment (zero-based, empty segments skipped).
fn path_segment(uri: &Uri, index: usize) -> Option<&str> {
    uri.path().split('/').filter(|s| !s.is_empty()).nth(index)
}

/// Returns the raw value of a query parameter, if present.
fn query_param<'a>(uri: &'a Uri, name: &str) -> Option<&'a str> {
    uri.query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}
