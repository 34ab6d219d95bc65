//! Cache Entry Module
//!
//! Defines the structure of individual cache entries and the captured
//! response payloads they hold.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Bytes;
use serde::Serialize;

// == Cached Payload ==
/// An opaque response payload captured by the middleware on a cache miss.
///
/// The cache never interprets the body; it stores whatever bytes the
/// downstream handler produced, along with the content type needed to
/// replay them faithfully on a hit.
#[derive(Debug, Clone)]
pub struct CachedPayload {
    /// Captured response body
    pub body: Bytes,
    /// Content-Type of the captured response, if the handler set one
    pub content_type: Option<String>,
}

impl CachedPayload {
    /// Builds a JSON payload from a serializable value.
    ///
    /// Used by the cache warmer, which populates entries without going
    /// through the HTTP capture path.
    pub fn json<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        let body = Bytes::from(serde_json::to_vec(value)?);
        Ok(Self {
            body,
            content_type: Some("application/json".to_string()),
        })
    }
}

// == Cache Entry ==
/// A single cache entry: payload plus expiry bookkeeping.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The captured payload
    pub value: CachedPayload,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Expiration timestamp (Unix milliseconds), always `inserted_at + ttl`
    pub expires_at: u64,
}

impl CacheEntry {
    /// Creates a new entry expiring `ttl_seconds` after now.
    ///
    /// The TTL is fixed per store, so entries never carry their own
    /// duration; overwriting a key creates a fresh entry and thereby
    /// resets its expiry window.
    pub fn new(value: CachedPayload, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            inserted_at: now,
            expires_at: now + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry's TTL has elapsed.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`, so a reader at exactly
    /// `inserted_at + ttl` sees the entry as absent.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
