//! Response models for the cached routes and the admin API
//!
//! Domain payloads are what the backend handlers recompute on every cache
//! miss; admin DTOs shape the observability and invalidation endpoints.

pub mod domain;
pub mod responses;

// Re-export commonly used types
pub use domain::{ForumPage, Lesson, MarketData, NftCollections, UserProgress, WhaleActivity};
pub use responses::{CacheStatsResponse, FlushResponse, HealthResponse, WarmResponse};
