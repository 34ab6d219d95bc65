//! Memocache - a multi-domain in-memory TTL response cache
//!
//! Wraps backend handlers in request-memoizing middleware: hits are
//! answered from a per-domain store and tagged `X-Cache: HIT`; misses run
//! the handler and capture its response before delivering it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod middleware;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::CacheRegistry;
pub use config::Config;
pub use tasks::{spawn_sweep_tasks, spawn_warm_task};
