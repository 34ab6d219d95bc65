//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: one periodic loop per store, at the store's interval
//! - Cache warmer: one-shot deferred pre-population after startup

mod sweep;
mod warm;

pub use sweep::{spawn_sweep_task, spawn_sweep_tasks};
pub use warm::{spawn_warm_task, warm_caches};
