//! Configuration Module
//!
//! Server settings come from environment variables with sensible defaults.
//! Per-domain store parameters are compile-time constants: they are fixed
//! at construction and never runtime-mutable.

use std::env;

// == Store Config ==
/// Fixed configuration for one domain store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Domain name, doubles as the stats key
    pub name: &'static str,
    /// TTL in seconds applied to every entry
    pub ttl_seconds: u64,
    /// Background sweep period in seconds
    pub sweep_interval_seconds: u64,
    /// Hard cap on live entry count
    pub max_entries: usize,
}

impl StoreConfig {
    /// Market snapshot, whale activity and NFT collections: hot data,
    /// short TTL.
    pub const MARKET_DATA: StoreConfig = StoreConfig {
        name: "market-data",
        ttl_seconds: 30,
        sweep_interval_seconds: 60,
        max_entries: 1000,
    };

    /// Per-user progress records: one key per user.
    pub const USER_DATA: StoreConfig = StoreConfig {
        name: "user-data",
        ttl_seconds: 300,
        sweep_interval_seconds: 120,
        max_entries: 10_000,
    };

    /// Lesson content: effectively static, long TTL.
    pub const LESSONS: StoreConfig = StoreConfig {
        name: "lessons",
        ttl_seconds: 3600,
        sweep_interval_seconds: 600,
        max_entries: 500,
    };

    /// Forum listings: one key per page.
    pub const FORUM: StoreConfig = StoreConfig {
        name: "forum",
        ttl_seconds: 120,
        sweep_interval_seconds: 60,
        max_entries: 2000,
    };
}

// == Server Config ==
/// Process-level settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Delay in seconds before the one-shot cache warmer runs
    pub warm_delay_seconds: u64,
    /// When false, the middleware passes every request straight through
    /// and stores nothing; responses are unchanged except for latency
    pub cache_enabled: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `WARM_DELAY` - Seconds before cache warming runs (default: 5)
    /// - `CACHE_ENABLED` - Set to "false" or "0" to bypass caching (default: true)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            warm_delay_seconds: env::var("WARM_DELAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            cache_enabled: env::var("CACHE_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            warm_delay_seconds: 5,
            cache_enabled: true,
        }
    }
}
