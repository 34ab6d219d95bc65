//! Memocache - a multi-domain in-memory TTL response cache server
//!
//! Shields backend handlers from redundant recomputation across four
//! data domains: market data, user data, lesson content, forum listings.

mod api;
mod cache;
mod config;
mod error;
mod keys;
mod middleware;
mod models;
mod tasks;

use std::net::SocketAddr;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::CacheRegistry;
use config::Config;
use tasks::{spawn_sweep_tasks, spawn_warm_task};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the cache registry with its four domain stores
/// 4. Start one background sweep task per store
/// 5. Schedule the one-shot cache warmer
/// 6. Create the Axum router and start the HTTP server
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memocache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting memocache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, warm_delay={}s, cache_enabled={}",
        config.server_port, config.warm_delay_seconds, config.cache_enabled
    );

    // The registry is built exactly once and handed by value (cheap
    // clones of shared handles) to everything that needs cache access
    let registry = CacheRegistry::with_defaults();
    info!("Cache registry initialized with 4 domain stores");

    let mut background: Vec<JoinHandle<()>> = spawn_sweep_tasks(&registry);
    info!("Background sweep tasks started");

    if config.cache_enabled {
        background.push(spawn_warm_task(registry.clone(), config.warm_delay_seconds));
        info!(
            "Cache warmer scheduled in {}s",
            config.warm_delay_seconds
        );
    }

    let state = AppState::new(registry).with_cache_enabled(config.cache_enabled);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the background tasks and allows graceful
/// shutdown.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for handle in background {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
