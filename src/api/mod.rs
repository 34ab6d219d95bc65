//! API Module
//!
//! HTTP handlers and routing: the cached domain routes, the admin
//! surface, and the health check.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
