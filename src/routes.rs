//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`               - Home page
//! - `GET  /status`         - Health check
//! - `GET  /{host}`         - Emoji counts of a site
//! - `POST /{host}`         - Record a reaction
//! - `GET  /{host}/{emoji}` - Count of one emoji
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - A panicking handler yields `500` instead of a dropped connection
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, home_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `max_payload_bytes` - upper bound on reaction bodies; larger ones get `413`
pub fn app_router(state: AppState, max_payload_bytes: usize) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state, max_payload_bytes))
}

/// Routes and middleware without path normalization.
///
/// Normalization has to wrap the router from the outside, so this is the
/// part that can be served or tested as a plain [`Router`].
pub fn app_routes(state: AppState, max_payload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/status", get(health_handler))
        .merge(api::routes::reaction_routes(max_payload_bytes))
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(tracing::layer())
}
