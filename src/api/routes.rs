//! API route configuration.

use crate::api::handlers::{
    emoji_reaction_handler, record_reaction_handler, site_reactions_handler,
};
use crate::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::get};

/// Reaction routes.
///
/// # Endpoints
///
/// - `GET  /{host}`         - All emoji counts of a site
/// - `POST /{host}`         - Record one reaction (body capped at `max_payload_bytes`)
/// - `GET  /{host}/{emoji}` - Count of a single emoji
pub fn reaction_routes(max_payload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/{host}",
            get(site_reactions_handler).post(record_reaction_handler),
        )
        .route("/{host}/{emoji}", get(emoji_reaction_handler))
        .layer(DefaultBodyLimit::max(max_payload_bytes))
}
