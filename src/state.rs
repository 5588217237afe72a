//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::ReactionService;
use crate::domain::repositories::ReactionRepository;

/// Reaction service over a type-erased repository, so the same router serves
/// PostgreSQL in production and the in-memory store in tests.
pub type SharedReactionService = ReactionService<dyn ReactionRepository>;

#[derive(Clone)]
pub struct AppState {
    pub reaction_service: Arc<SharedReactionService>,
    /// `max-age` in seconds for `Cache-Control` on read responses.
    pub read_max_age: u64,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ReactionRepository>,
        store_timeout: Duration,
        read_max_age: u64,
    ) -> Self {
        Self {
            reaction_service: Arc::new(ReactionService::new(repository, store_timeout)),
            read_max_age,
        }
    }
}
