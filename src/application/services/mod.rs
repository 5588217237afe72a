//! Business logic services for the application layer.

pub mod reaction_service;

pub use reaction_service::{ReactionService, RecordOutcome};
