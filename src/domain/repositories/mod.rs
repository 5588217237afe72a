//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`ReactionRepository`] - Sites and reaction counters

pub mod reaction_repository;

pub use reaction_repository::ReactionRepository;

#[cfg(test)]
pub use reaction_repository::MockReactionRepository;
