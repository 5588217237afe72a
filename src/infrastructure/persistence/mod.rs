//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgReactionRepository`] - PostgreSQL storage with atomic upserts
//! - [`MemoryReactionRepository`] - In-process storage for tests and local runs

pub mod memory_reaction_repository;
pub mod pg_reaction_repository;

pub use memory_reaction_repository::MemoryReactionRepository;
pub use pg_reaction_repository::PgReactionRepository;
