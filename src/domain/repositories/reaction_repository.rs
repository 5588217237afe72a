//! Repository trait for sites and their reaction counters.

use crate::domain::emoji_key::EmojiKey;
use crate::domain::entities::{ReactionCounter, RecordedReaction, Site};
use crate::error::AppError;
use crate::utils::hostname::Hostname;
use async_trait::async_trait;

/// Repository interface for reaction counting.
///
/// The write path is a single operation, [`ReactionRepository::record_reaction`],
/// which must be atomic: concurrent calls for the same site and emoji never
/// lose an increment and never create duplicate rows. Read operations never
/// create rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReactionRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryReactionRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_reaction.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Finds or creates the site, then creates the counter with a count of 1
    /// or increments the existing one by exactly 1.
    ///
    /// Runs as one all-or-nothing unit. If another caller creates the same
    /// site concurrently, its row is reused.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Nothing is written
    /// when an error is returned.
    async fn record_reaction(
        &self,
        hostname: &Hostname,
        emoji: &EmojiKey,
    ) -> Result<RecordedReaction, AppError>;

    /// Finds a site by its hostname.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_site(&self, hostname: &Hostname) -> Result<Option<Site>, AppError>;

    /// Lists all counters of a site, highest count first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or when a stored
    /// emoji key cannot be decoded.
    async fn list_counters(&self, site_id: i64) -> Result<Vec<ReactionCounter>, AppError>;

    /// Finds the counter of one emoji for a site.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_counter(
        &self,
        site_id: i64,
        emoji: &EmojiKey,
    ) -> Result<Option<ReactionCounter>, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
