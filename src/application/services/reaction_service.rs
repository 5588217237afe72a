//! Reaction recording and lookup service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::domain::emoji_key::EmojiKey;
use crate::domain::entities::{ReactionCounter, RecordedReaction};
use crate::domain::repositories::ReactionRepository;
use crate::error::AppError;
use crate::utils::hostname::{Hostname, resolve_hostname};

/// Result of a successful reaction, with the values the store was keyed on.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub hostname: Hostname,
    pub emoji: EmojiKey,
    pub reaction: RecordedReaction,
}

/// Service for recording reactions and reading counters back.
///
/// Raw caller input goes in, canonical values come out: hostnames are
/// resolved and emoji parsed here, so the repository only ever sees
/// validated keys. Every repository call is bounded by the store timeout.
pub struct ReactionService<R: ReactionRepository + ?Sized> {
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R: ReactionRepository + ?Sized> ReactionService<R> {
    /// Creates a new reaction service.
    pub fn new(repository: Arc<R>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// Records one reaction of the first emoji in `raw_emoji` for the site
    /// named by `raw_host`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the body holds no emoji or the
    /// host cannot be resolved. Returns [`AppError::Internal`] on store
    /// failure or timeout.
    pub async fn record_reaction(
        &self,
        raw_host: &str,
        raw_emoji: &[u8],
    ) -> Result<RecordOutcome, AppError> {
        let emoji = EmojiKey::parse(raw_emoji)?;
        let hostname = resolve_hostname(raw_host)?;

        let reaction = self
            .with_deadline(
                "record_reaction",
                self.repository.record_reaction(&hostname, &emoji),
            )
            .await
            .inspect_err(|e| log_store_error(e, "record_reaction", &hostname, Some(&emoji)))?;

        tracing::info!(
            hostname = %hostname,
            emoji = %emoji.encode(),
            count = reaction.count,
            "{} just got a {} reaction!",
            hostname,
            emoji
        );

        let outcome = if reaction.created {
            "created"
        } else {
            "incremented"
        };
        metrics::counter!("reactions_recorded_total", "outcome" => outcome).increment(1);

        Ok(RecordOutcome {
            hostname,
            emoji,
            reaction,
        })
    }

    /// Returns all counters of a site, highest count first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the site has never been reacted to.
    pub async fn counts_for_site(&self, raw_host: &str) -> Result<Vec<ReactionCounter>, AppError> {
        let hostname = resolve_hostname(raw_host)?;
        let site_id = self.site_id(&hostname).await?;

        self.with_deadline("list_counters", self.repository.list_counters(site_id))
            .await
            .inspect_err(|e| log_store_error(e, "list_counters", &hostname, None))
    }

    /// Returns the counter of one emoji on a site.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the site or the emoji counter does
    /// not exist, [`AppError::Validation`] for a bad host or emoji.
    pub async fn count_for_emoji(
        &self,
        raw_host: &str,
        raw_emoji: &str,
    ) -> Result<ReactionCounter, AppError> {
        let hostname = resolve_hostname(raw_host)?;
        let emoji = EmojiKey::parse_str(raw_emoji)?;
        let site_id = self.site_id(&hostname).await?;

        self.with_deadline(
            "find_counter",
            self.repository.find_counter(site_id, &emoji),
        )
        .await
        .inspect_err(|e| log_store_error(e, "find_counter", &hostname, Some(&emoji)))?
        .ok_or_else(|| {
            AppError::not_found(
                "Reaction not found",
                json!({ "hostname": hostname.as_str(), "emoji": emoji.to_string() }),
            )
        })
    }

    /// Probes the store.
    pub async fn health(&self) -> Result<(), AppError> {
        self.with_deadline("ping", self.repository.ping()).await
    }

    async fn site_id(&self, hostname: &Hostname) -> Result<i64, AppError> {
        self.with_deadline("find_site", self.repository.find_site(hostname))
            .await
            .inspect_err(|e| log_store_error(e, "find_site", hostname, None))?
            .map(|site| site.id)
            .ok_or_else(|| {
                AppError::not_found("Site not found", json!({ "hostname": hostname.as_str() }))
            })
    }

    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(AppError::internal(
                    "Store timeout",
                    json!({ "operation": operation }),
                ))
            })
    }
}

fn log_store_error(e: &AppError, operation: &str, hostname: &Hostname, emoji: Option<&EmojiKey>) {
    if e.is_internal() {
        tracing::error!(
            error = %e,
            operation,
            hostname = %hostname,
            emoji = %emoji.map(EmojiKey::encode).unwrap_or_default(),
            "Store operation failed"
        );
    }
}
