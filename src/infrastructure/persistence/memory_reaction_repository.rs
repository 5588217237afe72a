//! In-memory implementation of reaction repository.
//!
//! Same semantics as the PostgreSQL repository but nothing is persisted.
//! Used by the handler and concurrency tests.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::emoji_key::EmojiKey;
use crate::domain::entities::{ReactionCounter, RecordedReaction, Site};
use crate::domain::repositories::ReactionRepository;
use crate::error::AppError;
use crate::utils::hostname::Hostname;

/// In-process repository guarded by a single mutex.
///
/// The whole find-or-create-and-increment sequence runs while the lock is
/// held, which gives the same atomicity as the database transaction.
#[derive(Default)]
pub struct MemoryReactionRepository {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    sites: HashMap<String, Site>,
    counters: HashMap<(i64, EmojiKey), ReactionCounter>,
    next_site_id: i64,
    next_counter_id: i64,
}

impl MemoryReactionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, AppError> {
        self.inner.lock().map_err(|_| {
            tracing::error!("Memory store lock poisoned");
            AppError::internal("Store unavailable", json!({}))
        })
    }
}

impl MemoryInner {
    fn site_id_or_insert(&mut self, hostname: &Hostname) -> i64 {
        if let Some(site) = self.sites.get(hostname.as_str()) {
            return site.id;
        }

        self.next_site_id += 1;
        let site = Site::new(self.next_site_id, hostname.to_string(), Utc::now());
        let id = site.id;
        self.sites.insert(hostname.to_string(), site);
        id
    }
}

#[async_trait]
impl ReactionRepository for MemoryReactionRepository {
    async fn record_reaction(
        &self,
        hostname: &Hostname,
        emoji: &EmojiKey,
    ) -> Result<RecordedReaction, AppError> {
        let mut inner = self.lock()?;

        let site_id = inner.site_id_or_insert(hostname);
        let now = Utc::now();
        let key = (site_id, emoji.clone());

        let count = match inner.counters.get_mut(&key) {
            Some(counter) => {
                counter.count += 1;
                counter.updated_at = now;
                counter.count
            }
            None => {
                inner.next_counter_id += 1;
                let counter =
                    ReactionCounter::new(inner.next_counter_id, site_id, key.1.clone(), 1, now, now);
                inner.counters.insert(key, counter);
                1
            }
        };

        Ok(RecordedReaction::new(site_id, count))
    }

    async fn find_site(&self, hostname: &Hostname) -> Result<Option<Site>, AppError> {
        Ok(self.lock()?.sites.get(hostname.as_str()).cloned())
    }

    async fn list_counters(&self, site_id: i64) -> Result<Vec<ReactionCounter>, AppError> {
        let inner = self.lock()?;

        let mut counters: Vec<ReactionCounter> = inner
            .counters
            .values()
            .filter(|c| c.site_id == site_id)
            .cloned()
            .collect();
        counters.sort_by(|a, b| b.count.cmp(&a.count).then(a.id.cmp(&b.id)));

        Ok(counters)
    }

    async fn find_counter(
        &self,
        site_id: i64,
        emoji: &EmojiKey,
    ) -> Result<Option<ReactionCounter>, AppError> {
        Ok(self
            .lock()?
            .counters
            .get(&(site_id, emoji.clone()))
            .cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
