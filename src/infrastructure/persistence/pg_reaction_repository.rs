//! PostgreSQL implementation of reaction repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::emoji_key::EmojiKey;
use crate::domain::entities::{ReactionCounter, RecordedReaction, Site};
use crate::domain::repositories::ReactionRepository;
use crate::error::AppError;
use crate::utils::hostname::Hostname;

/// PostgreSQL repository for sites and reaction counters.
///
/// Counting relies on `INSERT ... ON CONFLICT DO UPDATE` so the increment is
/// applied by the database under the row lock of the `(site_id, emoji)`
/// unique index; no read-modify-write happens in the application.
pub struct PgReactionRepository {
    pool: Arc<PgPool>,
}

impl PgReactionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SiteRow {
    id: i64,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<SiteRow> for Site {
    fn from(r: SiteRow) -> Self {
        Site::new(r.id, r.url, r.created_at)
    }
}

#[derive(sqlx::FromRow)]
struct CounterRow {
    id: i64,
    site_id: i64,
    emoji: String,
    count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CounterRow> for ReactionCounter {
    type Error = AppError;

    fn try_from(r: CounterRow) -> Result<Self, Self::Error> {
        Ok(ReactionCounter::new(
            r.id,
            r.site_id,
            EmojiKey::decode(&r.emoji)?,
            r.count,
            r.created_at,
            r.updated_at,
        ))
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    async fn record_reaction(
        &self,
        hostname: &Hostname,
        emoji: &EmojiKey,
    ) -> Result<RecordedReaction, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM site WHERE url = $1")
            .bind(hostname.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let site_id = match existing {
            Some(id) => id,
            None => {
                let inserted: Option<i64> = sqlx::query_scalar(
                    r#"
                    INSERT INTO site (url)
                    VALUES ($1)
                    ON CONFLICT (url) DO NOTHING
                    RETURNING id
                    "#,
                )
                .bind(hostname.as_str())
                .fetch_optional(&mut *tx)
                .await?;

                match inserted {
                    Some(id) => {
                        tracing::debug!(hostname = %hostname, site_id = id, "Site created");
                        id
                    }
                    // Lost the race: the winner has committed, a new statement sees its row.
                    None => {
                        sqlx::query_scalar::<_, i64>("SELECT id FROM site WHERE url = $1")
                            .bind(hostname.as_str())
                            .fetch_one(&mut *tx)
                            .await?
                    }
                }
            }
        };

        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO emoji (site_id, emoji, count)
            VALUES ($1, $2, 1)
            ON CONFLICT (site_id, emoji)
            DO UPDATE SET count = emoji.count + 1, updated_at = NOW()
            RETURNING count
            "#,
        )
        .bind(site_id)
        .bind(emoji.encode())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RecordedReaction::new(site_id, count))
    }

    async fn find_site(&self, hostname: &Hostname) -> Result<Option<Site>, AppError> {
        let row = sqlx::query_as::<_, SiteRow>(
            r#"
            SELECT id, url, created_at
            FROM site
            WHERE url = $1
            "#,
        )
        .bind(hostname.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Site::from))
    }

    async fn list_counters(&self, site_id: i64) -> Result<Vec<ReactionCounter>, AppError> {
        let rows = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT id, site_id, emoji, count, created_at, updated_at
            FROM emoji
            WHERE site_id = $1
            ORDER BY count DESC, id
            "#,
        )
        .bind(site_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(ReactionCounter::try_from).collect()
    }

    async fn find_counter(
        &self,
        site_id: i64,
        emoji: &EmojiKey,
    ) -> Result<Option<ReactionCounter>, AppError> {
        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT id, site_id, emoji, count, created_at, updated_at
            FROM emoji
            WHERE site_id = $1 AND emoji = $2
            "#,
        )
        .bind(site_id)
        .bind(emoji.encode())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ReactionCounter::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
