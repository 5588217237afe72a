#![allow(dead_code)]

use axum_test::TestServer;
use openheart::infrastructure::persistence::{MemoryReactionRepository, PgReactionRepository};
use openheart::routes::app_routes;
use openheart::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub const MAX_PAYLOAD_BYTES: usize = 128;
pub const READ_MAX_AGE_SECS: u64 = 60;
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// State backed by a fresh in-memory store.
pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(MemoryReactionRepository::new()),
        STORE_TIMEOUT,
        READ_MAX_AGE_SECS,
    )
}

/// State backed by a migrated test database.
pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgReactionRepository::new(Arc::new(pool))),
        STORE_TIMEOUT,
        READ_MAX_AGE_SECS,
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_routes(state, MAX_PAYLOAD_BYTES)).unwrap()
}

pub async fn create_test_reaction(pool: &PgPool, url: &str, emoji: &str, count: i64) -> i64 {
    let site_id: i64 = sqlx::query_scalar(
        "INSERT INTO site (url) VALUES ($1) ON CONFLICT (url) DO UPDATE SET url = EXCLUDED.url RETURNING id",
    )
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO emoji (site_id, emoji, count) VALUES ($1, $2, $3)")
        .bind(site_id)
        .bind(emoji)
        .bind(count)
        .execute(pool)
        .await
        .unwrap();

    site_id
}
