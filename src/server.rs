//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::PgReactionRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

const CONNECT_ATTEMPTS: usize = 3;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Axum HTTP server, until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - A migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let repository = Arc::new(PgReactionRepository::new(Arc::new(pool.clone())));
    let state = AppState::new(
        repository,
        config.store_timeout(),
        config.read_max_age_secs,
    );

    let app = app_router(state, config.max_payload_bytes);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Opens the connection pool, retrying with jittered backoff.
///
/// Each attempt is bounded by `DB_CONNECT_TIMEOUT`.
///
/// # Errors
///
/// Returns the last connection error once all attempts are exhausted.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let connect_timeout = Duration::from_secs(config.db_connect_timeout);

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(connect_timeout)
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(10)
        .factor(20)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1);

    Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options
                .connect(&config.database_url)
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
        }
    })
    .await
    .context("Failed to connect to database")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
