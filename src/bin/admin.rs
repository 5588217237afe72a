//! CLI administration tool for openheart.
//!
//! Reads reaction data and runs database diagnostics without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Totals across all sites
//! cargo run --bin admin -- stats
//!
//! # Counters of one site (hostname or page URL)
//! cargo run --bin admin -- site https://example.com/post
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection string

use openheart::application::services::ReactionService;
use openheart::config::{Config, mask_connection_string};
use openheart::infrastructure::persistence::PgReactionRepository;
use openheart::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing openheart.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show totals across all sites
    Stats {
        /// Number of top sites to list
        #[arg(short, long, default_value_t = 10)]
        top: i64,
    },

    /// Show reaction counts for one site
    Site {
        /// Hostname or page URL
        host: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Stats { top } => handle_stats(&pool, top).await?,
        Commands::Site { host } => handle_site(&pool, &config, &host).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

/// Displays totals and the most reacted-to sites.
///
/// # Output Format
///
/// ```text
/// 📊 Statistics
///
///   Sites:      12
///   Counters:   40
///   Reactions:  1337
///
///   Site                                     Reactions
///   ─────────────────────────────────────────────────
///   example.com                              812
/// ```
async fn handle_stats(pool: &PgPool, top: i64) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let sites: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM site")
        .fetch_one(pool)
        .await?;

    let counters: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emoji")
        .fetch_one(pool)
        .await?;

    let reactions: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(count), 0)::BIGINT FROM emoji")
        .fetch_one(pool)
        .await?;

    println!("  Sites:      {}", sites.to_string().bright_green().bold());
    println!("  Counters:   {}", counters.to_string().bright_green().bold());
    println!("  Reactions:  {}", reactions.to_string().bright_green().bold());
    println!();

    let top_sites: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT s.url, COALESCE(SUM(e.count), 0)::BIGINT AS total
        FROM site s
        LEFT JOIN emoji e ON e.site_id = s.id
        GROUP BY s.id, s.url
        ORDER BY total DESC, s.url
        LIMIT $1
        "#,
    )
    .bind(top)
    .fetch_all(pool)
    .await?;

    if top_sites.is_empty() {
        println!("{}", "  No reactions yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<40} {}",
        "Site".bright_white().bold(),
        "Reactions".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for (url, total) in &top_sites {
        println!("  {:<40} {}", url.cyan(), total);
    }
    println!();

    Ok(())
}

/// Displays all emoji counters of one site, highest first.
async fn handle_site(pool: &PgPool, config: &Config, host: &str) -> Result<()> {
    let repository = Arc::new(PgReactionRepository::new(Arc::new(pool.clone())));
    let service = ReactionService::new(repository, config.store_timeout());

    let counters = service.counts_for_site(host).await?;

    println!("{}", format!("💖 {host}").bright_blue().bold());
    println!();

    for counter in &counters {
        println!(
            "  {}  {:<8} {}",
            counter.emoji,
            counter.count.to_string().bright_green().bold(),
            format!("since {}", counter.created_at.format("%Y-%m-%d")).bright_black()
        );
    }

    let total: i64 = counters.iter().map(|c| c.count).sum();
    println!();
    println!("  Total: {}", total.to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!(
                "  Connection: {}",
                mask_connection_string(&config.database_url).bright_white()
            );
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
