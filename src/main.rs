use anyhow::Result;
use clap::Parser;
use openheart::config::Config;
use openheart::server;
use tracing_subscriber::EnvFilter;

/// Emoji reaction counter for web pages.
#[derive(Parser)]
#[command(name = "openheart", version, about)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(long)]
    listen: Option<String>,

    /// PostgreSQL connection string, overrides `DATABASE_URL`
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = apply_overrides(cli)?;
    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn apply_overrides(cli: Cli) -> Result<Config> {
    let mut config = Config::from_env_with(cli.database_url)?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
