use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use progress_service::config::{AppConfig, StorageBackend};
use progress_service::database::{DatabaseManager, MemoryStore, PgStore};
use progress_service::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "progress-service", version, about = "Progress tracking API server")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Keep all data in memory instead of Postgres
    #[arg(long)]
    memory: bool,

    /// Apply pending migrations before serving
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if args.memory {
        config.storage = StorageBackend::Memory;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    tracing::info!("Starting progress service in {:?} mode", config.environment);

    let bind_addr = config.bind_addr();
    let state = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            AppState::new(config, Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to Postgres")?;
            if args.migrate || config.database.run_migrations {
                DatabaseManager::migrate(&pool).await.context("failed to run migrations")?;
            }
            AppState::new(config, Arc::new(PgStore::new(pool)))
        }
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Progress service listening on http://{}", bind_addr);

    axum::serve(listener, progress_service::app(state)).await?;
    Ok(())
}
