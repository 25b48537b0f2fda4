use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

const PG_UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        let unique = err
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code == PG_UNIQUE_VIOLATION)
            .unwrap_or(false);

        if unique {
            DatabaseError::UniqueViolation(err.to_string())
        } else {
            DatabaseError::Sqlx(err)
        }
    }
}

pub type DbResult<T> = Result<T, DatabaseError>;

/// Owns pool construction and schema migrations for the Postgres backend
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool from the configured DATABASE_URL
    pub async fn connect(config: &DatabaseConfig) -> DbResult<PgPool> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        Self::validate_url(url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect(url)
            .await?;

        info!(
            "Created database pool (max {} connections)",
            config.max_connections
        );
        Ok(pool)
    }

    /// Apply the embedded migrations in ./migrations
    pub async fn migrate(pool: &PgPool) -> DbResult<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    fn validate_url(raw: &str) -> DbResult<()> {
        let url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match url.scheme() {
            "postgres" | "postgresql" if url.path().len() > 1 => Ok(()),
            _ => Err(DatabaseError::InvalidDatabaseUrl),
        }
    }
}
