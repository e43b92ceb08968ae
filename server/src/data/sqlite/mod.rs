//! SQLite database service
//!
//! Embedded backend for local use and tests. Accepts a file URL
//! (`sqlite://tdjobs.db`) or an in-memory database (`sqlite::memory:`).
//! The searchable tables are created on startup if missing.

pub mod error;
pub mod repositories;
mod repository_impl;
pub mod schema;

pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::str::FromStr;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::log::LevelFilter;

use crate::core::config::DatabaseConfig;
use crate::core::constants::{SQLITE_BUSY_TIMEOUT_SECS, SQLITE_MAX_CONNECTIONS};

/// SQLite database service
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Initialize the database service
    ///
    /// Opens (or creates) the database and applies the schema.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, SqliteError> {
        if !config.url.starts_with("sqlite:") {
            return Err(SqliteError::Config(format!(
                "SQLite URL must start with 'sqlite:', got '{}'",
                config.url
            )));
        }
        let in_memory = is_memory_url(&config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| SqliteError::Config(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .log_statements(LevelFilter::Trace);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // Every connection to `:memory:` opens its own database; keep exactly one alive
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.min(SQLITE_MAX_CONNECTIONS))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        apply_schema(&pool).await?;

        tracing::debug!(url = %config.url, in_memory, "SqliteService initialized");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a SqliteService from an existing pool (primarily for testing)
    #[cfg(test)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

/// Create the searchable tables if they do not exist
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), SqliteError> {
    let mut tx = pool.begin().await?;
    sqlx::query(schema::SCHEMA).execute(&mut *tx).await?;
    tx.commit().await?;
    tracing::debug!("SQLite schema applied");
    Ok(())
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DatabaseBackend;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            backend: DatabaseBackend::Sqlite,
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            min_connections: 0,
            acquire_timeout_secs: 5,
            statement_timeout_secs: 0,
        }
    }

    #[test]
    fn test_is_memory_url() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://file:db?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite://tdjobs.db"));
    }

    #[tokio::test]
    async fn test_init_in_memory_creates_tables() {
        let service = SqliteService::init(&memory_config()).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(service.pool())
        .await
        .unwrap();
        assert_eq!(tables, ["invitations", "jobs", "offer_records", "offers"]);

        service.close().await;
    }

    #[tokio::test]
    async fn test_apply_schema_is_idempotent() {
        let service = SqliteService::init(&memory_config()).await.unwrap();
        apply_schema(service.pool()).await.unwrap();
    }

    #[tokio::test]
    async fn test_init_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = memory_config();
        config.url = format!("sqlite://{}", dir.path().join("tdjobs.db").display());

        let service = SqliteService::init(&config).await.unwrap();
        assert!(dir.path().join("tdjobs.db").exists());
        service.close().await;
    }

    #[tokio::test]
    async fn test_init_rejects_bad_url() {
        let mut config = memory_config();
        config.url = "postgres://localhost/tdjobs".to_string();
        assert!(matches!(
            SqliteService::init(&config).await,
            Err(SqliteError::Config(_))
        ));
    }
}
