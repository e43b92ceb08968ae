//! PostgreSQL database service
//!
//! Searches an existing database (tables are not created here) with:
//! - Connection pooling with min/max bounds
//! - Query timeout protection

pub mod error;
pub mod repositories;
mod repository_impl;

pub use error::PostgresError;
pub use sqlx::PgPool;

use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::log::LevelFilter;

use crate::core::config::DatabaseConfig;
use crate::core::constants::{
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_MAX_CONNECTIONS,
    POSTGRES_DEFAULT_MIN_CONNECTIONS,
};

/// PostgreSQL database service
pub struct PostgresService {
    pool: PgPool,
}

impl PostgresService {
    /// Initialize the database service from configuration
    ///
    /// - Min connections kept warm for low latency
    /// - Max connections sized for concurrent load
    /// - Statement timeout to prevent runaway queries
    pub async fn init(config: &DatabaseConfig) -> Result<Self, PostgresError> {
        let url = config.url.as_str();
        if url.is_empty() {
            return Err(PostgresError::Config("PostgreSQL URL is required".into()));
        }

        let max_connections = if config.max_connections > 0 {
            config.max_connections
        } else {
            POSTGRES_DEFAULT_MAX_CONNECTIONS
        };

        let min_connections = if config.min_connections > 0 {
            config.min_connections
        } else {
            POSTGRES_DEFAULT_MIN_CONNECTIONS
        };

        let acquire_timeout = if config.acquire_timeout_secs > 0 {
            config.acquire_timeout_secs
        } else {
            POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS
        };

        let statement_timeout = config.statement_timeout_secs;

        let mut options: PgConnectOptions = url
            .parse()
            .map_err(|e| PostgresError::Config(format!("Invalid PostgreSQL URL: {}", e)))?;

        options = options.log_statements(LevelFilter::Trace);

        if statement_timeout > 0 {
            options = options.options([("statement_timeout", format!("{}s", statement_timeout))]);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections.min(max_connections))
            .acquire_timeout(Duration::from_secs(acquire_timeout))
            .connect_with(options)
            .await?;

        tracing::debug!(
            max_connections,
            min_connections,
            acquire_timeout_secs = acquire_timeout,
            statement_timeout_secs = statement_timeout,
            "PostgresService initialized"
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("PostgreSQL pool closed");
    }
}

#[cfg(test)]
mod tests {
    // Searches against PostgreSQL need a running server; only the
    // configuration checks run here.
    use super::*;
    use crate::core::config::DatabaseBackend;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            backend: DatabaseBackend::Postgres,
            url: url.to_string(),
            max_connections: 2,
            min_connections: 0,
            acquire_timeout_secs: 1,
            statement_timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_init_requires_url() {
        let err = PostgresService::init(&config("")).await.err().unwrap();
        assert!(matches!(err, PostgresError::Config(_)));
    }

    #[tokio::test]
    async fn test_init_rejects_invalid_url() {
        let err = PostgresService::init(&config("not a url"))
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid PostgreSQL URL"));
    }
}
