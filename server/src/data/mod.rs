//! Data layer
//!
//! - `filters` - JSON filter parsing and predicate compilation
//! - `entity` - Searchable entities and their column allowlists
//! - `sql` - Dialect binding for compiled predicates
//! - `sqlite` / `postgres` - Backend services executing searches
//! - `traits` - Repository traits for multi-database support
//! - `error` - Unified error type for all backends

pub mod entity;
pub mod error;
pub mod filters;
pub mod postgres;
pub mod sql;
pub mod sqlite;
pub mod traits;

// Re-export backend-specific services
pub use postgres::PostgresService;
pub use sqlite::SqliteService;

pub use entity::Entity;
pub use error::DataError;
pub use traits::SearchRepository;

use std::sync::Arc;

use crate::core::config::{DatabaseBackend, DatabaseConfig};

/// Search database service enum
///
/// Wraps the underlying backend-specific service (SQLite or PostgreSQL).
pub enum SearchService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend
    Postgres(Arc<PostgresService>),
}

impl SearchService {
    /// Initialize the service for the configured backend
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        match config.backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(config).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Postgres => {
                let service = PostgresService::init(config).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Postgres(_) => DatabaseBackend::Postgres,
        }
    }

    /// Get the repository trait object for searches
    pub fn repository(&self) -> Box<dyn SearchRepository + Send + Sync> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Postgres(p) => Box::new(Arc::clone(p)),
        }
    }
}
