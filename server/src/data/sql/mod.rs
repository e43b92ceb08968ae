//! SQL abstraction layer for multi-database support
//!
//! Binds compiled predicates for the supported backends (SQLite, PostgreSQL).

mod bind;
mod dialect;
mod postgres_dialect;
mod sqlite_dialect;

pub use bind::{BoundQuery, bind_predicate, bind_predicate_for, search_query};
pub use dialect::SqlDialect;
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;

use std::str::FromStr;

/// Database backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    /// Get the SQL dialect for this backend
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Backend::Sqlite => &SqliteDialect,
            Backend::Postgres => &PostgresDialect,
        }
    }

    /// Get the backend name
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            _ => Err(format!(
                "Invalid backend '{}'. Valid options: sqlite, postgres",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_dialect() {
        assert_eq!(Backend::Sqlite.dialect().name(), "sqlite");
        assert_eq!(Backend::Postgres.dialect().placeholder(3), "$3");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("SQLite".parse::<Backend>().unwrap(), Backend::Sqlite);
        assert_eq!("postgresql".parse::<Backend>().unwrap(), Backend::Postgres);
        assert!("duckdb".parse::<Backend>().is_err());
    }
}
