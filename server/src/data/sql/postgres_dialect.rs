//! PostgreSQL SQL dialect implementation

use super::SqlDialect;
use crate::data::filters::ColumnType;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    /// Binds are sent as `text`, so non-text columns need an explicit cast
    fn typed_placeholder(&self, index: usize, ty: ColumnType) -> String {
        match ty.postgres_cast() {
            Some(cast) => format!("${}::{}", index, cast),
            None => self.placeholder(index),
        }
    }
}
