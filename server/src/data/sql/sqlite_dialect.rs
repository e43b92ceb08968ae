//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    /// `->>` returns the stored JSON type (INTEGER, REAL, ...), which never
    /// equals a text bind
    fn json_text(&self, path: &str) -> String {
        format!("CAST({} AS TEXT)", path)
    }
}
