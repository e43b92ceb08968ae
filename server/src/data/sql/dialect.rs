//! SQL dialect trait for multi-database support
//!
//! Compiled predicates always use `?` placeholders and `->>` for the last JSON
//! step; the dialect decides what each becomes in the final statement.

use crate::data::filters::ColumnType;

/// SQL dialect trait for generating database-specific SQL
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Placeholder for a text bind compared against a column of type `ty`
    fn typed_placeholder(&self, index: usize, _ty: ColumnType) -> String {
        self.placeholder(index)
    }

    /// Wrap a complete `col -> .. ->> key` path so it yields text
    fn json_text(&self, path: &str) -> String {
        path.to_string()
    }
}
