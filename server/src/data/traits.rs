//! Repository traits for database backends
//!
//! Each backend (SQLite, PostgreSQL) implements these traits with its own
//! specific logic.

use async_trait::async_trait;

use crate::data::entity::Entity;
use crate::data::error::DataError;
use crate::data::filters::CompiledPredicate;

/// Repository trait for filtered searches
///
/// Implemented by SQLite and PostgreSQL backends.
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Ids of `entity` rows matching `predicate`, in ascending order
    async fn search_ids(
        &self,
        entity: Entity,
        predicate: &CompiledPredicate,
    ) -> Result<Vec<i64>, DataError>;
}
