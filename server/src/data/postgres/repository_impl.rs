//! SearchRepository trait implementation for PostgreSQL

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::entity::Entity;
use crate::data::error::DataError;
use crate::data::filters::CompiledPredicate;
use crate::data::sql::{PostgresDialect, search_query};
use crate::data::traits::SearchRepository;

use super::PostgresService;
use super::repositories::search;

#[async_trait]
impl SearchRepository for Arc<PostgresService> {
    async fn search_ids(
        &self,
        entity: Entity,
        predicate: &CompiledPredicate,
    ) -> Result<Vec<i64>, DataError> {
        let query = search_query(&PostgresDialect, entity, predicate)?;
        search::search_ids(self.pool(), &query)
            .await
            .map_err(Into::into)
    }
}
