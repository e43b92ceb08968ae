//! Filtered id search

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::sql::BoundQuery;

/// Run a bound search query, returning the matching ids
///
/// Binds are sent as `text`; the statement casts those compared against
/// typed columns (`$1::bigint`, `$2::date`, ...).
pub async fn search_ids(pool: &PgPool, query: &BoundQuery) -> Result<Vec<i64>, PostgresError> {
    let mut statement = sqlx::query_scalar::<sqlx::Postgres, i64>(&query.sql);
    for value in &query.binds {
        statement = statement.bind(value.as_str());
    }
    let ids = statement.fetch_all(pool).await?;
    tracing::debug!(matches = ids.len(), "PostgreSQL search completed");
    Ok(ids)
}
