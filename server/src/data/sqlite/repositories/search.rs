//! Filtered id search

use sqlx::SqlitePool;

use crate::data::sql::BoundQuery;
use crate::data::sqlite::SqliteError;

/// Run a bound search query, returning the matching ids
pub async fn search_ids(pool: &SqlitePool, query: &BoundQuery) -> Result<Vec<i64>, SqliteError> {
    let mut statement = sqlx::query_scalar::<sqlx::Sqlite, i64>(&query.sql);
    for value in &query.binds {
        statement = statement.bind(value.as_str());
    }
    let ids = statement.fetch_all(pool).await?;
    tracing::debug!(matches = ids.len(), "SQLite search completed");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::entity::Entity;
    use crate::data::filters::compile_filter;
    use crate::data::sql::{SqliteDialect, search_query};
    use crate::data::sqlite::apply_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        apply_schema(&pool).await.unwrap();

        let jobs = [
            (
                "Paint fence",
                "owner-1",
                "ACTIVE",
                "2024-03-01",
                r#"{"city": "Toronto", "category": "Painting", "sports": {"favorite": {"summer": "aaa"}}}"#,
            ),
            (
                "Fix sink",
                "owner-2",
                "CREATED",
                "2024-05-15",
                r#"{"city": "Montreal", "category": "Plumbing"}"#,
            ),
            (
                "Final cleanup",
                "owner-1",
                "CLOSED",
                "2023-12-31",
                r#"{"city": "Toronto", "category": "Cleaning", "sports": {"favorite": {"summer": "bbb"}}}"#,
            ),
        ];
        for (name, owner, status, due, metadata) in jobs {
            sqlx::query(
                "INSERT INTO jobs (name, owner_id, status, due_date, metadata) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(name)
            .bind(owner)
            .bind(status)
            .bind(due)
            .bind(metadata)
            .execute(&pool)
            .await
            .unwrap();
        }
        pool
    }

    async fn search(pool: &SqlitePool, raw: &str) -> Vec<i64> {
        let predicate = compile_filter(raw, &Entity::Job.allowlist()).unwrap();
        let query = search_query(&SqliteDialect, Entity::Job, &predicate).unwrap();
        search_ids(pool, &query).await.unwrap()
    }

    #[tokio::test]
    async fn test_search_by_column() {
        let pool = setup_pool().await;
        assert_eq!(search(&pool, r#"{"status": "ACTIVE"}"#).await, [1]);
        assert_eq!(search(&pool, r#"{"owner_id": "owner-1"}"#).await, [1, 3]);
    }

    #[tokio::test]
    async fn test_search_by_metadata() {
        let pool = setup_pool().await;
        assert_eq!(
            search(&pool, r#"{"metadata": {"city": "Toronto"}}"#).await,
            [1, 3]
        );
        assert_eq!(
            search(
                &pool,
                r#"{"metadata": {"sports": {"favorite": {"summer": "aaa"}}}}"#
            )
            .await,
            [1]
        );
    }

    #[tokio::test]
    async fn test_search_like_and_in() {
        let pool = setup_pool().await;
        assert_eq!(
            search(&pool, r#"{"metadata": {"category": {"like": "ing"}}}"#).await,
            [1, 2, 3]
        );
        // SQLite's LIKE ignores ASCII case; PostgreSQL's does not
        assert_eq!(
            search(&pool, r#"{"metadata": {"city": {"like": "TORONTO"}}}"#).await,
            [1, 3]
        );
        assert_eq!(
            search(&pool, r#"{"status": {"in": ["CREATED", "CLOSED"]}}"#).await,
            [2, 3]
        );
        assert!(
            search(&pool, r#"{"status": {"in": []}}"#)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_search_or_group_and_ranges() {
        let pool = setup_pool().await;
        assert_eq!(
            search(
                &pool,
                r#"{"$or": {"status": "CREATED", "metadata": {"city": "Toronto"}}, "due_date": {"geq": "2024-01-01"}}"#
            )
            .await,
            [1, 2]
        );
        assert_eq!(search(&pool, r#"{"id": {"gt": 1}}"#).await, [2, 3]);
    }

    #[tokio::test]
    async fn test_search_numeric_metadata() {
        let pool = setup_pool().await;
        for metadata in [r#"{"price": 10}"#, r#"{"price": 20}"#] {
            sqlx::query("INSERT INTO jobs (name, metadata) VALUES ('priced', ?)")
                .bind(metadata)
                .execute(&pool)
                .await
                .unwrap();
        }

        assert_eq!(
            search(&pool, r#"{"metadata": {"price": {"gt": 15}}}"#).await,
            [5]
        );
        assert_eq!(search(&pool, r#"{"metadata": {"price": 20}}"#).await, [5]);
        assert_eq!(
            search(&pool, r#"{"metadata": {"price": {"lt": 15}}}"#).await,
            [4]
        );
        assert_eq!(
            search(&pool, r#"{"metadata": {"price": {"in": ["10", "20"]}}}"#).await,
            [4, 5]
        );
    }

    #[tokio::test]
    async fn test_search_integer_column_with_text_binds() {
        let pool = setup_pool().await;
        assert_eq!(search(&pool, r#"{"id": {"in": ["2", "3"]}}"#).await, [2, 3]);
        assert_eq!(search(&pool, r#"{"id": 3}"#).await, [3]);
    }

    #[tokio::test]
    async fn test_search_no_matches() {
        let pool = setup_pool().await;
        assert!(
            search(&pool, r#"{"metadata": {"city": "Vancouver"}}"#)
                .await
                .is_empty()
        );
    }
}
