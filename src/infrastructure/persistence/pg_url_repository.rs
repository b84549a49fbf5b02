//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for URL record storage and retrieval.
///
/// Uses bound parameters throughout for SQL injection protection. Uniqueness
/// of both `url` and `short_code` is enforced by database constraints; a
/// violation on the `url` constraint surfaces as
/// [`AppError::DuplicateUrl`] via the [`From<sqlx::Error>`] conversion.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (url, short_code)
            VALUES ($1, $2)
            RETURNING id, url, short_code, clicks, created_at
            "#,
        )
        .bind(&new_record.url)
        .bind(&new_record.short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, url, short_code, clicks, created_at
            FROM urls
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, url, short_code, clicks, created_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn delete_by_short_code(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_ordered_by_clicks(&self) -> Result<Vec<UrlRecord>, AppError> {
        let records = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, url, short_code, clicks, created_at
            FROM urls
            ORDER BY clicks ASC, id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<i64>, AppError> {
        let clicks = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE urls
            SET clicks = clicks + 1
            WHERE short_code = $1
            RETURNING clicks
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }

    async fn next_id_hint(&self) -> Result<i64, AppError> {
        let max_id = sqlx::query_scalar::<_, i64>("SELECT COALESCE(MAX(id), 0) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(max_id)
    }
}
