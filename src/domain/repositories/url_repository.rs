//! Repository trait for durable URL record access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Data access contract for shortened URL records.
///
/// The durable store owns the authoritative record; everything the cache
/// holds is a disposable copy refreshed through these operations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - `MockUrlRepository` - auto-generated under `cfg(test)` via `mockall`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new record with zero clicks and a store-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateUrl`] if the URL's unique constraint is
    /// violated by a concurrent insert, [`AppError::Database`] on other
    /// store errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its original URL. Used for the duplicate check
    /// before creation.
    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its short code.
    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Deletes a record by its short code.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if no record
    /// had this code.
    async fn delete_by_short_code(&self, code: &str) -> Result<bool, AppError>;

    /// Lists all records ordered by ascending click count, ties broken by
    /// insertion order.
    async fn list_ordered_by_clicks(&self) -> Result<Vec<UrlRecord>, AppError>;

    /// Atomically increments the click counter for a code.
    ///
    /// Returns the new count, or `None` if no record has this code (the
    /// record may have been deleted while a click event was queued).
    async fn increment_clicks(&self, code: &str) -> Result<Option<i64>, AppError>;

    /// The highest identifier the store has assigned so far (0 when empty).
    ///
    /// Seeds the code generator at startup so it resumes strictly past every
    /// seed consumed before a restart.
    async fn next_id_hint(&self) -> Result<i64, AppError>;
}
