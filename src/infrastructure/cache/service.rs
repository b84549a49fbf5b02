//! Cache service trait and error types.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value store for denormalized record projections.
///
/// Values are JSON documents: per-code entries hold a
/// [`UrlDetail`](crate::domain::entities::UrlDetail) projection, the
/// aggregate listing entry holds an ordered array of
/// [`UrlSummary`](crate::domain::entities::UrlSummary) projections.
///
/// Every operation is best-effort and fail-open: backend errors are logged
/// by the implementation and reported as a miss (`Ok(None)`) or a no-op
/// (`Ok(())`), never as a request failure. Absence of a key never implies
/// the underlying record is gone - only that the caller must refresh from
/// durable storage. The one consistency requirement is read-after-delete
/// within a single process: once `delete(key)` returns, no subsequent `get`
/// observes the deleted value.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process fallback
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the value for a key, `None` on miss or backend error.
    async fn get(&self, key: &str) -> CacheResult<Option<Value>>;

    /// Stores a value under a key, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> CacheResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Stores several entries at once. Used to warm per-code entries when a
    /// listing refresh already has every record in hand.
    async fn set_many(&self, entries: Vec<(String, Value)>) -> CacheResult<()>;

    /// Returns every key-value pair currently cached by this service.
    async fn get_many(&self) -> CacheResult<HashMap<String, Value>>;

    /// Reports whether the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
