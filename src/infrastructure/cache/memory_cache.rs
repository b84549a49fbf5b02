//! In-process cache implementation.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A process-local cache backed by a `HashMap`.
///
/// Used when Redis is not configured or its connection fails at startup,
/// and throughout the test suite. Per-key operations are atomic under the
/// lock, which gives read-after-delete consistency within the process.
/// Entries are never evicted; the cache is a disposable projection and the
/// durable store remains the source of truth.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using in-process MemoryCache");
        Self::default()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> CacheResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> CacheResult<()> {
        let mut guard = self.entries.write().await;
        for (key, value) in entries {
            guard.insert(key, value);
        }
        Ok(())
    }

    async fn get_many(&self) -> CacheResult<HashMap<String, Value>> {
        Ok(self.entries.read().await.clone())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCache::new();
        cache.set("k", json!({"url": "https://a.com"})).await.unwrap();

        let value = cache.get("k").await.unwrap();
        assert_eq!(value, Some(json!({"url": "https://a.com"})));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = MemoryCache::new();
        cache.set("k", json!(1)).await.unwrap();
        cache.set("k", json!(2)).await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_read_after_delete() {
        let cache = MemoryCache::new();
        cache.set("k", json!("v")).await.unwrap();
        cache.delete("k").await.unwrap();

        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let cache = MemoryCache::new();
        assert!(cache.delete("never-set").await.is_ok());
    }

    #[tokio::test]
    async fn test_set_many_and_get_many() {
        let cache = MemoryCache::new();
        cache
            .set_many(vec![
                ("a".to_string(), json!(1)),
                ("b".to_string(), json!(2)),
            ])
            .await
            .unwrap();

        let all = cache.get_many().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["a"], json!(1));
        assert_eq!(all["b"], json!(2));
    }

    #[tokio::test]
    async fn test_health_check_always_true() {
        assert!(MemoryCache::new().health_check().await);
    }
}
