//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Redis cache for URL projections.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Values are stored as serialized JSON under a namespaced key. All
/// operations are fail-open: errors are logged but don't propagate to
/// callers.
pub struct RedisCache {
    client: ConnectionManager,
    /// TTL applied to every entry; `None` means entries live until
    /// explicitly invalidated (the core logic mandates no TTL).
    ttl_seconds: Option<u64>,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, ttl_seconds: Option<u64>) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
            key_prefix: "snaplink:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Writes one serialized value, honoring the configured TTL.
    async fn write(&self, conn: &mut ConnectionManager, key: &str, raw: String) -> redis::RedisResult<()> {
        match self.ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, raw, ttl).await,
            None => conn.set::<_, _, ()>(key, raw).await,
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!("Cache HIT: {}", key);
                    Ok(Some(value))
                }
                Err(e) => {
                    // A corrupt entry degrades to a miss.
                    warn!("Cache entry for {} is not valid JSON: {}", key, e);
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: Value) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match self.write(&mut conn, &full_key, value.to_string()).await {
            Ok(_) => {
                debug!("Cache SET: {}", key);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&full_key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache DELETE: {}", key);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", key, e);
                Ok(())
            }
        }
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> CacheResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let count = entries.len();
        let mut conn = self.client.clone();
        let mut pipe = redis::pipe();

        for (key, value) in entries {
            let full_key = self.build_key(&key);
            match self.ttl_seconds {
                Some(ttl) => pipe.set_ex(full_key, value.to_string(), ttl).ignore(),
                None => pipe.set(full_key, value.to_string()).ignore(),
            };
        }

        match pipe.query_async::<()>(&mut conn).await {
            Ok(_) => {
                debug!("Cache SET_MANY: {} entries", count);
                Ok(())
            }
            Err(e) => {
                warn!("Redis pipeline error in set_many: {}", e);
                Ok(())
            }
        }
    }

    async fn get_many(&self) -> CacheResult<HashMap<String, Value>> {
        let mut conn = self.client.clone();
        let pattern = format!("{}*", self.key_prefix);

        let keys: Vec<String> = match redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await
        {
            Ok(keys) => keys,
            Err(e) => {
                error!("Redis KEYS error: {}", e);
                return Ok(HashMap::new());
            }
        };

        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let values: Vec<Option<String>> = match conn.mget(&keys).await {
            Ok(values) => values,
            Err(e) => {
                error!("Redis MGET error: {}", e);
                return Ok(HashMap::new());
            }
        };

        let mut map = HashMap::new();
        for (key, raw) in keys.into_iter().zip(values) {
            if let Some(raw) = raw {
                if let Ok(value) = serde_json::from_str(&raw) {
                    let bare = key
                        .strip_prefix(&self.key_prefix)
                        .unwrap_or(&key)
                        .to_string();
                    map.insert(bare, value);
                }
            }
        }

        Ok(map)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
