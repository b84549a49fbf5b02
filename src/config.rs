//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required variables
//!
//! Either `DATABASE_URL` or all of (`DB_HOST`, `DB_USER`, `DB_PASSWORD`,
//! `DB_NAME`). If `DATABASE_URL` is not set it is constructed from the
//! individual components.
//!
//! ## Optional variables
//!
//! - `REDIS_URL` - Redis connection; when unset, an in-process cache is used
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000)
//! - `CACHE_TTL_SECONDS` - TTL for Redis entries; unset means no expiry
//! - `SHORT_CODE_LENGTH` - Generated code length (default: 6, max: 12)
//! - `DB_MAX_CONNECTIONS` / `DB_CONNECT_TIMEOUT` - Pool tuning

use anyhow::{Context, Result, bail};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Bounded capacity of the click event channel feeding the background
    /// worker. Events beyond this are dropped (best-effort counting).
    pub click_queue_capacity: usize,
    /// TTL (seconds) for cached entries in Redis. `None` means entries live
    /// until explicitly invalidated. Has no effect on the in-process cache.
    pub cache_ttl_seconds: Option<u64>,
    /// Length of generated short codes.
    pub short_code_length: u32,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required database configuration is missing or if
    /// `SHORT_CODE_LENGTH` is out of range.
    pub fn from_env() -> Result<Self> {
        let database_url =
            Self::load_database_url().context("Failed to load database configuration")?;

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let click_queue_capacity = env::var("CLICK_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok());

        let short_code_length = env::var("SHORT_CODE_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(6);

        if !(1..=12).contains(&short_code_length) {
            bail!("SHORT_CODE_LENGTH must be between 1 and 12");
        }

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            redis_url,
            listen_addr,
            log_level,
            log_format,
            click_queue_capacity,
            cache_ttl_seconds,
            short_code_length,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Loads the database URL, falling back to component-based configuration.
    fn load_database_url() -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            if !url.is_empty() {
                return Ok(url);
            }
        }

        let host = env::var("DB_HOST").context("DATABASE_URL or DB_HOST must be set")?;
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let user = env::var("DB_USER").context("DB_USER must be set")?;
        let password = env::var("DB_PASSWORD").context("DB_PASSWORD must be set")?;
        let name = env::var("DB_NAME").context("DB_NAME must be set")?;

        Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
    }
}
