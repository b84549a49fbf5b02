#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use tokio::sync::mpsc;

use snaplink::application::services::{RedirectService, UrlService};
use snaplink::domain::click_worker::run_click_worker;
use snaplink::domain::entities::{NewUrlRecord, UrlRecord};
use snaplink::domain::repositories::UrlRepository;
use snaplink::error::AppError;
use snaplink::infrastructure::cache::{CacheService, MemoryCache};
use snaplink::routes::app_router;
use snaplink::state::AppState;
use snaplink::utils::code_generator::{CodeGenerator, DEFAULT_ALPHABET};

/// In-memory stand-in for the PostgreSQL repository.
///
/// Mirrors the store semantics the services rely on: dense monotone ids,
/// unique-URL enforcement at insert time, and click-ordered listing.
pub struct InMemoryUrlRepository {
    records: Mutex<Vec<UrlRecord>>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut records = self.records.lock().unwrap();

        // The unique constraint the real store enforces.
        if records.iter().any(|r| r.url == new_record.url) {
            return Err(AppError::DuplicateUrl);
        }

        let record = UrlRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            url: new_record.url,
            short_code: new_record.short_code,
            clicks: 0,
            created_at: Utc::now(),
        };
        records.push(record.clone());

        Ok(record)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.url == url).cloned())
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.short_code == code).cloned())
    }

    async fn delete_by_short_code(&self, code: &str) -> Result<bool, AppError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.short_code != code);
        Ok(records.len() < before)
    }

    async fn list_ordered_by_clicks(&self) -> Result<Vec<UrlRecord>, AppError> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by_key(|r| (r.clicks, r.id));
        Ok(records)
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<i64>, AppError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.short_code == code) {
            Some(record) => {
                record.clicks += 1;
                Ok(Some(record.clicks))
            }
            None => Ok(None),
        }
    }

    async fn next_id_hint(&self) -> Result<i64, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().map(|r| r.id).max().unwrap_or(0))
    }
}

/// Builds an application state over the in-memory repository, with a live
/// click worker draining the channel. Must run inside a tokio runtime.
pub fn create_test_state() -> AppState {
    let repository: Arc<dyn UrlRepository> = Arc::new(InMemoryUrlRepository::new());
    let cache: Arc<dyn CacheService> = Arc::new(MemoryCache::new());
    let generator = Arc::new(CodeGenerator::new(DEFAULT_ALPHABET, 6, 0));

    let (click_tx, click_rx) = mpsc::channel(1024);
    tokio::spawn(run_click_worker(click_rx, repository.clone()));

    let urls = Arc::new(UrlService::new(
        repository.clone(),
        cache.clone(),
        generator,
    ));
    let redirects = Arc::new(RedirectService::new(
        repository.clone(),
        cache.clone(),
        click_tx,
    ));

    AppState::new(urls, redirects, cache, repository)
}

/// Spins up a test server over the full application router.
pub fn create_test_server() -> TestServer {
    TestServer::new(app_router(create_test_state())).unwrap()
}
