//! Record lifecycle service: create, list, detail, delete.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewUrlRecord, UrlDetail, UrlRecord, UrlSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_url;

/// Cache key holding the ordered listing of all records.
///
/// Invalidated on every create and every successful delete, so a stale
/// listing is never served after a mutation within this process.
pub const LISTING_CACHE_KEY: &str = "urls:listing";

/// Orchestrates create/list/detail/delete flows, keeping cache entries and
/// durable records coherent.
///
/// The durable store is the source of truth; every cache entry written here
/// is a disposable projection that a miss re-derives. Cache writes are
/// fail-open: a cache backend failure degrades latency, never correctness.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    generator: Arc<CodeGenerator>,
}

impl UrlService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        generator: Arc<CodeGenerator>,
    ) -> Self {
        Self {
            repository,
            cache,
            generator,
        }
    }

    /// Shortens a URL.
    ///
    /// Validates the URL, rejects duplicates, obtains a fresh code from the
    /// generator, persists the record, then write-throughs the per-code
    /// cache entry and invalidates the aggregate listing entry.
    ///
    /// Validation and the duplicate check both happen before any mutation;
    /// a failing create leaves no partial state behind.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - malformed input
    /// - [`AppError::DuplicateUrl`] - the URL is already shortened (detected
    ///   up front, or at insert time when a concurrent create wins the race)
    /// - [`AppError::GenerationExhausted`] - code space consumed
    pub async fn create(&self, url: &str) -> Result<UrlRecord, AppError> {
        validate_url(url)?;

        if self.repository.find_by_url(url).await?.is_some() {
            return Err(AppError::DuplicateUrl);
        }

        let code = self.generator.generate()?;

        let record = self
            .repository
            .insert(NewUrlRecord {
                url: url.to_string(),
                short_code: code,
            })
            .await?;

        let detail = UrlDetail::from(&record);
        if let Err(e) = self
            .cache
            .set(&record.short_code, json!(&detail))
            .await
        {
            warn!(code = %record.short_code, error = %e, "failed to cache created record");
        }

        self.invalidate_listing().await;

        debug!(code = %record.short_code, url = %record.url, "created short link");
        Ok(record)
    }

    /// Lists every record, ordered by ascending click count.
    ///
    /// Served from the aggregate cache entry when present; on a miss the
    /// durable store is queried, the aggregate entry is populated, and the
    /// per-code entries are warmed in one bulk write since every record is
    /// already in hand.
    pub async fn list(&self) -> Result<Vec<UrlSummary>, AppError> {
        if let Ok(Some(cached)) = self.cache.get(LISTING_CACHE_KEY).await {
            match serde_json::from_value::<Vec<UrlSummary>>(cached) {
                Ok(summaries) => return Ok(summaries),
                Err(e) => warn!(error = %e, "discarding malformed listing cache entry"),
            }
        }

        let records = self.repository.list_ordered_by_clicks().await?;
        let summaries: Vec<UrlSummary> = records.iter().map(UrlSummary::from).collect();

        if let Err(e) = self.cache.set(LISTING_CACHE_KEY, json!(&summaries)).await {
            warn!(error = %e, "failed to cache listing");
        }

        let details: Vec<(String, serde_json::Value)> = records
            .iter()
            .map(|r| (r.short_code.clone(), json!(UrlDetail::from(r))))
            .collect();
        if let Err(e) = self.cache.set_many(details).await {
            warn!(error = %e, "failed to warm per-code cache entries");
        }

        Ok(summaries)
    }

    /// Returns the detail projection for a short code.
    ///
    /// Read-through: cache hit wins; a miss queries the durable store and
    /// populates the cache on the way out.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn detail(&self, code: &str) -> Result<UrlDetail, AppError> {
        if let Ok(Some(cached)) = self.cache.get(code).await {
            match serde_json::from_value::<UrlDetail>(cached) {
                Ok(detail) => return Ok(detail),
                Err(e) => warn!(code, error = %e, "discarding malformed detail cache entry"),
            }
        }

        let record = self
            .repository
            .find_by_short_code(code)
            .await?
            .ok_or(AppError::NotFound)?;

        let detail = UrlDetail::from(&record);
        if let Err(e) = self.cache.set(code, json!(&detail)).await {
            warn!(code, error = %e, "failed to cache detail");
        }

        Ok(detail)
    }

    /// Deletes the record for a short code.
    ///
    /// The per-code cache entry is removed before the durable delete, so a
    /// cached-but-already-gone entry can never be resurrected by a
    /// concurrent read. A record absent from the store is `NotFound` even
    /// when a stale cache entry existed. On success the aggregate listing
    /// entry is invalidated as well - the same rule as create.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no durable record has this code.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if let Err(e) = self.cache.delete(code).await {
            warn!(code, error = %e, "failed to invalidate detail cache");
        }

        let deleted = self.repository.delete_by_short_code(code).await?;
        if !deleted {
            return Err(AppError::NotFound);
        }

        self.invalidate_listing().await;

        debug!(code, "deleted short link");
        Ok(())
    }

    async fn invalidate_listing(&self) {
        if let Err(e) = self.cache.delete(LISTING_CACHE_KEY).await {
            warn!(error = %e, "failed to invalidate listing cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::MemoryCache;
    use crate::utils::code_generator::DEFAULT_ALPHABET;
    use chrono::Utc;

    fn generator() -> Arc<CodeGenerator> {
        Arc::new(CodeGenerator::new(DEFAULT_ALPHABET, 6, 0))
    }

    fn record(id: i64, url: &str, code: &str, clicks: i64) -> UrlRecord {
        UrlRecord {
            id,
            url: url.to_string(),
            short_code: code.to_string(),
            clicks,
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockUrlRepository, cache: Arc<MemoryCache>) -> UrlService {
        UrlService::new(Arc::new(repo), cache, generator())
    }

    #[tokio::test]
    async fn test_create_persists_and_caches() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_url().times(1).returning(|_| Ok(None));
        repo.expect_insert().times(1).returning(|new_record| {
            assert_eq!(new_record.short_code.len(), 6);
            Ok(UrlRecord {
                id: 1,
                url: new_record.url,
                short_code: new_record.short_code,
                clicks: 0,
                created_at: Utc::now(),
            })
        });

        let cache = Arc::new(MemoryCache::new());
        let service = service(repo, cache.clone());

        let created = service.create("https://www.google.com/").await.unwrap();
        assert_eq!(created.url, "https://www.google.com/");
        assert_eq!(created.clicks, 0);

        // Write-through populated the per-code entry.
        let cached = cache.get(&created.short_code).await.unwrap().unwrap();
        let detail: UrlDetail = serde_json::from_value(cached).unwrap();
        assert_eq!(detail.url, "https://www.google.com/");
        assert_eq!(detail.on_clicks, 0);
    }

    #[tokio::test]
    async fn test_create_invalidates_listing_cache() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_url().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|n| Ok(record(1, &n.url, &n.short_code, 0)));

        let cache = Arc::new(MemoryCache::new());
        cache
            .set(LISTING_CACHE_KEY, serde_json::json!([]))
            .await
            .unwrap();

        let service = service(repo, cache.clone());
        service.create("https://a.com/").await.unwrap();

        assert_eq!(cache.get(LISTING_CACHE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_url()
            .times(1)
            .returning(|url| Ok(Some(record(1, url, "abc123", 0))));
        repo.expect_insert().times(0);

        let service = service(repo, Arc::new(MemoryCache::new()));

        let result = service.create("https://a.com/").await;
        assert!(matches!(result, Err(AppError::DuplicateUrl)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url_before_any_store_access() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_url().times(0);
        repo.expect_insert().times(0);

        let service = service(repo, Arc::new(MemoryCache::new()));

        let result = service.create("not a url").await;
        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_list_miss_queries_store_and_populates_cache() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_ordered_by_clicks().times(1).returning(|| {
            Ok(vec![
                record(1, "https://a.com/", "aaaaaa", 0),
                record(2, "https://b.com/", "bbbbbb", 3),
            ])
        });

        let cache = Arc::new(MemoryCache::new());
        let service = service(repo, cache.clone());

        let listing = service.list().await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].short_url, "aaaaaa");

        // Aggregate entry and per-code entries are now warm.
        assert!(cache.get(LISTING_CACHE_KEY).await.unwrap().is_some());
        assert!(cache.get("bbbbbb").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_hit_skips_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_ordered_by_clicks().times(0);

        let cache = Arc::new(MemoryCache::new());
        let summaries = vec![UrlSummary {
            url: "https://a.com/".to_string(),
            short_url: "aaaaaa".to_string(),
            created: Utc::now(),
        }];
        cache
            .set(LISTING_CACHE_KEY, serde_json::to_value(&summaries).unwrap())
            .await
            .unwrap();

        let service = service(repo, cache);
        let listing = service.list().await.unwrap();
        assert_eq!(listing, summaries);
    }

    #[tokio::test]
    async fn test_detail_hit_skips_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_short_code().times(0);

        let cache = Arc::new(MemoryCache::new());
        let detail = UrlDetail {
            url: "https://a.com/".to_string(),
            on_clicks: 4,
            created: Utc::now(),
        };
        cache
            .set("abc123", serde_json::to_value(&detail).unwrap())
            .await
            .unwrap();

        let service = service(repo, cache);
        assert_eq!(service.detail("abc123").await.unwrap(), detail);
    }

    #[tokio::test]
    async fn test_detail_miss_populates_cache() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_short_code()
            .times(1)
            .returning(|_| Ok(Some(record(1, "https://a.com/", "abc123", 2))));

        let cache = Arc::new(MemoryCache::new());
        let service = service(repo, cache.clone());

        let detail = service.detail("abc123").await.unwrap();
        assert_eq!(detail.on_clicks, 2);
        assert!(cache.get("abc123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_detail_unknown_code_is_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_short_code().returning(|_| Ok(None));

        let service = service(repo, Arc::new(MemoryCache::new()));
        assert!(matches!(
            service.detail("zzzzzz").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_cache_entries() {
        let mut repo = MockUrlRepository::new();
        repo.expect_delete_by_short_code()
            .times(1)
            .returning(|_| Ok(true));

        let cache = Arc::new(MemoryCache::new());
        cache.set("abc123", serde_json::json!({})).await.unwrap();
        cache
            .set(LISTING_CACHE_KEY, serde_json::json!([]))
            .await
            .unwrap();

        let service = service(repo, cache.clone());
        service.delete("abc123").await.unwrap();

        assert_eq!(cache.get("abc123").await.unwrap(), None);
        assert_eq!(cache.get(LISTING_CACHE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_not_found_even_when_cached() {
        let mut repo = MockUrlRepository::new();
        repo.expect_delete_by_short_code().returning(|_| Ok(false));

        let cache = Arc::new(MemoryCache::new());
        cache.set("ghost1", serde_json::json!({})).await.unwrap();

        let service = service(repo, cache.clone());
        let result = service.delete("ghost1").await;

        assert!(matches!(result, Err(AppError::NotFound)));
        // The stale entry is gone regardless.
        assert_eq!(cache.get("ghost1").await.unwrap(), None);
    }
}
