//! Redirect coordinator: resolves codes to targets and counts clicks.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::UrlDetail;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Resolves short codes to their target URL while counting visits.
///
/// Redirects are the highest-frequency operation, so the cache-hit path
/// never touches the durable store synchronously: the click count is bumped
/// in the cached projection (visible to the next read immediately) and the
/// durable increment is deferred to the background click worker through a
/// bounded channel. A crash between the cache write and the worker drain
/// loses at most the in-flight increments - an accepted, bounded
/// inconsistency.
///
/// The cache-miss path pays the durable read anyway, so it also persists the
/// increment synchronously and repopulates the cache with the updated
/// projection.
pub struct RedirectService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    click_tx: mpsc::Sender<ClickEvent>,
}

impl RedirectService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        click_tx: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            repository,
            cache,
            click_tx,
        }
    }

    /// Resolves a short code, counting the visit.
    ///
    /// Returns the target URL for the caller to redirect to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn resolve_and_count(&self, code: &str) -> Result<String, AppError> {
        if let Ok(Some(cached)) = self.cache.get(code).await {
            match serde_json::from_value::<UrlDetail>(cached) {
                Ok(mut detail) => {
                    detail.on_clicks += 1;

                    // Synchronous cache write so the next read observes the
                    // new count; durable write deferred to the worker.
                    if let Err(e) = self.cache.set(code, json!(&detail)).await {
                        warn!(code, error = %e, "failed to write back click count");
                    }

                    if self.click_tx.try_send(ClickEvent::new(code)).is_err() {
                        // Queue full or worker gone: drop the event, the
                        // durable count undercounts until a later write.
                        debug!(code, "click queue full, dropping event");
                    }

                    return Ok(detail.url);
                }
                Err(e) => warn!(code, error = %e, "discarding malformed detail cache entry"),
            }
        }

        let record = self
            .repository
            .find_by_short_code(code)
            .await?
            .ok_or(AppError::NotFound)?;

        let clicks = self
            .repository
            .increment_clicks(code)
            .await?
            .unwrap_or(record.clicks + 1);

        let detail = UrlDetail {
            url: record.url.clone(),
            on_clicks: clicks,
            created: record.created_at,
        };
        if let Err(e) = self.cache.set(code, json!(&detail)).await {
            warn!(code, error = %e, "failed to cache resolved record");
        }

        Ok(record.url)
    }
}
