//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{RedirectService, UrlService};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;

/// Handles to the services and infrastructure shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub urls: Arc<UrlService>,
    pub redirects: Arc<RedirectService>,
    /// Kept alongside the services for the health endpoint's cache probe.
    pub cache: Arc<dyn CacheService>,
    /// Kept alongside the services for the health endpoint's store probe.
    pub repository: Arc<dyn UrlRepository>,
}

impl AppState {
    pub fn new(
        urls: Arc<UrlService>,
        redirects: Arc<RedirectService>,
        cache: Arc<dyn CacheService>,
        repository: Arc<dyn UrlRepository>,
    ) -> Self {
        Self {
            urls,
            redirects,
            cache,
            repository,
        }
    }
}
