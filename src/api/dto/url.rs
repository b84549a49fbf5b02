//! DTOs for the shortening and welcome endpoints.
//!
//! Listing and detail responses reuse the domain projections
//! ([`crate::domain::entities::UrlSummary`],
//! [`crate::domain::entities::UrlDetail`]) directly - they already carry the
//! wire field names because the cache stores them in wire form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlRecord;

/// Body of `POST /url_shortener/`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Full record view returned after a successful create.
#[derive(Debug, Serialize)]
pub struct UrlCreatedResponse {
    pub url: String,
    pub short_url: String,
    pub on_clicks: i64,
    pub created: DateTime<Utc>,
}

impl From<&UrlRecord> for UrlCreatedResponse {
    fn from(record: &UrlRecord) -> Self {
        Self {
            url: record.url.clone(),
            short_url: record.short_code.clone(),
            on_clicks: record.clicks,
            created: record.created_at,
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}
