//! URL record entity and its cached projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL as stored durably.
///
/// `url` and `short_code` are both unique across all records; `short_code`
/// is generated once at creation and never changes. `clicks` only grows, and
/// only redirect resolution grows it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new record. Clicks start at zero and the
/// creation timestamp is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub url: String,
    pub short_code: String,
}

/// Per-code projection: the cache value keyed by short code and the body of
/// the info endpoint.
///
/// Field names match the wire format (`on_clicks`, `created`), so the same
/// struct round-trips through the cache and serializes into responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlDetail {
    pub url: String,
    pub on_clicks: i64,
    pub created: DateTime<Utc>,
}

impl From<&UrlRecord> for UrlDetail {
    fn from(record: &UrlRecord) -> Self {
        Self {
            url: record.url.clone(),
            on_clicks: record.clicks,
            created: record.created_at,
        }
    }
}

/// Listing projection: one element of the aggregate "all records" cache
/// entry and of the listing endpoint body. `short_url` carries the bare code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlSummary {
    pub url: String,
    pub short_url: String,
    pub created: DateTime<Utc>,
}

impl From<&UrlRecord> for UrlSummary {
    fn from(record: &UrlRecord) -> Self {
        Self {
            url: record.url.clone(),
            short_url: record.short_code.clone(),
            created: record.created_at,
        }
    }
}
