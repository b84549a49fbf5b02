//! DTO for the health endpoint.

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every probe passed, `"degraded"` otherwise.
    pub status: &'static str,
    pub database: &'static str,
    pub cache: &'static str,
}
