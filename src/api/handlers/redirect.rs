//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL, counting the visit.
///
/// # Endpoint
///
/// `GET /url/{short_url}/` → `302 Found` with `Location` | `404`
///
/// # Request flow
///
/// 1. Cache hit: bump the cached click count, write it back, queue the
///    durable increment for the background worker, redirect.
/// 2. Cache miss: read the record, persist the increment synchronously,
///    repopulate the cache, redirect.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.redirects.resolve_and_count(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
