//! Handler for the URL listing endpoint.

use axum::{Json, extract::State};

use crate::domain::entities::UrlSummary;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every shortened URL, ordered by ascending click count.
///
/// # Endpoint
///
/// `GET /urls/` → `200` with `[{url, short_url, created}]`
///
/// Served from the aggregate cache entry when one is present.
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlSummary>>, AppError> {
    let listing = state.urls.list().await?;

    Ok(Json(listing))
}
