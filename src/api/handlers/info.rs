//! Handlers for the record info endpoint (detail and delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::domain::entities::UrlDetail;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the details of a shortened URL.
///
/// # Endpoint
///
/// `GET /info/{short_url}/` → `200` with `{url, on_clicks, created}` | `404`
pub async fn info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlDetail>, AppError> {
    let detail = state.urls.detail(&code).await?;

    Ok(Json(detail))
}

/// Deletes a shortened URL.
///
/// # Endpoint
///
/// `DELETE /info/{short_url}/` → `204` | `404`
///
/// Removes the cache entry and the durable record; the aggregate listing
/// cache is invalidated on success.
pub async fn delete_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.urls.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
