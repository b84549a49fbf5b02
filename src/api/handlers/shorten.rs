//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::{ShortenRequest, UrlCreatedResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a long URL.
///
/// # Endpoint
///
/// `POST /url_shortener/` with body `{"url": "https://..."}`
///
/// # Responses
///
/// - `201` - full record `{url, short_url, on_clicks, created}`
/// - `400` - `{"error": "Invalid URL"}` or `{"error": "URL already shortened"}`
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<UrlCreatedResponse>), AppError> {
    let record = state.urls.create(&payload.url).await?;

    Ok((StatusCode::CREATED, Json(UrlCreatedResponse::from(&record))))
}
