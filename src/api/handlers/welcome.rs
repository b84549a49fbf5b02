//! Handler for the API welcome endpoint.

use axum::Json;

use crate::api::dto::WelcomeResponse;

/// Greets API consumers.
///
/// # Endpoint
///
/// `GET /` → `200` with `{"message": "Welcome to the URL shortener API"}`
pub async fn welcome_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the URL shortener API".to_string(),
    })
}
