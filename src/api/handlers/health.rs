//! Handler for the health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::HealthResponse;
use crate::state::AppState;

/// Reports cache and durable store health.
///
/// # Endpoint
///
/// `GET /health` → `200` with `{status, database, cache}`
///
/// The cache probe is the backend's own health check; the store probe is a
/// cheap aggregate query. A failing probe degrades the status but still
/// answers 200 - load balancers read the body.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_ok = state.cache.health_check().await;
    let database_ok = state.repository.next_id_hint().await.is_ok();

    Json(HealthResponse {
        status: if cache_ok && database_ok {
            "ok"
        } else {
            "degraded"
        },
        database: if database_ok { "up" } else { "down" },
        cache: if cache_ok { "up" } else { "down" },
    })
}
