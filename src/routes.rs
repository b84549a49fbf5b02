//! Router configuration.
//!
//! # Route structure
//!
//! - `GET    /`                    - Welcome message
//! - `POST   /url_shortener/`      - Shorten a URL
//! - `GET    /urls/`               - Ordered listing of all records
//! - `GET    /info/{short_url}/`   - Record details
//! - `DELETE /info/{short_url}/`   - Delete a record
//! - `GET    /url/{short_url}/`    - Redirect with click counting
//! - `GET    /health`              - Store and cache health probes
//!
//! Routes are registered without trailing slashes; the server wraps the
//! router in `NormalizePathLayer::trim_trailing_slash`, so both forms hit
//! the same handler.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    delete_handler, health_handler, info_handler, list_handler, redirect_handler, shorten_handler,
    welcome_handler,
};
use crate::state::AppState;

/// Constructs the application router with all routes and request tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/url_shortener", post(shorten_handler))
        .route("/urls", get(list_handler))
        .route("/info/{code}", get(info_handler).delete(delete_handler))
        .route("/url/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
