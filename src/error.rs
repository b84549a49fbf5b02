//! Application error taxonomy and HTTP mapping.
//!
//! Every user-visible failure is one of the variants below; handlers return
//! `Result<_, AppError>` and the [`IntoResponse`] impl renders the JSON body.
//! Database errors are translated once, in [`From<sqlx::Error>`], so the
//! services never inspect driver errors themselves.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the URL shortening core.
#[derive(Debug, Error)]
pub enum AppError {
    /// The submitted URL is not a valid absolute http(s) URL.
    #[error("Invalid URL")]
    InvalidUrl,

    /// The submitted URL already has a short code.
    #[error("URL already shortened")]
    DuplicateUrl,

    /// No record exists for the requested short code.
    #[error("URL not found")]
    NotFound,

    /// The generator has consumed the entire alphabet^length code space.
    #[error("Short code space exhausted")]
    GenerationExhausted,

    /// Durable store failure. The original error is logged, not exposed.
    #[error("Database error")]
    Database(#[source] sqlx::Error),

    /// Anything else that should never reach a client verbatim.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// JSON error body, e.g. `{"error": "Invalid URL"}`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidUrl | AppError::DuplicateUrl => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::GenerationExhausted | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match &self {
            AppError::Database(e) => tracing::error!(error = %e, "database error"),
            AppError::Internal(e) => tracing::error!(error = %e, "internal error"),
            AppError::GenerationExhausted => tracing::error!("short code space exhausted"),
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    /// Maps store errors to the user-visible taxonomy.
    ///
    /// A unique violation on the `url` column means a concurrent create won
    /// the duplicate-check-then-insert race; the loser observes it here as
    /// [`AppError::DuplicateUrl`]. Any other unique violation (notably on
    /// `short_code`, which the generator is supposed to make impossible) is
    /// a genuine internal fault.
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() && db.constraint() == Some("urls_url_key") {
                return AppError::DuplicateUrl;
            }
        }

        AppError::Database(e)
    }
}
