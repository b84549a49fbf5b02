//! Syntactic validation of submitted URLs.

use crate::error::AppError;
use url::Url;

/// Checks that `raw` is a well-formed absolute http(s) URL with a host.
///
/// The URL is stored exactly as submitted; validation never rewrites it.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] if the string does not parse, uses a
/// scheme other than `http`/`https`, or has no host.
pub fn validate_url(raw: &str) -> Result<(), AppError> {
    let parsed = Url::parse(raw).map_err(|_| AppError::InvalidUrl)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::InvalidUrl);
    }

    if parsed.host_str().is_none() {
        return Err(AppError::InvalidUrl);
    }

    Ok(())
}
