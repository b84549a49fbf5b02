//! Business logic services orchestrating cache and durable store.
//!
//! - [`UrlService`] - record lifecycle (create, list, detail, delete)
//! - [`RedirectService`] - redirect resolution with click counting

pub mod redirect_service;
pub mod url_service;

pub use redirect_service::RedirectService;
pub use url_service::{LISTING_CACHE_KEY, UrlService};
