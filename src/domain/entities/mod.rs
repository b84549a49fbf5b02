//! Core domain entities.
//!
//! Plain data structures without business logic:
//!
//! - [`UrlRecord`] - The durable shortened-URL record
//! - [`NewUrlRecord`] - Creation input (code + URL)
//! - [`UrlDetail`] / [`UrlSummary`] - Disposable cache/response projections

pub mod url;

pub use url::{NewUrlRecord, UrlDetail, UrlRecord, UrlSummary};
