//! Data Transfer Objects for API requests and responses.

pub mod health;
pub mod url;

pub use health::HealthResponse;
pub use url::{ShortenRequest, UrlCreatedResponse, WelcomeResponse};
