//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod info;
pub mod redirect;
pub mod shorten;
pub mod urls;
pub mod welcome;

pub use health::health_handler;
pub use info::{delete_handler, info_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use urls::list_handler;
pub use welcome::welcome_handler;
