//! Infrastructure layer: cache backends and durable storage.

pub mod cache;
pub mod persistence;
