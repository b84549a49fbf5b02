//! Durable storage implementations of the domain repository traits.

mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
