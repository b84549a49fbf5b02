//! Utility functions shared across the application.
//!
//! - [`code_generator`] - Deterministic short-code generation
//! - [`url_validator`] - Syntactic validation of submitted URLs

pub mod code_generator;
pub mod url_validator;
