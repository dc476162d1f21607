//! HTTP facing parts of the crate.
//!
//! - [`security`] - Strategy, request view, middleware and extractors
//! - [`error`] - HTTP error responses

pub mod error;
pub mod security;
