//! # Actix API Key Core
//!
//! API key / secret authentication strategy for Actix Web.
//!
//! The strategy pulls an API key and secret out of the request body, the query
//! string or the headers (in that order), hands them to an application supplied
//! verifier and turns the verifier's answer into one of three terminal actions:
//! success, failure or error.
//!
//! See [`http::security`] for the strategy and its Actix Web middleware.

pub mod http;
