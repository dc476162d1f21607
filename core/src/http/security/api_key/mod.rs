//! API key / secret authentication strategy.
//!
//! # Overview
//!
//! Clients send a key and a secret. The strategy looks for each of them in:
//! 1. the request body (`{"apiKey": "...", "apiSecret": "..."}` or form fields),
//! 2. the query string (`?apiKey=...&apiSecret=...`),
//! 3. the headers (`apiKey: ...`, `apiSecret: ...`).
//!
//! Body and query names may be nested with brackets, e.g. `client[key]`.
//! Header names are configured separately.
//!
//! When either value is missing the attempt fails as a bad request. Otherwise
//! the application's verifier decides, and its answer becomes one of three
//! terminal actions: success, failure or error.
//!
//! # Usage
//!
//! ```ignore
//! use actix_apikey::http::security::api_key::{
//!     verify_fn, ApiKeyStrategy, ApiKeyStrategyConfig, VerifyOutcome,
//! };
//!
//! let strategy = ApiKeyStrategy::builder()
//!     .config(
//!         ApiKeyStrategyConfig::new()
//!             .api_key_field("client[key]")
//!             .api_key_header("X-Api-Key")
//!             .api_secret_header("X-Api-Secret"),
//!     )
//!     .verifier(verify_fn(|credentials| async move {
//!         match lookup(credentials.get_key(), credentials.get_secret()).await {
//!             Ok(Some(client)) => VerifyOutcome::success(client),
//!             Ok(None) => VerifyOutcome::rejected_with(json!({ "message": "bad creds" })),
//!             Err(e) => VerifyOutcome::error(e),
//!         }
//!     }))
//!     .build()?;
//! ```
//!
//! ## Verifier that needs the request
//!
//! ```ignore
//! let strategy = ApiKeyStrategy::builder()
//!     .config(ApiKeyStrategyConfig::new().pass_req_to_callback(true))
//!     .request_verifier(verify_with_request_fn(|req, credentials| {
//!         let path = req.get_path().to_string();
//!         async move { check_scope(&path, credentials).await }
//!     }))
//!     .build()?;
//! ```
//!
//! ## Callback style verifier
//!
//! ```ignore
//! let strategy = ApiKeyStrategy::new(verify_callback(|credentials, done| {
//!     legacy_lookup(credentials, move |err, client, info| done.done(err, client, info));
//! }));
//! ```
//!
//! # Security Considerations
//!
//! 1. **Use HTTPS** - the secret travels in plaintext
//! 2. **Prefer headers or bodies** - query strings end up in access logs
//! 3. **Set a verify timeout** - a verifier that never answers otherwise holds
//!    the request forever

mod completion;
mod config;
mod credentials;
mod error;
mod field;
mod strategy;
mod verifier;

pub use completion::{verify_callback, CallbackVerifier, Completion};
pub use config::ApiKeyStrategyConfig;
pub use credentials::Credentials;
pub use error::{CompletionDropped, ConfigError};
pub use field::{extract_field, locate, locate_header, FieldPath, Lookup};
pub use strategy::{ApiKeyStrategy, ApiKeyStrategyBuilder};
pub use verifier::{
    verify_fn, verify_with_request_fn, ApiKeyVerifier, FnRequestVerifier, FnVerifier,
    RequestVerifier, VerifyOutcome,
};
