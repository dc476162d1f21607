//! Security module providing API key authentication.
//!
//! # Module Structure
//!
//! - `config` - Host boundary traits (Strategy, ActionSink)
//! - `action` - Terminal actions, per-call options, authentication errors
//! - `request` - Read-only request view (body, query, headers)
//! - `api_key` - API key / secret strategy, verifier contract, field lookup
//! - `extractor` - Actix Web extractors (Authenticated, OptionalAuthenticated, AuthenticationInfo)
//! - `middleware` - Security middleware (ApiKeyTransform)

// Re-exports for convenience
pub use action::{
    AuthAction, AuthenticateOptions, AuthenticationError, BoxError, Failure, FailureInfo,
};
pub use api_key::{
    verify_callback, verify_fn, verify_with_request_fn, ApiKeyStrategy, ApiKeyStrategyConfig,
    ApiKeyVerifier, Completion, ConfigError, Credentials, RequestVerifier, VerifyOutcome,
};
pub use config::{ActionSink, Strategy};
pub use extractor::{Authenticated, AuthenticationInfo, OptionalAuthenticated, PrincipalExt};
pub use middleware::ApiKeyTransform;
pub use request::RequestView;

// Internal modules (private implementation details)
mod config;
mod extractor;

// Public modules
pub mod action;
pub mod api_key;
pub mod middleware;
pub mod request;
