//! # Actix API Key
//!
//! API key / secret authentication for Actix Web.
//!
//! This crate re-exports `actix-apikey-core`: the strategy, its verifier
//! contract, the middleware and the extractors.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! actix-web = "4"
//! actix-apikey = "0.1"
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use actix_web::{get, App, HttpServer, HttpResponse, Responder};
//! use actix_apikey::prelude::*;
//!
//! #[derive(Clone)]
//! struct Client { name: String }
//!
//! #[get("/reports")]
//! async fn reports(client: Authenticated<Client>) -> impl Responder {
//!     HttpResponse::Ok().body(format!("Reports for {}", client.name))
//! }
//!
//! let strategy = ApiKeyStrategy::new(verify_fn(|credentials| async move {
//!     match find_client(credentials.get_key(), credentials.get_secret()).await {
//!         Some(client) => VerifyOutcome::<_, ()>::success(client),
//!         None => VerifyOutcome::rejected(),
//!     }
//! }));
//!
//! App::new()
//!     .wrap(ApiKeyTransform::new(strategy))
//!     .service(reports)
//! ```
//!
//! ## Where credentials are read from
//!
//! | Source | Default key | Default secret |
//! |--------|-------------|----------------|
//! | JSON / form body | `apiKey` | `apiSecret` |
//! | Query string | `apiKey` | `apiSecret` |
//! | Headers | `apiKey` | `apiSecret` |
//!
//! The first source holding a value wins, in the order above.

// Re-export everything from actix-apikey-core
pub use actix_apikey_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use actix_apikey_core::http::security::{
        verify_callback, verify_fn, verify_with_request_fn, ApiKeyStrategy,
        ApiKeyStrategyConfig, ApiKeyTransform, ApiKeyVerifier, AuthAction, AuthenticateOptions,
        Authenticated, AuthenticationInfo, Completion, Credentials, OptionalAuthenticated, RequestVerifier,
        RequestView, Strategy, VerifyOutcome,
    };
}
