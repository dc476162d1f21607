//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - Test clients and their verifier
//! - Test app builder
//! - Helper functions

#![allow(dead_code)]

use actix_web::{get, post, test, web, App, HttpResponse, Responder};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use actix_apikey::http::security::{
    verify_fn, ApiKeyStrategy, ApiKeyStrategyConfig, ApiKeyTransform, ApiKeyVerifier,
    Authenticated, AuthenticationInfo, Credentials, OptionalAuthenticated, VerifyOutcome,
};

// =============================================================================
// Test Configuration
// =============================================================================

/// Principal produced by the test verifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub id: u32,
    pub name: String,
}

impl Client {
    pub fn new(id: u32, name: &str) -> Self {
        Client {
            id,
            name: name.to_string(),
        }
    }
}

/// Creates the test verifier.
///
/// Credentials:
/// - key-1/secret-1: client 1 "reporting"
/// - key-2/secret-2: client 2 "dashboard", info `{"plan": "trial"}`
/// - broken/anything: verification error "db down"
/// - anything else: rejected with `{"message": "bad creds"}`
pub fn test_verifier() -> impl ApiKeyVerifier<Principal = Client, Info = Value> {
    verify_fn(|credentials: Credentials| async move { check(&credentials) })
}

/// Decision table shared by the credential and request verifiers.
pub fn check(credentials: &Credentials) -> VerifyOutcome<Client, Value> {
    match (credentials.get_key(), credentials.get_secret()) {
        ("key-1", "secret-1") => VerifyOutcome::success(Client::new(1, "reporting")),
        ("key-2", "secret-2") => {
            VerifyOutcome::success_with_info(Client::new(2, "dashboard"), json!({ "plan": "trial" }))
        }
        ("broken", _) => VerifyOutcome::error("db down"),
        _ => VerifyOutcome::rejected_with(json!({ "message": "bad creds" })),
    }
}

/// Creates the test strategy.
///
/// Body / query fields: `client[key]`, `client[secret]`
/// Headers: `X-Api-Key`, `X-Api-Secret`
pub fn test_strategy() -> ApiKeyStrategy<Client, Value> {
    ApiKeyStrategy::builder()
        .config(
            ApiKeyStrategyConfig::new()
                .api_key_field("client[key]")
                .api_secret_field("client[secret]")
                .api_key_header("X-Api-Key")
                .api_secret_header("X-Api-Secret"),
        )
        .verifier(test_verifier())
        .build()
        .expect("valid test strategy")
}

/// Helper returning the credential headers for `key` / `secret`.
pub fn api_key_headers(key: &str, secret: &str) -> [(&'static str, String); 2] {
    [
        ("X-Api-Key", key.to_string()),
        ("X-Api-Secret", secret.to_string()),
    ]
}

// =============================================================================
// Test Handlers
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub period: String,
}

#[get("/")]
pub async fn index(client: Authenticated<Client>) -> impl Responder {
    HttpResponse::Ok().body(format!("Welcome, {}!", client.name))
}

#[get("/whoami")]
pub async fn whoami(client: OptionalAuthenticated<Client>) -> impl Responder {
    match client.into_inner() {
        Some(c) => HttpResponse::Ok().json(c),
        None => HttpResponse::Ok().json(Value::Null),
    }
}

#[get("/plan")]
pub async fn plan(_client: Authenticated<Client>, info: AuthenticationInfo<Value>) -> impl Responder {
    HttpResponse::Ok().json(info.into_inner())
}

#[post("/reports")]
pub async fn create_report(
    client: Authenticated<Client>,
    body: web::Json<ReportRequest>,
) -> impl Responder {
    HttpResponse::Created().body(format!("{} for {}", body.period, client.name))
}

#[post("/echo")]
pub async fn echo(client: Authenticated<Client>, body: String) -> impl Responder {
    HttpResponse::Ok().body(format!("{}: {}", client.name, body))
}

/// Streams the payload without a size limit.
#[post("/upload")]
pub async fn upload(
    client: Authenticated<Client>,
    mut payload: web::Payload,
) -> Result<HttpResponse, actix_web::Error> {
    let mut size = 0;
    while let Some(chunk) = payload.next().await {
        size += chunk?.len();
    }
    Ok(HttpResponse::Ok().body(format!("{} uploaded {} bytes", client.name, size)))
}

// =============================================================================
// Test App
// =============================================================================

/// Creates a test app with every route behind the API key middleware.
pub async fn create_test_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    create_test_app_with(ApiKeyTransform::new(test_strategy())).await
}

/// Creates a test app with the given middleware in front of every route.
pub async fn create_test_app_with(
    transform: ApiKeyTransform<ApiKeyStrategy<Client, Value>>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new().service(
            web::scope("")
                .wrap(transform)
                .service(index)
                .service(whoami)
                .service(plan)
                .service(create_report)
                .service(echo)
                .service(upload),
        ),
    )
    .await
}
