//! Actix API Key Demo Application
//!
//! Demonstrates API key / secret authentication with the strategy middleware.


use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use actix_apikey::http::security::{
    ApiKeyStrategy, ApiKeyStrategyConfig, ApiKeyTransform, AuthenticateOptions,
};

use clients::{Client, ClientStore};

/// Creates the client registry with demo clients.
fn client_store() -> ClientStore {
    ClientStore::new()
        .with_client(
            "ak_live_reports",
            Client::new(1, "reporting", "s3cret").scopes(&["reports:read", "reports:write"]),
        )
        .with_client(
            "ak_live_readonly",
            Client::new(2, "dashboard", "r3ad").scopes(&["reports:read"]),
        )
        .with_client(
            "ak_disabled",
            Client::new(3, "retired", "gone").enabled(false),
        )
}

fn print_startup_info() {
    println!("=== Actix API Key Demo ===");
    println!();
    println!("Server: http://127.0.0.1:8080");
    println!();
    println!("Clients:");
    println!("  ak_live_reports  / s3cret - Scopes: [reports:read, reports:write]");
    println!("  ak_live_readonly / r3ad   - Scopes: [reports:read]");
    println!("  ak_disabled      / gone   - disabled");
    println!();
    println!("Routes:");
    println!("  GET  /            - Public");
    println!("  GET  /api/me      - API key required");
    println!("  POST /api/reports - API key required");
    println!();
    println!("Examples:");
    println!("  curl -H 'X-Api-Key: ak_live_reports' -H 'X-Api-Secret: s3cret' http://127.0.0.1:8080/api/me");
    println!("  curl 'http://127.0.0.1:8080/api/me?client[key]=ak_live_reports&client[secret]=s3cret'");
    println!("  curl -X POST -H 'content-type: application/json' \\");
    println!("       -d '{{\"client\":{{\"key\":\"ak_live_reports\",\"secret\":\"s3cret\"}},\"period\":\"2024-Q1\"}}' \\");
    println!("       http://127.0.0.1:8080/api/reports");
    println!();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    print_startup_info();
    tracing::info!("starting demo server");

    let store = Arc::new(client_store());
    let strategy = ApiKeyStrategy::builder()
        .config(
            ApiKeyStrategyConfig::new()
                .api_key_field("client[key]")
                .api_secret_field("client[secret]")
                .api_key_header("X-Api-Key")
                .api_secret_header("X-Api-Secret")
                .verify_timeout(Duration::from_secs(5)),
        )
        .verifier(clients::verifier(store))
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let strategy = Arc::new(strategy);

    HttpServer::new(move || {
        App::new()
            .service(handlers::home::index)
            .service(
                web::scope("/api")
                    .wrap(
                        ApiKeyTransform::with_shared_strategy(Arc::clone(&strategy))
                            .realm("Demo API")
                            .options(
                                AuthenticateOptions::new()
                                    .bad_request_message("API key and secret required"),
                            ),
                    )
                    .service(handlers::api::me)
                    .service(handlers::api::create_report),
            )
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
