//! API key middleware tests.
//!
//! Full request / response cycle through `ApiKeyTransform`.

mod common;

use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use actix_apikey::http::security::{ApiKeyTransform, AuthenticateOptions};

use common::{api_key_headers, create_test_app, create_test_app_with, test_strategy};

async fn json_body(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("json body")
}

#[actix_web::test]
async fn test_header_credentials_success() {
    let app = create_test_app().await;

    let [key, secret] = api_key_headers("key-1", "secret-1");
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(key)
        .insert_header(secret)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Welcome, reporting!");
}

#[actix_web::test]
async fn test_nested_query_credentials() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/?client[key]=key-2&client[secret]=secret-2")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "Welcome, dashboard!");
}

#[actix_web::test]
async fn test_json_body_still_readable_by_handler() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/reports")
        .set_json(serde_json::json!({
            "client": { "key": "key-1", "secret": "secret-1" },
            "period": "2024-Q1"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "2024-Q1 for reporting");
}

#[actix_web::test]
async fn test_form_body_credentials() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/echo")
        .insert_header(ContentType::form_url_encoded())
        .set_payload("client%5Bkey%5D=key-2&client%5Bsecret%5D=secret-2&note=hi")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8_lossy(&body),
        "dashboard: client%5Bkey%5D=key-2&client%5Bsecret%5D=secret-2&note=hi"
    );
}

#[actix_web::test]
async fn test_missing_credentials_returns_400() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Missing API Key");
}

#[actix_web::test]
async fn test_missing_secret_returns_400() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("X-Api-Key", "key-1"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "Missing API Secret");
}

#[actix_web::test]
async fn test_bad_request_message_override() {
    let transform = ApiKeyTransform::new(test_strategy())
        .options(AuthenticateOptions::new().bad_request_message("send your API key"));
    let app = create_test_app_with(transform).await;

    let req = test::TestRequest::get().uri("/").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert_eq!(body["message"], "send your API key");
}

#[actix_web::test]
async fn test_wrong_secret_returns_401() {
    let app = create_test_app().await;

    let [key, secret] = api_key_headers("key-1", "wrong");
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(key)
        .insert_header(secret)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "ApiKey realm=\"API\""
    );

    let body = json_body(resp).await;
    assert_eq!(body["message"], "bad creds");
}

#[actix_web::test]
async fn test_custom_realm() {
    let app = create_test_app_with(ApiKeyTransform::new(test_strategy()).realm("Partner API")).await;

    let req = test::TestRequest::get()
        .uri("/?client[key]=nobody&client[secret]=x")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "ApiKey realm=\"Partner API\""
    );
}

#[actix_web::test]
async fn test_verifier_error_returns_500() {
    let app = create_test_app().await;

    let [key, secret] = api_key_headers("broken", "x");
    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(key)
        .insert_header(secret)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The verifier's error stays server side.
    let body = test::read_body(resp).await;
    assert!(!String::from_utf8_lossy(&body).contains("db down"));
}

#[actix_web::test]
async fn test_optional_principal_is_set() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("X-Api-Key", "key-1"))
        .insert_header(("X-Api-Secret", "secret-1"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "reporting");
}

#[actix_web::test]
async fn test_large_unparsed_body_is_not_buffered() {
    let app = create_test_app().await;

    let payload = "x".repeat(300 * 1024);
    let [key, secret] = api_key_headers("key-1", "secret-1");
    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header(ContentType::plaintext())
        .insert_header(key)
        .insert_header(secret)
        .set_payload(payload)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "reporting uploaded 307200 bytes");
}

#[actix_web::test]
async fn test_json_content_type_is_case_insensitive() {
    let app = create_test_app().await;

    let req = test::TestRequest::post()
        .uri("/echo")
        .insert_header((header::CONTENT_TYPE, "Application/JSON"))
        .set_payload(r#"{"client":{"key":"key-2","secret":"secret-2"}}"#)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert_eq!(
        String::from_utf8_lossy(&body),
        r#"dashboard: {"client":{"key":"key-2","secret":"secret-2"}}"#
    );
}

#[actix_web::test]
async fn test_success_info_reaches_handler() {
    let app = create_test_app().await;

    let [key, secret] = api_key_headers("key-2", "secret-2");
    let req = test::TestRequest::get()
        .uri("/plan")
        .insert_header(key)
        .insert_header(secret)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, serde_json::json!({ "plan": "trial" }));

    let [key, secret] = api_key_headers("key-1", "secret-1");
    let req = test::TestRequest::get()
        .uri("/plan")
        .insert_header(key)
        .insert_header(secret)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(json_body(resp).await, Value::Null);
}
