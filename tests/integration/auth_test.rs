//! Integration tests for registration, login, and token enforcement.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};

use picshare_auth::jwt::{Claims, JwtDecoder, JwtEncoder};
use picshare_core::config::AuthConfig;
use picshare_core::error::{AppError, ErrorKind};
use picshare_core::result::AppResult;
use picshare_database::{AccountRepository, Repositories};
use picshare_entity::account::{Account, CreateAccount};

/// Account store whose every call fails.
#[derive(Debug)]
struct BrokenAccounts;

#[async_trait]
impl AccountRepository for BrokenAccounts {
    async fn create(&self, _data: &CreateAccount) -> AppResult<Account> {
        Err(AppError::new(ErrorKind::Database, "connection refused"))
    }

    async fn find_by_username(&self, _username: &str) -> AppResult<Option<Account>> {
        Err(AppError::new(ErrorKind::Database, "connection refused"))
    }
}

fn broken_account_app() -> helpers::TestApp {
    let mut repositories = Repositories::in_memory();
    repositories.accounts = Arc::new(BrokenAccounts);
    helpers::TestApp::with_repositories(repositories)
}

#[tokio::test]
async fn test_register_returns_created() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({ "username": "alice", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.text, "User registered successfully");
}

#[tokio::test]
async fn test_register_store_failure_is_server_error() {
    let app = broken_account_app();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({ "username": "alice", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text, "Failed to register user");
}

#[tokio::test]
async fn test_login_lookup_failure_is_credential_error() {
    let app = broken_account_app();

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "alice", "password": "pw" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text, "Invalid username or password");
}

#[tokio::test]
async fn test_multipart_credentials() {
    let app = helpers::TestApp::new();
    let body = "--XYZ\r\n\
        Content-Disposition: form-data; name=\"username\"\r\n\r\n\
        frank\r\n\
        --XYZ\r\n\
        Content-Disposition: form-data; name=\"password\"\r\n\r\n\
        pw\r\n\
        --XYZ--\r\n";

    let req = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(Body::from(body))
        .unwrap();
    assert_eq!(app.send(req).await.status, StatusCode::CREATED);

    let token = app.login("frank", "pw").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_token_carries_account_id() {
    let app = helpers::TestApp::new();
    app.register("first", "pw").await;
    app.register("second", "pw").await;

    let token = app.login("second", "pw").await;
    let decoder = JwtDecoder::new(&app.config.auth);
    assert_eq!(decoder.validate(&token).unwrap(), 2);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user() {
    let app = helpers::TestApp::new();
    app.register("bob", "right").await;

    let wrong = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "bob", "password": "wrong" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "username": "nobody", "password": "right" })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.text, "Invalid username or password");
    assert_eq!(wrong.text, unknown.text);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() {
    let app = helpers::TestApp::new();

    for path in ["/api/register", "/api/login"] {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"username\":"))
            .unwrap();
        let response = app.send(req).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(response.text, "Invalid input");
    }
}

#[tokio::test]
async fn test_form_encoded_credentials() {
    let app = helpers::TestApp::new();

    let req = Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=dora&password=explorer"))
        .unwrap();
    assert_eq!(app.send(req).await.status, StatusCode::CREATED);

    let token = app.login("dora", "explorer").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/images", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Unauthorized");

    let response = app.request("GET", "/api/images", None, Some("")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Unauthorized");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/images", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Invalid token");
}

#[tokio::test]
async fn test_raw_and_bearer_tokens_accepted() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    let raw = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(raw.status, StatusCode::OK);

    let bearer = format!("Bearer {token}");
    let prefixed = app.request("GET", "/api/images", None, Some(&bearer)).await;
    assert_eq!(prefixed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = helpers::TestApp::new();
    let encoder = JwtEncoder::new(&app.config.auth);
    let token = encoder
        .encode_claims(&Claims {
            sub: 1,
            exp: Some((Utc::now() - Duration::minutes(1)).timestamp()),
        })
        .unwrap();

    let response = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Invalid token");
}

#[tokio::test]
async fn test_token_without_exp_accepted() {
    let app = helpers::TestApp::new();
    let encoder = JwtEncoder::new(&app.config.auth);
    let token = encoder.encode_claims(&Claims { sub: 1, exp: None }).unwrap();

    let response = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let app = helpers::TestApp::new();
    let other = AuthConfig {
        jwt_secret: "someone-else".to_string(),
        token_ttl_hours: 24,
    };
    let token = JwtEncoder::new(&other).issue(1).unwrap();

    let response = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
    assert_eq!(response.body["database"], "memory");
    assert_eq!(response.body["storage"], "local");
}
