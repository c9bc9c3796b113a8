//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use picshare_core::config::{AppConfig, DatabaseProvider};
use picshare_database::Repositories;
use picshare_storage::LocalBlobStore;

/// Multipart boundary used by [`TestApp::upload`].
const BOUNDARY: &str = "----picshare-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Holds the upload directory for the lifetime of the test
    pub dir: TempDir,
}

impl TestApp {
    /// Create a new test application backed by in-memory tables and a temp dir
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the default config
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        Self::build(adjust, Repositories::in_memory())
    }

    /// Create a test application over the given repositories
    pub fn with_repositories(repositories: Repositories) -> Self {
        Self::build(|_| {}, repositories)
    }

    fn build(adjust: impl FnOnce(&mut AppConfig), repositories: Repositories) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.upload_dir = dir.path().join("uploads").display().to_string();
        adjust(&mut config);

        let blobs = Arc::new(LocalBlobStore::new(&config.storage.upload_dir));
        let app_state = picshare_api::AppState::new(config.clone(), &repositories, blobs);
        let router = picshare_api::build_router(app_state);

        Self {
            router,
            config,
            dir,
        }
    }

    /// Path of a stored upload
    pub fn upload_path(&self, filename: &str) -> std::path::PathBuf {
        std::path::Path::new(&self.config.storage.upload_dir).join(filename)
    }

    /// Register an account and assert it succeeded
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .request(
                "POST",
                "/api/register",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {}",
            response.text
        );
    }

    /// Login and return the token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {}",
            response.text
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Register a fresh account and return its token
    pub async fn signed_in(&self) -> String {
        self.register("tester", "secret").await;
        self.login("tester", "secret").await
    }

    /// Make a JSON request; the token is sent as the raw Authorization value
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, token);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `data` as a multipart file field
    pub async fn upload(
        &self,
        field: &str,
        filename: &str,
        data: &[u8],
        token: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri("/api/images")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, token);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        self.send(req).await
    }

    /// Send a prepared request through the router
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        let text = String::from_utf8_lossy(&bytes).into_owned();

        TestResponse {
            status,
            headers,
            bytes,
            text,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Body as (lossy) UTF-8
    pub text: String,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
}
