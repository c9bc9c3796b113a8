//! Integration tests for listing, uploading, and liking images.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_list_starts_empty() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    let response = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_then_list() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    let response = app
        .upload("image", "sunset.jpg", b"fake-jpeg", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.text, "Image uploaded successfully");
    assert_eq!(std::fs::read(app.upload_path("sunset.jpg")).unwrap(), b"fake-jpeg");

    let listed = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(
        listed.body,
        serde_json::json!([{ "id": 1, "filename": "sunset.jpg", "likes": 0 }])
    );
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = helpers::TestApp::new();

    let response = app.upload("image", "a.png", b"x", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(!app.upload_path("a.png").exists());
}

#[tokio::test]
async fn test_upload_wrong_field_is_invalid_file() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    let response = app.upload("photo", "a.png", b"x", Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text, "Invalid file");
}

#[tokio::test]
async fn test_upload_without_multipart_body() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    let response = app
        .request(
            "POST",
            "/api/images",
            Some(serde_json::json!({ "image": "nope" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text, "Invalid file");
}

#[tokio::test]
async fn test_upload_keeps_only_base_name() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    let response = app
        .upload("image", "../../outside.png", b"x", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(app.upload_path("outside.png").is_file());

    let listed = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(listed.body[0]["filename"], "outside.png");
}

#[tokio::test]
async fn test_same_name_upload_overwrites() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    app.upload("image", "dup.png", b"first", Some(&token)).await;
    app.upload("image", "dup.png", b"second", Some(&token)).await;

    assert_eq!(std::fs::read(app.upload_path("dup.png")).unwrap(), b"second");
    let listed = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_like_increments_by_one() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;
    app.upload("image", "cat.gif", b"gif", Some(&token)).await;

    let response = app
        .request("POST", "/api/images/1/like", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "Like toggled successfully");

    let listed = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(listed.body[0]["likes"], 1);

    app.request("POST", "/api/images/1/like", None, Some(&token))
        .await;
    let listed = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(listed.body[0]["likes"], 2);
}

#[tokio::test]
async fn test_like_unknown_or_malformed_id() {
    let app = helpers::TestApp::new();
    let token = app.signed_in().await;

    for path in ["/api/images/42/like", "/api/images/abc/like"] {
        let response = app.request("POST", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.text, "Image not found");
    }
}

#[tokio::test]
async fn test_like_requires_token() {
    let app = helpers::TestApp::new();

    let response = app.request("POST", "/api/images/1/like", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_body_limit_rejects_large_upload() {
    let app = helpers::TestApp::with_config(|config| config.server.max_body_bytes = 1024);
    let token = app.signed_in().await;

    let response = app
        .upload("image", "huge.bin", &vec![0u8; 64 * 1024], Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text, "Invalid file");
    assert!(!app.upload_path("huge.bin").exists());
}

#[tokio::test]
async fn test_upload_storage_failure_is_server_error() {
    // A regular file where the upload directory should be.
    let app = helpers::TestApp::with_config(|config| {
        std::fs::write(&config.storage.upload_dir, b"").unwrap();
    });
    let token = app.signed_in().await;

    let response = app
        .upload("image", "cat.png", b"png", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        response.text.starts_with("Failed to create upload directory"),
        "{}",
        response.text
    );

    let listed = app.request("GET", "/api/images", None, Some(&token)).await;
    assert_eq!(listed.body, serde_json::json!([]));
}
