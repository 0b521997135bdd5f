//! File upload API tests
//!
//! Uploads only touch the temp upload directory, never the database.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{TestApp, TEST_MAX_FILE_SIZE};

fn image_form(name: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes).file_name(name).mime_type("image/png"),
    )
}

#[tokio::test]
async fn upload_stores_file_and_serves_it() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/files/upload")
        .authorization_bearer(app.token())
        .multipart(image_form("Beach.PNG", b"fake-png".to_vec()))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let file_name = body["fileName"].as_str().unwrap().to_string();
    assert!(file_name.ends_with(".png"));
    assert_eq!(body["fileUrl"], format!("/uploads/{}", file_name));
    assert_eq!(body["fileSize"], 8);
    assert_eq!(body["contentType"], "image/png");
    assert!(app.uploads.path().join(&file_name).exists());

    let served = app.server.get(&format!("/uploads/{}", file_name)).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert_eq!(served.as_bytes().as_ref(), b"fake-png");
}

#[tokio::test]
async fn upload_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/files/upload")
        .multipart(image_form("a.png", b"x".to_vec()))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/files/upload")
        .authorization_bearer(app.token())
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "No file uploaded");
}

#[tokio::test]
async fn upload_rejects_disallowed_extension() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/files/upload")
        .authorization_bearer(app.token())
        .multipart(image_form("script.exe", b"MZ".to_vec()))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_rejects_oversized_file() {
    let app = TestApp::new();
    let too_big = vec![0u8; TEST_MAX_FILE_SIZE as usize + 1];

    let response = app
        .server
        .post("/api/files/upload")
        .authorization_bearer(app.token())
        .multipart(image_form("big.png", too_big))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_uploaded_file() {
    let app = TestApp::new();
    let token = app.token();

    let uploaded: Value = app
        .server
        .post("/api/files/upload")
        .authorization_bearer(&token)
        .multipart(image_form("a.jpg", b"jpeg".to_vec()))
        .await
        .json();
    let file_name = uploaded["fileName"].as_str().unwrap().to_string();

    let response = app
        .server
        .delete(&format!("/api/files/delete/{}", file_name))
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(!app.uploads.path().join(&file_name).exists());

    let again = app
        .server
        .delete(&format!("/api/files/delete/{}", file_name))
        .authorization_bearer(&token)
        .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_rejects_traversal_name() {
    let app = TestApp::new();

    let response = app
        .server
        .delete("/api/files/delete/..secret.png")
        .authorization_bearer(app.token())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_rejects_dot_name() {
    let app = TestApp::new();

    let response = app
        .server
        .delete("/api/files/delete/%2E")
        .authorization_bearer(app.token())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.uploads.path().is_dir());
}
