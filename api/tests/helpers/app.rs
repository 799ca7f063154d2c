use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use std::sync::Once;
use tower::ServiceExt;
use util::{config::AppConfig, state::AppState};

use api::routes::routes;
use db::test_utils::setup_test_db;

static INIT: Once = Once::new();

fn init_test_env() {
    INIT.call_once(|| {
        AppConfig::set_env("test");
        let upload_root = std::env::temp_dir().join("eduhub-test-uploads");
        AppConfig::set_upload_storage_root(upload_root.to_string_lossy().into_owned());
    });
}

/// Builds an app over a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    init_test_env();

    let db = setup_test_db().await;
    let app_state = AppState::new(db);
    let app = Router::new().nest("/api", routes(app_state.clone()));

    (app, app_state)
}

/// Sends a JSON request and returns the response status and parsed body.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

const BOUNDARY: &str = "X-EDUHUB-TEST-BOUNDARY";

/// Builds a multipart body with one file part plus extra text fields.
pub fn multipart_body(
    file_field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
    fields: &[(&str, &str)],
) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{file_field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Sends a multipart request and returns the response status and parsed body.
pub async fn send_multipart(
    app: &Router,
    method: Method,
    uri: &str,
    token: &str,
    content_type: String,
    body: Vec<u8>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
