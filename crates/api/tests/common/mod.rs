#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use yakbot_api::auth::token::{issue_shared_secret_token, ExpectedClaims, SharedSecretVerifier};
use yakbot_api::config::{IdentityConfig, ServerConfig, DEFAULT_RECOGNIZE_MAX_UPLOAD_BYTES};
use yakbot_api::router::build_app_router;
use yakbot_api::state::AppState;
use yakbot_db::models::drug::{Drug, UpsertDrug};
use yakbot_db::repositories::DrugRepo;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PROJECT: &str = "yakbot-test";

/// Build a test `ServerConfig` that verifies HS256 tokens signed with
/// [`TEST_SECRET`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        recognize_max_upload_bytes: DEFAULT_RECOGNIZE_MAX_UPLOAD_BYTES,
        identity: IdentityConfig {
            project_id: TEST_PROJECT.to_string(),
            jwks_url: "http://127.0.0.1:9/unused".to_string(),
            jwks_cache_ttl_secs: 3600,
            shared_secret: Some(TEST_SECRET.to_string()),
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, &test_config())
}

/// Like [`build_test_app`], with a caller-adjusted configuration.
pub fn build_test_app_with(pool: PgPool, config: &ServerConfig) -> Router {
    let verifier = Arc::new(SharedSecretVerifier::new(
        TEST_SECRET,
        ExpectedClaims::for_project(TEST_PROJECT),
    ));

    let state = AppState { pool, verifier };
    build_app_router(state, config)
}

/// A valid bearer token for `subject`.
pub fn token_for(subject: &str) -> String {
    issue_shared_secret_token(
        subject,
        chrono::Duration::hours(1),
        TEST_SECRET,
        &ExpectedClaims::for_project(TEST_PROJECT),
    )
    .expect("token encoding should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an arbitrary body, optionally with a `Content-Type`.
pub async fn post_raw_auth(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
    token: &str,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"));
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a hand-built `multipart/form-data` body. Each part is
/// `(name, filename, content)`; parts without a filename are text fields.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[(&str, Option<&str>, &[u8])],
    token: &str,
) -> Response {
    const BOUNDARY: &str = "yakbot-test-boundary";
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `subject` with `nickname` through the API and return the token.
pub async fn register(pool: &PgPool, subject: &str, nickname: &str) -> String {
    let token = token_for(subject);
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/users/",
        serde_json::json!({ "nickname": nickname }),
        &token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    token
}

/// Insert a drug directly into the cache.
pub async fn seed_drug(pool: &PgPool, id: &str, name: &str) -> Drug {
    DrugRepo::upsert(
        pool,
        &UpsertDrug {
            id: id.to_string(),
            name: name.to_string(),
            company: Some("테스트제약".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("drug upsert should succeed")
}
