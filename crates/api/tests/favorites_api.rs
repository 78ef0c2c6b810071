//! HTTP-level tests for favorites.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, post_raw_auth, seed_drug};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn add_favorite_embeds_drug(pool: PgPool) {
    seed_drug(&pool, "198804008", "타이레놀정500밀리그램").await;
    let token = common::register(&pool, "uid-fav-1", "fav1").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/drugs/favorites",
        json!({ "drug_id": "198804008" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["user_id"], "uid-fav-1");
    assert_eq!(json["drug_id"], "198804008");
    assert!(json["created_at"].is_string());
    assert_eq!(json["drug"]["name"], "타이레놀정500밀리그램");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_favorite_is_conflict(pool: PgPool) {
    seed_drug(&pool, "100", "aspirin").await;
    let token = common::register(&pool, "uid-fav-2", "fav2").await;

    let first = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/drugs/favorites",
        json!({ "drug_id": "100" }),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/drugs/favorites",
        json!({ "drug_id": "100" }),
        &token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn favorite_of_unknown_drug_is_bad_request(pool: PgPool) {
    let token = common::register(&pool, "uid-fav-3", "fav3").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/drugs/favorites",
        json!({ "drug_id": "does-not-exist" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn favorite_without_drug_id_is_bad_request_json(pool: PgPool) {
    let token = common::register(&pool, "uid-fav-5", "fav5").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/drugs/favorites", json!({}), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("drug_id"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn favorite_with_malformed_body_is_bad_request(pool: PgPool) {
    let token = common::register(&pool, "uid-fav-6", "fav6").await;

    let app = common::build_test_app(pool);
    let response = post_raw_auth(
        app,
        "/api/v1/drugs/favorites",
        Some("application/json"),
        r#"{"drug_id": "#,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_favorites_oldest_first_and_per_user(pool: PgPool) {
    seed_drug(&pool, "100", "aspirin").await;
    seed_drug(&pool, "200", "ibuprofen").await;
    let alice = common::register(&pool, "uid-alice", "alice").await;
    let bob = common::register(&pool, "uid-bob", "bob").await;

    for (token, drug_id) in [(&alice, "200"), (&alice, "100"), (&bob, "100")] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/drugs/favorites",
            json!({ "drug_id": drug_id }),
            token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/drugs/favorites", &alice).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let drug_ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["drug"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(drug_ids, vec!["200", "100"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn favorites_require_registration(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/drugs/favorites").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let token = common::token_for("uid-unregistered");
    let response = get_auth(app, "/api/v1/drugs/favorites", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_REGISTERED");
}
