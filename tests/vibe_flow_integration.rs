// SPDX-License-Identifier: MIT

//! End-to-end play flow against the Firestore emulator.
//!
//! Run with FIRESTORE_EMULATOR_HOST set; skipped otherwise.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;
use vibe_check::config::Config;
use vibe_check::content::ContentPool;
use vibe_check::routes::create_router;
use vibe_check::services::VibeEngine;
use vibe_check::AppState;

mod common;

async fn create_emulator_app() -> (axum::Router, Vec<u8>) {
    let config = Config::test_default();
    let signing_key = config.jwt_signing_key.clone();

    let db = common::test_db().await;
    let vibe_engine = VibeEngine::new(common::unreachable_completion(), ContentPool::builtin());

    let state = Arc::new(AppState {
        config,
        db,
        vibe_engine,
    });

    (create_router(state), signing_key)
}

fn post_vibe(token: &str, mood: &str) -> Request<Body> {
    let body = serde_json::json!({ "mood": mood });
    Request::builder()
        .method("POST")
        .uri("/api/vibe")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_first_play_inserts_second_play_denied() {
    require_emulator!();

    let (app, signing_key) = create_emulator_app().await;
    // Fresh user per run so earlier state can't leak in.
    let user_id = format!("user_{}", uuid::Uuid::new_v4());
    let token = common::test_jwt(&user_id, &signing_key);

    // First play succeeds and returns a complete vibe.
    let response = app
        .clone()
        .oneshot(post_vibe(&token, "feeling great"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let vibe = json_body(response).await;
    let score = vibe["luck_score"].as_u64().unwrap();
    assert!(score <= 100);
    assert!(!vibe["fortune_text"].as_str().unwrap().is_empty());

    // Today now reports exactly that record.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/vibe/today")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let today = json_body(response).await;
    assert_eq!(today["has_played_today"], serde_json::json!(true));
    assert_eq!(today["vibe"]["id"], vibe["id"]);

    // Second play the same day is denied without inserting.
    let response = app
        .clone()
        .oneshot(post_vibe(&token, "one more try"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let denial = json_body(response).await;
    assert_eq!(denial["error"], serde_json::json!("already_played"));

    // History still holds a single record.
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/vibe/history")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let history = json_body(response).await;
    assert_eq!(history["vibes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_locked_score_flows_through_to_effect() {
    require_emulator!();

    let (app, signing_key) = create_emulator_app().await;
    let user_id = format!("user_{}", uuid::Uuid::new_v4());
    let admin_id = format!("admin_{}", uuid::Uuid::new_v4());
    let token = common::test_jwt(&user_id, &signing_key);
    let admin_token = common::test_jwt(&admin_id, &signing_key);

    // Create both users, then promote the admin directly in the store
    // (role changes normally go through an existing admin).
    for t in [&token, &admin_token] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", t))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let db = common::test_db().await;
    db.set_admin_flag(&admin_id, true).await.unwrap();

    // Admin locks the user's score to 77.
    let body = serde_json::json!({ "score": 77 });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/admin/users/{}/locked-score", user_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The user's next play comes back with score 77 and the golden effect.
    let response = app
        .clone()
        .oneshot(post_vibe(&token, "testing effects"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let vibe = json_body(response).await;
    assert_eq!(vibe["luck_score"], serde_json::json!(77));
    assert_eq!(vibe["luck_label"], serde_json::json!("good"));
    assert_eq!(
        vibe["special_effect"]["name"],
        serde_json::json!("golden-lucky")
    );
    assert_eq!(vibe["special_effect"]["duration_secs"], serde_json::json!(5));
}

#[tokio::test]
async fn test_admin_delete_user_removes_vibes() {
    require_emulator!();

    let (app, signing_key) = create_emulator_app().await;
    let user_id = format!("user_{}", uuid::Uuid::new_v4());
    let admin_id = format!("admin_{}", uuid::Uuid::new_v4());
    let token = common::test_jwt(&user_id, &signing_key);
    let admin_token = common::test_jwt(&admin_id, &signing_key);

    // Bootstrap the admin account.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let db = common::test_db().await;
    db.set_admin_flag(&admin_id, true).await.unwrap();

    // User plays, leaving a vibe record behind.
    let response = app
        .clone()
        .oneshot(post_vibe(&token, "soon to be deleted"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(db.get_user_vibes(&user_id).await.unwrap().len(), 1);

    // Admin deletes the account; the profile and all vibes go with it.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/users/{}", user_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(db.get_user(&user_id).await.unwrap().is_none());
    assert!(db.get_user_vibes(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_reset_reenables_play() {
    require_emulator!();

    let (app, signing_key) = create_emulator_app().await;
    let user_id = format!("user_{}", uuid::Uuid::new_v4());
    let admin_id = format!("admin_{}", uuid::Uuid::new_v4());
    let token = common::test_jwt(&user_id, &signing_key);
    let admin_token = common::test_jwt(&admin_id, &signing_key);

    // Bootstrap the admin account.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let db = common::test_db().await;
    db.set_admin_flag(&admin_id, true).await.unwrap();

    // User plays, then is blocked.
    let response = app
        .clone()
        .oneshot(post_vibe(&token, "first"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .clone()
        .oneshot(post_vibe(&token, "second"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Admin resets today's vibe; the user can play again.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/users/{}/vibes/today", user_id))
                .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(post_vibe(&token, "third")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
