// SPDX-License-Identifier: MIT

//! Ownership gate tests.
//!
//! A valid token for user A must never reach the store for user B's
//! resources: the gate rejects with 403 before any repository call, so
//! these pass even with the offline mock store (which would otherwise
//! answer 503).

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use liftlog::middleware::auth::create_jwt;
use tower::ServiceExt;

mod common;

const USER_A: &str = "6630f0d2a3b4c5d6e7f80910";
const USER_B: &str = "ffffffffffffffffffffffff";

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_profile_update_for_other_user_forbidden() {
    let (app, state) = common::create_test_app();
    let token = create_jwt(USER_A, &state.config.jwt_signing_key).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/users/{}/profile", USER_B))
                .header(header::AUTHORIZATION, bearer(&token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"weight": 80.0}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_workouts_for_other_user_forbidden() {
    let (app, state) = common::create_test_app();
    let token = create_jwt(USER_A, &state.config.jwt_signing_key).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/users/{}/workouts", USER_B))
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_workout_for_other_user_forbidden() {
    let (app, state) = common::create_test_app();
    let token = create_jwt(USER_A, &state.config.jwt_signing_key).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/users/{}/workouts", USER_B))
                .header(header::AUTHORIZATION, bearer(&token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title": "Leg day"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_summary_for_other_user_forbidden() {
    let (app, state) = common::create_test_app();
    let token = create_jwt(USER_A, &state.config.jwt_signing_key).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/analytics/summary/{}", USER_B))
                .header(header::AUTHORIZATION, bearer(&token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
