use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::integration::common::{TEST_PASSWORD, setup_test_app};

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app().await;

    let (status, json) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn register_returns_account_without_password() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/create",
            None,
            Some(json!({"username": "dummy", "password": "dummy_pw"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["username"], "dummy");
    assert!(json["id"].is_i64());
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/create",
            None,
            Some(json!({"username": "dummy", "password": "pw"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert!(json["fields"]["password"].is_array());
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    let app = setup_test_app().await;
    app.login_as("dummy").await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/create",
            None,
            Some(json!({"username": "dummy", "password": "another_pw"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["username"].is_array());
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = setup_test_app().await;

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        axum::http::Request::post("/api/create")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn token_is_stable_across_logins() {
    let app = setup_test_app().await;
    let first = app.login_as("dummy").await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({"username": "dummy", "password": TEST_PASSWORD})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["token"], first);
}

#[tokio::test]
async fn wrong_password_returns_400_without_token() {
    let app = setup_test_app().await;
    app.login_as("dummy").await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({"username": "dummy", "password": "wrong_pw"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_credentials");
    assert!(json.get("token").is_none());
}

#[tokio::test]
async fn empty_credentials_return_400() {
    let app = setup_test_app().await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/auth",
            None,
            Some(json!({"username": "", "password": ""})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("token").is_none());
}

#[tokio::test]
async fn profile_returns_caller() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    let (status, json) = app
        .send(Method::GET, "/api/profile", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["username"], "dummy");
}

#[tokio::test]
async fn profile_is_read_only() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    let (status, json) = app
        .send(
            Method::PUT,
            "/api/profile",
            Some(&token),
            Some(json!({"username": "other"})),
        )
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, json!({"message": "PUT method is not allowed"}));

    let (status, json) = app
        .send(Method::PATCH, "/api/profile", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["message"], "PATCH method is not allowed");

    // Anonymous callers are rejected before the method check.
    let (status, _) = app.send(Method::PUT, "/api/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn revoked_token_is_rejected() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    let (status, _) = app
        .send(Method::DELETE, "/api/auth", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = app
        .send(Method::GET, "/api/profile", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn token_scheme_is_accepted() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        axum::http::Request::get("/api/profile")
            .header("authorization", format!("Token {token}"))
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
