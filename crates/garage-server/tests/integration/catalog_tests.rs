use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::integration::common::setup_test_app;

#[tokio::test]
async fn unauthenticated_list_returns_401() {
    let app = setup_test_app().await;

    for uri in ["/api/segments", "/api/brands", "/api/vehicles"] {
        let (status, json) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(json["error"], "unauthorized");
    }
}

#[tokio::test]
async fn unknown_token_returns_401() {
    let app = setup_test_app().await;

    let (status, _) = app
        .send(Method::GET, "/api/segments", Some("deadbeef"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn segment_crud() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    let (status, created) = app
        .send(
            Method::POST,
            "/api/segments",
            Some(&token),
            Some(json!({"segment_name": "SUV"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["segment_name"], "SUV");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = app
        .send(Method::GET, &format!("/api/segments/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, renamed) = app
        .send(
            Method::PUT,
            &format!("/api/segments/{id}"),
            Some(&token),
            Some(json!({"segment_name": "Crossover"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["segment_name"], "Crossover");

    let (status, unchanged) = app
        .send(
            Method::PATCH,
            &format!("/api/segments/{id}"),
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["segment_name"], "Crossover");

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/segments/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = app
        .send(Method::GET, &format!("/api/segments/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    let (status, json) = app
        .send(
            Method::POST,
            "/api/segments",
            Some(&token),
            Some(json!({"segment_name": ""})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["segment_name"].is_array());

    let (status, json) = app
        .send(Method::POST, "/api/brands", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["brand_name"].is_array());
}

#[tokio::test]
async fn lists_are_in_creation_order() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    for name in ["Tesla", "BMW", "Audi"] {
        let (status, _) = app
            .send(
                Method::POST,
                "/api/brands",
                Some(&token),
                Some(json!({"brand_name": name})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) = app
        .send(Method::GET, "/api/brands", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["brand_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Tesla", "BMW", "Audi"]);
}

#[tokio::test]
async fn missing_brand_returns_404() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/brands/9999",
            Some(&token),
            Some(json!({"brand_name": "Tesla"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::DELETE, "/api/brands/9999", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unparseable_id_returns_404_json() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;

    for uri in [
        "/api/segments/abc",
        "/api/brands/99999999999999999999",
        "/api/vehicles/1.5",
    ] {
        let (status, json) = app.send(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(json["error"], "not_found", "{uri}");
    }
}

#[tokio::test]
async fn patch_with_null_name_is_rejected() {
    let app = setup_test_app().await;
    let token = app.login_as("dummy").await;
    let (segment, _) = app.seed_categories(&token, "SUV", "Tesla").await;

    let (status, json) = app
        .send(
            Method::PATCH,
            &format!("/api/segments/{segment}"),
            Some(&token),
            Some(json!({"segment_name": null})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["segment_name"][0], "This field may not be null.");

    let (status, unchanged) = app
        .send(
            Method::PATCH,
            &format!("/api/segments/{segment}"),
            Some(&token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["segment_name"], "SUV");
}
