use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tower::ServiceExt;

use garage_db::Database;
use garage_server::routes;
use garage_server::state::AppState;

pub const TEST_PASSWORD: &str = "dummy_pw";

/// Holds the router together with the container backing it.
pub struct TestApp {
    pub router: Router,
    _container: ContainerAsync<GenericImage>,
}

impl TestApp {
    /// Send one request and decode the JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Register `username` and return a token for it.
    pub async fn login_as(&self, username: &str) -> String {
        let credentials = serde_json::json!({"username": username, "password": TEST_PASSWORD});

        let (status, _) = self
            .send(Method::POST, "/api/create", None, Some(credentials.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = self
            .send(Method::POST, "/api/auth", None, Some(credentials))
            .await;
        assert_eq!(status, StatusCode::OK);
        json["token"].as_str().unwrap().to_string()
    }

    /// Create a segment and a brand, returning their ids.
    pub async fn seed_categories(&self, token: &str, segment: &str, brand: &str) -> (i64, i64) {
        let (status, json) = self
            .send(
                Method::POST,
                "/api/segments",
                Some(token),
                Some(serde_json::json!({"segment_name": segment})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let segment_id = json["id"].as_i64().unwrap();

        let (status, json) = self
            .send(
                Method::POST,
                "/api/brands",
                Some(token),
                Some(serde_json::json!({"brand_name": brand})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        (segment_id, json["id"].as_i64().unwrap())
    }
}

/// Spin up a PostgreSQL container and return the migrated test app.
pub async fn setup_test_app() -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "garage_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let url = format!("postgresql://postgres:postgres@{host}:{port}/garage_test");

    let db = Database::from_pool(retry_connect(&url).await);
    db.migrate().await.expect("Failed to run migrations");

    let state = Arc::new(AppState::new(db));

    TestApp {
        router: routes::router(state),
        _container: container,
    }
}

async fn retry_connect(url: &str) -> PgPool {
    for _ in 0..30 {
        if let Ok(pool) = PgPoolOptions::new().max_connections(5).connect(url).await {
            return pool;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test database");
}
