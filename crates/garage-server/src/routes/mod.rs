//! Endpoint table and the handlers that do not belong to a resource.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::require_token;
use crate::dto::HealthResponse;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod accounts;
pub mod brands;
mod categories;
pub mod segments;
pub mod vehicles;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/auth", axum::routing::delete(accounts::logout))
        .route(
            "/api/profile",
            get(accounts::profile)
                .put(accounts::update_profile)
                .patch(accounts::partial_update_profile),
        )
        .route(
            "/api/segments",
            get(segments::list_segments).post(segments::create_segment),
        )
        .route(
            "/api/segments/{id}",
            get(segments::get_segment)
                .put(segments::update_segment)
                .patch(segments::partial_update_segment)
                .delete(segments::delete_segment),
        )
        .route(
            "/api/brands",
            get(brands::list_brands).post(brands::create_brand),
        )
        .route(
            "/api/brands/{id}",
            get(brands::get_brand)
                .put(brands::update_brand)
                .patch(brands::partial_update_brand)
                .delete(brands::delete_brand),
        )
        .route(
            "/api/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route(
            "/api/vehicles/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .patch(vehicles::partial_update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    let public = Router::new()
        .route("/health", get(health))
        .route("/api/create", post(accounts::register))
        .route("/api/auth", post(accounts::login))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

/// The router wrapped in request tracing and permissive CORS, as served.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, response) = match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            HealthResponse {
                status: "healthy",
                database: "ok",
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponse {
                    status: "unhealthy",
                    database: "error",
                },
            )
        }
    };

    (status, axum::Json(response))
}
