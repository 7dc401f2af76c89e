use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;

use garage_core::models::Brand;

use super::categories;
use crate::dto::{BrandRequest, BrandResponse};
use crate::error::ApiError;
use crate::extract::{JsonBody, PathId};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "All manufacturers in creation order", body = Vec<BrandResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "brands"
)]
pub async fn list_brands(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    categories::list::<Brand>(&state).await
}

#[utoipa::path(
    post,
    path = "/api/brands",
    request_body = BrandRequest,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, description = "Missing or blank name", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "brands"
)]
pub async fn create_brand(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<BrandRequest>,
) -> Result<impl IntoResponse, ApiError> {
    categories::create::<Brand>(&state, body).await
}

#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    params(("id" = i64, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand", body = BrandResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Brand not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "brands"
)]
pub async fn get_brand(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    categories::get::<Brand>(&state, id).await
}

#[utoipa::path(
    put,
    path = "/api/brands/{id}",
    params(("id" = i64, Path, description = "Brand id")),
    request_body = BrandRequest,
    responses(
        (status = 200, description = "Brand replaced", body = BrandResponse),
        (status = 400, description = "Missing or blank name", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Brand not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "brands"
)]
pub async fn update_brand(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(body): JsonBody<BrandRequest>,
) -> Result<impl IntoResponse, ApiError> {
    categories::update::<Brand>(&state, id, body).await
}

#[utoipa::path(
    patch,
    path = "/api/brands/{id}",
    params(("id" = i64, Path, description = "Brand id")),
    request_body = BrandRequest,
    responses(
        (status = 200, description = "Brand updated", body = BrandResponse),
        (status = 400, description = "Blank or null name", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Brand not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "brands"
)]
pub async fn partial_update_brand(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(body): JsonBody<BrandRequest>,
) -> Result<impl IntoResponse, ApiError> {
    categories::partial_update::<Brand>(&state, id, body).await
}

/// Deleting a brand also deletes every vehicle it makes.
#[utoipa::path(
    delete,
    path = "/api/brands/{id}",
    params(("id" = i64, Path, description = "Brand id")),
    responses(
        (status = 204, description = "Brand and the vehicles it makes deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Brand not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "brands"
)]
pub async fn delete_brand(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    categories::delete::<Brand>(&state, id).await
}
