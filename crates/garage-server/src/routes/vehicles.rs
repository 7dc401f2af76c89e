use std::sync::Arc;

use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use garage_core::models::Caller;

use crate::dto::{VehicleRequest, VehicleResponse};
use crate::error::ApiError;
use crate::extract::{JsonBody, PathId};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/vehicles",
    responses(
        (status = 200, description = "All vehicles in creation order", body = Vec<VehicleResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicles = state.catalog().list_vehicles().await?;
    let body: Vec<VehicleResponse> = vehicles.into_iter().map(Into::into).collect();
    Ok(axum::Json(body))
}

/// The caller becomes the owner; a `user` key in the body is ignored.
#[utoipa::path(
    post,
    path = "/api/vehicles",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = VehicleResponse),
        (status = 400, description = "Missing fields, bad price, or unknown segment/brand", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    JsonBody(body): JsonBody<VehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = state.catalog().create_vehicle(&caller, body.into()).await?;
    Ok((StatusCode::CREATED, axum::Json(VehicleResponse::from(vehicle))))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle", body = VehicleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vehicle not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = state.catalog().get_vehicle(id).await?;
    Ok(axum::Json(VehicleResponse::from(vehicle)))
}

#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Vehicle replaced", body = VehicleResponse),
        (status = 400, description = "Invalid fields", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vehicle not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(body): JsonBody<VehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = state.catalog().update_vehicle(id, body.into()).await?;
    Ok(axum::Json(VehicleResponse::from(vehicle)))
}

#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    request_body = VehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleResponse),
        (status = 400, description = "Invalid fields", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vehicle not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn partial_update_vehicle(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(body): JsonBody<VehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let vehicle = state
        .catalog()
        .partial_update_vehicle(id, body.into())
        .await?;
    Ok(axum::Json(VehicleResponse::from(vehicle)))
}

#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    params(("id" = i64, Path, description = "Vehicle id")),
    responses(
        (status = 204, description = "Vehicle deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Vehicle not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    state.catalog().delete_vehicle(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
