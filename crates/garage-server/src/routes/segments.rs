use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;

use garage_core::models::Segment;

use super::categories;
use crate::dto::{SegmentRequest, SegmentResponse};
use crate::error::ApiError;
use crate::extract::{JsonBody, PathId};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/segments",
    responses(
        (status = 200, description = "All segments in creation order", body = Vec<SegmentResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "segments"
)]
pub async fn list_segments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    categories::list::<Segment>(&state).await
}

#[utoipa::path(
    post,
    path = "/api/segments",
    request_body = SegmentRequest,
    responses(
        (status = 201, description = "Segment created", body = SegmentResponse),
        (status = 400, description = "Missing or blank name", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "segments"
)]
pub async fn create_segment(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<SegmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    categories::create::<Segment>(&state, body).await
}

#[utoipa::path(
    get,
    path = "/api/segments/{id}",
    params(("id" = i64, Path, description = "Segment id")),
    responses(
        (status = 200, description = "Segment", body = SegmentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Segment not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "segments"
)]
pub async fn get_segment(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    categories::get::<Segment>(&state, id).await
}

#[utoipa::path(
    put,
    path = "/api/segments/{id}",
    params(("id" = i64, Path, description = "Segment id")),
    request_body = SegmentRequest,
    responses(
        (status = 200, description = "Segment replaced", body = SegmentResponse),
        (status = 400, description = "Missing or blank name", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Segment not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "segments"
)]
pub async fn update_segment(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(body): JsonBody<SegmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    categories::update::<Segment>(&state, id, body).await
}

#[utoipa::path(
    patch,
    path = "/api/segments/{id}",
    params(("id" = i64, Path, description = "Segment id")),
    request_body = SegmentRequest,
    responses(
        (status = 200, description = "Segment updated", body = SegmentResponse),
        (status = 400, description = "Blank or null name", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Segment not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "segments"
)]
pub async fn partial_update_segment(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
    JsonBody(body): JsonBody<SegmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    categories::partial_update::<Segment>(&state, id, body).await
}

/// Deleting a segment also deletes every vehicle in it.
#[utoipa::path(
    delete,
    path = "/api/segments/{id}",
    params(("id" = i64, Path, description = "Segment id")),
    responses(
        (status = 204, description = "Segment and its vehicles deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Segment not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "segments"
)]
pub async fn delete_segment(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId,
) -> Result<impl IntoResponse, ApiError> {
    categories::delete::<Segment>(&state, id).await
}
