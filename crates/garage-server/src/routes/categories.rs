//! Handler bodies shared by the segment and brand endpoints.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use garage_core::input::NameInput;
use garage_core::models::{Brand, Category, Segment};

use crate::dto::{BrandRequest, BrandResponse, SegmentRequest, SegmentResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// A category together with its wire payloads.
pub trait CategoryResource: Category {
    type Request: DeserializeOwned + Into<NameInput> + Send;
    type Response: From<Self> + Serialize + Send;
}

impl CategoryResource for Segment {
    type Request = SegmentRequest;
    type Response = SegmentResponse;
}

impl CategoryResource for Brand {
    type Request = BrandRequest;
    type Response = BrandResponse;
}

pub async fn list<C: CategoryResource>(
    state: &AppState,
) -> Result<Json<Vec<C::Response>>, ApiError> {
    let rows = state.catalog().list_categories::<C>().await?;
    Ok(Json(rows.into_iter().map(C::Response::from).collect()))
}

pub async fn create<C: CategoryResource>(
    state: &AppState,
    body: C::Request,
) -> Result<(StatusCode, Json<C::Response>), ApiError> {
    let row = state.catalog().create_category::<C>(body.into()).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get<C: CategoryResource>(
    state: &AppState,
    id: i64,
) -> Result<Json<C::Response>, ApiError> {
    let row = state.catalog().get_category::<C>(id).await?;
    Ok(Json(row.into()))
}

/// Full replace; the name is required.
pub async fn update<C: CategoryResource>(
    state: &AppState,
    id: i64,
    body: C::Request,
) -> Result<Json<C::Response>, ApiError> {
    let row = state
        .catalog()
        .update_category::<C>(id, body.into())
        .await?;
    Ok(Json(row.into()))
}

pub async fn partial_update<C: CategoryResource>(
    state: &AppState,
    id: i64,
    body: C::Request,
) -> Result<Json<C::Response>, ApiError> {
    let row = state
        .catalog()
        .partial_update_category::<C>(id, body.into())
        .await?;
    Ok(Json(row.into()))
}

/// Cascades to the category's vehicles.
pub async fn delete<C: CategoryResource>(state: &AppState, id: i64) -> Result<StatusCode, ApiError> {
    state.catalog().delete_category::<C>(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
