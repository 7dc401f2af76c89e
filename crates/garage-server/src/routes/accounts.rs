use std::sync::Arc;

use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use garage_core::error::AppError;
use garage_core::models::Caller;

use crate::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/create",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid or duplicate username, short password", body = crate::dto::ErrorResponse),
    ),
    tag = "accounts"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth().register(body.into()).await?;
    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token for the account", body = TokenResponse),
        (status = 400, description = "Missing or wrong credentials", body = crate::dto::ErrorResponse),
    ),
    tag = "accounts"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.auth().issue_token(body.into()).await?;
    Ok(axum::Json(TokenResponse { token: token.key }))
}

#[utoipa::path(
    delete,
    path = "/api/auth",
    responses(
        (status = 204, description = "Token revoked"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "accounts"
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
) -> Result<impl IntoResponse, ApiError> {
    state.auth().revoke_token(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "The authenticated account", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "accounts"
)]
pub async fn profile(Extension(caller): Extension<Caller>) -> axum::Json<UserResponse> {
    axum::Json(caller.into())
}

/// Profiles are read-only.
#[utoipa::path(
    put,
    path = "/api/profile",
    responses(
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Profiles are read-only", body = crate::dto::MessageResponse),
    ),
    security(("bearer" = [])),
    tag = "accounts"
)]
pub async fn update_profile(Extension(_caller): Extension<Caller>) -> ApiError {
    AppError::MethodNotAllowed("PUT".into()).into()
}

#[utoipa::path(
    patch,
    path = "/api/profile",
    responses(
        (status = 401, description = "Unauthorized"),
        (status = 405, description = "Profiles are read-only", body = crate::dto::MessageResponse),
    ),
    security(("bearer" = [])),
    tag = "accounts"
)]
pub async fn partial_update_profile(Extension(_caller): Extension<Caller>) -> ApiError {
    AppError::MethodNotAllowed("PATCH".into()).into()
}
