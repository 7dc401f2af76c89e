use std::sync::Arc;

use axum::extract::State;
use axum::http::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use garage_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Accepted `Authorization` schemes, matched case-insensitively.
const SCHEMES: [&str; 2] = ["Bearer", "Token"];

/// Pull the token key out of an `Authorization` header value.
fn token_from_header(value: &str) -> Result<&str, AppError> {
    let (scheme, key) = value.trim().split_once(' ').ok_or_else(|| {
        AppError::Unauthorized("Invalid token header. No credentials provided.".into())
    })?;
    if !SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        return Err(AppError::Unauthorized(
            "Authentication credentials were not provided.".into(),
        ));
    }
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(AppError::Unauthorized(
            "Invalid token header. Token string should not contain spaces.".into(),
        ));
    }
    Ok(key)
}

/// Middleware that resolves `Authorization: Bearer <token>` to a [`Caller`]
/// and stores it in the request extensions.
///
/// [`Caller`]: garage_core::models::Caller
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("Authentication credentials were not provided.".into())
        })?;

    // Owned copies: the request body is not `Sync`, so no borrow may cross the await.
    let key = token_from_header(header)?.to_string();
    let path = request.uri().path().to_string();

    let caller = state.auth().resolve_token(&key).await.inspect_err(|_| {
        tracing::warn!(path = %path, "Rejected request with unknown token");
    })?;

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
