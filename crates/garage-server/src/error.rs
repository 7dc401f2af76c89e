use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use garage_core::error::AppError;

use crate::dto::{ErrorResponse, MessageResponse};

/// Wrapper so we can implement `IntoResponse` for `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::InvalidCredentials => (StatusCode::BAD_REQUEST, "invalid_credentials"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::MethodNotAllowed(_) => {
                let body = MessageResponse {
                    message: self.0.to_string(),
                };
                return (StatusCode::METHOD_NOT_ALLOWED, axum::Json(body)).into_response();
            }
            AppError::DatabaseError(_) | AppError::PasswordHash(_) | AppError::ConfigError(_) => {
                tracing::error!(error = %self.0, "Request failed");
                let body = ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "An internal error occurred".to_string(),
                    fields: None,
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
            }
        };

        let fields = match &self.0 {
            AppError::Validation(errors) => Some(errors.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.0.to_string(),
            fields,
        };

        (status, axum::Json(body)).into_response()
    }
}
