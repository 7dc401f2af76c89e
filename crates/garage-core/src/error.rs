use std::fmt::Display;

use thiserror::Error;

use crate::models::EntityKind;
use crate::validation::ValidationErrors;

/// Application-wide error types for Garage.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client input failed one or more field rules.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Username/password pair did not match a user.
    #[error("Unable to log in with provided credentials.")]
    InvalidCredentials,

    /// Missing, malformed, or revoked bearer token.
    #[error("{0}")]
    Unauthorized(String),

    /// No row with the requested key.
    #[error("{0}")]
    NotFound(String),

    /// The operation is disabled on an otherwise valid resource.
    #[error("{0} method is not allowed")]
    MethodNotAllowed(String),

    /// Password hashing or hash parsing failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Shorthand for a validation error carrying a single field message.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        AppError::Validation(errors)
    }

    pub fn not_found(kind: EntityKind, key: impl Display) -> Self {
        AppError::NotFound(format!("{kind} {key} not found"))
    }

    /// Returns true for errors caused by the client rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidCredentials
                | AppError::Unauthorized(_)
                | AppError::NotFound(_)
                | AppError::MethodNotAllowed(_)
        )
    }
}
