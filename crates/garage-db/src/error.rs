use garage_core::AppError;
use sqlx::error::ErrorKind;

/// Translate a driver error into an [`AppError`].
///
/// Constraint violations that a client can trigger become field errors;
/// everything else is logged and reported as a database failure.
pub(crate) fn db_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        let constraint = db.constraint().unwrap_or_default();
        match db.kind() {
            ErrorKind::UniqueViolation if constraint == "users_username_key" => {
                return AppError::invalid("username", "A user with that username already exists.");
            }
            ErrorKind::ForeignKeyViolation => {
                if let Some(field) = reference_field(constraint) {
                    return AppError::invalid(field, "Referenced object does not exist.");
                }
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database query failed");
    AppError::DatabaseError(err.to_string())
}

fn reference_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "vehicles_segment_fk" => Some("segment"),
        "vehicles_brand_fk" => Some("brand"),
        "vehicles_user_fk" | "auth_tokens_user_fk" => Some("user"),
        _ => None,
    }
}
