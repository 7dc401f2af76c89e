use chrono::{DateTime, Utc};
use garage_core::error::AppError;
use garage_core::models::{AuthToken, User};
use garage_core::traits::TokenStore;
use sqlx::{PgPool, Pool, Postgres};

use crate::error::db_error;
use crate::user_repository::UserRow;

/// Repository for bearer tokens, one row per user.
#[derive(Clone)]
pub struct TokenRepository {
    pool: Pool<Postgres>,
}

impl TokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TokenStore for TokenRepository {
    async fn get_or_create_token(
        &self,
        user_id: i64,
        candidate_key: &str,
    ) -> Result<AuthToken, AppError> {
        // A concurrent login may win the insert; either way the stored row is returned.
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(candidate_key)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        let row = sqlx::query_as::<_, TokenRow>(
            "SELECT key, user_id, created FROM auth_tokens WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    async fn find_user_by_token(&self, key: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.password_hash, u.date_joined
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete_token(&self, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    key: String,
    user_id: i64,
    created: DateTime<Utc>,
}

impl From<TokenRow> for AuthToken {
    fn from(row: TokenRow) -> Self {
        Self {
            key: row.key,
            user_id: row.user_id,
            created: row.created,
        }
    }
}
