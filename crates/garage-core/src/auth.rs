use crate::error::AppError;
use crate::input::{Credentials, Registration};
use crate::models::{AuthToken, Caller, EntityKind, User};
use crate::password::{generate_token_key, hash_password, verify_password};
use crate::traits::{TokenStore, UserStore};

/// Registration, token issuing, and token resolution.
///
/// Generic over the user and token stores so the rules can be exercised
/// without a database.
pub struct AuthService<U, T>
where
    U: UserStore,
    T: TokenStore,
{
    users: U,
    tokens: T,
}

impl<U, T> AuthService<U, T>
where
    U: UserStore,
    T: TokenStore,
{
    pub fn new(users: U, tokens: T) -> Self {
        Self { users, tokens }
    }

    /// Create an account. The password is stored only as an Argon2 hash.
    pub async fn register(&self, input: Registration) -> Result<User, AppError> {
        let (username, password) = input.validate()?;

        if self.users.find_user_by_username(&username).await?.is_some() {
            return Err(AppError::invalid(
                "username",
                "A user with that username already exists.",
            ));
        }

        let hash = hash_password(&password)?;
        let user = self.users.insert_user(&username, &hash).await?;
        tracing::info!(user_id = user.id, "Registered user {}", user.username);
        Ok(user)
    }

    /// Exchange a username/password pair for the user's bearer token.
    ///
    /// Repeated calls return the same key until it is revoked.
    pub async fn issue_token(&self, input: Credentials) -> Result<AuthToken, AppError> {
        let (username, password) = input.validate()?;

        let Some(user) = self.users.find_user_by_username(&username).await? else {
            tracing::warn!("Token requested for unknown user {username}");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(&password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "Token requested with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        self.tokens
            .get_or_create_token(user.id, &generate_token_key())
            .await
    }

    /// Resolve a bearer key to the identity it was issued to.
    pub async fn resolve_token(&self, key: &str) -> Result<Caller, AppError> {
        match self.tokens.find_user_by_token(key).await? {
            Some(user) => Ok(Caller::from(&user)),
            None => Err(AppError::Unauthorized("Invalid token.".into())),
        }
    }

    /// Delete the caller's token; the next `issue_token` mints a new key.
    pub async fn revoke_token(&self, caller: &Caller) -> Result<bool, AppError> {
        let revoked = self.tokens.delete_token(caller.id).await?;
        if revoked {
            tracing::info!(user_id = caller.id, "Revoked token");
        }
        Ok(revoked)
    }

    pub async fn revoke_token_for(&self, username: &str) -> Result<bool, AppError> {
        let user = self.require_user(username).await?;
        self.revoke_token(&Caller::from(&user)).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list_users().await
    }

    /// Administrative removal. Returns the number of vehicles deleted with the user.
    pub async fn delete_user(&self, username: &str) -> Result<u64, AppError> {
        let user = self.require_user(username).await?;
        let removed = self
            .users
            .delete_user(user.id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::User, username))?;
        tracing::info!(
            user_id = user.id,
            vehicles = removed,
            "Deleted user {username}"
        );
        Ok(removed)
    }

    async fn require_user(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::User, username))
    }
}
