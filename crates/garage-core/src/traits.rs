use std::future::Future;

use crate::error::AppError;
use crate::models::{AuthToken, Category, NewVehicle, User, Vehicle, VehicleChanges};

/// Persists user accounts.
pub trait UserStore: Send + Sync + Clone {
    /// Insert a user. A duplicate username is a validation error on `username`.
    fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, AppError>> + Send;

    fn find_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// All users in id order.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, AppError>> + Send;

    /// Delete a user together with their vehicles and token.
    ///
    /// Returns the number of vehicles removed, or `None` if the user did not exist.
    fn delete_user(&self, id: i64) -> impl Future<Output = Result<Option<u64>, AppError>> + Send;
}

/// Persists bearer tokens (at most one per user).
pub trait TokenStore: Send + Sync + Clone {
    /// Return the user's existing token, or store `candidate_key` as a new one.
    fn get_or_create_token(
        &self,
        user_id: i64,
        candidate_key: &str,
    ) -> impl Future<Output = Result<AuthToken, AppError>> + Send;

    fn find_user_by_token(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<User>, AppError>> + Send;

    /// Returns true if a token was deleted.
    fn delete_token(&self, user_id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists segments, brands, and vehicles.
pub trait CatalogStore: Send + Sync + Clone {
    /// All rows of a category in id order.
    fn list_categories<C: Category>(&self)
    -> impl Future<Output = Result<Vec<C>, AppError>> + Send;

    fn get_category<C: Category>(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<C>, AppError>> + Send;

    fn insert_category<C: Category>(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<C, AppError>> + Send;

    /// Returns `None` if no row has this id.
    fn rename_category<C: Category>(
        &self,
        id: i64,
        name: &str,
    ) -> impl Future<Output = Result<Option<C>, AppError>> + Send;

    /// Delete a category row and every vehicle referencing it, atomically.
    ///
    /// Returns the number of vehicles removed, or `None` if the row did not exist.
    fn delete_category<C: Category>(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Option<u64>, AppError>> + Send;

    /// All vehicles in id order, with category names joined in.
    fn list_vehicles(&self) -> impl Future<Output = Result<Vec<Vehicle>, AppError>> + Send;

    fn get_vehicle(&self, id: i64)
    -> impl Future<Output = Result<Option<Vehicle>, AppError>> + Send;

    fn insert_vehicle(
        &self,
        vehicle: &NewVehicle,
    ) -> impl Future<Output = Result<Vehicle, AppError>> + Send;

    /// Apply the set fields of `changes`. Returns `None` if no row has this id.
    fn update_vehicle(
        &self,
        id: i64,
        changes: &VehicleChanges,
    ) -> impl Future<Output = Result<Option<Vehicle>, AppError>> + Send;

    /// Returns true if a row was deleted.
    fn delete_vehicle(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}
