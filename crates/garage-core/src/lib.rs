//! Domain types, validation rules, store traits, and services for the Garage
//! vehicle catalog.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod input;
pub mod models;
pub mod password;
pub mod traits;
pub mod validation;

#[cfg(test)]
mod testutil;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use error::AppError;
pub use input::{Credentials, NameInput, Registration, VehicleInput};
pub use models::{
    AuthToken, Brand, Caller, Category, EntityKind, NewVehicle, Segment, User, Vehicle,
    VehicleChanges,
};
pub use traits::{CatalogStore, TokenStore, UserStore};
pub use validation::ValidationErrors;
