//! PostgreSQL storage for the Garage catalog.
//!
//! Each repository implements one of the store traits from `garage-core`.

pub mod catalog_repository;
pub mod config;
pub mod database;
mod error;
pub mod token_repository;
pub mod user_repository;

pub use catalog_repository::CatalogRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;
