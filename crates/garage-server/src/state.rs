use garage_core::{AuthService, CatalogService};
use garage_db::{CatalogRepository, Database, TokenRepository, UserRepository};

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn auth(&self) -> AuthService<UserRepository, TokenRepository> {
        AuthService::new(self.db.user_repo(), self.db.token_repo())
    }

    pub fn catalog(&self) -> CatalogService<CatalogRepository> {
        CatalogService::new(self.db.catalog_repo())
    }
}
