use crate::error::AppError;
use crate::input::{NameInput, VehicleInput};
use crate::models::{Brand, Caller, Category, EntityKind, Segment, Vehicle, VehicleChanges};
use crate::traits::CatalogStore;
use crate::validation::ValidationErrors;

/// CRUD rules for segments, brands, and vehicles.
///
/// Validation happens here; the store only persists what it is handed.
pub struct CatalogService<S>
where
    S: CatalogStore,
{
    store: S,
}

impl<S> CatalogService<S>
where
    S: CatalogStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // -----------------------------------------------------------------------
    // Segments and brands
    // -----------------------------------------------------------------------

    pub async fn list_categories<C: Category>(&self) -> Result<Vec<C>, AppError> {
        self.store.list_categories::<C>().await
    }

    pub async fn get_category<C: Category>(&self, id: i64) -> Result<C, AppError> {
        self.store
            .get_category::<C>(id)
            .await?
            .ok_or_else(|| AppError::not_found(C::KIND, id))
    }

    pub async fn create_category<C: Category>(&self, input: NameInput) -> Result<C, AppError> {
        let name = input.validate_full::<C>()?;
        let created = self.store.insert_category::<C>(&name).await?;
        tracing::info!(id = created.id(), "Created {} {:?}", C::KIND, created.name());
        Ok(created)
    }

    /// Full replace: the name is required.
    pub async fn update_category<C: Category>(
        &self,
        id: i64,
        input: NameInput,
    ) -> Result<C, AppError> {
        let name = input.validate_full::<C>()?;
        self.rename::<C>(id, &name).await
    }

    /// Merge: an absent name leaves the row untouched.
    pub async fn partial_update_category<C: Category>(
        &self,
        id: i64,
        input: NameInput,
    ) -> Result<C, AppError> {
        match input.validate_partial::<C>()? {
            Some(name) => self.rename::<C>(id, &name).await,
            None => self.get_category::<C>(id).await,
        }
    }

    /// Delete a category row; every vehicle referencing it goes with it.
    pub async fn delete_category<C: Category>(&self, id: i64) -> Result<u64, AppError> {
        let removed = self
            .store
            .delete_category::<C>(id)
            .await?
            .ok_or_else(|| AppError::not_found(C::KIND, id))?;
        tracing::info!(id, vehicles = removed, "Deleted {}", C::KIND);
        Ok(removed)
    }

    async fn rename<C: Category>(&self, id: i64, name: &str) -> Result<C, AppError> {
        self.store
            .rename_category::<C>(id, name)
            .await?
            .ok_or_else(|| AppError::not_found(C::KIND, id))
    }

    // -----------------------------------------------------------------------
    // Vehicles
    // -----------------------------------------------------------------------

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        self.store.list_vehicles().await
    }

    pub async fn get_vehicle(&self, id: i64) -> Result<Vehicle, AppError> {
        self.store
            .get_vehicle(id)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Vehicle, id))
    }

    /// Create a vehicle owned by `caller`, whatever owner the client asked for.
    pub async fn create_vehicle(
        &self,
        caller: &Caller,
        input: VehicleInput,
    ) -> Result<Vehicle, AppError> {
        let mut errors = ValidationErrors::new();
        let changes = input.check_full(&mut errors);
        self.check_references(&changes, &mut errors).await?;
        errors.into_result()?;

        let new = changes
            .into_new(caller.id)
            .ok_or_else(|| AppError::invalid("non_field_errors", "Incomplete vehicle."))?;
        let created = self.store.insert_vehicle(&new).await?;
        tracing::info!(
            id = created.id,
            user_id = caller.id,
            "Created vehicle {:?}",
            created.vehicle_name
        );
        Ok(created)
    }

    /// Full replace of every writable field. The owner is kept.
    pub async fn update_vehicle(&self, id: i64, input: VehicleInput) -> Result<Vehicle, AppError> {
        let mut errors = ValidationErrors::new();
        let changes = input.check_full(&mut errors);
        self.apply(id, changes, errors).await
    }

    /// Merge the fields that were sent; only those are validated.
    pub async fn partial_update_vehicle(
        &self,
        id: i64,
        input: VehicleInput,
    ) -> Result<Vehicle, AppError> {
        let mut errors = ValidationErrors::new();
        let changes = input.check_partial(&mut errors);
        self.apply(id, changes, errors).await
    }

    pub async fn delete_vehicle(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete_vehicle(id).await? {
            return Err(AppError::not_found(EntityKind::Vehicle, id));
        }
        tracing::info!(id, "Deleted vehicle");
        Ok(())
    }

    async fn apply(
        &self,
        id: i64,
        changes: VehicleChanges,
        mut errors: ValidationErrors,
    ) -> Result<Vehicle, AppError> {
        // Unknown ids are 404 before any field complaint.
        let current = self.get_vehicle(id).await?;
        self.check_references(&changes, &mut errors).await?;
        errors.into_result()?;

        if changes.is_empty() {
            return Ok(current);
        }
        self.store
            .update_vehicle(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(EntityKind::Vehicle, id))
    }

    async fn check_references(
        &self,
        changes: &VehicleChanges,
        errors: &mut ValidationErrors,
    ) -> Result<(), AppError> {
        if let Some(id) = changes.segment {
            self.check_reference::<Segment>(id, errors).await?;
        }
        if let Some(id) = changes.brand {
            self.check_reference::<Brand>(id, errors).await?;
        }
        Ok(())
    }

    async fn check_reference<C: Category>(
        &self,
        id: i64,
        errors: &mut ValidationErrors,
    ) -> Result<(), AppError> {
        if self.store.get_category::<C>(id).await?.is_none() {
            errors.add(
                C::VEHICLE_FIELD,
                format!("Invalid pk \"{id}\" - object does not exist."),
            );
        }
        Ok(())
    }
}
