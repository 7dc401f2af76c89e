//! Test utilities: an in-memory implementation of every store trait.
//!
//! One `MemoryStore` backs users, tokens, and the catalog so that cascades
//! behave like the real foreign keys. Clones share state through
//! `Arc<Mutex<_>>`, letting tests assert on what a service persisted.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::error::AppError;
use crate::models::{AuthToken, Category, EntityKind, NewVehicle, User, Vehicle, VehicleChanges};
use crate::traits::{CatalogStore, TokenStore, UserStore};
use crate::validation::ValidationErrors;

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
    tokens: HashMap<i64, AuthToken>,
    categories: HashMap<EntityKind, BTreeMap<i64, String>>,
    vehicles: BTreeMap<i64, NewVehicle>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn category_name(&self, kind: EntityKind, id: i64) -> Option<&String> {
        self.categories.get(&kind).and_then(|rows| rows.get(&id))
    }

    fn joined(&self, id: i64, row: &NewVehicle) -> Vehicle {
        Vehicle {
            id,
            user: row.user,
            vehicle_name: row.vehicle_name.clone(),
            release_year: row.release_year,
            price: row.price,
            segment: row.segment,
            brand: row.brand,
            segment_name: self
                .category_name(EntityKind::Segment, row.segment)
                .cloned()
                .unwrap_or_default(),
            brand_name: self
                .category_name(EntityKind::Brand, row.brand)
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn remove_vehicles_where(&mut self, pred: impl Fn(&NewVehicle) -> bool) -> u64 {
        let before = self.vehicles.len();
        self.vehicles.retain(|_, v| !pred(v));
        (before - self.vehicles.len()) as u64
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.lock().vehicles.len()
    }
}

impl UserStore for MemoryStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut state = self.lock();
        if state.users.values().any(|u| u.username == username) {
            let mut errors = ValidationErrors::new();
            errors.add("username", "A user with that username already exists.");
            return Err(AppError::Validation(errors));
        }
        let user = User {
            id: state.next_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            date_joined: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn delete_user(&self, id: i64) -> Result<Option<u64>, AppError> {
        let mut state = self.lock();
        if state.users.remove(&id).is_none() {
            return Ok(None);
        }
        state.tokens.remove(&id);
        Ok(Some(state.remove_vehicles_where(|v| v.user == id)))
    }
}

impl TokenStore for MemoryStore {
    async fn get_or_create_token(
        &self,
        user_id: i64,
        candidate_key: &str,
    ) -> Result<AuthToken, AppError> {
        let mut state = self.lock();
        let token = state.tokens.entry(user_id).or_insert_with(|| AuthToken {
            key: candidate_key.to_string(),
            user_id,
            created: Utc::now(),
        });
        Ok(token.clone())
    }

    async fn find_user_by_token(&self, key: &str) -> Result<Option<User>, AppError> {
        let state = self.lock();
        Ok(state
            .tokens
            .values()
            .find(|t| t.key == key)
            .and_then(|t| state.users.get(&t.user_id))
            .cloned())
    }

    async fn delete_token(&self, user_id: i64) -> Result<bool, AppError> {
        Ok(self.lock().tokens.remove(&user_id).is_some())
    }
}

impl CatalogStore for MemoryStore {
    async fn list_categories<C: Category>(&self) -> Result<Vec<C>, AppError> {
        let state = self.lock();
        Ok(state
            .categories
            .get(&C::KIND)
            .map(|rows| {
                rows.iter()
                    .map(|(id, name)| C::from_parts(*id, name.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_category<C: Category>(&self, id: i64) -> Result<Option<C>, AppError> {
        Ok(self
            .lock()
            .category_name(C::KIND, id)
            .map(|name| C::from_parts(id, name.clone())))
    }

    async fn insert_category<C: Category>(&self, name: &str) -> Result<C, AppError> {
        let mut state = self.lock();
        let id = state.next_id();
        state
            .categories
            .entry(C::KIND)
            .or_default()
            .insert(id, name.to_string());
        Ok(C::from_parts(id, name.to_string()))
    }

    async fn rename_category<C: Category>(
        &self,
        id: i64,
        name: &str,
    ) -> Result<Option<C>, AppError> {
        let mut state = self.lock();
        let Some(current) = state
            .categories
            .get_mut(&C::KIND)
            .and_then(|rows| rows.get_mut(&id))
        else {
            return Ok(None);
        };
        *current = name.to_string();
        Ok(Some(C::from_parts(id, name.to_string())))
    }

    async fn delete_category<C: Category>(&self, id: i64) -> Result<Option<u64>, AppError> {
        let mut state = self.lock();
        let existed = state
            .categories
            .get_mut(&C::KIND)
            .and_then(|rows| rows.remove(&id))
            .is_some();
        if !existed {
            return Ok(None);
        }
        let removed = match C::KIND {
            EntityKind::Segment => state.remove_vehicles_where(|v| v.segment == id),
            EntityKind::Brand => state.remove_vehicles_where(|v| v.brand == id),
            _ => 0,
        };
        Ok(Some(removed))
    }

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        let state = self.lock();
        Ok(state
            .vehicles
            .iter()
            .map(|(id, row)| state.joined(*id, row))
            .collect())
    }

    async fn get_vehicle(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let state = self.lock();
        Ok(state.vehicles.get(&id).map(|row| state.joined(id, row)))
    }

    async fn insert_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        let mut state = self.lock();
        let id = state.next_id();
        state.vehicles.insert(id, vehicle.clone());
        Ok(state.joined(id, vehicle))
    }

    async fn update_vehicle(
        &self,
        id: i64,
        changes: &VehicleChanges,
    ) -> Result<Option<Vehicle>, AppError> {
        let mut state = self.lock();
        let Some(row) = state.vehicles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.vehicle_name {
            row.vehicle_name = name.clone();
        }
        if let Some(year) = changes.release_year {
            row.release_year = year;
        }
        if let Some(price) = changes.price {
            row.price = price;
        }
        if let Some(segment) = changes.segment {
            row.segment = segment;
        }
        if let Some(brand) = changes.brand {
            row.brand = brand;
        }
        let row = row.clone();
        Ok(Some(state.joined(id, &row)))
    }

    async fn delete_vehicle(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.lock().vehicles.remove(&id).is_some())
    }
}
