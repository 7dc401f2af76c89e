use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// The kinds of row the catalog stores, used in error messages and storage lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Segment,
    Brand,
    Vehicle,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "User",
            EntityKind::Segment => "Segment",
            EntityKind::Brand => "Brand",
            EntityKind::Vehicle => "Vehicle",
        };
        f.write_str(name)
    }
}

/// A registered account. The hash never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

/// The authenticated identity behind a request.
///
/// Resolved once by the auth middleware and handed to every controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub username: String,
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Opaque bearer credential bound to one user.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub key: String,
    pub user_id: i64,
    pub created: DateTime<Utc>,
}

/// An independent named classification that vehicles reference.
///
/// Segments and brands share one storage and validation contract; only the
/// wire field carrying the name differs.
pub trait Category: fmt::Debug + Clone + Send + Sync + 'static {
    const KIND: EntityKind;
    /// Wire name of the name field (`segment_name`, `brand_name`).
    const NAME_FIELD: &'static str;
    /// Wire name of the vehicle field that references this category.
    const VEHICLE_FIELD: &'static str;

    fn from_parts(id: i64, name: String) -> Self;
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

/// Body class, e.g. "SUV" or "Sedan".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub id: i64,
    pub segment_name: String,
}

impl Category for Segment {
    const KIND: EntityKind = EntityKind::Segment;
    const NAME_FIELD: &'static str = "segment_name";
    const VEHICLE_FIELD: &'static str = "segment";

    fn from_parts(id: i64, name: String) -> Self {
        Self {
            id,
            segment_name: name,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.segment_name
    }
}

/// Manufacturer, e.g. "Tesla".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: i64,
    pub brand_name: String,
}

impl Category for Brand {
    const KIND: EntityKind = EntityKind::Brand;
    const NAME_FIELD: &'static str = "brand_name";
    const VEHICLE_FIELD: &'static str = "brand";

    fn from_parts(id: i64, name: String) -> Self {
        Self {
            id,
            brand_name: name,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.brand_name
    }
}

/// A vehicle as read back from storage.
///
/// `segment_name` and `brand_name` are joined in at read time and are never
/// written.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub user: i64,
    pub vehicle_name: String,
    pub release_year: i32,
    pub price: Decimal,
    pub segment: i64,
    pub brand: i64,
    pub segment_name: String,
    pub brand_name: String,
}

/// A validated vehicle ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub user: i64,
    pub vehicle_name: String,
    pub release_year: i32,
    pub price: Decimal,
    pub segment: i64,
    pub brand: i64,
}

/// Validated changes to an existing vehicle; `None` leaves a column as is.
///
/// Ownership is fixed at creation and has no field here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleChanges {
    pub vehicle_name: Option<String>,
    pub release_year: Option<i32>,
    pub price: Option<Decimal>,
    pub segment: Option<i64>,
    pub brand: Option<i64>,
}

impl VehicleChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<NewVehicle> for VehicleChanges {
    fn from(vehicle: NewVehicle) -> Self {
        Self {
            vehicle_name: Some(vehicle.vehicle_name),
            release_year: Some(vehicle.release_year),
            price: Some(vehicle.price),
            segment: Some(vehicle.segment),
            brand: Some(vehicle.brand),
        }
    }
}
