use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use garage_core::models::{Brand, Caller, Segment, User, Vehicle};
use garage_core::{Credentials, NameInput, Registration, ValidationErrors, VehicleInput};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(body: RegisterRequest) -> Self {
        Self {
            username: body.username,
            password: body.password,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<LoginRequest> for Credentials {
    fn from(body: LoginRequest) -> Self {
        Self {
            username: body.username,
            password: body.password,
        }
    }
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

impl From<Caller> for UserResponse {
    fn from(caller: Caller) -> Self {
        Self {
            id: caller.id,
            username: caller.username,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Segments & brands
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SegmentRequest {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub segment_name: Option<Option<String>>,
}

impl From<SegmentRequest> for NameInput {
    fn from(body: SegmentRequest) -> Self {
        NameInput::from_nullable(body.segment_name)
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SegmentResponse {
    pub id: i64,
    pub segment_name: String,
}

impl From<Segment> for SegmentResponse {
    fn from(segment: Segment) -> Self {
        Self {
            id: segment.id,
            segment_name: segment.segment_name,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct BrandRequest {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub brand_name: Option<Option<String>>,
}

impl From<BrandRequest> for NameInput {
    fn from(body: BrandRequest) -> Self {
        NameInput::from_nullable(body.brand_name)
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct BrandResponse {
    pub id: i64,
    pub brand_name: String,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        Self {
            id: brand.id,
            brand_name: brand.brand_name,
        }
    }
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// Vehicle payload. Unknown keys, including `user`, are ignored.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct VehicleRequest {
    #[serde(default)]
    pub vehicle_name: Option<String>,
    /// Integer or numeric string.
    #[serde(default, deserialize_with = "release_year")]
    #[schema(value_type = Option<i32>)]
    pub release_year: Option<i32>,
    /// Decimal with at most two fraction digits, as a string or number.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "500.12")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "reference_id")]
    #[schema(value_type = Option<i64>)]
    pub segment: Option<Option<i64>>,
    #[serde(default, deserialize_with = "reference_id")]
    #[schema(value_type = Option<i64>)]
    pub brand: Option<Option<i64>>,
}

impl From<VehicleRequest> for VehicleInput {
    fn from(body: VehicleRequest) -> Self {
        Self {
            vehicle_name: body.vehicle_name,
            release_year: body.release_year,
            price: body.price,
            segment: body.segment,
            brand: body.brand,
        }
    }
}

/// Present keys become `Some(_)`, so an explicit `null` is `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// An integer as sent by form-style clients: a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInt {
    Int(i64),
    Text(String),
}

impl RawInt {
    /// `Ok(None)` for a blank string.
    fn parse(self) -> Result<Option<i64>, String> {
        match self {
            RawInt::Int(value) => Ok(Some(value)),
            RawInt::Text(text) if text.trim().is_empty() => Ok(None),
            RawInt::Text(text) => text.trim().parse().map(Some).map_err(|_| text),
        }
    }
}

/// Present keys become `Some(_)`; `null` and `""` become `Some(None)`.
fn reference_id<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<RawInt>::deserialize(deserializer)? {
        None => None,
        Some(raw) => raw.parse().map_err(|text| {
            serde::de::Error::custom(format!(
                "Incorrect type. Expected pk value, received \"{text}\"."
            ))
        })?,
    };
    Ok(Some(id))
}

fn release_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid = || serde::de::Error::custom("release_year: A valid integer is required.");
    let Some(raw) = Option::<RawInt>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(Some(year)) => i32::try_from(year).map(Some).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VehicleResponse {
    pub id: i64,
    /// Owner id; set from the authenticated caller.
    pub user: i64,
    pub vehicle_name: String,
    pub release_year: i32,
    #[schema(value_type = String, example = "500.12")]
    pub price: Decimal,
    pub segment: i64,
    pub brand: i64,
    pub segment_name: String,
    pub brand_name: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            user: vehicle.user,
            vehicle_name: vehicle.vehicle_name,
            release_year: vehicle.release_year,
            price: vehicle.price,
            segment: vehicle.segment,
            brand: vehicle.brand,
            segment_name: vehicle.segment_name,
            brand_name: vehicle.brand_name,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field name to messages, present on validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub fields: Option<ValidationErrors>,
}

/// Bare message body used by disabled methods.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
