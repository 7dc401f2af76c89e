//! Client-submitted payloads and the rules that turn them into validated values.
//!
//! Every field is optional at this layer so that the same input type serves
//! create, full update, and partial update: full checks require each field,
//! partial checks validate only what was sent.

use rust_decimal::Decimal;

use crate::error::AppError;
use crate::models::{Category, NewVehicle, VehicleChanges};
use crate::validation::{self, NULL, REQUIRED, ValidationErrors};

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 5;
pub const NAME_MAX_LEN: usize = 100;
/// NUMERIC(6,2): four integer digits, two fraction digits.
pub const PRICE_SCALE: u32 = 2;
pub const PRICE_INTEGER_DIGITS: u32 = 4;

/// Registration request.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Registration {
    /// Returns `(username, password)` when both satisfy the account rules.
    pub fn validate(self) -> Result<(String, String), AppError> {
        let mut errors = ValidationErrors::new();

        let username =
            validation::required_text(&mut errors, "username", self.username, USERNAME_MAX_LEN);
        if let Some(name) = &username
            && !name.chars().all(is_username_char)
        {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        let password = match self.password {
            None => {
                errors.add("password", REQUIRED);
                None
            }
            Some(p) if p.trim().is_empty() => {
                errors.add("password", validation::BLANK);
                None
            }
            Some(p) if p.chars().count() < PASSWORD_MIN_LEN => {
                errors.add(
                    "password",
                    format!("Ensure this field has at least {PASSWORD_MIN_LEN} characters."),
                );
                None
            }
            Some(p) => Some(p),
        };

        errors.into_result()?;
        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::invalid("non_field_errors", "Incomplete registration.")),
        }
    }
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

/// Token request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Both fields must be present and non-blank. Length rules are not applied
    /// here; a wrong password is reported as rejected credentials instead.
    pub fn validate(self) -> Result<(String, String), AppError> {
        let mut errors = ValidationErrors::new();
        let username = present(&mut errors, "username", self.username);
        let password = present(&mut errors, "password", self.password);
        errors.into_result()?;
        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}

fn present(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(v) if v.is_empty() => {
            errors.add(field, validation::BLANK);
            None
        }
        Some(v) => Some(v),
    }
}

/// Segment or brand payload; `name` carries the category's name field.
///
/// An absent key is `None`; an explicit `null` is `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct NameInput {
    pub name: Option<Option<String>>,
}

impl NameInput {
    /// A payload that either sent a name or left the key out.
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.map(Some),
        }
    }

    pub fn from_nullable(name: Option<Option<String>>) -> Self {
        Self { name }
    }

    pub fn validate_full<C: Category>(self) -> Result<String, AppError> {
        let mut errors = ValidationErrors::new();
        let name = match self.name {
            Some(None) => {
                errors.add(C::NAME_FIELD, NULL);
                None
            }
            value => validation::required_text(
                &mut errors,
                C::NAME_FIELD,
                value.flatten(),
                NAME_MAX_LEN,
            ),
        };
        errors.into_result()?;
        name.ok_or_else(|| AppError::invalid(C::NAME_FIELD, REQUIRED))
    }

    pub fn validate_partial<C: Category>(self) -> Result<Option<String>, AppError> {
        let mut errors = ValidationErrors::new();
        let name = match self.name {
            Some(None) => {
                errors.add(C::NAME_FIELD, NULL);
                None
            }
            value => validation::optional_text(
                &mut errors,
                C::NAME_FIELD,
                value.flatten(),
                NAME_MAX_LEN,
            ),
        };
        errors.into_result()?;
        Ok(name)
    }
}

/// Vehicle payload.
///
/// `segment` and `brand` distinguish an absent key (`None`) from an explicit
/// blank or null value (`Some(None)`). Any owner value the client sends never
/// reaches this type.
#[derive(Debug, Clone, Default)]
pub struct VehicleInput {
    pub vehicle_name: Option<String>,
    pub release_year: Option<i32>,
    pub price: Option<Decimal>,
    pub segment: Option<Option<i64>>,
    pub brand: Option<Option<i64>>,
}

impl VehicleInput {
    /// Require and check every writable field.
    ///
    /// Returns the fields that passed; the caller checks references and then
    /// finishes with [`ValidationErrors::into_result`].
    pub fn check_full(self, errors: &mut ValidationErrors) -> VehicleChanges {
        VehicleChanges {
            vehicle_name: validation::required_text(
                errors,
                "vehicle_name",
                self.vehicle_name,
                NAME_MAX_LEN,
            ),
            release_year: required(errors, "release_year", self.release_year),
            price: required(errors, "price", self.price).and_then(|p| check_price(errors, p)),
            segment: reference(errors, "segment", self.segment, true),
            brand: reference(errors, "brand", self.brand, true),
        }
    }

    /// Check only the fields that were sent.
    pub fn check_partial(self, errors: &mut ValidationErrors) -> VehicleChanges {
        VehicleChanges {
            vehicle_name: validation::optional_text(
                errors,
                "vehicle_name",
                self.vehicle_name,
                NAME_MAX_LEN,
            ),
            release_year: self.release_year,
            price: self.price.and_then(|p| check_price(errors, p)),
            segment: reference(errors, "segment", self.segment, false),
            brand: reference(errors, "brand", self.brand, false),
        }
    }
}

impl VehicleChanges {
    /// Complete changes become an insertable vehicle owned by `owner`.
    pub fn into_new(self, owner: i64) -> Option<NewVehicle> {
        Some(NewVehicle {
            user: owner,
            vehicle_name: self.vehicle_name?,
            release_year: self.release_year?,
            price: self.price?,
            segment: self.segment?,
            brand: self.brand?,
        })
    }
}

fn required<T>(errors: &mut ValidationErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

fn reference(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Option<i64>>,
    required: bool,
) -> Option<i64> {
    match value {
        None => {
            if required {
                errors.add(field, REQUIRED);
            }
            None
        }
        Some(None) => {
            errors.add(field, NULL);
            None
        }
        Some(Some(id)) => Some(id),
    }
}

/// Enforce NUMERIC(6,2) and return the price rescaled to two places.
pub fn check_price(errors: &mut ValidationErrors, price: Decimal) -> Option<Decimal> {
    let normalized = price.normalize();
    if normalized.scale() > PRICE_SCALE {
        errors.add(
            "price",
            format!("Ensure that there are no more than {PRICE_SCALE} decimal places."),
        );
        return None;
    }
    let limit = Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS));
    if normalized.trunc().abs() >= limit {
        errors.add(
            "price",
            format!(
                "Ensure that there are no more than {PRICE_INTEGER_DIGITS} digits before the decimal point."
            ),
        );
        return None;
    }
    let mut rescaled = normalized;
    rescaled.rescale(PRICE_SCALE);
    Some(rescaled)
}
