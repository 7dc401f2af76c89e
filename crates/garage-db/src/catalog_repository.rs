use garage_core::error::AppError;
use garage_core::models::{Category, EntityKind, NewVehicle, Vehicle, VehicleChanges};
use garage_core::traits::CatalogStore;
use rust_decimal::Decimal;
use sqlx::{PgPool, Pool, Postgres};

use crate::error::db_error;

/// Columns of a vehicle with both category names joined in.
const VEHICLE_SELECT: &str = r#"
    SELECT v.id, v.user_id, v.vehicle_name, v.release_year, v.price,
           v.segment_id, v.brand_id, s.segment_name, b.brand_name
    FROM v
    JOIN segments s ON s.id = v.segment_id
    JOIN brands b ON b.id = v.brand_id
"#;

/// Where a category kind lives in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CategoryTable {
    table: &'static str,
    name_column: &'static str,
    /// Foreign key column on `vehicles`.
    vehicle_column: &'static str,
}

impl CategoryTable {
    fn of<C: Category>() -> Result<Self, AppError> {
        match C::KIND {
            EntityKind::Segment => Ok(Self {
                table: "segments",
                name_column: "segment_name",
                vehicle_column: "segment_id",
            }),
            EntityKind::Brand => Ok(Self {
                table: "brands",
                name_column: "brand_name",
                vehicle_column: "brand_id",
            }),
            other => Err(AppError::DatabaseError(format!(
                "{other} is not stored as a category"
            ))),
        }
    }
}

/// Repository for segments, brands, and vehicles.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for CatalogRepository {
    async fn list_categories<C: Category>(&self) -> Result<Vec<C>, AppError> {
        let t = CategoryTable::of::<C>()?;
        let sql = format!(
            "SELECT id, {name} AS name FROM {table} ORDER BY id",
            name = t.name_column,
            table = t.table,
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn get_category<C: Category>(&self, id: i64) -> Result<Option<C>, AppError> {
        let t = CategoryTable::of::<C>()?;
        let sql = format!(
            "SELECT id, {name} AS name FROM {table} WHERE id = $1",
            name = t.name_column,
            table = t.table,
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn insert_category<C: Category>(&self, name: &str) -> Result<C, AppError> {
        let t = CategoryTable::of::<C>()?;
        let sql = format!(
            "INSERT INTO {table} ({name}) VALUES ($1) RETURNING id, {name} AS name",
            name = t.name_column,
            table = t.table,
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.into_category())
    }

    async fn rename_category<C: Category>(
        &self,
        id: i64,
        name: &str,
    ) -> Result<Option<C>, AppError> {
        let t = CategoryTable::of::<C>()?;
        let sql = format!(
            "UPDATE {table} SET {name} = $2 WHERE id = $1 RETURNING id, {name} AS name",
            name = t.name_column,
            table = t.table,
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn delete_category<C: Category>(&self, id: i64) -> Result<Option<u64>, AppError> {
        let t = CategoryTable::of::<C>()?;
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // Row lock blocks concurrent vehicle inserts that reference this row.
        let lock_sql = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", t.table);
        let locked: Option<(i64,)> = sqlx::query_as(&lock_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;
        if locked.is_none() {
            return Ok(None);
        }

        let count_sql = format!(
            "SELECT COUNT(*) FROM vehicles WHERE {} = $1",
            t.vehicle_column
        );
        let (vehicles,): (i64,) = sqlx::query_as(&count_sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error)?;

        let delete_sql = format!("DELETE FROM {} WHERE id = $1", t.table);
        sqlx::query(&delete_sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(Some(vehicles as u64))
    }

    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        let sql = format!("WITH v AS (SELECT * FROM vehicles) {VEHICLE_SELECT} ORDER BY v.id");
        let rows = sqlx::query_as::<_, VehicleRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_vehicle(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let sql = format!("WITH v AS (SELECT * FROM vehicles WHERE id = $1) {VEHICLE_SELECT}");
        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn insert_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        let sql = format!(
            r#"
            WITH v AS (
                INSERT INTO vehicles (user_id, vehicle_name, release_year, price, segment_id, brand_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            {VEHICLE_SELECT}
            "#
        );
        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(vehicle.user)
            .bind(&vehicle.vehicle_name)
            .bind(vehicle.release_year)
            .bind(vehicle.price)
            .bind(vehicle.segment)
            .bind(vehicle.brand)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.into())
    }

    async fn update_vehicle(
        &self,
        id: i64,
        changes: &VehicleChanges,
    ) -> Result<Option<Vehicle>, AppError> {
        let sql = format!(
            r#"
            WITH v AS (
                UPDATE vehicles SET
                    vehicle_name = COALESCE($2, vehicle_name),
                    release_year = COALESCE($3, release_year),
                    price = COALESCE($4, price),
                    segment_id = COALESCE($5, segment_id),
                    brand_id = COALESCE($6, brand_id)
                WHERE id = $1
                RETURNING *
            )
            {VEHICLE_SELECT}
            "#
        );
        let row = sqlx::query_as::<_, VehicleRow>(&sql)
            .bind(id)
            .bind(changes.vehicle_name.as_deref())
            .bind(changes.release_year)
            .bind(changes.price)
            .bind(changes.segment)
            .bind(changes.brand)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete_vehicle(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl CategoryRow {
    fn into_category<C: Category>(self) -> C {
        C::from_parts(self.id, self.name)
    }
}

#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    user_id: i64,
    vehicle_name: String,
    release_year: i32,
    price: Decimal,
    segment_id: i64,
    brand_id: i64,
    segment_name: String,
    brand_name: String,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            user: row.user_id,
            vehicle_name: row.vehicle_name,
            release_year: row.release_year,
            price: row.price,
            segment: row.segment_id,
            brand: row.brand_id,
            segment_name: row.segment_name,
            brand_name: row.brand_name,
        }
    }
}
