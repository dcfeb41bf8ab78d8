use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dealerdesk_application::{VehicleRecord, VehicleRepository};
use dealerdesk_core::{AppError, AppResult, InventoryId, TenantId, VehicleId};
use dealerdesk_domain::{LicensePlate, TaxId};

use crate::postgres_errors::constraint_or_internal;

const VEHICLE_COLUMNS: &str = "id, tenant_id, inventory_id, plate, chassis, renavam, brand, model, \
                               color, engine_number, status, manufacture_year, model_year, doors, \
                               owner_tax_id, mileage, entry_value, fipe_value, created_at, \
                               updated_at";

/// PostgreSQL-backed vehicle repository.
#[derive(Clone)]
pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_column(
        &self,
        tenant_id: TenantId,
        column: &'static str,
        value: &str,
    ) -> AppResult<Option<VehicleRecord>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE tenant_id = $1 AND {column} = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find vehicle by {column}: {error}"))
        })?;

        row.map(VehicleRecord::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    inventory_id: uuid::Uuid,
    plate: String,
    chassis: String,
    renavam: Option<String>,
    brand: String,
    model: String,
    color: Option<String>,
    engine_number: Option<String>,
    status: Option<String>,
    manufacture_year: Option<i32>,
    model_year: Option<i32>,
    doors: Option<i32>,
    owner_tax_id: Option<String>,
    mileage: Option<i64>,
    entry_value: Option<f64>,
    fipe_value: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for VehicleRecord {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VehicleId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            inventory_id: InventoryId::from_uuid(row.inventory_id),
            plate: LicensePlate::new(row.plate)?,
            chassis: row.chassis,
            renavam: row.renavam,
            brand: row.brand,
            model: row.model,
            color: row.color,
            engine_number: row.engine_number,
            status: row.status,
            manufacture_year: row.manufacture_year,
            model_year: row.model_year,
            doors: row.doors,
            owner_tax_id: row.owner_tax_id.map(TaxId::new).transpose()?,
            mileage: row.mileage,
            entry_value: row.entry_value,
            fipe_value: row.fipe_value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        search: Option<&str>,
    ) -> AppResult<Vec<VehicleRecord>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS}
            FROM vehicles
            WHERE tenant_id = $1
              AND (
                $2::TEXT IS NULL
                OR plate ILIKE '%' || $2 || '%'
                OR brand ILIKE '%' || $2 || '%'
                OR model ILIKE '%' || $2 || '%'
              )
            ORDER BY plate, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list vehicles: {error}")))?;

        rows.into_iter().map(VehicleRecord::try_from).collect()
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        vehicle_id: VehicleId,
    ) -> AppResult<Option<VehicleRecord>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(vehicle_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find vehicle: {error}")))?;

        row.map(VehicleRecord::try_from).transpose()
    }

    async fn find_by_plate(
        &self,
        tenant_id: TenantId,
        plate: &LicensePlate,
    ) -> AppResult<Option<VehicleRecord>> {
        self.find_by_column(tenant_id, "plate", plate.as_str()).await
    }

    async fn find_by_chassis(
        &self,
        tenant_id: TenantId,
        chassis: &str,
    ) -> AppResult<Option<VehicleRecord>> {
        self.find_by_column(tenant_id, "chassis", chassis).await
    }

    async fn find_by_renavam(
        &self,
        tenant_id: TenantId,
        renavam: &str,
    ) -> AppResult<Option<VehicleRecord>> {
        self.find_by_column(tenant_id, "renavam", renavam).await
    }

    async fn count_in_inventory(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM vehicles WHERE tenant_id = $1 AND inventory_id = $2",
        )
        .bind(tenant_id.as_uuid())
        .bind(inventory_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to count vehicles: {error}")))?;

        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("invalid vehicle count: {error}")))
    }

    async fn create(&self, vehicle: VehicleRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, tenant_id, inventory_id, plate, chassis, renavam, brand, model, color,
                engine_number, status, manufacture_year, model_year, doors, owner_tax_id,
                mileage, entry_value, fipe_value, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20)
            "#,
        )
        .bind(vehicle.id.as_uuid())
        .bind(vehicle.tenant_id.as_uuid())
        .bind(vehicle.inventory_id.as_uuid())
        .bind(vehicle.plate.as_str())
        .bind(vehicle.chassis.as_str())
        .bind(vehicle.renavam.as_deref())
        .bind(vehicle.brand.as_str())
        .bind(vehicle.model.as_str())
        .bind(vehicle.color.as_deref())
        .bind(vehicle.engine_number.as_deref())
        .bind(vehicle.status.as_deref())
        .bind(vehicle.manufacture_year)
        .bind(vehicle.model_year)
        .bind(vehicle.doors)
        .bind(vehicle.owner_tax_id.as_ref().map(TaxId::as_str))
        .bind(vehicle.mileage)
        .bind(vehicle.entry_value)
        .bind(vehicle.fipe_value)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create vehicle"))?;

        Ok(())
    }

    async fn update(&self, vehicle: VehicleRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET inventory_id = $3, plate = $4, chassis = $5, renavam = $6, brand = $7,
                model = $8, color = $9, engine_number = $10, status = $11,
                manufacture_year = $12, model_year = $13, doors = $14, owner_tax_id = $15,
                mileage = $16, entry_value = $17, fipe_value = $18, updated_at = $19
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(vehicle.tenant_id.as_uuid())
        .bind(vehicle.id.as_uuid())
        .bind(vehicle.inventory_id.as_uuid())
        .bind(vehicle.plate.as_str())
        .bind(vehicle.chassis.as_str())
        .bind(vehicle.renavam.as_deref())
        .bind(vehicle.brand.as_str())
        .bind(vehicle.model.as_str())
        .bind(vehicle.color.as_deref())
        .bind(vehicle.engine_number.as_deref())
        .bind(vehicle.status.as_deref())
        .bind(vehicle.manufacture_year)
        .bind(vehicle.model_year)
        .bind(vehicle.doors)
        .bind(vehicle.owner_tax_id.as_ref().map(TaxId::as_str))
        .bind(vehicle.mileage)
        .bind(vehicle.entry_value)
        .bind(vehicle.fipe_value)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update vehicle"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("vehicle '{}' not found", vehicle.id)));
        }

        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, vehicle_id: VehicleId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id.as_uuid())
            .bind(vehicle_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| constraint_or_internal(error, "delete vehicle"))?;

        Ok(result.rows_affected() > 0)
    }
}
