use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_application::{
    LedgerRecord, LedgerRepository, MaintenanceFilter, MaintenanceRecord,
};
use dealerdesk_core::{AppResult, MaintenanceId, TenantId, UserId, VehicleId};

use super::{PostgresLedgerRepository, ensure_updated, find_error, list_error};
use crate::postgres_errors::constraint_or_internal;

const MAINTENANCE_COLUMNS: &str = "id, tenant_id, vehicle_id, responsible_user_id, kind, \
                                   performed_on, odometer, parts, services, invoice_number, \
                                   workshop, cost, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct MaintenanceRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    vehicle_id: uuid::Uuid,
    responsible_user_id: Option<uuid::Uuid>,
    kind: String,
    performed_on: Option<NaiveDate>,
    odometer: Option<i64>,
    parts: Option<String>,
    services: Option<String>,
    invoice_number: Option<String>,
    workshop: Option<String>,
    cost: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MaintenanceRow> for MaintenanceRecord {
    fn from(row: MaintenanceRow) -> Self {
        Self {
            id: MaintenanceId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            vehicle_id: VehicleId::from_uuid(row.vehicle_id),
            responsible_user_id: row.responsible_user_id.map(UserId::from_uuid),
            kind: row.kind,
            performed_on: row.performed_on,
            odometer: row.odometer,
            parts: row.parts,
            services: row.services,
            invoice_number: row.invoice_number,
            workshop: row.workshop,
            cost: row.cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LedgerRepository<MaintenanceRecord> for PostgresLedgerRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &MaintenanceFilter,
    ) -> AppResult<Vec<MaintenanceRecord>> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(&format!(
            r#"
            SELECT {MAINTENANCE_COLUMNS}
            FROM maintenances
            WHERE tenant_id = $1
              AND ($2::UUID IS NULL OR vehicle_id = $2)
            ORDER BY created_at, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.vehicle_id.map(|id| id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| list_error(MaintenanceRecord::LABEL, error))?;

        Ok(rows.into_iter().map(MaintenanceRecord::from).collect())
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        id: MaintenanceId,
    ) -> AppResult<Option<MaintenanceRecord>> {
        let row = sqlx::query_as::<_, MaintenanceRow>(&format!(
            "SELECT {MAINTENANCE_COLUMNS} FROM maintenances WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| find_error(MaintenanceRecord::LABEL, error))?;

        Ok(row.map(MaintenanceRecord::from))
    }

    async fn create(&self, maintenance: MaintenanceRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO maintenances (
                id, tenant_id, vehicle_id, responsible_user_id, kind, performed_on, odometer,
                parts, services, invoice_number, workshop, cost, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(maintenance.id.as_uuid())
        .bind(maintenance.tenant_id.as_uuid())
        .bind(maintenance.vehicle_id.as_uuid())
        .bind(maintenance.responsible_user_id.map(|id| id.as_uuid()))
        .bind(maintenance.kind.as_str())
        .bind(maintenance.performed_on)
        .bind(maintenance.odometer)
        .bind(maintenance.parts.as_deref())
        .bind(maintenance.services.as_deref())
        .bind(maintenance.invoice_number.as_deref())
        .bind(maintenance.workshop.as_deref())
        .bind(maintenance.cost)
        .bind(maintenance.created_at)
        .bind(maintenance.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create maintenance"))?;

        Ok(())
    }

    async fn update(&self, maintenance: MaintenanceRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE maintenances
            SET vehicle_id = $3, responsible_user_id = $4, kind = $5, performed_on = $6,
                odometer = $7, parts = $8, services = $9, invoice_number = $10,
                workshop = $11, cost = $12, updated_at = $13
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(maintenance.tenant_id.as_uuid())
        .bind(maintenance.id.as_uuid())
        .bind(maintenance.vehicle_id.as_uuid())
        .bind(maintenance.responsible_user_id.map(|id| id.as_uuid()))
        .bind(maintenance.kind.as_str())
        .bind(maintenance.performed_on)
        .bind(maintenance.odometer)
        .bind(maintenance.parts.as_deref())
        .bind(maintenance.services.as_deref())
        .bind(maintenance.invoice_number.as_deref())
        .bind(maintenance.workshop.as_deref())
        .bind(maintenance.cost)
        .bind(maintenance.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update maintenance"))?;

        ensure_updated(&result, MaintenanceRecord::LABEL, maintenance.id)
    }

    async fn delete(&self, tenant_id: TenantId, id: MaintenanceId) -> AppResult<bool> {
        self.delete_row(
            "maintenances",
            MaintenanceRecord::LABEL,
            tenant_id,
            id.as_uuid(),
        )
        .await
    }
}
