use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use dealerdesk_application::{InventoryRecord, InventoryRepository};
use dealerdesk_core::{AppError, AppResult, InventoryId, TenantId};

use crate::postgres_errors::constraint_or_internal;

/// PostgreSQL-backed inventory repository.
#[derive(Clone)]
pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    name: String,
    location: Option<String>,
    status: Option<String>,
    total_area: Option<f64>,
    covered_area: Option<f64>,
    opened_on: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InventoryRow> for InventoryRecord {
    fn from(row: InventoryRow) -> Self {
        Self {
            id: InventoryId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            name: row.name,
            location: row.location,
            status: row.status,
            total_area: row.total_area,
            covered_area: row.covered_area,
            opened_on: row.opened_on,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn list(&self, tenant_id: TenantId) -> AppResult<Vec<InventoryRecord>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, tenant_id, name, location, status, total_area, covered_area, opened_on,
                   created_at, updated_at
            FROM inventories
            WHERE tenant_id = $1
            ORDER BY name, id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list inventories: {error}")))?;

        Ok(rows.into_iter().map(InventoryRecord::from).collect())
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<Option<InventoryRecord>> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, tenant_id, name, location, status, total_area, covered_area, opened_on,
                   created_at, updated_at
            FROM inventories
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(inventory_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find inventory: {error}")))?;

        Ok(row.map(InventoryRecord::from))
    }

    async fn create(&self, inventory: InventoryRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventories (
                id, tenant_id, name, location, status, total_area, covered_area, opened_on,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(inventory.id.as_uuid())
        .bind(inventory.tenant_id.as_uuid())
        .bind(inventory.name.as_str())
        .bind(inventory.location.as_deref())
        .bind(inventory.status.as_deref())
        .bind(inventory.total_area)
        .bind(inventory.covered_area)
        .bind(inventory.opened_on)
        .bind(inventory.created_at)
        .bind(inventory.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create inventory"))?;

        Ok(())
    }

    async fn update(&self, inventory: InventoryRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE inventories
            SET name = $3, location = $4, status = $5, total_area = $6, covered_area = $7,
                opened_on = $8, updated_at = $9
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(inventory.tenant_id.as_uuid())
        .bind(inventory.id.as_uuid())
        .bind(inventory.name.as_str())
        .bind(inventory.location.as_deref())
        .bind(inventory.status.as_deref())
        .bind(inventory.total_area)
        .bind(inventory.covered_area)
        .bind(inventory.opened_on)
        .bind(inventory.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update inventory"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "inventory '{}' not found",
                inventory.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, inventory_id: InventoryId) -> AppResult<bool> {
        // vehicles.inventory_id is ON DELETE RESTRICT.
        let result = sqlx::query("DELETE FROM inventories WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id.as_uuid())
            .bind(inventory_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| constraint_or_internal(error, "delete inventory"))?;

        Ok(result.rows_affected() > 0)
    }
}
