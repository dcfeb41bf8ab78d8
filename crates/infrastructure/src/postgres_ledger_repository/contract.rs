use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_application::{ContractFilter, ContractRecord, LedgerRecord, LedgerRepository};
use dealerdesk_core::{AppResult, ContractId, TenantId, UserId, VehicleId};

use super::{PostgresLedgerRepository, ensure_updated, find_error, list_error};
use crate::postgres_errors::constraint_or_internal;

const CONTRACT_COLUMNS: &str = "id, tenant_id, vehicle_id, responsible_user_id, starts_on, \
                                ends_on, weekly_rate, daily_rate, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ContractRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    vehicle_id: uuid::Uuid,
    responsible_user_id: uuid::Uuid,
    starts_on: NaiveDate,
    ends_on: Option<NaiveDate>,
    weekly_rate: Option<f64>,
    daily_rate: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContractRow> for ContractRecord {
    fn from(row: ContractRow) -> Self {
        Self {
            id: ContractId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            vehicle_id: VehicleId::from_uuid(row.vehicle_id),
            responsible_user_id: UserId::from_uuid(row.responsible_user_id),
            starts_on: row.starts_on,
            ends_on: row.ends_on,
            weekly_rate: row.weekly_rate,
            daily_rate: row.daily_rate,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LedgerRepository<ContractRecord> for PostgresLedgerRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &ContractFilter,
    ) -> AppResult<Vec<ContractRecord>> {
        let rows = sqlx::query_as::<_, ContractRow>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts
            WHERE tenant_id = $1
              AND ($2::UUID IS NULL OR vehicle_id = $2)
              AND (
                $3::DATE IS NULL
                OR (starts_on <= $3 AND (ends_on IS NULL OR ends_on >= $3))
              )
            ORDER BY created_at, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.vehicle_id.map(|id| id.as_uuid()))
        .bind(filter.active_on)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| list_error(ContractRecord::LABEL, error))?;

        Ok(rows.into_iter().map(ContractRecord::from).collect())
    }

    async fn find(&self, tenant_id: TenantId, id: ContractId) -> AppResult<Option<ContractRecord>> {
        let row = sqlx::query_as::<_, ContractRow>(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| find_error(ContractRecord::LABEL, error))?;

        Ok(row.map(ContractRecord::from))
    }

    async fn create(&self, contract: ContractRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, tenant_id, vehicle_id, responsible_user_id, starts_on, ends_on,
                weekly_rate, daily_rate, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(contract.id.as_uuid())
        .bind(contract.tenant_id.as_uuid())
        .bind(contract.vehicle_id.as_uuid())
        .bind(contract.responsible_user_id.as_uuid())
        .bind(contract.starts_on)
        .bind(contract.ends_on)
        .bind(contract.weekly_rate)
        .bind(contract.daily_rate)
        .bind(contract.created_at)
        .bind(contract.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create contract"))?;

        Ok(())
    }

    async fn update(&self, contract: ContractRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET vehicle_id = $3, responsible_user_id = $4, starts_on = $5, ends_on = $6,
                weekly_rate = $7, daily_rate = $8, updated_at = $9
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(contract.tenant_id.as_uuid())
        .bind(contract.id.as_uuid())
        .bind(contract.vehicle_id.as_uuid())
        .bind(contract.responsible_user_id.as_uuid())
        .bind(contract.starts_on)
        .bind(contract.ends_on)
        .bind(contract.weekly_rate)
        .bind(contract.daily_rate)
        .bind(contract.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update contract"))?;

        ensure_updated(&result, ContractRecord::LABEL, contract.id)
    }

    async fn delete(&self, tenant_id: TenantId, id: ContractId) -> AppResult<bool> {
        self.delete_row("contracts", ContractRecord::LABEL, tenant_id, id.as_uuid())
            .await
    }
}
