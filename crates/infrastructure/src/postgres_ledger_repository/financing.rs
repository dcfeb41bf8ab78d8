use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_application::{FinancingFilter, FinancingRecord, LedgerRecord, LedgerRepository};
use dealerdesk_core::{AppResult, ClientId, FinancingId, SaleId, TenantId};

use super::{PostgresLedgerRepository, ensure_updated, find_error, list_error};
use crate::postgres_errors::constraint_or_internal;

const FINANCING_COLUMNS: &str = "id, tenant_id, sale_id, client_id, total_amount, down_payment, \
                                 installments, installment_amount, interest_rate, starts_on, \
                                 institution, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct FinancingRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    sale_id: uuid::Uuid,
    client_id: uuid::Uuid,
    total_amount: f64,
    down_payment: Option<f64>,
    installments: i32,
    installment_amount: f64,
    interest_rate: Option<f64>,
    starts_on: Option<NaiveDate>,
    institution: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FinancingRow> for FinancingRecord {
    fn from(row: FinancingRow) -> Self {
        Self {
            id: FinancingId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            sale_id: SaleId::from_uuid(row.sale_id),
            client_id: ClientId::from_uuid(row.client_id),
            total_amount: row.total_amount,
            down_payment: row.down_payment,
            installments: row.installments,
            installment_amount: row.installment_amount,
            interest_rate: row.interest_rate,
            starts_on: row.starts_on,
            institution: row.institution,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LedgerRepository<FinancingRecord> for PostgresLedgerRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &FinancingFilter,
    ) -> AppResult<Vec<FinancingRecord>> {
        let rows = sqlx::query_as::<_, FinancingRow>(&format!(
            r#"
            SELECT {FINANCING_COLUMNS}
            FROM financings
            WHERE tenant_id = $1
              AND ($2::UUID IS NULL OR client_id = $2)
              AND ($3::UUID IS NULL OR sale_id = $3)
            ORDER BY created_at, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.client_id.map(|id| id.as_uuid()))
        .bind(filter.sale_id.map(|id| id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| list_error(FinancingRecord::LABEL, error))?;

        Ok(rows.into_iter().map(FinancingRecord::from).collect())
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        id: FinancingId,
    ) -> AppResult<Option<FinancingRecord>> {
        let row = sqlx::query_as::<_, FinancingRow>(&format!(
            "SELECT {FINANCING_COLUMNS} FROM financings WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| find_error(FinancingRecord::LABEL, error))?;

        Ok(row.map(FinancingRecord::from))
    }

    async fn create(&self, financing: FinancingRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO financings (
                id, tenant_id, sale_id, client_id, total_amount, down_payment, installments,
                installment_amount, interest_rate, starts_on, institution, created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(financing.id.as_uuid())
        .bind(financing.tenant_id.as_uuid())
        .bind(financing.sale_id.as_uuid())
        .bind(financing.client_id.as_uuid())
        .bind(financing.total_amount)
        .bind(financing.down_payment)
        .bind(financing.installments)
        .bind(financing.installment_amount)
        .bind(financing.interest_rate)
        .bind(financing.starts_on)
        .bind(financing.institution.as_deref())
        .bind(financing.created_at)
        .bind(financing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create financing"))?;

        Ok(())
    }

    async fn update(&self, financing: FinancingRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE financings
            SET sale_id = $3, client_id = $4, total_amount = $5, down_payment = $6,
                installments = $7, installment_amount = $8, interest_rate = $9,
                starts_on = $10, institution = $11, updated_at = $12
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(financing.tenant_id.as_uuid())
        .bind(financing.id.as_uuid())
        .bind(financing.sale_id.as_uuid())
        .bind(financing.client_id.as_uuid())
        .bind(financing.total_amount)
        .bind(financing.down_payment)
        .bind(financing.installments)
        .bind(financing.installment_amount)
        .bind(financing.interest_rate)
        .bind(financing.starts_on)
        .bind(financing.institution.as_deref())
        .bind(financing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update financing"))?;

        ensure_updated(&result, FinancingRecord::LABEL, financing.id)
    }

    async fn delete(&self, tenant_id: TenantId, id: FinancingId) -> AppResult<bool> {
        self.delete_row("financings", FinancingRecord::LABEL, tenant_id, id.as_uuid())
            .await
    }
}
