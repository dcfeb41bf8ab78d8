use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_application::{LedgerRecord, LedgerRepository, PaymentFilter, PaymentRecord};
use dealerdesk_core::{AppResult, BankAccountId, PaymentId, TenantId};

use super::{PostgresLedgerRepository, ensure_updated, find_error, list_error};
use crate::postgres_errors::constraint_or_internal;

const PAYMENT_COLUMNS: &str =
    "id, tenant_id, paid_on, amount, method, debited_account_id, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    paid_on: Option<NaiveDate>,
    amount: f64,
    method: Option<String>,
    debited_account_id: Option<uuid::Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PaymentRow> for PaymentRecord {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: PaymentId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            paid_on: row.paid_on,
            amount: row.amount,
            method: row.method,
            debited_account_id: row.debited_account_id.map(BankAccountId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LedgerRepository<PaymentRecord> for PostgresLedgerRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &PaymentFilter,
    ) -> AppResult<Vec<PaymentRecord>> {
        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE tenant_id = $1
              AND ($2::UUID IS NULL OR debited_account_id = $2)
            ORDER BY created_at, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.debited_account_id.map(|id| id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| list_error(PaymentRecord::LABEL, error))?;

        Ok(rows.into_iter().map(PaymentRecord::from).collect())
    }

    async fn find(&self, tenant_id: TenantId, id: PaymentId) -> AppResult<Option<PaymentRecord>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| find_error(PaymentRecord::LABEL, error))?;

        Ok(row.map(PaymentRecord::from))
    }

    async fn create(&self, payment: PaymentRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, tenant_id, paid_on, amount, method, debited_account_id, created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.tenant_id.as_uuid())
        .bind(payment.paid_on)
        .bind(payment.amount)
        .bind(payment.method.as_deref())
        .bind(payment.debited_account_id.map(|id| id.as_uuid()))
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create payment"))?;

        Ok(())
    }

    async fn update(&self, payment: PaymentRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET paid_on = $3, amount = $4, method = $5, debited_account_id = $6,
                updated_at = $7
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(payment.tenant_id.as_uuid())
        .bind(payment.id.as_uuid())
        .bind(payment.paid_on)
        .bind(payment.amount)
        .bind(payment.method.as_deref())
        .bind(payment.debited_account_id.map(|id| id.as_uuid()))
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update payment"))?;

        ensure_updated(&result, PaymentRecord::LABEL, payment.id)
    }

    async fn delete(&self, tenant_id: TenantId, id: PaymentId) -> AppResult<bool> {
        self.delete_row("payments", PaymentRecord::LABEL, tenant_id, id.as_uuid())
            .await
    }
}
