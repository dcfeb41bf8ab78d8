use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_application::{LedgerRecord, LedgerRepository, ReceiptFilter, ReceiptRecord};
use dealerdesk_core::{AppResult, BankAccountId, ClientId, ContractId, ReceiptId, SaleId, TenantId};

use super::{PostgresLedgerRepository, ensure_updated, find_error, list_error};
use crate::postgres_errors::constraint_or_internal;

const RECEIPT_COLUMNS: &str = "id, tenant_id, received_on, amount, method, credited_account_id, \
                               sale_id, contract_id, client_id, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ReceiptRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    received_on: Option<NaiveDate>,
    amount: f64,
    method: Option<String>,
    credited_account_id: Option<uuid::Uuid>,
    sale_id: Option<uuid::Uuid>,
    contract_id: Option<uuid::Uuid>,
    client_id: Option<uuid::Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReceiptRow> for ReceiptRecord {
    fn from(row: ReceiptRow) -> Self {
        Self {
            id: ReceiptId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            received_on: row.received_on,
            amount: row.amount,
            method: row.method,
            credited_account_id: row.credited_account_id.map(BankAccountId::from_uuid),
            sale_id: row.sale_id.map(SaleId::from_uuid),
            contract_id: row.contract_id.map(ContractId::from_uuid),
            client_id: row.client_id.map(ClientId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LedgerRepository<ReceiptRecord> for PostgresLedgerRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &ReceiptFilter,
    ) -> AppResult<Vec<ReceiptRecord>> {
        let rows = sqlx::query_as::<_, ReceiptRow>(&format!(
            r#"
            SELECT {RECEIPT_COLUMNS}
            FROM receipts
            WHERE tenant_id = $1
              AND ($2::UUID IS NULL OR sale_id = $2)
              AND ($3::UUID IS NULL OR contract_id = $3)
              AND ($4::UUID IS NULL OR client_id = $4)
            ORDER BY created_at, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.sale_id.map(|id| id.as_uuid()))
        .bind(filter.contract_id.map(|id| id.as_uuid()))
        .bind(filter.client_id.map(|id| id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| list_error(ReceiptRecord::LABEL, error))?;

        Ok(rows.into_iter().map(ReceiptRecord::from).collect())
    }

    async fn find(&self, tenant_id: TenantId, id: ReceiptId) -> AppResult<Option<ReceiptRecord>> {
        let row = sqlx::query_as::<_, ReceiptRow>(&format!(
            "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| find_error(ReceiptRecord::LABEL, error))?;

        Ok(row.map(ReceiptRecord::from))
    }

    async fn create(&self, receipt: ReceiptRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, tenant_id, received_on, amount, method, credited_account_id, sale_id,
                contract_id, client_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(receipt.id.as_uuid())
        .bind(receipt.tenant_id.as_uuid())
        .bind(receipt.received_on)
        .bind(receipt.amount)
        .bind(receipt.method.as_deref())
        .bind(receipt.credited_account_id.map(|id| id.as_uuid()))
        .bind(receipt.sale_id.map(|id| id.as_uuid()))
        .bind(receipt.contract_id.map(|id| id.as_uuid()))
        .bind(receipt.client_id.map(|id| id.as_uuid()))
        .bind(receipt.created_at)
        .bind(receipt.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create receipt"))?;

        Ok(())
    }

    async fn update(&self, receipt: ReceiptRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE receipts
            SET received_on = $3, amount = $4, method = $5, credited_account_id = $6,
                sale_id = $7, contract_id = $8, client_id = $9, updated_at = $10
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(receipt.tenant_id.as_uuid())
        .bind(receipt.id.as_uuid())
        .bind(receipt.received_on)
        .bind(receipt.amount)
        .bind(receipt.method.as_deref())
        .bind(receipt.credited_account_id.map(|id| id.as_uuid()))
        .bind(receipt.sale_id.map(|id| id.as_uuid()))
        .bind(receipt.contract_id.map(|id| id.as_uuid()))
        .bind(receipt.client_id.map(|id| id.as_uuid()))
        .bind(receipt.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update receipt"))?;

        ensure_updated(&result, ReceiptRecord::LABEL, receipt.id)
    }

    async fn delete(&self, tenant_id: TenantId, id: ReceiptId) -> AppResult<bool> {
        self.delete_row("receipts", ReceiptRecord::LABEL, tenant_id, id.as_uuid())
            .await
    }
}
