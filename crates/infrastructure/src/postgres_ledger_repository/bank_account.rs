use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_application::{
    BankAccountFilter, BankAccountRecord, LedgerRecord, LedgerRepository,
};
use dealerdesk_core::{AppError, AppResult, BankAccountId, TenantId};
use dealerdesk_domain::TaxId;

use super::{PostgresLedgerRepository, ensure_updated, find_error, list_error};
use crate::postgres_errors::constraint_or_internal;

const BANK_ACCOUNT_COLUMNS: &str = "id, tenant_id, bank_code, account_number, account_digit, \
                                    branch_number, branch_digit, bank_name, account_type, \
                                    holder_name, holder_tax_id, status, opened_on, created_at, \
                                    updated_at";

#[derive(Debug, sqlx::FromRow)]
struct BankAccountRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    bank_code: String,
    account_number: String,
    account_digit: Option<String>,
    branch_number: Option<String>,
    branch_digit: Option<String>,
    bank_name: Option<String>,
    account_type: Option<String>,
    holder_name: Option<String>,
    holder_tax_id: Option<String>,
    status: Option<String>,
    opened_on: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BankAccountRow> for BankAccountRecord {
    type Error = AppError;

    fn try_from(row: BankAccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BankAccountId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            bank_code: row.bank_code,
            account_number: row.account_number,
            account_digit: row.account_digit,
            branch_number: row.branch_number,
            branch_digit: row.branch_digit,
            bank_name: row.bank_name,
            account_type: row.account_type,
            holder_name: row.holder_name,
            holder_tax_id: row.holder_tax_id.map(TaxId::new).transpose()?,
            status: row.status,
            opened_on: row.opened_on,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl LedgerRepository<BankAccountRecord> for PostgresLedgerRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &BankAccountFilter,
    ) -> AppResult<Vec<BankAccountRecord>> {
        let rows = sqlx::query_as::<_, BankAccountRow>(&format!(
            r#"
            SELECT {BANK_ACCOUNT_COLUMNS}
            FROM bank_accounts
            WHERE tenant_id = $1
              AND ($2::TEXT IS NULL OR bank_name ILIKE '%' || $2 || '%')
            ORDER BY created_at, id
            "#
        ))
        .bind(tenant_id.as_uuid())
        .bind(filter.bank_name.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| list_error(BankAccountRecord::LABEL, error))?;

        rows.into_iter().map(BankAccountRecord::try_from).collect()
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        id: BankAccountId,
    ) -> AppResult<Option<BankAccountRecord>> {
        let row = sqlx::query_as::<_, BankAccountRow>(&format!(
            "SELECT {BANK_ACCOUNT_COLUMNS} FROM bank_accounts WHERE tenant_id = $1 AND id = $2"
        ))
        .bind(tenant_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| find_error(BankAccountRecord::LABEL, error))?;

        row.map(BankAccountRecord::try_from).transpose()
    }

    async fn create(&self, account: BankAccountRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bank_accounts (
                id, tenant_id, bank_code, account_number, account_digit, branch_number,
                branch_digit, bank_name, account_type, holder_name, holder_tax_id, status,
                opened_on, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.tenant_id.as_uuid())
        .bind(account.bank_code.as_str())
        .bind(account.account_number.as_str())
        .bind(account.account_digit.as_deref())
        .bind(account.branch_number.as_deref())
        .bind(account.branch_digit.as_deref())
        .bind(account.bank_name.as_deref())
        .bind(account.account_type.as_deref())
        .bind(account.holder_name.as_deref())
        .bind(account.holder_tax_id.as_ref().map(TaxId::as_str))
        .bind(account.status.as_deref())
        .bind(account.opened_on)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "create bank account"))?;

        Ok(())
    }

    async fn update(&self, account: BankAccountRecord) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE bank_accounts
            SET bank_code = $3, account_number = $4, account_digit = $5, branch_number = $6,
                branch_digit = $7, bank_name = $8, account_type = $9, holder_name = $10,
                holder_tax_id = $11, status = $12, opened_on = $13, updated_at = $14
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(account.tenant_id.as_uuid())
        .bind(account.id.as_uuid())
        .bind(account.bank_code.as_str())
        .bind(account.account_number.as_str())
        .bind(account.account_digit.as_deref())
        .bind(account.branch_number.as_deref())
        .bind(account.branch_digit.as_deref())
        .bind(account.bank_name.as_deref())
        .bind(account.account_type.as_deref())
        .bind(account.holder_name.as_deref())
        .bind(account.holder_tax_id.as_ref().map(TaxId::as_str))
        .bind(account.status.as_deref())
        .bind(account.opened_on)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| constraint_or_internal(error, "update bank account"))?;

        ensure_updated(&result, BankAccountRecord::LABEL, account.id)
    }

    async fn delete(&self, tenant_id: TenantId, id: BankAccountId) -> AppResult<bool> {
        self.delete_row(
            "bank_accounts",
            BankAccountRecord::LABEL,
            tenant_id,
            id.as_uuid(),
        )
        .await
    }
}
