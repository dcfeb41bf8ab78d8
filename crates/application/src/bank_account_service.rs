use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppError, AppResult, BankAccountId, TenantId};
use dealerdesk_domain::TaxId;

use crate::ledger_service::LedgerStore;
use crate::user_service::clean;
use crate::{AccessContext, BankAccountFilter, BankAccountRecord, LedgerRepository};


/// Input payload for creating or replacing a bank account.
#[derive(Debug, Clone, Default)]
pub struct SaveBankAccountInput {
    /// Bank number.
    pub bank_code: String,
    /// Account number.
    pub account_number: String,
    /// Account check digit.
    pub account_digit: Option<String>,
    /// Branch number.
    pub branch_number: Option<String>,
    /// Branch check digit.
    pub branch_digit: Option<String>,
    /// Bank display name.
    pub bank_name: Option<String>,
    /// Account type.
    pub account_type: Option<String>,
    /// Holder name.
    pub holder_name: Option<String>,
    /// Holder CPF or CNPJ.
    pub holder_tax_id: Option<String>,
    /// Free-form status.
    pub status: Option<String>,
    /// Opening date.
    pub opened_on: Option<NaiveDate>,
}

/// Application service for tenant bank accounts.
#[derive(Clone)]
pub struct BankAccountService {
    store: LedgerStore<BankAccountRecord>,
}

impl BankAccountService {
    /// Creates a new bank account service.
    #[must_use]
    pub fn new(repository: Arc<dyn LedgerRepository<BankAccountRecord>>) -> Self {
        Self {
            store: LedgerStore::new(repository),
        }
    }

    /// Lists bank accounts of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        filter: BankAccountFilter,
    ) -> AppResult<Vec<BankAccountRecord>> {
        let filter = BankAccountFilter {
            bank_name: clean(filter.bank_name),
        };
        self.store.list(context.tenant_id(), &filter).await
    }

    /// Returns one bank account of the scoped tenant.
    pub async fn get(
        &self,
        context: &AccessContext,
        account_id: BankAccountId,
    ) -> AppResult<BankAccountRecord> {
        self.store.get(context.tenant_id(), account_id).await
    }

    /// Creates a bank account in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveBankAccountInput,
    ) -> AppResult<BankAccountRecord> {
        let account = build(BankAccountId::new(), context.tenant_id(), input, Utc::now())?;
        self.store.insert(account).await
    }

    /// Replaces a bank account of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        account_id: BankAccountId,
        input: SaveBankAccountInput,
    ) -> AppResult<BankAccountRecord> {
        let existing = self.get(context, account_id).await?;
        let account = BankAccountRecord {
            created_at: existing.created_at,
            ..build(existing.id, existing.tenant_id, input, Utc::now())?
        };
        self.store.replace(account).await
    }

    /// Deletes a bank account of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, account_id: BankAccountId) -> AppResult<()> {
        self.store.remove(context.tenant_id(), account_id).await
    }
}

fn bank_number(field: &str, value: String) -> AppResult<String> {
    let value = value.trim().to_owned();
    if value.is_empty() || value.len() > 15 {
        return Err(AppError::Validation(format!(
            "{field} must have 1 to 15 characters"
        )));
    }

    Ok(value)
}

fn build(
    id: BankAccountId,
    tenant_id: TenantId,
    input: SaveBankAccountInput,
    now: DateTime<Utc>,
) -> AppResult<BankAccountRecord> {
    Ok(BankAccountRecord {
        id,
        tenant_id,
        bank_code: bank_number("bank code", input.bank_code)?,
        account_number: bank_number("account number", input.account_number)?,
        account_digit: clean(input.account_digit),
        branch_number: clean(input.branch_number),
        branch_digit: clean(input.branch_digit),
        bank_name: clean(input.bank_name),
        account_type: clean(input.account_type),
        holder_name: clean(input.holder_name),
        holder_tax_id: clean(input.holder_tax_id).map(TaxId::new).transpose()?,
        status: clean(input.status),
        opened_on: input.opened_on,
        created_at: now,
        updated_at: now,
    })
}
