use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppResult, BankAccountId, PaymentId, TenantId};

use crate::ledger_service::{LedgerStore, positive_amount};
use crate::user_service::clean;
use crate::{AccessContext, BankAccountRecord, LedgerRepository, PaymentFilter, PaymentRecord};


/// Input payload for creating or replacing a payment.
#[derive(Debug, Clone, Default)]
pub struct SavePaymentInput {
    /// Payment date.
    pub paid_on: Option<NaiveDate>,
    /// Amount paid.
    pub amount: f64,
    /// Payment method.
    pub method: Option<String>,
    /// Bank account of the scoped tenant debited.
    pub debited_account_id: Option<BankAccountId>,
}

/// Application service for outgoing payments.
#[derive(Clone)]
pub struct PaymentService {
    store: LedgerStore<PaymentRecord>,
    bank_accounts: LedgerStore<BankAccountRecord>,
}

impl PaymentService {
    /// Creates a new payment service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LedgerRepository<PaymentRecord>>,
        bank_account_repository: Arc<dyn LedgerRepository<BankAccountRecord>>,
    ) -> Self {
        Self {
            store: LedgerStore::new(repository),
            bank_accounts: LedgerStore::new(bank_account_repository),
        }
    }

    /// Lists payments of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        filter: PaymentFilter,
    ) -> AppResult<Vec<PaymentRecord>> {
        self.store.list(context.tenant_id(), &filter).await
    }

    /// Returns one payment of the scoped tenant.
    pub async fn get(&self, context: &AccessContext, payment_id: PaymentId) -> AppResult<PaymentRecord> {
        self.store.get(context.tenant_id(), payment_id).await
    }

    /// Records a payment in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SavePaymentInput,
    ) -> AppResult<PaymentRecord> {
        let payment = build(PaymentId::new(), context.tenant_id(), input, Utc::now())?;
        self.ensure_account(&payment).await?;
        self.store.insert(payment).await
    }

    /// Replaces a payment of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        payment_id: PaymentId,
        input: SavePaymentInput,
    ) -> AppResult<PaymentRecord> {
        let existing = self.get(context, payment_id).await?;
        let payment = PaymentRecord {
            created_at: existing.created_at,
            ..build(existing.id, existing.tenant_id, input, Utc::now())?
        };
        self.ensure_account(&payment).await?;
        self.store.replace(payment).await
    }

    /// Deletes a payment of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, payment_id: PaymentId) -> AppResult<()> {
        self.store.remove(context.tenant_id(), payment_id).await
    }

    async fn ensure_account(&self, payment: &PaymentRecord) -> AppResult<()> {
        if let Some(account_id) = payment.debited_account_id {
            self.bank_accounts.require(payment.tenant_id, account_id).await?;
        }

        Ok(())
    }
}

fn build(
    id: PaymentId,
    tenant_id: TenantId,
    input: SavePaymentInput,
    now: DateTime<Utc>,
) -> AppResult<PaymentRecord> {
    Ok(PaymentRecord {
        id,
        tenant_id,
        paid_on: input.paid_on,
        amount: positive_amount("amount", input.amount)?,
        method: clean(input.method),
        debited_account_id: input.debited_account_id,
        created_at: now,
        updated_at: now,
    })
}
