use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{
    AppError, AppResult, BankAccountId, ClientId, ContractId, ReceiptId, SaleId, TenantId,
};

use crate::ledger_service::{LedgerStore, TenantReferences, positive_amount};
use crate::user_service::clean;
use crate::{
    AccessContext, BankAccountRecord, ContractRecord, LedgerRepository, ReceiptFilter,
    ReceiptRecord, SaleRecord,
};


/// Input payload for creating or replacing a receipt.
#[derive(Debug, Clone, Default)]
pub struct SaveReceiptInput {
    /// Receipt date.
    pub received_on: Option<NaiveDate>,
    /// Amount received.
    pub amount: f64,
    /// Receipt method.
    pub method: Option<String>,
    /// Bank account of the scoped tenant credited.
    pub credited_account_id: Option<BankAccountId>,
    /// Originating sale.
    pub sale_id: Option<SaleId>,
    /// Originating rental contract.
    pub contract_id: Option<ContractId>,
    /// Paying client; defaults to the client of the sale.
    pub client_id: Option<ClientId>,
}

/// Repositories a receipt points into.
#[derive(Clone)]
pub struct ReceiptSources {
    /// Sales repository.
    pub sales: Arc<dyn LedgerRepository<SaleRecord>>,
    /// Contracts repository.
    pub contracts: Arc<dyn LedgerRepository<ContractRecord>>,
    /// Bank accounts repository.
    pub bank_accounts: Arc<dyn LedgerRepository<BankAccountRecord>>,
}

/// Application service for incoming receipts.
#[derive(Clone)]
pub struct ReceiptService {
    store: LedgerStore<ReceiptRecord>,
    sales: LedgerStore<SaleRecord>,
    contracts: LedgerStore<ContractRecord>,
    bank_accounts: LedgerStore<BankAccountRecord>,
    references: TenantReferences,
}

impl ReceiptService {
    /// Creates a new receipt service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LedgerRepository<ReceiptRecord>>,
        sources: ReceiptSources,
        references: TenantReferences,
    ) -> Self {
        Self {
            store: LedgerStore::new(repository),
            sales: LedgerStore::new(sources.sales),
            contracts: LedgerStore::new(sources.contracts),
            bank_accounts: LedgerStore::new(sources.bank_accounts),
            references,
        }
    }

    /// Lists receipts of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        filter: ReceiptFilter,
    ) -> AppResult<Vec<ReceiptRecord>> {
        self.store.list(context.tenant_id(), &filter).await
    }

    /// Returns one receipt of the scoped tenant.
    pub async fn get(&self, context: &AccessContext, receipt_id: ReceiptId) -> AppResult<ReceiptRecord> {
        self.store.get(context.tenant_id(), receipt_id).await
    }

    /// Records a receipt in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveReceiptInput,
    ) -> AppResult<ReceiptRecord> {
        let receipt = self
            .resolve(ReceiptId::new(), context.tenant_id(), input, Utc::now())
            .await?;
        self.store.insert(receipt).await
    }

    /// Replaces a receipt of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        receipt_id: ReceiptId,
        input: SaveReceiptInput,
    ) -> AppResult<ReceiptRecord> {
        let existing = self.get(context, receipt_id).await?;
        let receipt = ReceiptRecord {
            created_at: existing.created_at,
            ..self
                .resolve(existing.id, existing.tenant_id, input, Utc::now())
                .await?
        };
        self.store.replace(receipt).await
    }

    /// Deletes a receipt of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, receipt_id: ReceiptId) -> AppResult<()> {
        self.store.remove(context.tenant_id(), receipt_id).await
    }

    async fn resolve(
        &self,
        id: ReceiptId,
        tenant_id: TenantId,
        input: SaveReceiptInput,
        now: DateTime<Utc>,
    ) -> AppResult<ReceiptRecord> {
        if input.sale_id.is_none() && input.contract_id.is_none() {
            return Err(AppError::Validation(
                "a receipt must reference a sale or a contract".to_owned(),
            ));
        }

        let mut client_id = input.client_id;
        if let Some(sale_id) = input.sale_id {
            let sale = self.sales.require(tenant_id, sale_id).await?;
            if client_id.is_some_and(|client_id| client_id != sale.client_id) {
                return Err(AppError::Validation(
                    "client does not match the sale".to_owned(),
                ));
            }
            client_id = Some(sale.client_id);
        } else if let Some(client_id) = client_id {
            self.references.client(tenant_id, client_id).await?;
        }

        if let Some(contract_id) = input.contract_id {
            self.contracts.require(tenant_id, contract_id).await?;
        }
        if let Some(account_id) = input.credited_account_id {
            self.bank_accounts.require(tenant_id, account_id).await?;
        }

        Ok(ReceiptRecord {
            id,
            tenant_id,
            received_on: input.received_on,
            amount: positive_amount("amount", input.amount)?,
            method: clean(input.method),
            credited_account_id: input.credited_account_id,
            sale_id: input.sale_id,
            contract_id: input.contract_id,
            client_id,
            created_at: now,
            updated_at: now,
        })
    }
}
