use std::collections::HashMap;

use async_trait::async_trait;
use dealerdesk_application::{
    BankAccountRecord, ContractRecord, FinancingRecord, LedgerRecord, LedgerRepository,
    MaintenanceRecord, PaymentRecord, ReceiptRecord, SaleRecord,
};
use dealerdesk_core::{AppError, AppResult, TenantId};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{InMemoryBackOfficeRepository, ensure_absent, still_referenced};

/// Map holding one ledger record type.
pub trait LedgerTable<R: LedgerRecord> {
    fn table(&self) -> &RwLock<HashMap<R::Id, R>>;
}

macro_rules! ledger_tables {
    ($($record:ty => $field:ident),+ $(,)?) => {
        $(
            impl LedgerTable<$record> for InMemoryBackOfficeRepository {
                fn table(&self) -> &RwLock<HashMap<<$record as LedgerRecord>::Id, $record>> {
                    &self.$field
                }
            }
        )+
    };
}

ledger_tables!(
    BankAccountRecord => bank_accounts,
    SaleRecord => sales,
    FinancingRecord => financings,
    ContractRecord => contracts,
    MaintenanceRecord => maintenances,
    PaymentRecord => payments,
    ReceiptRecord => receipts,
);

async fn points_at<R: LedgerRecord>(table: &RwLock<HashMap<R::Id, R>>, id: Uuid) -> bool {
    table
        .read()
        .await
        .values()
        .any(|record| record.references().contains(&id))
}

impl InMemoryBackOfficeRepository {
    /// Whether any ledger record holds a foreign key to `id`.
    pub(super) async fn is_referenced(&self, id: Uuid) -> bool {
        points_at(&self.bank_accounts, id).await
            || points_at(&self.sales, id).await
            || points_at(&self.financings, id).await
            || points_at(&self.contracts, id).await
            || points_at(&self.maintenances, id).await
            || points_at(&self.payments, id).await
            || points_at(&self.receipts, id).await
    }

    async fn ensure_ledger_unique<R>(&self, record: &R) -> AppResult<()>
    where
        R: LedgerRecord,
        Self: LedgerTable<R>,
    {
        let records = LedgerTable::<R>::table(self).read().await;
        let clash = records
            .values()
            .filter(|other| other.tenant_id() == record.tenant_id() && other.id() != record.id())
            .find_map(|other| record.conflict_with(other));

        match clash {
            Some(message) => Err(AppError::Validation(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R> LedgerRepository<R> for InMemoryBackOfficeRepository
where
    R: LedgerRecord,
    Self: LedgerTable<R>,
{
    async fn list(&self, tenant_id: TenantId, filter: &R::Filter) -> AppResult<Vec<R>> {
        let mut records: Vec<R> = LedgerTable::<R>::table(self)
            .read()
            .await
            .values()
            .filter(|record| record.tenant_id() == tenant_id && record.matches(filter))
            .cloned()
            .collect();
        records.sort_by_key(|record| (record.created_at(), record.id()));

        Ok(records)
    }

    async fn find(&self, tenant_id: TenantId, id: R::Id) -> AppResult<Option<R>> {
        Ok(LedgerTable::<R>::table(self)
            .read()
            .await
            .get(&id)
            .filter(|record| record.tenant_id() == tenant_id)
            .cloned())
    }

    async fn create(&self, record: R) -> AppResult<()> {
        self.ensure_ledger_unique(&record).await?;

        let mut records = LedgerTable::<R>::table(self).write().await;
        ensure_absent(records.contains_key(&record.id()), R::LABEL, record.id())?;
        records.insert(record.id(), record);
        Ok(())
    }

    async fn update(&self, record: R) -> AppResult<()> {
        self.ensure_ledger_unique(&record).await?;

        let mut records = LedgerTable::<R>::table(self).write().await;
        match records.get_mut(&record.id()) {
            Some(stored) if stored.tenant_id() == record.tenant_id() => {
                *stored = record;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!(
                "{} '{}' not found",
                R::LABEL,
                record.id()
            ))),
        }
    }

    async fn delete(&self, tenant_id: TenantId, id: R::Id) -> AppResult<bool> {
        if LedgerTable::<R>::table(self)
            .read()
            .await
            .get(&id)
            .is_none_or(|record| record.tenant_id() != tenant_id)
        {
            return Ok(false);
        }

        if self.is_referenced(id.into()).await {
            return Err(still_referenced(R::LABEL));
        }

        Ok(LedgerTable::<R>::table(self)
            .write()
            .await
            .remove(&id)
            .is_some())
    }
}
