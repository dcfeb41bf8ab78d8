use chrono::{DateTime, NaiveDate, Utc};
use dealerdesk_core::{BankAccountId, ClientId, ContractId, ReceiptId, SaleId, TenantId};
use uuid::Uuid;

use super::LedgerRecord;

/// Incoming money tied to a sale or a rental contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRecord {
    /// Unique receipt identifier.
    pub id: ReceiptId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Receipt date.
    pub received_on: Option<NaiveDate>,
    /// Amount received.
    pub amount: f64,
    /// Free-form receipt method.
    pub method: Option<String>,
    /// Tenant bank account credited.
    pub credited_account_id: Option<BankAccountId>,
    /// Originating sale.
    pub sale_id: Option<SaleId>,
    /// Originating rental contract.
    pub contract_id: Option<ContractId>,
    /// Paying client; the sale's client when a sale is set.
    pub client_id: Option<ClientId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Receipt list filter.
#[derive(Debug, Clone, Default)]
pub struct ReceiptFilter {
    /// Only receipts of this sale.
    pub sale_id: Option<SaleId>,
    /// Only receipts of this contract.
    pub contract_id: Option<ContractId>,
    /// Only receipts paid by this client.
    pub client_id: Option<ClientId>,
}

impl LedgerRecord for ReceiptRecord {
    type Id = ReceiptId;
    type Filter = ReceiptFilter;

    const LABEL: &'static str = "receipt";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        filter.sale_id.is_none_or(|id| self.sale_id == Some(id))
            && filter.contract_id.is_none_or(|id| self.contract_id == Some(id))
            && filter.client_id.is_none_or(|id| self.client_id == Some(id))
    }

    fn references(&self) -> Vec<Uuid> {
        [
            self.credited_account_id.map(|id| id.as_uuid()),
            self.sale_id.map(|id| id.as_uuid()),
            self.contract_id.map(|id| id.as_uuid()),
            self.client_id.map(|id| id.as_uuid()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
