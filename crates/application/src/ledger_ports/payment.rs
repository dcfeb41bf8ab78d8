use chrono::{DateTime, NaiveDate, Utc};
use dealerdesk_core::{BankAccountId, PaymentId, TenantId};
use uuid::Uuid;

use super::LedgerRecord;

/// Outgoing payment of the tenant.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    /// Unique payment identifier.
    pub id: PaymentId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Payment date.
    pub paid_on: Option<NaiveDate>,
    /// Amount paid.
    pub amount: f64,
    /// Free-form payment method.
    pub method: Option<String>,
    /// Tenant bank account debited.
    pub debited_account_id: Option<BankAccountId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payment list filter.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    /// Only payments debited from this account.
    pub debited_account_id: Option<BankAccountId>,
}

impl LedgerRecord for PaymentRecord {
    type Id = PaymentId;
    type Filter = PaymentFilter;

    const LABEL: &'static str = "payment";

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
        filter
            .debited_account_id
            .is_none_or(|id| self.debited_account_id == Some(id))
    }

    fn references(&self) -> Vec<Uuid> {
        self.debited_account_id.map(|id| id.as_uuid()).into_iter().collect()
    }
}
