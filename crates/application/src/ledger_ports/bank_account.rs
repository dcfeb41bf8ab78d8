use chrono::{DateTime, NaiveDate, Utc};
use dealerdesk_core::{BankAccountId, TenantId};
use dealerdesk_domain::TaxId;
use uuid::Uuid;

use super::LedgerRecord;

/// Bank account used to settle payments and receipts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccountRecord {
    /// Unique bank account identifier.
    pub id: BankAccountId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Bank number (COMPE code).
    pub bank_code: String,
    /// Account number, unique per tenant together with the bank code.
    pub account_number: String,
    /// Account check digit.
    pub account_digit: Option<String>,
    /// Branch number.
    pub branch_number: Option<String>,
    /// Branch check digit.
    pub branch_digit: Option<String>,
    /// Bank display name.
    pub bank_name: Option<String>,
    /// Free-form account type (checking, savings).
    pub account_type: Option<String>,
    /// Account holder name.
    pub holder_name: Option<String>,
    /// Account holder CPF or CNPJ.
    pub holder_tax_id: Option<TaxId>,
    /// Free-form status.
    pub status: Option<String>,
    /// Opening date.
    pub opened_on: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Bank account list filter.
#[derive(Debug, Clone, Default)]
pub struct BankAccountFilter {
    /// Case-insensitive fragment of the bank name.
    pub bank_name: Option<String>,
}

impl LedgerRecord for BankAccountRecord {
    type Id = BankAccountId;
    type Filter = BankAccountFilter;

    const LABEL: &'static str = "bank account";

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
        filter.bank_name.as_deref().is_none_or(|fragment| {
            self.bank_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&fragment.to_lowercase()))
        })
    }

    fn references(&self) -> Vec<Uuid> {
        Vec::new()
    }

    fn conflict_with(&self, other: &Self) -> Option<String> {
        (self.bank_code == other.bank_code && self.account_number == other.account_number)
            .then(|| "account is already in use in this tenant".to_owned())
    }
}
