use chrono::{DateTime, NaiveDate, Utc};
use dealerdesk_core::{ClientId, FinancingId, SaleId, TenantId};
use uuid::Uuid;

use super::LedgerRecord;

/// Financing plan of a sale.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancingRecord {
    /// Unique financing identifier.
    pub id: FinancingId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Financed sale.
    pub sale_id: SaleId,
    /// Borrowing client; always the client of the sale.
    pub client_id: ClientId,
    /// Total amount financed, down payment included.
    pub total_amount: f64,
    /// Down payment.
    pub down_payment: Option<f64>,
    /// Number of monthly installments.
    pub installments: i32,
    /// Amount of each installment.
    pub installment_amount: f64,
    /// Monthly interest rate in percent.
    pub interest_rate: Option<f64>,
    /// First installment date.
    pub starts_on: Option<NaiveDate>,
    /// Lending institution.
    pub institution: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Financing list filter.
#[derive(Debug, Clone, Default)]
pub struct FinancingFilter {
    /// Only financings of this client.
    pub client_id: Option<ClientId>,
    /// Only financings of this sale.
    pub sale_id: Option<SaleId>,
}

impl LedgerRecord for FinancingRecord {
    type Id = FinancingId;
    type Filter = FinancingFilter;

    const LABEL: &'static str = "financing";

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
        filter.client_id.is_none_or(|id| id == self.client_id)
            && filter.sale_id.is_none_or(|id| id == self.sale_id)
    }

    fn references(&self) -> Vec<Uuid> {
        vec![self.sale_id.as_uuid(), self.client_id.as_uuid()]
    }
}
