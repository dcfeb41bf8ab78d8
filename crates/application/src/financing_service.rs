use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppError, AppResult, ClientId, FinancingId, SaleId};

use crate::ledger_service::{LedgerStore, optional_amount, positive_amount, to_cents};
use crate::user_service::clean;
use crate::{AccessContext, FinancingFilter, FinancingRecord, LedgerRepository, SaleRecord};

#[cfg(test)]
mod tests;

/// Largest number of monthly installments accepted.
pub const MAX_INSTALLMENTS: i32 = 480;

/// Input payload for creating or replacing a financing.
#[derive(Debug, Clone, Default)]
pub struct SaveFinancingInput {
    /// Financed sale of the scoped tenant.
    pub sale_id: SaleId,
    /// Borrowing client; defaults to the client of the sale.
    pub client_id: Option<ClientId>,
    /// Total amount, down payment included.
    pub total_amount: f64,
    /// Down payment.
    pub down_payment: Option<f64>,
    /// Number of monthly installments.
    pub installments: i32,
    /// Installment amount; computed from the interest rate when absent.
    pub installment_amount: Option<f64>,
    /// Monthly interest rate in percent.
    pub interest_rate: Option<f64>,
    /// First installment date.
    pub starts_on: Option<NaiveDate>,
    /// Lending institution.
    pub institution: Option<String>,
}

/// Application service for sale financings.
#[derive(Clone)]
pub struct FinancingService {
    store: LedgerStore<FinancingRecord>,
    sales: LedgerStore<SaleRecord>,
}

impl FinancingService {
    /// Creates a new financing service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LedgerRepository<FinancingRecord>>,
        sale_repository: Arc<dyn LedgerRepository<SaleRecord>>,
    ) -> Self {
        Self {
            store: LedgerStore::new(repository),
            sales: LedgerStore::new(sale_repository),
        }
    }

    /// Lists financings of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        filter: FinancingFilter,
    ) -> AppResult<Vec<FinancingRecord>> {
        self.store.list(context.tenant_id(), &filter).await
    }

    /// Returns one financing of the scoped tenant.
    pub async fn get(
        &self,
        context: &AccessContext,
        financing_id: FinancingId,
    ) -> AppResult<FinancingRecord> {
        self.store.get(context.tenant_id(), financing_id).await
    }

    /// Finances a sale of the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveFinancingInput,
    ) -> AppResult<FinancingRecord> {
        let sale = self.sales.require(context.tenant_id(), input.sale_id).await?;
        let financing = build(FinancingId::new(), &sale, input, Utc::now())?;
        self.store.insert(financing).await
    }

    /// Replaces a financing of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        financing_id: FinancingId,
        input: SaveFinancingInput,
    ) -> AppResult<FinancingRecord> {
        let existing = self.get(context, financing_id).await?;
        let sale = self.sales.require(context.tenant_id(), input.sale_id).await?;
        let financing = FinancingRecord {
            created_at: existing.created_at,
            ..build(existing.id, &sale, input, Utc::now())?
        };
        self.store.replace(financing).await
    }

    /// Deletes a financing of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, financing_id: FinancingId) -> AppResult<()> {
        self.store.remove(context.tenant_id(), financing_id).await
    }
}

/// Fixed installment of a loan with monthly compound interest, in cents.
pub(crate) fn installment_for(principal: f64, monthly_rate_percent: f64, installments: i32) -> f64 {
    let rate = monthly_rate_percent / 100.0;
    if rate == 0.0 {
        return to_cents(principal / f64::from(installments));
    }

    to_cents(principal * rate / (1.0 - (1.0 + rate).powi(-installments)))
}

fn build(
    id: FinancingId,
    sale: &SaleRecord,
    input: SaveFinancingInput,
    now: DateTime<Utc>,
) -> AppResult<FinancingRecord> {
    let client_id = input.client_id.unwrap_or(sale.client_id);
    if client_id != sale.client_id {
        return Err(AppError::Validation(
            "client does not match the financed sale".to_owned(),
        ));
    }

    let total_amount = positive_amount("total amount", input.total_amount)?;
    let down_payment = optional_amount("down payment", input.down_payment)?;
    let financed = total_amount - down_payment.unwrap_or_default();
    if financed <= 0.0 {
        return Err(AppError::Validation(
            "down payment must be below the total amount".to_owned(),
        ));
    }

    if !(1..=MAX_INSTALLMENTS).contains(&input.installments) {
        return Err(AppError::Validation(format!(
            "installments must be between 1 and {MAX_INSTALLMENTS}"
        )));
    }

    let interest_rate = optional_amount("interest rate", input.interest_rate)?;
    let installment_amount = match optional_amount("installment amount", input.installment_amount)? {
        Some(amount) => positive_amount("installment amount", amount)?,
        None => installment_for(financed, interest_rate.unwrap_or_default(), input.installments),
    };

    Ok(FinancingRecord {
        id,
        tenant_id: sale.tenant_id,
        sale_id: sale.id,
        client_id,
        total_amount,
        down_payment,
        installments: input.installments,
        installment_amount,
        interest_rate,
        starts_on: input.starts_on,
        institution: clean(input.institution),
        created_at: now,
        updated_at: now,
    })
}
