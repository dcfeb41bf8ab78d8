use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppError, AppResult, ClientId, SaleId, UserId, VehicleId};

use crate::ledger_service::{LedgerStore, TenantReferences, optional_amount, positive_amount};
use crate::user_service::clean;
use crate::{AccessContext, LedgerRepository, SaleFilter, SaleRecord};


/// Input payload for creating or replacing a sale.
#[derive(Debug, Clone, Default)]
pub struct SaveSaleInput {
    /// Buying client of the scoped tenant.
    pub client_id: ClientId,
    /// Seller; defaults to the caller.
    pub seller_id: Option<UserId>,
    /// Vehicle of the scoped tenant.
    pub vehicle_id: VehicleId,
    /// Sale date; defaults to today.
    pub sold_on: Option<NaiveDate>,
    /// Agreed price.
    pub sale_price: f64,
    /// Minimum acceptable margin.
    pub minimum_margin: Option<f64>,
    /// Discount granted.
    pub discount: Option<f64>,
    /// Payment method.
    pub payment_method: Option<String>,
}

/// Application service for vehicle sales.
#[derive(Clone)]
pub struct SaleService {
    store: LedgerStore<SaleRecord>,
    references: TenantReferences,
}

impl SaleService {
    /// Creates a new sale service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LedgerRepository<SaleRecord>>,
        references: TenantReferences,
    ) -> Self {
        Self {
            store: LedgerStore::new(repository),
            references,
        }
    }

    /// Lists sales of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        filter: SaleFilter,
    ) -> AppResult<Vec<SaleRecord>> {
        if let (Some(from), Some(to)) = (filter.sold_from, filter.sold_to)
            && from > to
        {
            return Err(AppError::Validation(
                "sale date range starts after it ends".to_owned(),
            ));
        }

        self.store.list(context.tenant_id(), &filter).await
    }

    /// Returns one sale of the scoped tenant.
    pub async fn get(&self, context: &AccessContext, sale_id: SaleId) -> AppResult<SaleRecord> {
        self.store.get(context.tenant_id(), sale_id).await
    }

    /// Registers a sale in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveSaleInput,
    ) -> AppResult<SaleRecord> {
        let sale = build(SaleId::new(), context, input, Utc::now())?;
        self.ensure_references(&sale).await?;
        self.store.insert(sale).await
    }

    /// Replaces a sale of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        sale_id: SaleId,
        input: SaveSaleInput,
    ) -> AppResult<SaleRecord> {
        let existing = self.get(context, sale_id).await?;
        let sale = SaleRecord {
            created_at: existing.created_at,
            ..build(existing.id, context, input, Utc::now())?
        };
        self.ensure_references(&sale).await?;
        self.store.replace(sale).await
    }

    /// Deletes a sale of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, sale_id: SaleId) -> AppResult<()> {
        self.store.remove(context.tenant_id(), sale_id).await
    }

    async fn ensure_references(&self, sale: &SaleRecord) -> AppResult<()> {
        let tenant_id = sale.tenant_id;
        self.references.client(tenant_id, sale.client_id).await?;
        self.references.user(tenant_id, sale.seller_id).await?;
        self.references.vehicle(tenant_id, sale.vehicle_id).await?;
        Ok(())
    }
}

fn build(
    id: SaleId,
    context: &AccessContext,
    input: SaveSaleInput,
    now: DateTime<Utc>,
) -> AppResult<SaleRecord> {
    let sale_price = positive_amount("sale price", input.sale_price)?;
    let discount = optional_amount("discount", input.discount)?;
    if discount.is_some_and(|discount| discount > sale_price) {
        return Err(AppError::Validation(
            "discount must not exceed the sale price".to_owned(),
        ));
    }

    Ok(SaleRecord {
        id,
        tenant_id: context.tenant_id(),
        client_id: input.client_id,
        seller_id: input.seller_id.unwrap_or_else(|| context.user_id()),
        vehicle_id: input.vehicle_id,
        sold_on: input.sold_on.unwrap_or_else(|| now.date_naive()),
        sale_price,
        minimum_margin: optional_amount("minimum margin", input.minimum_margin)?,
        discount,
        payment_method: clean(input.payment_method),
        created_at: now,
        updated_at: now,
    })
}
