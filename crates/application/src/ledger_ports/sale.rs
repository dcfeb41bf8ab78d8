use chrono::{DateTime, NaiveDate, Utc};
use dealerdesk_core::{ClientId, SaleId, TenantId, UserId, VehicleId};
use uuid::Uuid;

use super::LedgerRecord;

/// Sale of a tenant vehicle to a tenant client.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    /// Unique sale identifier.
    pub id: SaleId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Buying client.
    pub client_id: ClientId,
    /// Tenant user credited with the sale.
    pub seller_id: UserId,
    /// Vehicle sold; a vehicle is sold at most once per tenant.
    pub vehicle_id: VehicleId,
    /// Sale date.
    pub sold_on: NaiveDate,
    /// Agreed price before discount.
    pub sale_price: f64,
    /// Minimum acceptable margin.
    pub minimum_margin: Option<f64>,
    /// Discount granted, never above the price.
    pub discount: Option<f64>,
    /// Free-form payment method.
    pub payment_method: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Sale list filter.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    /// Only sales to this client.
    pub client_id: Option<ClientId>,
    /// Only sales of this vehicle.
    pub vehicle_id: Option<VehicleId>,
    /// Earliest sale date, inclusive.
    pub sold_from: Option<NaiveDate>,
    /// Latest sale date, inclusive.
    pub sold_to: Option<NaiveDate>,
}

impl LedgerRecord for SaleRecord {
    type Id = SaleId;
    type Filter = SaleFilter;

    const LABEL: &'static str = "sale";

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
            && filter.vehicle_id.is_none_or(|id| id == self.vehicle_id)
            && filter.sold_from.is_none_or(|from| self.sold_on >= from)
            && filter.sold_to.is_none_or(|to| self.sold_on <= to)
    }

    fn references(&self) -> Vec<Uuid> {
        vec![
            self.client_id.as_uuid(),
            self.seller_id.as_uuid(),
            self.vehicle_id.as_uuid(),
        ]
    }

    fn conflict_with(&self, other: &Self) -> Option<String> {
        (self.vehicle_id == other.vehicle_id).then(|| "vehicle has already been sold".to_owned())
    }
}

impl SaleRecord {
    /// Price after discount.
    #[must_use]
    pub fn net_price(&self) -> f64 {
        self.sale_price - self.discount.unwrap_or_default()
    }
}
