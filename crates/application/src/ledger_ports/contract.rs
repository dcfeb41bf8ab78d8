use chrono::{DateTime, NaiveDate, Utc};
use dealerdesk_core::{ContractId, TenantId, UserId, VehicleId};
use uuid::Uuid;

use super::LedgerRecord;

/// Rental contract of a tenant vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRecord {
    /// Unique contract identifier.
    pub id: ContractId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Rented vehicle.
    pub vehicle_id: VehicleId,
    /// Tenant user responsible for the contract.
    pub responsible_user_id: UserId,
    /// First rental day.
    pub starts_on: NaiveDate,
    /// Last rental day; open-ended when absent.
    pub ends_on: Option<NaiveDate>,
    /// Weekly rate.
    pub weekly_rate: Option<f64>,
    /// Daily rate.
    pub daily_rate: Option<f64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Contract list filter.
#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    /// Only contracts of this vehicle.
    pub vehicle_id: Option<VehicleId>,
    /// Only contracts running on this day.
    pub active_on: Option<NaiveDate>,
}

impl ContractRecord {
    /// Whether the contract covers a day.
    #[must_use]
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.starts_on <= day && self.ends_on.is_none_or(|end| day <= end)
    }
}

impl LedgerRecord for ContractRecord {
    type Id = ContractId;
    type Filter = ContractFilter;

    const LABEL: &'static str = "contract";

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
        filter.vehicle_id.is_none_or(|id| id == self.vehicle_id)
            && filter.active_on.is_none_or(|day| self.covers(day))
    }

    fn references(&self) -> Vec<Uuid> {
        vec![self.vehicle_id.as_uuid(), self.responsible_user_id.as_uuid()]
    }
}
