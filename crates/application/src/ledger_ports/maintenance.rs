use chrono::{DateTime, NaiveDate, Utc};
use dealerdesk_core::{MaintenanceId, TenantId, UserId, VehicleId};
use uuid::Uuid;

use super::LedgerRecord;

/// Maintenance performed on a tenant vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    /// Unique maintenance identifier.
    pub id: MaintenanceId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Serviced vehicle.
    pub vehicle_id: VehicleId,
    /// Tenant user who registered the maintenance.
    pub responsible_user_id: Option<UserId>,
    /// Kind of maintenance (oil change, revision, repair).
    pub kind: String,
    /// Service date.
    pub performed_on: Option<NaiveDate>,
    /// Odometer reading in kilometers.
    pub odometer: Option<i64>,
    /// Parts replaced.
    pub parts: Option<String>,
    /// Services performed.
    pub services: Option<String>,
    /// Invoice number.
    pub invoice_number: Option<String>,
    /// Workshop name.
    pub workshop: Option<String>,
    /// Total cost.
    pub cost: Option<f64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Maintenance list filter.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    /// Only maintenances of this vehicle.
    pub vehicle_id: Option<VehicleId>,
}

impl LedgerRecord for MaintenanceRecord {
    type Id = MaintenanceId;
    type Filter = MaintenanceFilter;

    const LABEL: &'static str = "maintenance";

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
    }

    fn references(&self) -> Vec<Uuid> {
        std::iter::once(self.vehicle_id.as_uuid())
            .chain(self.responsible_user_id.map(|id| id.as_uuid()))
            .collect()
    }
}
