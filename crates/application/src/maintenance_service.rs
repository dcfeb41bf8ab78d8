use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppError, AppResult, MaintenanceId, UserId, VehicleId};

use crate::ledger_service::{LedgerStore, TenantReferences, optional_amount};
use crate::user_service::clean;
use crate::{AccessContext, LedgerRepository, MaintenanceFilter, MaintenanceRecord};


/// Input payload for creating or replacing a maintenance entry.
#[derive(Debug, Clone, Default)]
pub struct SaveMaintenanceInput {
    /// Serviced vehicle of the scoped tenant.
    pub vehicle_id: VehicleId,
    /// Responsible user; defaults to the caller.
    pub responsible_user_id: Option<UserId>,
    /// Kind of maintenance.
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
}

/// Application service for vehicle maintenance.
#[derive(Clone)]
pub struct MaintenanceService {
    store: LedgerStore<MaintenanceRecord>,
    references: TenantReferences,
}

impl MaintenanceService {
    /// Creates a new maintenance service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LedgerRepository<MaintenanceRecord>>,
        references: TenantReferences,
    ) -> Self {
        Self {
            store: LedgerStore::new(repository),
            references,
        }
    }

    /// Lists maintenance entries of the scoped tenant.
    pub async fn list(
        &self,
        context: &AccessContext,
        filter: MaintenanceFilter,
    ) -> AppResult<Vec<MaintenanceRecord>> {
        self.store.list(context.tenant_id(), &filter).await
    }

    /// Returns one maintenance entry of the scoped tenant.
    pub async fn get(
        &self,
        context: &AccessContext,
        maintenance_id: MaintenanceId,
    ) -> AppResult<MaintenanceRecord> {
        self.store.get(context.tenant_id(), maintenance_id).await
    }

    /// Registers a maintenance entry in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveMaintenanceInput,
    ) -> AppResult<MaintenanceRecord> {
        let maintenance = build(MaintenanceId::new(), context, input, Utc::now())?;
        self.ensure_references(&maintenance).await?;
        self.store.insert(maintenance).await
    }

    /// Replaces a maintenance entry of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        maintenance_id: MaintenanceId,
        input: SaveMaintenanceInput,
    ) -> AppResult<MaintenanceRecord> {
        let existing = self.get(context, maintenance_id).await?;
        let maintenance = MaintenanceRecord {
            created_at: existing.created_at,
            ..build(existing.id, context, input, Utc::now())?
        };
        self.ensure_references(&maintenance).await?;
        self.store.replace(maintenance).await
    }

    /// Deletes a maintenance entry of the scoped tenant.
    pub async fn delete(
        &self,
        context: &AccessContext,
        maintenance_id: MaintenanceId,
    ) -> AppResult<()> {
        self.store.remove(context.tenant_id(), maintenance_id).await
    }

    async fn ensure_references(&self, maintenance: &MaintenanceRecord) -> AppResult<()> {
        self.references
            .vehicle(maintenance.tenant_id, maintenance.vehicle_id)
            .await?;
        if let Some(user_id) = maintenance.responsible_user_id {
            self.references.user(maintenance.tenant_id, user_id).await?;
        }

        Ok(())
    }
}

fn build(
    id: MaintenanceId,
    context: &AccessContext,
    input: SaveMaintenanceInput,
    now: DateTime<Utc>,
) -> AppResult<MaintenanceRecord> {
    let kind = clean(Some(input.kind))
        .ok_or_else(|| AppError::Validation("maintenance kind must not be empty".to_owned()))?;
    if input.odometer.is_some_and(|odometer| odometer < 0) {
        return Err(AppError::Validation("odometer must not be negative".to_owned()));
    }

    Ok(MaintenanceRecord {
        id,
        tenant_id: context.tenant_id(),
        vehicle_id: input.vehicle_id,
        responsible_user_id: Some(
            input
                .responsible_user_id
                .unwrap_or_else(|| context.user_id()),
        ),
        kind,
        performed_on: input.performed_on,
        odometer: input.odometer,
        parts: clean(input.parts),
        services: clean(input.services),
        invoice_number: clean(input.invoice_number),
        workshop: clean(input.workshop),
        cost: optional_amount("cost", input.cost)?,
        created_at: now,
        updated_at: now,
    })
}
