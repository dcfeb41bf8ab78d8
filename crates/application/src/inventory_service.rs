use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppError, AppResult, InventoryId, NonEmptyString, TenantId};

use crate::user_service::clean;
use crate::{AccessContext, InventoryRecord, InventoryRepository, VehicleRepository};


/// Input payload for creating or replacing an inventory.
#[derive(Debug, Clone, Default)]
pub struct SaveInventoryInput {
    /// Display name.
    pub name: String,
    /// Location description.
    pub location: Option<String>,
    /// Free-form status.
    pub status: Option<String>,
    /// Total area in square meters.
    pub total_area: Option<f64>,
    /// Covered area in square meters.
    pub covered_area: Option<f64>,
    /// Opening date.
    pub opened_on: Option<NaiveDate>,
}

/// Application service for tenant inventories.
#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
    vehicle_repository: Arc<dyn VehicleRepository>,
}

impl InventoryService {
    /// Creates a new inventory service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn InventoryRepository>,
        vehicle_repository: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            repository,
            vehicle_repository,
        }
    }

    /// Lists inventories of the scoped tenant.
    pub async fn list(&self, context: &AccessContext) -> AppResult<Vec<InventoryRecord>> {
        self.repository.list(context.tenant_id()).await
    }

    /// Returns one inventory of the scoped tenant.
    pub async fn get(
        &self,
        context: &AccessContext,
        inventory_id: InventoryId,
    ) -> AppResult<InventoryRecord> {
        self.repository
            .find(context.tenant_id(), inventory_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Creates an inventory in the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveInventoryInput,
    ) -> AppResult<InventoryRecord> {
        let inventory = build(InventoryId::new(), context.tenant_id(), input, Utc::now())?;
        self.repository.create(inventory.clone()).await?;
        Ok(inventory)
    }

    /// Replaces an inventory of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        inventory_id: InventoryId,
        input: SaveInventoryInput,
    ) -> AppResult<InventoryRecord> {
        let existing = self.get(context, inventory_id).await?;
        let inventory = InventoryRecord {
            created_at: existing.created_at,
            ..build(existing.id, existing.tenant_id, input, Utc::now())?
        };
        self.repository.update(inventory.clone()).await?;
        Ok(inventory)
    }

    /// Deletes an empty inventory of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, inventory_id: InventoryId) -> AppResult<()> {
        let tenant_id = context.tenant_id();
        let vehicles = self
            .vehicle_repository
            .count_in_inventory(tenant_id, inventory_id)
            .await?;
        if vehicles > 0 {
            return Err(AppError::Validation(format!(
                "inventory still holds {vehicles} vehicle(s)"
            )));
        }

        if !self.repository.delete(tenant_id, inventory_id).await? {
            return Err(not_found());
        }

        Ok(())
    }
}

fn build(
    id: InventoryId,
    tenant_id: TenantId,
    input: SaveInventoryInput,
    now: DateTime<Utc>,
) -> AppResult<InventoryRecord> {
    let name = NonEmptyString::new(input.name)
        .map_err(|_| AppError::Validation("name must not be empty".to_owned()))?;

    for (field, value) in [
        ("total area", input.total_area),
        ("covered area", input.covered_area),
    ] {
        if value.is_some_and(|area| !area.is_finite() || area < 0.0) {
            return Err(AppError::Validation(format!(
                "{field} must be a non-negative number"
            )));
        }
    }

    if let (Some(total), Some(covered)) = (input.total_area, input.covered_area)
        && covered > total
    {
        return Err(AppError::Validation(
            "covered area must not exceed total area".to_owned(),
        ));
    }

    Ok(InventoryRecord {
        id,
        tenant_id,
        name: name.into(),
        location: clean(input.location),
        status: clean(input.status),
        total_area: input.total_area,
        covered_area: input.covered_area,
        opened_on: input.opened_on,
        created_at: now,
        updated_at: now,
    })
}

fn not_found() -> AppError {
    AppError::NotFound("inventory not found in this tenant".to_owned())
}
