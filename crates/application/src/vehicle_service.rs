use std::sync::Arc;

use chrono::{DateTime, Utc};

use dealerdesk_core::{AppError, AppResult, InventoryId, TenantId, VehicleId};
use dealerdesk_domain::{LicensePlate, TaxId};

use crate::user_service::clean;
use crate::{AccessContext, InventoryRepository, VehicleRecord, VehicleRepository};

#[cfg(test)]
mod tests;

/// Input payload for creating or replacing a vehicle.
#[derive(Debug, Clone, Default)]
pub struct SaveVehicleInput {
    /// Inventory of the scoped tenant holding the vehicle.
    pub inventory_id: InventoryId,
    /// License plate.
    pub plate: String,
    /// Chassis number.
    pub chassis: String,
    /// RENAVAM registry number.
    pub renavam: Option<String>,
    /// Brand.
    pub brand: String,
    /// Model.
    pub model: String,
    /// Color.
    pub color: Option<String>,
    /// Engine number.
    pub engine_number: Option<String>,
    /// Free-form status.
    pub status: Option<String>,
    /// Manufacture year.
    pub manufacture_year: Option<i32>,
    /// Model year.
    pub model_year: Option<i32>,
    /// Number of doors.
    pub doors: Option<i32>,
    /// Previous owner's tax id.
    pub owner_tax_id: Option<String>,
    /// Odometer reading in kilometers.
    pub mileage: Option<i64>,
    /// Acquisition value.
    pub entry_value: Option<f64>,
    /// FIPE table value.
    pub fipe_value: Option<f64>,
}

/// Application service for tenant vehicles.
#[derive(Clone)]
pub struct VehicleService {
    repository: Arc<dyn VehicleRepository>,
    inventory_repository: Arc<dyn InventoryRepository>,
}

impl VehicleService {
    /// Creates a new vehicle service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn VehicleRepository>,
        inventory_repository: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self {
            repository,
            inventory_repository,
        }
    }

    /// Lists vehicles of the scoped tenant; `search` matches plate, brand or model.
    pub async fn list(
        &self,
        context: &AccessContext,
        search: Option<&str>,
    ) -> AppResult<Vec<VehicleRecord>> {
        let search = search.map(str::trim).filter(|value| !value.is_empty());
        self.repository.list(context.tenant_id(), search).await
    }

    /// Returns one vehicle of the scoped tenant.
    pub async fn get(
        &self,
        context: &AccessContext,
        vehicle_id: VehicleId,
    ) -> AppResult<VehicleRecord> {
        self.repository
            .find(context.tenant_id(), vehicle_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Returns the vehicle of the scoped tenant carrying a plate.
    pub async fn find_by_plate(
        &self,
        context: &AccessContext,
        plate: &str,
    ) -> AppResult<VehicleRecord> {
        let plate = LicensePlate::new(plate)?;
        self.repository
            .find_by_plate(context.tenant_id(), &plate)
            .await?
            .ok_or_else(not_found)
    }

    /// Creates a vehicle in an inventory of the scoped tenant.
    pub async fn create(
        &self,
        context: &AccessContext,
        input: SaveVehicleInput,
    ) -> AppResult<VehicleRecord> {
        let vehicle = build(VehicleId::new(), context.tenant_id(), input, Utc::now())?;
        self.ensure_inventory(&vehicle).await?;
        self.ensure_unique(&vehicle).await?;
        self.repository.create(vehicle.clone()).await?;

        Ok(vehicle)
    }

    /// Replaces a vehicle of the scoped tenant.
    pub async fn update(
        &self,
        context: &AccessContext,
        vehicle_id: VehicleId,
        input: SaveVehicleInput,
    ) -> AppResult<VehicleRecord> {
        let existing = self.get(context, vehicle_id).await?;
        let vehicle = VehicleRecord {
            created_at: existing.created_at,
            ..build(existing.id, existing.tenant_id, input, Utc::now())?
        };
        self.ensure_inventory(&vehicle).await?;
        self.ensure_unique(&vehicle).await?;
        self.repository.update(vehicle.clone()).await?;

        Ok(vehicle)
    }

    /// Deletes a vehicle of the scoped tenant.
    pub async fn delete(&self, context: &AccessContext, vehicle_id: VehicleId) -> AppResult<()> {
        if !self.repository.delete(context.tenant_id(), vehicle_id).await? {
            return Err(not_found());
        }

        Ok(())
    }

    async fn ensure_inventory(&self, vehicle: &VehicleRecord) -> AppResult<()> {
        if self
            .inventory_repository
            .find(vehicle.tenant_id, vehicle.inventory_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(
                "inventory does not belong to this tenant".to_owned(),
            ));
        }

        Ok(())
    }

    async fn ensure_unique(&self, vehicle: &VehicleRecord) -> AppResult<()> {
        let tenant_id = vehicle.tenant_id;
        let is_other = |other: VehicleRecord| other.id != vehicle.id;

        if self
            .repository
            .find_by_plate(tenant_id, &vehicle.plate)
            .await?
            .is_some_and(is_other)
        {
            return Err(AppError::Validation(
                "plate is already in use in this tenant".to_owned(),
            ));
        }

        if self
            .repository
            .find_by_chassis(tenant_id, &vehicle.chassis)
            .await?
            .is_some_and(is_other)
        {
            return Err(AppError::Validation(
                "chassis is already in use in this tenant".to_owned(),
            ));
        }

        if let Some(renavam) = vehicle.renavam.as_deref()
            && self
                .repository
                .find_by_renavam(tenant_id, renavam)
                .await?
                .is_some_and(is_other)
        {
            return Err(AppError::Validation(
                "renavam is already in use in this tenant".to_owned(),
            ));
        }

        Ok(())
    }
}

fn build(
    id: VehicleId,
    tenant_id: TenantId,
    input: SaveVehicleInput,
    now: DateTime<Utc>,
) -> AppResult<VehicleRecord> {
    let chassis: String = input
        .chassis
        .chars()
        .filter(|character| !character.is_whitespace())
        .map(|character| character.to_ascii_uppercase())
        .collect();
    if chassis.is_empty()
        || chassis.len() > 17
        || !chassis.chars().all(|character| character.is_ascii_alphanumeric())
    {
        return Err(AppError::Validation(
            "chassis must have 1 to 17 letters or digits".to_owned(),
        ));
    }

    let brand = clean(Some(input.brand))
        .ok_or_else(|| AppError::Validation("brand must not be empty".to_owned()))?;
    let model = clean(Some(input.model))
        .ok_or_else(|| AppError::Validation("model must not be empty".to_owned()))?;

    if input.mileage.is_some_and(|mileage| mileage < 0) {
        return Err(AppError::Validation("mileage must not be negative".to_owned()));
    }

    for (field, value) in [
        ("entry value", input.entry_value),
        ("FIPE value", input.fipe_value),
    ] {
        if value.is_some_and(|amount| !amount.is_finite() || amount < 0.0) {
            return Err(AppError::Validation(format!(
                "{field} must be a non-negative number"
            )));
        }
    }

    Ok(VehicleRecord {
        id,
        tenant_id,
        inventory_id: input.inventory_id,
        plate: LicensePlate::new(&input.plate)?,
        chassis,
        renavam: clean(input.renavam),
        brand,
        model,
        color: clean(input.color),
        engine_number: clean(input.engine_number),
        status: clean(input.status),
        manufacture_year: input.manufacture_year,
        model_year: input.model_year,
        doors: input.doors,
        owner_tax_id: clean(input.owner_tax_id).map(TaxId::new).transpose()?,
        mileage: input.mileage,
        entry_value: input.entry_value,
        fipe_value: input.fipe_value,
        created_at: now,
        updated_at: now,
    })
}

fn not_found() -> AppError {
    AppError::NotFound("vehicle not found in this tenant".to_owned())
}
