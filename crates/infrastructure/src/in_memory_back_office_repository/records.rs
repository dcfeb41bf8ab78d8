use async_trait::async_trait;

use dealerdesk_application::{
    ClientRecord, ClientRepository, InventoryRecord, InventoryRepository, VehicleRecord,
    VehicleRepository,
};
use dealerdesk_core::{AppError, AppResult, ClientId, InventoryId, TenantId, VehicleId};
use dealerdesk_domain::{EmailAddress, LicensePlate, TaxId};

use super::{
    InMemoryBackOfficeRepository, already_in_use, contains_ignoring_case, ensure_absent,
    still_referenced,
};

impl InMemoryBackOfficeRepository {
    async fn ensure_client_unique(&self, client: &ClientRecord) -> AppResult<()> {
        let clients = self.clients.read().await;
        let others = clients
            .values()
            .filter(|other| other.tenant_id == client.tenant_id && other.id != client.id);

        for other in others {
            if other.tax_id == client.tax_id {
                return Err(already_in_use("tax id"));
            }
            if other.email == client.email {
                return Err(already_in_use("email"));
            }
        }

        Ok(())
    }

    async fn ensure_vehicle_valid(&self, vehicle: &VehicleRecord) -> AppResult<()> {
        if self
            .inventories
            .read()
            .await
            .get(&vehicle.inventory_id)
            .is_none_or(|inventory| inventory.tenant_id != vehicle.tenant_id)
        {
            return Err(AppError::Validation(
                "inventory does not belong to this tenant".to_owned(),
            ));
        }

        let vehicles = self.vehicles.read().await;
        let others = vehicles
            .values()
            .filter(|other| other.tenant_id == vehicle.tenant_id && other.id != vehicle.id);

        for other in others {
            if other.plate == vehicle.plate {
                return Err(already_in_use("plate"));
            }
            if other.chassis == vehicle.chassis {
                return Err(already_in_use("chassis"));
            }
            if other.renavam.is_some() && other.renavam == vehicle.renavam {
                return Err(already_in_use("renavam"));
            }
        }

        Ok(())
    }

    async fn find_vehicle_by<F>(&self, tenant_id: TenantId, matches: F) -> Option<VehicleRecord>
    where
        F: Fn(&VehicleRecord) -> bool + Send,
    {
        self.vehicles
            .read()
            .await
            .values()
            .find(|vehicle| vehicle.tenant_id == tenant_id && matches(vehicle))
            .cloned()
    }
}

#[async_trait]
impl ClientRepository for InMemoryBackOfficeRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<ClientRecord>> {
        let mut clients: Vec<ClientRecord> = self
            .clients
            .read()
            .await
            .values()
            .filter(|client| client.tenant_id == tenant_id)
            .filter(|client| {
                name_filter.is_none_or(|filter| contains_ignoring_case(&client.name, filter))
            })
            .cloned()
            .collect();
        clients.sort_by(|left, right| left.name.cmp(&right.name).then_with(|| left.id.cmp(&right.id)));

        Ok(clients)
    }

    async fn find(&self, tenant_id: TenantId, client_id: ClientId) -> AppResult<Option<ClientRecord>> {
        Ok(self
            .clients
            .read()
            .await
            .get(&client_id)
            .filter(|client| client.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<ClientRecord>> {
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|client| client.tenant_id == tenant_id && &client.tax_id == tax_id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &EmailAddress,
    ) -> AppResult<Option<ClientRecord>> {
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|client| client.tenant_id == tenant_id && &client.email == email)
            .cloned())
    }

    async fn create(&self, client: ClientRecord) -> AppResult<()> {
        self.ensure_client_unique(&client).await?;

        let mut clients = self.clients.write().await;
        ensure_absent(clients.contains_key(&client.id), "client", client.id)?;
        clients.insert(client.id, client);
        Ok(())
    }

    async fn update(&self, client: ClientRecord) -> AppResult<()> {
        self.ensure_client_unique(&client).await?;

        let mut clients = self.clients.write().await;
        match clients.get_mut(&client.id) {
            Some(stored) if stored.tenant_id == client.tenant_id => {
                *stored = client;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("client '{}' not found", client.id))),
        }
    }

    async fn delete(&self, tenant_id: TenantId, client_id: ClientId) -> AppResult<bool> {
        if ClientRepository::find(self, tenant_id, client_id).await?.is_none() {
            return Ok(false);
        }
        if self.is_referenced(client_id.into()).await {
            return Err(still_referenced("client"));
        }

        Ok(self.clients.write().await.remove(&client_id).is_some())
    }
}

#[async_trait]
impl InventoryRepository for InMemoryBackOfficeRepository {
    async fn list(&self, tenant_id: TenantId) -> AppResult<Vec<InventoryRecord>> {
        let mut inventories: Vec<InventoryRecord> = self
            .inventories
            .read()
            .await
            .values()
            .filter(|inventory| inventory.tenant_id == tenant_id)
            .cloned()
            .collect();
        inventories
            .sort_by(|left, right| left.name.cmp(&right.name).then_with(|| left.id.cmp(&right.id)));

        Ok(inventories)
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<Option<InventoryRecord>> {
        Ok(self
            .inventories
            .read()
            .await
            .get(&inventory_id)
            .filter(|inventory| inventory.tenant_id == tenant_id)
            .cloned())
    }

    async fn create(&self, inventory: InventoryRecord) -> AppResult<()> {
        let mut inventories = self.inventories.write().await;
        ensure_absent(inventories.contains_key(&inventory.id), "inventory", inventory.id)?;
        inventories.insert(inventory.id, inventory);
        Ok(())
    }

    async fn update(&self, inventory: InventoryRecord) -> AppResult<()> {
        let mut inventories = self.inventories.write().await;
        match inventories.get_mut(&inventory.id) {
            Some(stored) if stored.tenant_id == inventory.tenant_id => {
                *stored = inventory;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!(
                "inventory '{}' not found",
                inventory.id
            ))),
        }
    }

    async fn delete(&self, tenant_id: TenantId, inventory_id: InventoryId) -> AppResult<bool> {
        let mut inventories = self.inventories.write().await;
        if inventories
            .get(&inventory_id)
            .is_none_or(|inventory| inventory.tenant_id != tenant_id)
        {
            return Ok(false);
        }

        if self
            .vehicles
            .read()
            .await
            .values()
            .any(|vehicle| vehicle.inventory_id == inventory_id)
        {
            return Err(still_referenced("inventory"));
        }

        Ok(inventories.remove(&inventory_id).is_some())
    }
}

#[async_trait]
impl VehicleRepository for InMemoryBackOfficeRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        search: Option<&str>,
    ) -> AppResult<Vec<VehicleRecord>> {
        let mut vehicles: Vec<VehicleRecord> = self
            .vehicles
            .read()
            .await
            .values()
            .filter(|vehicle| vehicle.tenant_id == tenant_id)
            .filter(|vehicle| {
                search.is_none_or(|term| {
                    [vehicle.plate.as_str(), &vehicle.brand, &vehicle.model]
                        .into_iter()
                        .any(|field| contains_ignoring_case(field, term))
                })
            })
            .cloned()
            .collect();
        vehicles.sort_by(|left, right| {
            left.plate
                .as_str()
                .cmp(right.plate.as_str())
                .then_with(|| left.id.cmp(&right.id))
        });

        Ok(vehicles)
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        vehicle_id: VehicleId,
    ) -> AppResult<Option<VehicleRecord>> {
        Ok(self.find_vehicle_by(tenant_id, |vehicle| vehicle.id == vehicle_id).await)
    }

    async fn find_by_plate(
        &self,
        tenant_id: TenantId,
        plate: &LicensePlate,
    ) -> AppResult<Option<VehicleRecord>> {
        Ok(self.find_vehicle_by(tenant_id, |vehicle| &vehicle.plate == plate).await)
    }

    async fn find_by_chassis(
        &self,
        tenant_id: TenantId,
        chassis: &str,
    ) -> AppResult<Option<VehicleRecord>> {
        Ok(self.find_vehicle_by(tenant_id, |vehicle| vehicle.chassis == chassis).await)
    }

    async fn find_by_renavam(
        &self,
        tenant_id: TenantId,
        renavam: &str,
    ) -> AppResult<Option<VehicleRecord>> {
        Ok(self
            .find_vehicle_by(tenant_id, |vehicle| vehicle.renavam.as_deref() == Some(renavam))
            .await)
    }

    async fn count_in_inventory(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<u64> {
        let count = self
            .vehicles
            .read()
            .await
            .values()
            .filter(|vehicle| vehicle.tenant_id == tenant_id && vehicle.inventory_id == inventory_id)
            .count();

        u64::try_from(count)
            .map_err(|error| AppError::Internal(format!("invalid vehicle count: {error}")))
    }

    async fn create(&self, vehicle: VehicleRecord) -> AppResult<()> {
        self.ensure_vehicle_valid(&vehicle).await?;

        let mut vehicles = self.vehicles.write().await;
        ensure_absent(vehicles.contains_key(&vehicle.id), "vehicle", vehicle.id)?;
        vehicles.insert(vehicle.id, vehicle);
        Ok(())
    }

    async fn update(&self, vehicle: VehicleRecord) -> AppResult<()> {
        self.ensure_vehicle_valid(&vehicle).await?;

        let mut vehicles = self.vehicles.write().await;
        match vehicles.get_mut(&vehicle.id) {
            Some(stored) if stored.tenant_id == vehicle.tenant_id => {
                *stored = vehicle;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("vehicle '{}' not found", vehicle.id))),
        }
    }

    async fn delete(&self, tenant_id: TenantId, vehicle_id: VehicleId) -> AppResult<bool> {
        if self.find_vehicle_by(tenant_id, |vehicle| vehicle.id == vehicle_id).await.is_none() {
            return Ok(false);
        }
        if self.is_referenced(vehicle_id.into()).await {
            return Err(still_referenced("vehicle"));
        }

        Ok(self.vehicles.write().await.remove(&vehicle_id).is_some())
    }
}
