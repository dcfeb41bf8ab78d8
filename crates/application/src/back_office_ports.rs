//! Records and repository ports for tenant-owned business data.
//!
//! Every query takes the tenant id explicitly; repositories never return rows
//! of another tenant.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use dealerdesk_core::{AppResult, ClientId, InventoryId, TenantId, VehicleId};
use dealerdesk_domain::{EmailAddress, LicensePlate, PostalAddress, TaxId};

/// Dealership client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    /// Unique client identifier.
    pub id: ClientId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Full name.
    pub name: String,
    /// CPF or CNPJ, unique per tenant.
    pub tax_id: TaxId,
    /// Contact email, unique per tenant.
    pub email: EmailAddress,
    /// Primary phone.
    pub phone: Option<String>,
    /// Secondary phone.
    pub secondary_phone: Option<String>,
    /// Identity document (RG).
    pub identity_document: Option<String>,
    /// Free-form client classification.
    pub client_type: Option<String>,
    /// Free-form client group.
    pub group: Option<String>,
    /// Birth date.
    pub birth_date: Option<NaiveDate>,
    /// Gender.
    pub gender: Option<String>,
    /// Marital status.
    pub marital_status: Option<String>,
    /// Postal address.
    pub address: PostalAddress,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Repository port for clients.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Lists tenant clients ordered by name, optionally filtered by a name fragment.
    async fn list(&self, tenant_id: TenantId, name_filter: Option<&str>)
    -> AppResult<Vec<ClientRecord>>;

    /// Finds a tenant client.
    async fn find(&self, tenant_id: TenantId, client_id: ClientId)
    -> AppResult<Option<ClientRecord>>;

    /// Finds a tenant client by tax id.
    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<ClientRecord>>;

    /// Finds a tenant client by email.
    async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &EmailAddress,
    ) -> AppResult<Option<ClientRecord>>;

    /// Inserts a new client.
    async fn create(&self, client: ClientRecord) -> AppResult<()>;

    /// Replaces an existing client.
    async fn update(&self, client: ClientRecord) -> AppResult<()>;

    /// Deletes a tenant client. Returns whether a row was removed.
    async fn delete(&self, tenant_id: TenantId, client_id: ClientId) -> AppResult<bool>;
}

/// Stock location holding vehicles.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    /// Unique inventory identifier.
    pub id: InventoryId,
    /// Owning tenant.
    pub tenant_id: TenantId,
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
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Repository port for inventories.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Lists tenant inventories ordered by name.
    async fn list(&self, tenant_id: TenantId) -> AppResult<Vec<InventoryRecord>>;

    /// Finds a tenant inventory.
    async fn find(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<Option<InventoryRecord>>;

    /// Inserts a new inventory.
    async fn create(&self, inventory: InventoryRecord) -> AppResult<()>;

    /// Replaces an existing inventory.
    async fn update(&self, inventory: InventoryRecord) -> AppResult<()>;

    /// Deletes a tenant inventory. Returns whether a row was removed.
    async fn delete(&self, tenant_id: TenantId, inventory_id: InventoryId) -> AppResult<bool>;
}

/// Vehicle held in an inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    /// Unique vehicle identifier.
    pub id: VehicleId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Inventory of the same tenant holding the vehicle.
    pub inventory_id: InventoryId,
    /// License plate, unique per tenant.
    pub plate: LicensePlate,
    /// Chassis number (VIN), unique per tenant.
    pub chassis: String,
    /// RENAVAM registry number, unique per tenant when present.
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
    pub owner_tax_id: Option<TaxId>,
    /// Odometer reading in kilometers.
    pub mileage: Option<i64>,
    /// Acquisition value.
    pub entry_value: Option<f64>,
    /// FIPE table value.
    pub fipe_value: Option<f64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Repository port for vehicles.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Lists tenant vehicles ordered by plate.
    ///
    /// `search` matches plate, brand or model case-insensitively.
    async fn list(&self, tenant_id: TenantId, search: Option<&str>)
    -> AppResult<Vec<VehicleRecord>>;

    /// Finds a tenant vehicle.
    async fn find(
        &self,
        tenant_id: TenantId,
        vehicle_id: VehicleId,
    ) -> AppResult<Option<VehicleRecord>>;

    /// Finds a tenant vehicle by plate.
    async fn find_by_plate(
        &self,
        tenant_id: TenantId,
        plate: &LicensePlate,
    ) -> AppResult<Option<VehicleRecord>>;

    /// Finds a tenant vehicle by chassis.
    async fn find_by_chassis(
        &self,
        tenant_id: TenantId,
        chassis: &str,
    ) -> AppResult<Option<VehicleRecord>>;

    /// Finds a tenant vehicle by RENAVAM.
    async fn find_by_renavam(
        &self,
        tenant_id: TenantId,
        renavam: &str,
    ) -> AppResult<Option<VehicleRecord>>;

    /// Counts vehicles stored in an inventory.
    async fn count_in_inventory(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<u64>;

    /// Inserts a new vehicle.
    async fn create(&self, vehicle: VehicleRecord) -> AppResult<()>;

    /// Replaces an existing vehicle.
    async fn update(&self, vehicle: VehicleRecord) -> AppResult<()>;

    /// Deletes a tenant vehicle. Returns whether a row was removed.
    async fn delete(&self, tenant_id: TenantId, vehicle_id: VehicleId) -> AppResult<bool>;
}
