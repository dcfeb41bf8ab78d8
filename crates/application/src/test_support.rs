//! Hand-written fakes shared by the service tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use dealerdesk_core::{
    AppError, AppResult, ClientId, InventoryId, Principal, TenantId, UserId, VehicleId,
};
use dealerdesk_domain::{
    EmailAddress, LicensePlate, PermissionGrant, PostalAddress, ResourceType, TaxId, TenantKind,
    UserGroup,
};

use crate::{
    AccessContext, BankAccountRecord, ClientRecord, ClientRepository, ContractRecord,
    CredentialCodec, FinancingRecord, InventoryRecord, InventoryRepository, IssuedCredential,
    LedgerRecord, LedgerRepository, MaintenanceRecord, PasswordHasher, PaymentRecord,
    PermissionGrantRepository, ReceiptRecord, SaleRecord, TenantRecord, TenantRepository,
    UserRecord, UserRepository, VehicleRecord, VehicleRepository,
};

#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) tenants: Mutex<Vec<TenantRecord>>,
    pub(crate) users: Mutex<Vec<UserRecord>>,
    pub(crate) grants: Mutex<Vec<PermissionGrant>>,
    pub(crate) clients: Mutex<Vec<ClientRecord>>,
    pub(crate) inventories: Mutex<Vec<InventoryRecord>>,
    pub(crate) vehicles: Mutex<Vec<VehicleRecord>>,
    pub(crate) bank_accounts: Mutex<Vec<BankAccountRecord>>,
    pub(crate) sales: Mutex<Vec<SaleRecord>>,
    pub(crate) financings: Mutex<Vec<FinancingRecord>>,
    pub(crate) contracts: Mutex<Vec<ContractRecord>>,
    pub(crate) maintenances: Mutex<Vec<MaintenanceRecord>>,
    pub(crate) payments: Mutex<Vec<PaymentRecord>>,
    pub(crate) receipts: Mutex<Vec<ReceiptRecord>>,
}

impl FakeStore {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) async fn add_tenant(&self, kind: TenantKind) -> TenantId {
        let tenant = tenant_record(kind, TenantId::new(), "11222333000181");
        let tenant_id = tenant.id;
        self.tenants.lock().await.push(tenant);
        tenant_id
    }

    pub(crate) async fn add_user(&self, tenant_id: TenantId, group: &str) -> UserRecord {
        let count = self.users.lock().await.len();
        let user = user_record(
            tenant_id,
            &format!("user{count}@dealer.com"),
            &format!("{:011}", 10_000_000_000_u64 + count as u64),
            group,
        );
        self.users.lock().await.push(user.clone());
        user
    }

    pub(crate) async fn add_client(&self, tenant_id: TenantId) -> ClientId {
        let count = self.clients.lock().await.len();
        let now = Utc::now();
        let client = ClientRecord {
            id: ClientId::new(),
            tenant_id,
            name: format!("Cliente {count}"),
            tax_id: TaxId::new(format!("{:011}", 20_000_000_000_u64 + count as u64))
                .unwrap_or_else(|error| panic!("{error}")),
            email: EmailAddress::new(format!("cliente{count}@mail.com"))
                .unwrap_or_else(|error| panic!("{error}")),
            phone: None,
            secondary_phone: None,
            identity_document: None,
            client_type: None,
            group: None,
            birth_date: None,
            gender: None,
            marital_status: None,
            address: PostalAddress::default(),
            created_at: now,
            updated_at: now,
        };
        let client_id = client.id;
        self.clients.lock().await.push(client);
        client_id
    }

    pub(crate) async fn add_vehicle(&self, tenant_id: TenantId) -> VehicleId {
        let count = self.vehicles.lock().await.len();
        let now = Utc::now();
        let vehicle = VehicleRecord {
            id: VehicleId::new(),
            tenant_id,
            inventory_id: InventoryId::new(),
            plate: LicensePlate::new(format!("ABC{count:04}"))
                .unwrap_or_else(|error| panic!("{error}")),
            chassis: format!("9BD{count:014}"),
            renavam: None,
            brand: "Volkswagen".to_owned(),
            model: "Polo".to_owned(),
            color: None,
            engine_number: None,
            status: None,
            manufacture_year: Some(2022),
            model_year: Some(2023),
            doors: Some(4),
            owner_tax_id: None,
            mileage: Some(30_000),
            entry_value: Some(68_000.0),
            fipe_value: Some(74_500.0),
            created_at: now,
            updated_at: now,
        };
        let vehicle_id = vehicle.id;
        self.vehicles.lock().await.push(vehicle);
        vehicle_id
    }

    pub(crate) async fn grant(&self, user_id: UserId, resource_type: ResourceType) {
        self.grants
            .lock()
            .await
            .push(PermissionGrant::full(user_id, resource_type));
    }
}

pub(crate) fn tenant_record(kind: TenantKind, id: TenantId, cnpj: &str) -> TenantRecord {
    let now = Utc::now();
    TenantRecord {
        id,
        kind,
        name: "Auto Center LTDA".to_owned(),
        trade_name: "Auto Center".to_owned(),
        address: "Rua XV, 100".to_owned(),
        phone: None,
        email: None,
        tax_id: TaxId::new(cnpj).unwrap_or_else(|error| panic!("{error}")),
        image_path: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn user_record(tenant_id: TenantId, email: &str, tax_id: &str, group: &str) -> UserRecord {
    let now = Utc::now();
    UserRecord {
        id: UserId::new(),
        tenant_id,
        name: "Vendedor".to_owned(),
        tax_id: TaxId::new(tax_id).unwrap_or_else(|error| panic!("{error}")),
        email: EmailAddress::new(email).unwrap_or_else(|error| panic!("{error}")),
        password_hash: "hashed:correct horse battery".to_owned(),
        phone: None,
        job_title: None,
        group: UserGroup::new(group).unwrap_or_else(|error| panic!("{error}")),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn context(user: &UserRecord) -> AccessContext {
    AccessContext::new(
        Principal::new(user.id, user.tenant_id, Vec::new()),
        user.tenant_id,
        user.is_administrator(),
    )
}

#[async_trait]
impl TenantRepository for FakeStore {
    async fn any_exists(&self) -> AppResult<bool> {
        Ok(!self.tenants.lock().await.is_empty())
    }

    async fn find(&self, kind: TenantKind, tenant_id: TenantId) -> AppResult<Option<TenantRecord>> {
        Ok(self
            .tenants
            .lock()
            .await
            .iter()
            .find(|tenant| tenant.id == tenant_id && tenant.kind == kind)
            .cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &TaxId) -> AppResult<Option<TenantRecord>> {
        Ok(self
            .tenants
            .lock()
            .await
            .iter()
            .find(|tenant| &tenant.tax_id == tax_id)
            .cloned())
    }

    async fn create(&self, tenant: TenantRecord) -> AppResult<()> {
        self.tenants.lock().await.push(tenant);
        Ok(())
    }

    async fn update(&self, tenant: TenantRecord) -> AppResult<()> {
        let mut tenants = self.tenants.lock().await;
        let slot = tenants
            .iter_mut()
            .find(|existing| existing.id == tenant.id)
            .ok_or_else(|| AppError::NotFound("tenant".to_owned()))?;
        *slot = tenant;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.id == user_id)
            .cloned())
    }

    async fn list_by_email(&self, email: &EmailAddress) -> AppResult<Vec<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|user| &user.email == email)
            .cloned()
            .collect())
    }

    async fn list_for_tenant(
        &self,
        tenant_id: TenantId,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self
            .users
            .lock()
            .await
            .iter()
            .filter(|user| user.tenant_id == tenant_id)
            .filter(|user| name_filter.is_none_or(|filter| user.name.contains(filter)))
            .cloned()
            .collect();
        users.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(users)
    }

    async fn find_in_tenant(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> AppResult<Option<UserRecord>> {
        Ok(self
            .find_by_id(user_id)
            .await?
            .filter(|user| user.tenant_id == tenant_id))
    }

    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.tenant_id == tenant_id && &user.tax_id == tax_id)
            .cloned())
    }

    async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &EmailAddress,
    ) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.tenant_id == tenant_id && &user.email == email)
            .cloned())
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        self.users.lock().await.push(user);
        Ok(())
    }

    async fn update(&self, user: UserRecord) -> AppResult<()> {
        let mut users = self.users.lock().await;
        let slot = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| AppError::NotFound("user".to_owned()))?;
        *slot = user;
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<bool> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|user| !(user.id == user_id && user.tenant_id == tenant_id));
        let removed = users.len() != before;
        if removed {
            self.grants
                .lock()
                .await
                .retain(|grant| grant.user_id != user_id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl PermissionGrantRepository for FakeStore {
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<PermissionGrant>> {
        let mut grants: Vec<PermissionGrant> = self
            .grants
            .lock()
            .await
            .iter()
            .filter(|grant| grant.user_id == user_id)
            .cloned()
            .collect();
        grants.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
        Ok(grants)
    }

    async fn save(&self, grant: PermissionGrant) -> AppResult<PermissionGrant> {
        let mut grants = self.grants.lock().await;
        grants.retain(|existing| {
            !(existing.user_id == grant.user_id && existing.resource_type == grant.resource_type)
        });
        grants.push(grant.clone());
        Ok(grant)
    }

    async fn delete(&self, user_id: UserId, resource_type: ResourceType) -> AppResult<bool> {
        let mut grants = self.grants.lock().await;
        let before = grants.len();
        grants.retain(|grant| !(grant.user_id == user_id && grant.resource_type == resource_type));
        Ok(grants.len() != before)
    }
}

#[async_trait]
impl ClientRepository for FakeStore {
    async fn list(
        &self,
        tenant_id: TenantId,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<ClientRecord>> {
        let mut clients: Vec<ClientRecord> = self
            .clients
            .lock()
            .await
            .iter()
            .filter(|client| client.tenant_id == tenant_id)
            .filter(|client| name_filter.is_none_or(|filter| client.name.contains(filter)))
            .cloned()
            .collect();
        clients.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(clients)
    }

    async fn find(&self, tenant_id: TenantId, client_id: ClientId) -> AppResult<Option<ClientRecord>> {
        Ok(self
            .clients
            .lock()
            .await
            .iter()
            .find(|client| client.tenant_id == tenant_id && client.id == client_id)
            .cloned())
    }

    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<ClientRecord>> {
        Ok(self
            .clients
            .lock()
            .await
            .iter()
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
            .lock()
            .await
            .iter()
            .find(|client| client.tenant_id == tenant_id && &client.email == email)
            .cloned())
    }

    async fn create(&self, client: ClientRecord) -> AppResult<()> {
        self.clients.lock().await.push(client);
        Ok(())
    }

    async fn update(&self, client: ClientRecord) -> AppResult<()> {
        let mut clients = self.clients.lock().await;
        let slot = clients
            .iter_mut()
            .find(|existing| existing.id == client.id)
            .ok_or_else(|| AppError::NotFound("client".to_owned()))?;
        *slot = client;
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, client_id: ClientId) -> AppResult<bool> {
        let mut clients = self.clients.lock().await;
        let before = clients.len();
        clients.retain(|client| !(client.tenant_id == tenant_id && client.id == client_id));
        Ok(clients.len() != before)
    }
}

#[async_trait]
impl InventoryRepository for FakeStore {
    async fn list(&self, tenant_id: TenantId) -> AppResult<Vec<InventoryRecord>> {
        Ok(self
            .inventories
            .lock()
            .await
            .iter()
            .filter(|inventory| inventory.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<Option<InventoryRecord>> {
        Ok(self
            .inventories
            .lock()
            .await
            .iter()
            .find(|inventory| inventory.tenant_id == tenant_id && inventory.id == inventory_id)
            .cloned())
    }

    async fn create(&self, inventory: InventoryRecord) -> AppResult<()> {
        self.inventories.lock().await.push(inventory);
        Ok(())
    }

    async fn update(&self, inventory: InventoryRecord) -> AppResult<()> {
        let mut inventories = self.inventories.lock().await;
        let slot = inventories
            .iter_mut()
            .find(|existing| existing.id == inventory.id)
            .ok_or_else(|| AppError::NotFound("inventory".to_owned()))?;
        *slot = inventory;
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, inventory_id: InventoryId) -> AppResult<bool> {
        let mut inventories = self.inventories.lock().await;
        let before = inventories.len();
        inventories
            .retain(|inventory| !(inventory.tenant_id == tenant_id && inventory.id == inventory_id));
        Ok(inventories.len() != before)
    }
}

#[async_trait]
impl VehicleRepository for FakeStore {
    async fn list(&self, tenant_id: TenantId, search: Option<&str>) -> AppResult<Vec<VehicleRecord>> {
        let search = search.map(str::to_lowercase);
        Ok(self
            .vehicles
            .lock()
            .await
            .iter()
            .filter(|vehicle| vehicle.tenant_id == tenant_id)
            .filter(|vehicle| {
                search.as_deref().is_none_or(|search| {
                    vehicle.plate.as_str().to_lowercase().contains(search)
                        || vehicle.brand.to_lowercase().contains(search)
                        || vehicle.model.to_lowercase().contains(search)
                })
            })
            .cloned()
            .collect())
    }

    async fn find(&self, tenant_id: TenantId, vehicle_id: VehicleId) -> AppResult<Option<VehicleRecord>> {
        Ok(self
            .vehicles
            .lock()
            .await
            .iter()
            .find(|vehicle| vehicle.tenant_id == tenant_id && vehicle.id == vehicle_id)
            .cloned())
    }

    async fn find_by_plate(
        &self,
        tenant_id: TenantId,
        plate: &LicensePlate,
    ) -> AppResult<Option<VehicleRecord>> {
        Ok(self
            .vehicles
            .lock()
            .await
            .iter()
            .find(|vehicle| vehicle.tenant_id == tenant_id && &vehicle.plate == plate)
            .cloned())
    }

    async fn find_by_chassis(
        &self,
        tenant_id: TenantId,
        chassis: &str,
    ) -> AppResult<Option<VehicleRecord>> {
        Ok(self
            .vehicles
            .lock()
            .await
            .iter()
            .find(|vehicle| vehicle.tenant_id == tenant_id && vehicle.chassis == chassis)
            .cloned())
    }

    async fn find_by_renavam(
        &self,
        tenant_id: TenantId,
        renavam: &str,
    ) -> AppResult<Option<VehicleRecord>> {
        Ok(self
            .vehicles
            .lock()
            .await
            .iter()
            .find(|vehicle| {
                vehicle.tenant_id == tenant_id && vehicle.renavam.as_deref() == Some(renavam)
            })
            .cloned())
    }

    async fn count_in_inventory(
        &self,
        tenant_id: TenantId,
        inventory_id: InventoryId,
    ) -> AppResult<u64> {
        Ok(self
            .vehicles
            .lock()
            .await
            .iter()
            .filter(|vehicle| vehicle.tenant_id == tenant_id && vehicle.inventory_id == inventory_id)
            .count() as u64)
    }

    async fn create(&self, vehicle: VehicleRecord) -> AppResult<()> {
        self.vehicles.lock().await.push(vehicle);
        Ok(())
    }

    async fn update(&self, vehicle: VehicleRecord) -> AppResult<()> {
        let mut vehicles = self.vehicles.lock().await;
        let slot = vehicles
            .iter_mut()
            .find(|existing| existing.id == vehicle.id)
            .ok_or_else(|| AppError::NotFound("vehicle".to_owned()))?;
        *slot = vehicle;
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, vehicle_id: VehicleId) -> AppResult<bool> {
        let mut vehicles = self.vehicles.lock().await;
        let before = vehicles.len();
        vehicles.retain(|vehicle| !(vehicle.tenant_id == tenant_id && vehicle.id == vehicle_id));
        Ok(vehicles.len() != before)
    }
}

/// Gives the generic ledger fake access to the vector holding one record type.
pub(crate) trait FakeLedgerTable<R> {
    fn table(&self) -> &Mutex<Vec<R>>;
}

macro_rules! fake_ledger_table {
    ($($record:ty => $field:ident),+ $(,)?) => {
        $(
            impl FakeLedgerTable<$record> for FakeStore {
                fn table(&self) -> &Mutex<Vec<$record>> {
                    &self.$field
                }
            }
        )+
    };
}

fake_ledger_table!(
    BankAccountRecord => bank_accounts,
    SaleRecord => sales,
    FinancingRecord => financings,
    ContractRecord => contracts,
    MaintenanceRecord => maintenances,
    PaymentRecord => payments,
    ReceiptRecord => receipts,
);

#[async_trait]
impl<R> LedgerRepository<R> for FakeStore
where
    R: LedgerRecord,
    FakeStore: FakeLedgerTable<R>,
{
    async fn list(&self, tenant_id: TenantId, filter: &R::Filter) -> AppResult<Vec<R>> {
        let mut records: Vec<R> = FakeLedgerTable::<R>::table(self)
            .lock()
            .await
            .iter()
            .filter(|record| record.tenant_id() == tenant_id && record.matches(filter))
            .cloned()
            .collect();
        records.sort_by_key(|record| (record.created_at(), record.id()));
        Ok(records)
    }

    async fn find(&self, tenant_id: TenantId, id: R::Id) -> AppResult<Option<R>> {
        Ok(FakeLedgerTable::<R>::table(self)
            .lock()
            .await
            .iter()
            .find(|record| record.tenant_id() == tenant_id && record.id() == id)
            .cloned())
    }

    async fn create(&self, record: R) -> AppResult<()> {
        FakeLedgerTable::<R>::table(self).lock().await.push(record);
        Ok(())
    }

    async fn update(&self, record: R) -> AppResult<()> {
        let mut records = FakeLedgerTable::<R>::table(self).lock().await;
        let slot = records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
            .ok_or_else(|| AppError::NotFound(R::LABEL.to_owned()))?;
        *slot = record;
        Ok(())
    }

    async fn delete(&self, tenant_id: TenantId, id: R::Id) -> AppResult<bool> {
        let mut records = FakeLedgerTable::<R>::table(self).lock().await;
        let before = records.len();
        records.retain(|record| !(record.tenant_id() == tenant_id && record.id() == id));
        Ok(records.len() != before)
    }
}

/// Stores passwords as `hashed:<plaintext>`; `legacy:<plaintext>` still
/// verifies but asks for a rehash.
pub(crate) struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}") || hash == format!("legacy:{password}"))
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        hash.starts_with("legacy:")
    }
}

/// Encodes principals as `user|tenant|claim,claim`; the literal `expired` fails.
pub(crate) struct FakeCredentialCodec;

impl FakeCredentialCodec {
    pub(crate) fn token_for(user: &UserRecord) -> String {
        format!("{}|{}|", user.id, user.tenant_id)
    }
}

impl CredentialCodec for FakeCredentialCodec {
    fn issue(&self, principal: &Principal) -> AppResult<IssuedCredential> {
        Ok(IssuedCredential {
            token: format!(
                "{}|{}|{}",
                principal.user_id(),
                principal.tenant_id(),
                principal.role_claims().join(",")
            ),
            expires_at: Utc::now() + Duration::hours(8),
        })
    }

    fn decode(&self, token: &str) -> AppResult<Principal> {
        let mut parts = token.splitn(3, '|');
        let (Some(user_id), Some(tenant_id), Some(claims)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(AppError::InvalidCredential("malformed token".to_owned()));
        };

        let user_id = user_id
            .parse::<UserId>()
            .map_err(|error| AppError::InvalidCredential(error.to_string()))?;
        let tenant_id = tenant_id
            .parse::<TenantId>()
            .map_err(|error| AppError::InvalidCredential(error.to_string()))?;
        let claims = claims
            .split(',')
            .filter(|claim| !claim.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Principal::new(user_id, tenant_id, claims))
    }
}
