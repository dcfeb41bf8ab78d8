use std::sync::Arc;

use dealerdesk_application::{
    BankAccountRecord, ClientRepository, ContractRecord, FinancingRecord, InventoryRepository,
    LedgerRepository, MaintenanceRecord, PaymentRecord, PermissionGrantRepository, ReceiptRecord,
    SaleRecord, TenantRepository, UserRepository, VehicleRepository,
};
#[cfg(test)]
use dealerdesk_infrastructure::InMemoryBackOfficeRepository;
use dealerdesk_infrastructure::{
    PostgresClientRepository, PostgresInventoryRepository, PostgresLedgerRepository,
    PostgresPermissionGrantRepository, PostgresTenantRepository, PostgresUserRepository,
    PostgresVehicleRepository,
};
use sqlx::PgPool;

/// Storage adapters behind every application port.
pub struct RepositorySet {
    pub(super) tenant_repository: Arc<dyn TenantRepository>,
    pub(super) user_repository: Arc<dyn UserRepository>,
    pub(super) grant_repository: Arc<dyn PermissionGrantRepository>,
    pub(super) client_repository: Arc<dyn ClientRepository>,
    pub(super) inventory_repository: Arc<dyn InventoryRepository>,
    pub(super) vehicle_repository: Arc<dyn VehicleRepository>,
    pub(super) ledger: LedgerRepositories,
    pub(super) database: Option<PgPool>,
}

/// One ledger port per financial or operational record type.
pub(super) struct LedgerRepositories {
    pub(super) bank_accounts: Arc<dyn LedgerRepository<BankAccountRecord>>,
    pub(super) sales: Arc<dyn LedgerRepository<SaleRecord>>,
    pub(super) financings: Arc<dyn LedgerRepository<FinancingRecord>>,
    pub(super) contracts: Arc<dyn LedgerRepository<ContractRecord>>,
    pub(super) maintenances: Arc<dyn LedgerRepository<MaintenanceRecord>>,
    pub(super) payments: Arc<dyn LedgerRepository<PaymentRecord>>,
    pub(super) receipts: Arc<dyn LedgerRepository<ReceiptRecord>>,
}

impl LedgerRepositories {
    fn backed_by<T>(backend: &Arc<T>) -> Self
    where
        T: LedgerRepository<BankAccountRecord>
            + LedgerRepository<SaleRecord>
            + LedgerRepository<FinancingRecord>
            + LedgerRepository<ContractRecord>
            + LedgerRepository<MaintenanceRecord>
            + LedgerRepository<PaymentRecord>
            + LedgerRepository<ReceiptRecord>
            + 'static,
    {
        Self {
            bank_accounts: backend.clone(),
            sales: backend.clone(),
            financings: backend.clone(),
            contracts: backend.clone(),
            maintenances: backend.clone(),
            payments: backend.clone(),
            receipts: backend.clone(),
        }
    }
}

impl RepositorySet {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            tenant_repository: Arc::new(PostgresTenantRepository::new(pool.clone())),
            user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
            grant_repository: Arc::new(PostgresPermissionGrantRepository::new(pool.clone())),
            client_repository: Arc::new(PostgresClientRepository::new(pool.clone())),
            inventory_repository: Arc::new(PostgresInventoryRepository::new(pool.clone())),
            vehicle_repository: Arc::new(PostgresVehicleRepository::new(pool.clone())),
            ledger: LedgerRepositories::backed_by(&Arc::new(PostgresLedgerRepository::new(
                pool.clone(),
            ))),
            database: Some(pool.clone()),
        }
    }

    #[cfg(test)]
    pub fn in_memory(store: &Arc<InMemoryBackOfficeRepository>) -> Self {
        Self {
            tenant_repository: store.clone(),
            user_repository: store.clone(),
            grant_repository: store.clone(),
            client_repository: store.clone(),
            inventory_repository: store.clone(),
            vehicle_repository: store.clone(),
            ledger: LedgerRepositories::backed_by(store),
            database: None,
        }
    }
}
