use dealerdesk_application::{
    AccessGateService, AuthService, BankAccountService, ClientService, ContractService,
    FinancingService, InventoryService, MaintenanceService, PaymentService,
    PermissionGrantService, ReceiptService, SaleService, TenantService, UserService,
    VehicleService,
};
use dealerdesk_domain::TenantKind;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub tenant_kind: TenantKind,
    pub access_gate_service: AccessGateService,
    pub auth_service: AuthService,
    pub tenant_service: TenantService,
    pub user_service: UserService,
    pub permission_grant_service: PermissionGrantService,
    pub client_service: ClientService,
    pub inventory_service: InventoryService,
    pub vehicle_service: VehicleService,
    pub bank_account_service: BankAccountService,
    pub sale_service: SaleService,
    pub financing_service: FinancingService,
    pub contract_service: ContractService,
    pub maintenance_service: MaintenanceService,
    pub payment_service: PaymentService,
    pub receipt_service: ReceiptService,
    pub bootstrap_token: Option<String>,
    /// Pool pinged by the health endpoint; absent for in-memory storage.
    pub database: Option<PgPool>,
}
