use std::sync::Arc;

use chrono::Duration;
use dealerdesk_application::{
    AccessGateService, AuthService, BankAccountService, ClientService, ContractService,
    FinancingService, InventoryService, MaintenanceService, PaymentService,
    PermissionGrantService, ReceiptService, ReceiptSources, SaleService, TenantReferences,
    TenantService, UserService, VehicleService,
};
use dealerdesk_core::AppError;
use dealerdesk_infrastructure::{Argon2PasswordHasher, JwtCredentialCodec};

use crate::api_config::ApiConfig;
use crate::state::AppState;

mod repositories;

pub use repositories::RepositorySet;

pub fn build_app_state(repositories: RepositorySet, config: &ApiConfig) -> Result<AppState, AppError> {
    let credential_codec = Arc::new(JwtCredentialCodec::new(
        &config.jwt_secret,
        config.tenant_kind,
        Duration::minutes(config.token_ttl_minutes),
    )?);
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    let RepositorySet {
        tenant_repository,
        user_repository,
        grant_repository,
        client_repository,
        inventory_repository,
        vehicle_repository,
        ledger,
        database,
    } = repositories;

    let references = TenantReferences::new(
        client_repository.clone(),
        vehicle_repository.clone(),
        user_repository.clone(),
    );

    Ok(AppState {
        tenant_kind: config.tenant_kind,
        access_gate_service: AccessGateService::new(
            credential_codec.clone(),
            user_repository.clone(),
            tenant_repository.clone(),
            grant_repository.clone(),
            config.tenant_kind,
            config.scope_policy,
        ),
        auth_service: AuthService::new(
            user_repository.clone(),
            grant_repository.clone(),
            tenant_repository.clone(),
            password_hasher.clone(),
            credential_codec,
            config.tenant_kind,
        ),
        tenant_service: TenantService::new(tenant_repository, config.tenant_kind),
        user_service: UserService::new(user_repository.clone(), password_hasher),
        permission_grant_service: PermissionGrantService::new(user_repository, grant_repository),
        client_service: ClientService::new(client_repository),
        inventory_service: InventoryService::new(
            inventory_repository.clone(),
            vehicle_repository.clone(),
        ),
        vehicle_service: VehicleService::new(vehicle_repository, inventory_repository),
        bank_account_service: BankAccountService::new(ledger.bank_accounts.clone()),
        sale_service: SaleService::new(ledger.sales.clone(), references.clone()),
        financing_service: FinancingService::new(ledger.financings, ledger.sales.clone()),
        contract_service: ContractService::new(ledger.contracts.clone(), references.clone()),
        maintenance_service: MaintenanceService::new(ledger.maintenances, references.clone()),
        payment_service: PaymentService::new(ledger.payments, ledger.bank_accounts.clone()),
        receipt_service: ReceiptService::new(
            ledger.receipts,
            ReceiptSources {
                sales: ledger.sales,
                contracts: ledger.contracts,
                bank_accounts: ledger.bank_accounts,
            },
            references,
        ),
        bootstrap_token: config.bootstrap_token.clone(),
        database,
    })
}
