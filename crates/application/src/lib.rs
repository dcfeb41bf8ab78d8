//! Application services and ports.

#![forbid(unsafe_code)]

mod access_gate_service;
mod access_ports;
mod auth_service;
mod back_office_ports;
mod bank_account_service;
mod client_service;
mod contract_service;
mod financing_service;
mod inventory_service;
mod ledger_ports;
mod ledger_service;
mod maintenance_service;
mod payment_service;
mod permission_grant_service;
mod receipt_service;
mod sale_service;
mod tenant_ports;
mod tenant_service;
mod user_service;
mod vehicle_service;

#[cfg(test)]
mod test_support;

pub use access_gate_service::{AccessContext, AccessGateService, GateError, GateRequest};
pub use access_ports::{
    CredentialCodec, IssuedCredential, PasswordHasher, PermissionGrantRepository, UserRecord,
    UserRepository,
};
pub use auth_service::{AuthService, AuthenticatedSession, BootstrapInput, LoginInput, UserProfile};
pub use back_office_ports::{
    ClientRecord, ClientRepository, InventoryRecord, InventoryRepository, VehicleRecord,
    VehicleRepository,
};
pub use bank_account_service::{BankAccountService, SaveBankAccountInput};
pub use client_service::{ClientService, SaveClientInput};
pub use contract_service::{ContractService, SaveContractInput};
pub use financing_service::{FinancingService, MAX_INSTALLMENTS, SaveFinancingInput};
pub use inventory_service::{InventoryService, SaveInventoryInput};
pub use ledger_ports::{
    BankAccountFilter, BankAccountRecord, ContractFilter, ContractRecord, FinancingFilter,
    FinancingRecord, LedgerRecord, LedgerRepository, MaintenanceFilter, MaintenanceRecord,
    PaymentFilter, PaymentRecord, ReceiptFilter, ReceiptRecord, SaleFilter, SaleRecord,
};
pub use ledger_service::TenantReferences;
pub use maintenance_service::{MaintenanceService, SaveMaintenanceInput};
pub use payment_service::{PaymentService, SavePaymentInput};
pub use permission_grant_service::{PermissionGrantService, SaveGrantInput};
pub use receipt_service::{ReceiptService, ReceiptSources, SaveReceiptInput};
pub use sale_service::{SaleService, SaveSaleInput};
pub use tenant_ports::{TenantRecord, TenantRepository};
pub use tenant_service::{SaveTenantInput, TenantService};
pub use user_service::{SaveUserInput, UserService};
pub use vehicle_service::{SaveVehicleInput, VehicleService};
