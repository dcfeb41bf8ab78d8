use std::collections::HashMap;

use dealerdesk_application::{
    BankAccountRecord, ClientRecord, ContractRecord, FinancingRecord, InventoryRecord,
    MaintenanceRecord, PaymentRecord, ReceiptRecord, SaleRecord, TenantRecord, UserRecord,
    VehicleRecord,
};
use dealerdesk_core::{
    AppError, AppResult, BankAccountId, ClientId, ContractId, FinancingId, InventoryId,
    MaintenanceId, PaymentId, ReceiptId, SaleId, TenantId, UserId, VehicleId,
};
use dealerdesk_domain::{PermissionGrant, ResourceType};
use tokio::sync::RwLock;

mod access;
mod ledger;
mod records;


/// In-memory implementation of every persistence port.
///
/// Enforces the same uniqueness and reference rules as the PostgreSQL schema,
/// so services observe identical failures in both backends.
#[derive(Debug, Default)]
pub struct InMemoryBackOfficeRepository {
    tenants: RwLock<HashMap<TenantId, TenantRecord>>,
    users: RwLock<HashMap<UserId, UserRecord>>,
    grants: RwLock<HashMap<(UserId, ResourceType), PermissionGrant>>,
    clients: RwLock<HashMap<ClientId, ClientRecord>>,
    inventories: RwLock<HashMap<InventoryId, InventoryRecord>>,
    vehicles: RwLock<HashMap<VehicleId, VehicleRecord>>,
    bank_accounts: RwLock<HashMap<BankAccountId, BankAccountRecord>>,
    sales: RwLock<HashMap<SaleId, SaleRecord>>,
    financings: RwLock<HashMap<FinancingId, FinancingRecord>>,
    contracts: RwLock<HashMap<ContractId, ContractRecord>>,
    maintenances: RwLock<HashMap<MaintenanceId, MaintenanceRecord>>,
    payments: RwLock<HashMap<PaymentId, PaymentRecord>>,
    receipts: RwLock<HashMap<ReceiptId, ReceiptRecord>>,
}

impl InMemoryBackOfficeRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn still_referenced(what: &str) -> AppError {
    AppError::Validation(format!(
        "cannot delete {what}: related records still reference it"
    ))
}

fn already_in_use(field: &str) -> AppError {
    AppError::Validation(format!("{field} is already in use in this tenant"))
}

fn ensure_absent<T>(present: bool, what: &str, id: T) -> AppResult<()>
where
    T: std::fmt::Display,
{
    if present {
        return Err(AppError::Conflict(format!("{what} '{id}' already exists")));
    }

    Ok(())
}
