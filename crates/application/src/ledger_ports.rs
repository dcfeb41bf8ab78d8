//! Tenant-owned financial and operational records.
//!
//! Sales, financings, rental contracts, maintenance entries, payments,
//! receipts and bank accounts share one storage shape: a tenant-scoped row
//! with an identifier, a creation time and a list of foreign keys. The
//! [`LedgerRepository`] port is generic over that shape so every backend
//! implements list/find/create/update/delete once per record type.

use std::fmt::Display;
use std::hash::Hash;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dealerdesk_core::{AppResult, TenantId};
use uuid::Uuid;

mod bank_account;
mod contract;
mod financing;
mod maintenance;
mod payment;
mod receipt;
mod sale;

pub use bank_account::{BankAccountFilter, BankAccountRecord};
pub use contract::{ContractFilter, ContractRecord};
pub use financing::{FinancingFilter, FinancingRecord};
pub use maintenance::{MaintenanceFilter, MaintenanceRecord};
pub use payment::{PaymentFilter, PaymentRecord};
pub use receipt::{ReceiptFilter, ReceiptRecord};
pub use sale::{SaleFilter, SaleRecord};

/// Shape shared by every ledger record.
pub trait LedgerRecord: Clone + Send + Sync + 'static {
    /// Typed identifier of the record.
    type Id: Copy + Eq + Ord + Hash + Display + Into<Uuid> + Send + Sync + 'static;
    /// List filter; the default value matches every record.
    type Filter: Default + Send + Sync + 'static;

    /// Human readable name used in error messages.
    const LABEL: &'static str;

    /// Record identifier.
    fn id(&self) -> Self::Id;

    /// Owning tenant.
    fn tenant_id(&self) -> TenantId;

    /// Creation timestamp; lists are ordered by it.
    fn created_at(&self) -> DateTime<Utc>;

    /// Whether the record passes a list filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Identifiers of the records this one points at.
    fn references(&self) -> Vec<Uuid>;

    /// Message describing a tenant-level uniqueness clash with `other`.
    fn conflict_with(&self, _other: &Self) -> Option<String> {
        None
    }
}

/// Repository port for one ledger record type.
///
/// Lists are ordered by creation time, then id.
#[async_trait]
pub trait LedgerRepository<R: LedgerRecord>: Send + Sync {
    /// Lists tenant records passing the filter.
    async fn list(&self, tenant_id: TenantId, filter: &R::Filter) -> AppResult<Vec<R>>;

    /// Finds a tenant record.
    async fn find(&self, tenant_id: TenantId, id: R::Id) -> AppResult<Option<R>>;

    /// Inserts a new record.
    async fn create(&self, record: R) -> AppResult<()>;

    /// Replaces an existing record.
    async fn update(&self, record: R) -> AppResult<()>;

    /// Deletes a tenant record. Returns whether a row was removed.
    async fn delete(&self, tenant_id: TenantId, id: R::Id) -> AppResult<bool>;
}
