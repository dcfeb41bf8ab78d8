use async_trait::async_trait;
use chrono::{DateTime, Utc};

use dealerdesk_core::{AppResult, TenantId};
use dealerdesk_domain::{TaxId, TenantKind};

/// Persisted company or store profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRecord {
    /// Unique tenant identifier.
    pub id: TenantId,
    /// Company or store.
    pub kind: TenantKind,
    /// Legal name.
    pub name: String,
    /// Trade name.
    pub trade_name: String,
    /// Street address.
    pub address: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional contact email.
    pub email: Option<String>,
    /// CNPJ, globally unique.
    pub tax_id: TaxId,
    /// Optional logo path.
    pub image_path: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Repository port for tenants.
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Returns whether any tenant exists.
    async fn any_exists(&self) -> AppResult<bool>;

    /// Finds a tenant of the given kind.
    async fn find(&self, kind: TenantKind, tenant_id: TenantId) -> AppResult<Option<TenantRecord>>;

    /// Finds a tenant of any kind by CNPJ.
    async fn find_by_tax_id(&self, tax_id: &TaxId) -> AppResult<Option<TenantRecord>>;

    /// Inserts a new tenant.
    async fn create(&self, tenant: TenantRecord) -> AppResult<()>;

    /// Replaces an existing tenant.
    async fn update(&self, tenant: TenantRecord) -> AppResult<()>;
}
