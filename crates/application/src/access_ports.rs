//! Ports consumed by the request gate and the authentication flow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use dealerdesk_core::{AppResult, Principal, TenantId, UserId};
use dealerdesk_domain::{EmailAddress, PermissionGrant, ResourceType, TaxId, UserGroup};

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Full name.
    pub name: String,
    /// CPF or CNPJ, unique per tenant.
    pub tax_id: TaxId,
    /// Login email, unique per tenant.
    pub email: EmailAddress,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional job title.
    pub job_title: Option<String>,
    /// Group label; the administrator group bypasses tenant matching.
    pub group: UserGroup,
    /// Inactive accounts are rejected by the gate.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Returns whether the account belongs to the administrator group.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.group.is_administrator()
    }
}

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id regardless of tenant.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Lists every account using the email across all tenants, oldest first.
    async fn list_by_email(&self, email: &EmailAddress) -> AppResult<Vec<UserRecord>>;

    /// Lists tenant users ordered by name, optionally filtered by a name fragment.
    async fn list_for_tenant(
        &self,
        tenant_id: TenantId,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<UserRecord>>;

    /// Finds a user inside one tenant.
    async fn find_in_tenant(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> AppResult<Option<UserRecord>>;

    /// Finds a tenant user by tax id.
    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        tax_id: &TaxId,
    ) -> AppResult<Option<UserRecord>>;

    /// Finds a tenant user by email.
    async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &EmailAddress,
    ) -> AppResult<Option<UserRecord>>;

    /// Inserts a new user.
    async fn create(&self, user: UserRecord) -> AppResult<()>;

    /// Replaces an existing user.
    async fn update(&self, user: UserRecord) -> AppResult<()>;

    /// Deletes a tenant user together with its grants. Returns whether a row was removed.
    async fn delete(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<bool>;
}

/// Repository port for per-user permission grants.
#[async_trait]
pub trait PermissionGrantRepository: Send + Sync {
    /// Lists the user's grants, most recently updated first.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<PermissionGrant>>;

    /// Inserts or replaces the grant for `(user_id, resource_type)`.
    async fn save(&self, grant: PermissionGrant) -> AppResult<PermissionGrant>;

    /// Deletes the grant for `(user_id, resource_type)`. Returns whether a row was removed.
    async fn delete(&self, user_id: UserId, resource_type: ResourceType) -> AppResult<bool>;
}

/// Port for password hashing operations.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;

    /// Returns whether a verified hash was produced with outdated parameters
    /// and should be replaced on the next successful login.
    fn needs_rehash(&self, _hash: &str) -> bool {
        false
    }
}

/// Signed bearer credential handed to a client after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    /// Encoded token.
    pub token: String,
    /// Expiry instant embedded in the token.
    pub expires_at: DateTime<Utc>,
}

/// Port for issuing and verifying bearer credentials.
pub trait CredentialCodec: Send + Sync {
    /// Signs a credential for the principal.
    fn issue(&self, principal: &Principal) -> AppResult<IssuedCredential>;

    /// Verifies signature and expiry and returns the embedded principal.
    ///
    /// Every failure is reported as `AppError::InvalidCredential`.
    fn decode(&self, token: &str) -> AppResult<Principal>;
}
