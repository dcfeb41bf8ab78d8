//! Login, first-run bootstrap and caller profile.

use std::sync::Arc;

use chrono::Utc;

use dealerdesk_core::{AppError, AppResult, Principal, TenantId, UserId};
use dealerdesk_domain::{EmailAddress, PermissionGrant, ResourceType, TenantKind, UserGroup};

use crate::{
    CredentialCodec, IssuedCredential, PasswordHasher, PermissionGrantRepository,
    SaveTenantInput, SaveUserInput, TenantRecord, TenantRepository, UserRecord, UserRepository,
};


/// Login request.
#[derive(Debug, Clone)]
pub struct LoginInput {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Narrows the lookup when the email exists in several tenants.
    pub tenant_id: Option<TenantId>,
}

/// Successful login.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Signed bearer credential.
    pub credential: IssuedCredential,
    /// Authenticated account.
    pub user: UserRecord,
}

/// First tenant and administrator account.
#[derive(Debug, Clone)]
pub struct BootstrapInput {
    /// Tenant profile.
    pub tenant: SaveTenantInput,
    /// Administrator account; the group is forced to administrator.
    pub administrator: SaveUserInput,
}

/// Caller profile returned by `me`.
#[derive(Debug, Clone)]
pub struct UserProfile {
    /// Caller account.
    pub user: UserRecord,
    /// Caller tenant.
    pub tenant: TenantRecord,
    /// Caller grants ordered by resource type.
    pub grants: Vec<PermissionGrant>,
}

/// Application service for authentication flows.
#[derive(Clone)]
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    grant_repository: Arc<dyn PermissionGrantRepository>,
    tenant_repository: Arc<dyn TenantRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    credential_codec: Arc<dyn CredentialCodec>,
    tenant_kind: TenantKind,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        grant_repository: Arc<dyn PermissionGrantRepository>,
        tenant_repository: Arc<dyn TenantRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        credential_codec: Arc<dyn CredentialCodec>,
        tenant_kind: TenantKind,
    ) -> Self {
        Self {
            user_repository,
            grant_repository,
            tenant_repository,
            password_hasher,
            credential_codec,
            tenant_kind,
        }
    }

    /// Authenticates with email and password and issues a credential.
    ///
    /// Unknown email and wrong password share one generic error.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthenticatedSession> {
        let failed = || AppError::Unauthorized("invalid email or password".to_owned());

        let Ok(email) = EmailAddress::new(&input.email) else {
            let _ = self.password_hasher.hash_password(&input.password);
            return Err(failed());
        };

        let candidates: Vec<UserRecord> = self
            .user_repository
            .list_by_email(&email)
            .await?
            .into_iter()
            .filter(|user| input.tenant_id.is_none_or(|tenant_id| user.tenant_id == tenant_id))
            .collect();

        if candidates.is_empty() {
            // Hash anyway so unknown emails cost the same as wrong passwords.
            let _ = self.password_hasher.hash_password(&input.password);
            return Err(failed());
        }

        let mut authenticated = None;
        for candidate in candidates {
            if self
                .password_hasher
                .verify_password(&input.password, &candidate.password_hash)?
            {
                authenticated = Some(candidate);
                break;
            }
        }

        let user = authenticated.ok_or_else(failed)?;
        if !user.active {
            return Err(AppError::Forbidden("account is inactive".to_owned()));
        }

        let user = self.upgrade_password_hash(user, &input.password).await?;
        let credential = self.issue_for(&user).await?;
        Ok(AuthenticatedSession { credential, user })
    }

    async fn upgrade_password_hash(&self, user: UserRecord, password: &str) -> AppResult<UserRecord> {
        if !self.password_hasher.needs_rehash(&user.password_hash) {
            return Ok(user);
        }

        let upgraded = UserRecord {
            password_hash: self.password_hasher.hash_password(password)?,
            ..user
        };
        self.user_repository.update(upgraded.clone()).await?;

        Ok(upgraded)
    }

    /// Creates the first tenant and its administrator with full grants.
    ///
    /// Fails with a conflict once any tenant exists.
    pub async fn bootstrap(&self, input: BootstrapInput) -> AppResult<(TenantRecord, UserRecord)> {
        if self.tenant_repository.any_exists().await? {
            return Err(AppError::Conflict(
                "bootstrap has already been completed".to_owned(),
            ));
        }

        let tenant = input
            .tenant
            .into_record(TenantId::new(), self.tenant_kind, Utc::now())?;
        let administrator = input.administrator.into_new_record(
            tenant.id,
            Some(UserGroup::administrator()),
            self.password_hasher.as_ref(),
        )?;

        self.tenant_repository.create(tenant.clone()).await?;
        self.user_repository.create(administrator.clone()).await?;
        for resource_type in ResourceType::all() {
            self.grant_repository
                .save(PermissionGrant::full(administrator.id, *resource_type))
                .await?;
        }

        Ok((tenant, administrator))
    }

    /// Returns the caller's account, tenant and grants.
    pub async fn profile(&self, user_id: UserId) -> AppResult<UserProfile> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

        let tenant = self
            .tenant_repository
            .find(self.tenant_kind, user.tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} '{}' does not exist",
                    self.tenant_kind.as_str(),
                    user.tenant_id
                ))
            })?;

        let mut grants = self.grant_repository.list_for_user(user_id).await?;
        grants.sort_by_key(|grant| grant.resource_type);
        grants.dedup_by_key(|grant| grant.resource_type);

        Ok(UserProfile {
            user,
            tenant,
            grants,
        })
    }

    async fn issue_for(&self, user: &UserRecord) -> AppResult<IssuedCredential> {
        let grants = self.grant_repository.list_for_user(user.id).await?;

        let mut role_claims = vec![user.group.as_str().to_owned()];
        let mut seen = Vec::new();
        for grant in grants {
            // Grants arrive most recent first; keep the first per resource.
            if seen.contains(&grant.resource_type) {
                continue;
            }
            seen.push(grant.resource_type);
            role_claims.extend(grant.claims());
        }

        let principal = Principal::new(user.id, user.tenant_id, role_claims);
        self.credential_codec.issue(&principal)
    }
}
