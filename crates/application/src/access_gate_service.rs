//! Request gate: credential decoding, tenant scope enforcement and
//! permission-grant lookup composed into one ordered pipeline.
//!
//! `Unauthenticated -> Authenticated -> active account -> tenant match or
//! administrator -> grant allows action -> Authorized`. The first failing
//! stage terminates the request.

use std::sync::Arc;

use thiserror::Error;

use dealerdesk_core::{AppError, Principal, TenantId, UserId};
use dealerdesk_domain::{PermissionAction, ResourceType, TenantKind, TenantScopePolicy};

use crate::{
    CredentialCodec, PermissionGrantRepository, TenantRepository, UserRecord, UserRepository,
};

mod scope;


/// Terminal gate failures.
#[derive(Debug, Error)]
pub enum GateError {
    /// No usable `Authorization: Bearer` header.
    #[error("authentication required")]
    Unauthenticated,

    /// Signature, expiry or claim validation failed.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The caller's account is inactive.
    #[error("account is inactive")]
    AccountRevoked,

    /// The request addresses a user or tenant outside the caller's tenant.
    #[error("access to another tenant is not allowed")]
    CrossTenantDenied,

    /// No grant, or a grant whose flag for the action is false.
    #[error("missing '{}' permission on '{}'", .action.as_str(), .resource.as_str())]
    InsufficientPermission {
        /// Guarded resource type.
        resource: ResourceType,
        /// Requested action.
        action: PermissionAction,
    },

    /// The credential names a user that no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// Validation, lookup or storage failure raised while evaluating the gate.
    #[error(transparent)]
    Application(#[from] AppError),
}

impl From<GateError> for AppError {
    fn from(value: GateError) -> Self {
        match value {
            GateError::Unauthenticated => Self::Unauthorized(value.to_string()),
            GateError::InvalidCredential(message) => Self::InvalidCredential(message),
            GateError::AccountRevoked
            | GateError::CrossTenantDenied
            | GateError::InsufficientPermission { .. } => Self::Forbidden(value.to_string()),
            GateError::UserNotFound => Self::NotFound(value.to_string()),
            GateError::Application(error) => error,
        }
    }
}

/// Everything the gate reads from one request.
#[derive(Debug, Clone, Copy)]
pub struct GateRequest<'a> {
    /// Raw `Authorization` header value.
    pub authorization: Option<&'a str>,
    /// Raw user id path segment, when the route carries one.
    pub target_user_id: Option<&'a str>,
    /// Raw tenant id path segment, when the route carries one.
    pub target_tenant_id: Option<&'a str>,
    /// Resource type the route belongs to.
    pub resource: ResourceType,
    /// Action derived from the request method.
    pub action: PermissionAction,
}

/// Gate output handed to business handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    principal: Principal,
    tenant_id: TenantId,
    is_administrator: bool,
}

impl AccessContext {
    /// Creates an access context.
    #[must_use]
    pub fn new(principal: Principal, tenant_id: TenantId, is_administrator: bool) -> Self {
        Self {
            principal,
            tenant_id,
            is_administrator,
        }
    }

    /// Returns the authenticated principal.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Returns the authenticated user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.principal.user_id()
    }

    /// Returns the effective tenant every query of this request is scoped to.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns whether the caller belongs to the administrator group.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.is_administrator
    }
}

/// Application service evaluating the request gate.
#[derive(Clone)]
pub struct AccessGateService {
    credential_codec: Arc<dyn CredentialCodec>,
    user_repository: Arc<dyn UserRepository>,
    tenant_repository: Arc<dyn TenantRepository>,
    grant_repository: Arc<dyn PermissionGrantRepository>,
    tenant_kind: TenantKind,
    scope_policy: TenantScopePolicy,
}

impl AccessGateService {
    /// Creates a gate for one tenant kind and unscoped-request policy.
    #[must_use]
    pub fn new(
        credential_codec: Arc<dyn CredentialCodec>,
        user_repository: Arc<dyn UserRepository>,
        tenant_repository: Arc<dyn TenantRepository>,
        grant_repository: Arc<dyn PermissionGrantRepository>,
        tenant_kind: TenantKind,
        scope_policy: TenantScopePolicy,
    ) -> Self {
        Self {
            credential_codec,
            user_repository,
            tenant_repository,
            grant_repository,
            tenant_kind,
            scope_policy,
        }
    }

    /// Returns the tenant kind of this deployment.
    #[must_use]
    pub fn tenant_kind(&self) -> TenantKind {
        self.tenant_kind
    }

    /// Runs the reduced gate: credential and active account only.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<(Principal, UserRecord), GateError> {
        let token = bearer_token(authorization)?;
        let principal = self
            .credential_codec
            .decode(token)
            .map_err(|error| match error {
                AppError::InvalidCredential(message) => GateError::InvalidCredential(message),
                other => GateError::InvalidCredential(other.to_string()),
            })?;

        let caller = self
            .user_repository
            .find_by_id(principal.user_id())
            .await?
            .ok_or(GateError::UserNotFound)?;

        // Revoked accounts are refused before any claim cross-check.
        if !caller.active {
            return Err(GateError::AccountRevoked);
        }

        if caller.tenant_id != principal.tenant_id() {
            return Err(GateError::InvalidCredential(
                "credential tenant does not match the account".to_owned(),
            ));
        }

        Ok((principal, caller))
    }

    /// Runs the full gate and returns the access context for the handler.
    pub async fn authorize(&self, request: GateRequest<'_>) -> Result<AccessContext, GateError> {
        let (principal, caller) = self.authenticate(request.authorization).await?;

        let tenant_id = self
            .resolve_scope(&caller, request.target_user_id, request.target_tenant_id)
            .await?;

        self.require_grant(caller.id, request.resource, request.action)
            .await?;

        Ok(AccessContext::new(
            principal,
            tenant_id,
            caller.is_administrator(),
        ))
    }

    async fn require_grant(
        &self,
        user_id: UserId,
        resource: ResourceType,
        action: PermissionAction,
    ) -> Result<(), GateError> {
        let grants = self.grant_repository.list_for_user(user_id).await?;

        // Most recently updated grant wins if storage still holds duplicates.
        let allowed = grants
            .iter()
            .filter(|grant| grant.resource_type == resource)
            .max_by_key(|grant| grant.updated_at)
            .is_some_and(|grant| grant.allows(action));

        if allowed {
            Ok(())
        } else {
            Err(GateError::InsufficientPermission { resource, action })
        }
    }
}

fn bearer_token(authorization: Option<&str>) -> Result<&str, GateError> {
    let header = authorization.ok_or(GateError::Unauthenticated)?;
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(GateError::Unauthenticated)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(GateError::Unauthenticated);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(GateError::Unauthenticated);
    }

    Ok(token)
}
