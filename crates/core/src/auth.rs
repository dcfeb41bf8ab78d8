use serde::{Deserialize, Serialize};

use crate::{TenantId, UserId};

/// Authenticated identity decoded from a verified bearer credential.
///
/// A principal is immutable for the lifetime of the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: UserId,
    tenant_id: TenantId,
    role_claims: Vec<String>,
}

impl Principal {
    /// Creates a principal from decoded credential claims.
    #[must_use]
    pub fn new(user_id: UserId, tenant_id: TenantId, role_claims: Vec<String>) -> Self {
        Self {
            user_id,
            tenant_id,
            role_claims,
        }
    }

    /// Returns the authenticated user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the tenant the credential was issued for.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the role claims carried by the credential.
    #[must_use]
    pub fn role_claims(&self) -> &[String] {
        self.role_claims.as_slice()
    }
}
