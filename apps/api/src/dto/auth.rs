use dealerdesk_application::{
    AuthenticatedSession, BootstrapInput, LoginInput, TenantRecord, UserProfile, UserRecord,
};
use dealerdesk_core::{AppError, TenantId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{PermissionGrantResponse, SaveTenantRequest, SaveUserRequest, TenantResponse, UserResponse};

/// Incoming login payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Picks the account when the email exists in several tenants.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl TryFrom<LoginRequest> for LoginInput {
    type Error = AppError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let tenant_id = value
            .tenant_id
            .as_deref()
            .map(str::trim)
            .filter(|tenant_id| !tenant_id.is_empty())
            .map(str::parse::<TenantId>)
            .transpose()?;

        Ok(Self {
            email: value.email,
            password: value.password,
            tenant_id,
        })
    }
}

/// Bearer credential issued on login.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-response.ts"
)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

impl From<AuthenticatedSession> for LoginResponse {
    fn from(value: AuthenticatedSession) -> Self {
        Self {
            token: value.credential.token,
            expires_at: value.credential.expires_at.to_rfc3339(),
            user: UserResponse::from(value.user),
        }
    }
}

/// One-shot installation payload creating the first tenant and its administrator.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/bootstrap-request.ts"
)]
pub struct BootstrapRequest {
    pub token: String,
    pub tenant: SaveTenantRequest,
    pub administrator: SaveUserRequest,
}

impl From<BootstrapRequest> for BootstrapInput {
    fn from(value: BootstrapRequest) -> Self {
        Self {
            tenant: value.tenant.into(),
            administrator: value.administrator.into(),
        }
    }
}

/// Result of a completed bootstrap.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/bootstrap-response.ts"
)]
pub struct BootstrapResponse {
    pub tenant: TenantResponse,
    pub administrator: UserResponse,
}

impl From<(TenantRecord, UserRecord)> for BootstrapResponse {
    fn from((tenant, administrator): (TenantRecord, UserRecord)) -> Self {
        Self {
            tenant: TenantResponse::from(tenant),
            administrator: UserResponse::from(administrator),
        }
    }
}

/// Caller profile with its tenant and grants.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/profile-response.ts"
)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub tenant: TenantResponse,
    pub permissions: Vec<PermissionGrantResponse>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            user: UserResponse::from(value.user),
            tenant: TenantResponse::from(value.tenant),
            permissions: value
                .grants
                .into_iter()
                .map(PermissionGrantResponse::from)
                .collect(),
        }
    }
}
