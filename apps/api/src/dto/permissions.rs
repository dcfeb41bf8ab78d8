use dealerdesk_application::SaveGrantInput;
use dealerdesk_domain::PermissionGrant;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for a grant upsert. Missing flags are false.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-permission-grant-request.ts"
)]
pub struct SavePermissionGrantRequest {
    #[serde(default)]
    pub can_read: bool,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_update: bool,
    #[serde(default)]
    pub can_delete: bool,
}

impl From<SavePermissionGrantRequest> for SaveGrantInput {
    fn from(value: SavePermissionGrantRequest) -> Self {
        Self {
            can_read: value.can_read,
            can_create: value.can_create,
            can_update: value.can_update,
            can_delete: value.can_delete,
        }
    }
}

/// API representation of one permission grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-grant-response.ts"
)]
pub struct PermissionGrantResponse {
    pub user_id: String,
    pub resource_type: String,
    pub can_read: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
    pub updated_at: String,
}

impl From<PermissionGrant> for PermissionGrantResponse {
    fn from(value: PermissionGrant) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            resource_type: value.resource_type.as_str().to_owned(),
            can_read: value.can_read,
            can_create: value.can_create,
            can_update: value.can_update,
            can_delete: value.can_delete,
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
