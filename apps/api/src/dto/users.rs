use dealerdesk_application::{SaveUserInput, UserRecord};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for user creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-user-request.ts"
)]
pub struct SaveUserRequest {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl From<SaveUserRequest> for SaveUserInput {
    fn from(value: SaveUserRequest) -> Self {
        Self {
            name: value.name,
            tax_id: value.tax_id,
            email: value.email,
            password: value.password,
            phone: value.phone,
            job_title: value.job_title,
            group: value.group,
            active: value.active,
        }
    }
}

/// Optional filters for the user list.
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub name: Option<String>,
}

/// API representation of a user account. The password hash never leaves the server.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub group: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id.to_string(),
            tenant_id: value.tenant_id.to_string(),
            name: value.name,
            tax_id: value.tax_id.into(),
            email: value.email.into(),
            phone: value.phone,
            job_title: value.job_title,
            group: value.group.as_str().to_owned(),
            active: value.active,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
