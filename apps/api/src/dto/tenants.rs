use dealerdesk_application::{SaveTenantInput, TenantRecord};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for the company or store profile.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-tenant-request.ts"
)]
pub struct SaveTenantRequest {
    pub name: String,
    pub trade_name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub tax_id: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl From<SaveTenantRequest> for SaveTenantInput {
    fn from(value: SaveTenantRequest) -> Self {
        Self {
            name: value.name,
            trade_name: value.trade_name,
            address: value.address,
            phone: value.phone,
            email: value.email,
            tax_id: value.tax_id,
            image_path: value.image_path,
        }
    }
}

/// API representation of the company or store profile.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/tenant-response.ts"
)]
pub struct TenantResponse {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub trade_name: String,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: String,
    pub image_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TenantRecord> for TenantResponse {
    fn from(value: TenantRecord) -> Self {
        Self {
            id: value.id.to_string(),
            kind: value.kind.as_str().to_owned(),
            name: value.name,
            trade_name: value.trade_name,
            address: value.address,
            phone: value.phone,
            email: value.email,
            tax_id: value.tax_id.into(),
            image_path: value.image_path,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
