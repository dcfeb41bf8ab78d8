use dealerdesk_application::{InventoryRecord, SaveInventoryInput};
use dealerdesk_core::AppError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{format_date, parse_date};

/// Incoming payload for inventory creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-inventory-request.ts"
)]
pub struct SaveInventoryRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_area: Option<f64>,
    #[serde(default)]
    pub covered_area: Option<f64>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub opened_on: Option<String>,
}

impl TryFrom<SaveInventoryRequest> for SaveInventoryInput {
    type Error = AppError;

    fn try_from(value: SaveInventoryRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            opened_on: parse_date("opening date", value.opened_on)?,
            name: value.name,
            location: value.location,
            status: value.status,
            total_area: value.total_area,
            covered_area: value.covered_area,
        })
    }
}

/// API representation of an inventory.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/inventory-response.ts"
)]
pub struct InventoryResponse {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub status: Option<String>,
    pub total_area: Option<f64>,
    pub covered_area: Option<f64>,
    pub opened_on: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<InventoryRecord> for InventoryResponse {
    fn from(value: InventoryRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            location: value.location,
            status: value.status,
            total_area: value.total_area,
            covered_area: value.covered_area,
            opened_on: format_date(value.opened_on),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
