use dealerdesk_application::{MaintenanceFilter, MaintenanceRecord, SaveMaintenanceInput};
use dealerdesk_core::{AppError, VehicleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{format_date, parse_date, parse_id};

/// Incoming payload for maintenance creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-maintenance-request.ts"
)]
pub struct SaveMaintenanceRequest {
    pub vehicle_id: String,
    /// Defaults to the caller.
    #[serde(default)]
    pub responsible_user_id: Option<String>,
    pub kind: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub performed_on: Option<String>,
    #[serde(default)]
    pub odometer: Option<i64>,
    #[serde(default)]
    pub parts: Option<String>,
    #[serde(default)]
    pub services: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub workshop: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl TryFrom<SaveMaintenanceRequest> for SaveMaintenanceInput {
    type Error = AppError;

    fn try_from(value: SaveMaintenanceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_id: value.vehicle_id.parse::<VehicleId>()?,
            responsible_user_id: parse_id(value.responsible_user_id)?,
            kind: value.kind,
            performed_on: parse_date("service date", value.performed_on)?,
            odometer: value.odometer,
            parts: value.parts,
            services: value.services,
            invoice_number: value.invoice_number,
            workshop: value.workshop,
            cost: value.cost,
        })
    }
}

/// Optional filters for the maintenance list.
#[derive(Debug, Default, Deserialize)]
pub struct MaintenanceListQuery {
    pub vehicle_id: Option<String>,
}

impl TryFrom<MaintenanceListQuery> for MaintenanceFilter {
    type Error = AppError;

    fn try_from(value: MaintenanceListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_id: parse_id(value.vehicle_id)?,
        })
    }
}

/// API representation of a maintenance entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/maintenance-response.ts"
)]
pub struct MaintenanceResponse {
    pub id: String,
    pub vehicle_id: String,
    pub responsible_user_id: Option<String>,
    pub kind: String,
    pub performed_on: Option<String>,
    pub odometer: Option<i64>,
    pub parts: Option<String>,
    pub services: Option<String>,
    pub invoice_number: Option<String>,
    pub workshop: Option<String>,
    pub cost: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MaintenanceRecord> for MaintenanceResponse {
    fn from(value: MaintenanceRecord) -> Self {
        Self {
            id: value.id.to_string(),
            vehicle_id: value.vehicle_id.to_string(),
            responsible_user_id: value.responsible_user_id.map(|id| id.to_string()),
            kind: value.kind,
            performed_on: format_date(value.performed_on),
            odometer: value.odometer,
            parts: value.parts,
            services: value.services,
            invoice_number: value.invoice_number,
            workshop: value.workshop,
            cost: value.cost,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
