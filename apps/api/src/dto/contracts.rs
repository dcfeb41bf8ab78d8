use dealerdesk_application::{ContractFilter, ContractRecord, SaveContractInput};
use dealerdesk_core::{AppError, VehicleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{DATE_FORMAT, format_date, parse_date, parse_id};

/// Incoming payload for rental contract creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-contract-request.ts"
)]
pub struct SaveContractRequest {
    pub vehicle_id: String,
    /// Defaults to the caller.
    #[serde(default)]
    pub responsible_user_id: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub starts_on: Option<String>,
    /// `YYYY-MM-DD`; open-ended when absent.
    #[serde(default)]
    pub ends_on: Option<String>,
    #[serde(default)]
    pub weekly_rate: Option<f64>,
    #[serde(default)]
    pub daily_rate: Option<f64>,
}

impl TryFrom<SaveContractRequest> for SaveContractInput {
    type Error = AppError;

    fn try_from(value: SaveContractRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_id: value.vehicle_id.parse::<VehicleId>()?,
            responsible_user_id: parse_id(value.responsible_user_id)?,
            starts_on: parse_date("start date", value.starts_on)?,
            ends_on: parse_date("end date", value.ends_on)?,
            weekly_rate: value.weekly_rate,
            daily_rate: value.daily_rate,
        })
    }
}

/// Optional filters for the contract list.
#[derive(Debug, Default, Deserialize)]
pub struct ContractListQuery {
    pub vehicle_id: Option<String>,
    /// Only contracts covering this day, `YYYY-MM-DD`.
    pub active_on: Option<String>,
}

impl TryFrom<ContractListQuery> for ContractFilter {
    type Error = AppError;

    fn try_from(value: ContractListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_id: parse_id(value.vehicle_id)?,
            active_on: parse_date("active_on", value.active_on)?,
        })
    }
}

/// API representation of a rental contract.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/contract-response.ts"
)]
pub struct ContractResponse {
    pub id: String,
    pub vehicle_id: String,
    pub responsible_user_id: String,
    pub starts_on: String,
    pub ends_on: Option<String>,
    pub weekly_rate: Option<f64>,
    pub daily_rate: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ContractRecord> for ContractResponse {
    fn from(value: ContractRecord) -> Self {
        Self {
            id: value.id.to_string(),
            vehicle_id: value.vehicle_id.to_string(),
            responsible_user_id: value.responsible_user_id.to_string(),
            starts_on: value.starts_on.format(DATE_FORMAT).to_string(),
            ends_on: format_date(value.ends_on),
            weekly_rate: value.weekly_rate,
            daily_rate: value.daily_rate,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
