use dealerdesk_application::{SaveVehicleInput, VehicleRecord};
use dealerdesk_core::{AppError, InventoryId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for vehicle creation and replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/save-vehicle-request.ts"
)]
pub struct SaveVehicleRequest {
    pub inventory_id: String,
    pub plate: String,
    pub chassis: String,
    #[serde(default)]
    pub renavam: Option<String>,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub engine_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub manufacture_year: Option<i32>,
    #[serde(default)]
    pub model_year: Option<i32>,
    #[serde(default)]
    pub doors: Option<i32>,
    #[serde(default)]
    pub owner_tax_id: Option<String>,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub entry_value: Option<f64>,
    #[serde(default)]
    pub fipe_value: Option<f64>,
}

impl TryFrom<SaveVehicleRequest> for SaveVehicleInput {
    type Error = AppError;

    fn try_from(value: SaveVehicleRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            inventory_id: value.inventory_id.parse::<InventoryId>()?,
            plate: value.plate,
            chassis: value.chassis,
            renavam: value.renavam,
            brand: value.brand,
            model: value.model,
            color: value.color,
            engine_number: value.engine_number,
            status: value.status,
            manufacture_year: value.manufacture_year,
            model_year: value.model_year,
            doors: value.doors,
            owner_tax_id: value.owner_tax_id,
            mileage: value.mileage,
            entry_value: value.entry_value,
            fipe_value: value.fipe_value,
        })
    }
}

/// Optional filters for the vehicle list.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleListQuery {
    /// Matches plate, brand or model.
    pub search: Option<String>,
}

/// API representation of a vehicle.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/vehicle-response.ts"
)]
pub struct VehicleResponse {
    pub id: String,
    pub inventory_id: String,
    pub plate: String,
    pub chassis: String,
    pub renavam: Option<String>,
    pub brand: String,
    pub model: String,
    pub color: Option<String>,
    pub engine_number: Option<String>,
    pub status: Option<String>,
    pub manufacture_year: Option<i32>,
    pub model_year: Option<i32>,
    pub doors: Option<i32>,
    pub owner_tax_id: Option<String>,
    pub mileage: Option<i64>,
    pub entry_value: Option<f64>,
    pub fipe_value: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VehicleRecord> for VehicleResponse {
    fn from(value: VehicleRecord) -> Self {
        Self {
            id: value.id.to_string(),
            inventory_id: value.inventory_id.to_string(),
            plate: value.plate.into(),
            chassis: value.chassis,
            renavam: value.renavam,
            brand: value.brand,
            model: value.model,
            color: value.color,
            engine_number: value.engine_number,
            status: value.status,
            manufacture_year: value.manufacture_year,
            model_year: value.model_year,
            doors: value.doors,
            owner_tax_id: value.owner_tax_id.map(String::from),
            mileage: value.mileage,
            entry_value: value.entry_value,
            fipe_value: value.fipe_value,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
