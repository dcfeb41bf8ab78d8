use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use dealerdesk_application::{AccessContext, SaveVehicleInput};
use dealerdesk_core::VehicleId;
use serde::Deserialize;

use crate::dto::{SaveVehicleRequest, VehicleListQuery, VehicleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VehiclePath {
    vehicle_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PlatePath {
    plate: String,
}

pub async fn list_vehicles_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<VehicleListQuery>,
) -> ApiResult<Json<Vec<VehicleResponse>>> {
    let vehicles = state
        .vehicle_service
        .list(&context, query.search.as_deref())
        .await?
        .into_iter()
        .map(VehicleResponse::from)
        .collect();

    Ok(Json(vehicles))
}

pub async fn vehicle_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<VehiclePath>,
) -> ApiResult<Json<VehicleResponse>> {
    let vehicle = state
        .vehicle_service
        .get(&context, path.vehicle_id.parse::<VehicleId>()?)
        .await?;

    Ok(Json(VehicleResponse::from(vehicle)))
}

pub async fn vehicle_by_plate_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<PlatePath>,
) -> ApiResult<Json<VehicleResponse>> {
    let vehicle = state
        .vehicle_service
        .find_by_plate(&context, &path.plate)
        .await?;

    Ok(Json(VehicleResponse::from(vehicle)))
}

pub async fn create_vehicle_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Json(payload): Json<SaveVehicleRequest>,
) -> ApiResult<(StatusCode, Json<VehicleResponse>)> {
    let vehicle = state
        .vehicle_service
        .create(&context, SaveVehicleInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(VehicleResponse::from(vehicle))))
}

pub async fn update_vehicle_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<VehiclePath>,
    Json(payload): Json<SaveVehicleRequest>,
) -> ApiResult<Json<VehicleResponse>> {
    let vehicle = state
        .vehicle_service
        .update(
            &context,
            path.vehicle_id.parse::<VehicleId>()?,
            SaveVehicleInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(VehicleResponse::from(vehicle)))
}

pub async fn delete_vehicle_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(path): Path<VehiclePath>,
) -> ApiResult<StatusCode> {
    state
        .vehicle_service
        .delete(&context, path.vehicle_id.parse::<VehicleId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
